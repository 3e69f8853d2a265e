//! ISO 9564-1:2017 format 1 (ISO-1)
//!
//! The PIN is followed by a transaction nonce. No PAN is involved, so the
//! block can be used where the PAN is not available.

use super::{check_header, extract_pin, find_invalid_digit};
use crate::error::PinBlockError;
use crate::nibble::{pack_padding, pack_pin};
use crate::nonce::{build_format1_padding, padding_len};
use crate::types::{validate_pin, Pin, PinBlock, PinBlockFormat, PINBLOCK_SIZE};
use rand::{rngs::OsRng, CryptoRng, RngCore};

/// Encode a format 1 PIN block
///
/// With `nonce = None` the padding is random. A supplied nonce, such as a
/// transaction sequence number, must be at least `7 - pin.len() / 2` bytes.
pub fn encode_format1(pin: &[u8], nonce: Option<&[u8]>) -> Result<PinBlock, PinBlockError> {
    encode(pin, nonce, &mut OsRng)
}

/// Encode a format 1 PIN block using `rng` for random padding
pub fn encode_format1_with_rng<R: RngCore + CryptoRng>(
    pin: &[u8],
    nonce: Option<&[u8]>,
    rng: &mut R,
) -> Result<PinBlock, PinBlockError> {
    encode(pin, nonce, rng)
}

/// Decode a format 1 PIN block
pub fn decode_format1(block: &[u8]) -> Result<Pin, PinBlockError> {
    decode(block)
}

pub(crate) fn encode<R: RngCore + CryptoRng>(
    pin: &[u8],
    nonce: Option<&[u8]>,
    rng: &mut R,
) -> Result<PinBlock, PinBlockError> {
    validate_pin(pin)?;
    let padding = build_format1_padding(pin.len(), nonce, rng)?;

    // See ISO 9564-1:2017 9.3.3
    let mut block = PinBlock([0u8; PINBLOCK_SIZE]);
    pack_pin(&mut block.0, PinBlockFormat::Format1, pin, 0x0);
    pack_padding(&mut block.0, pin.len(), &padding[..padding_len(pin.len())]);
    Ok(block)
}

pub(crate) fn decode(block: &[u8]) -> Result<Pin, PinBlockError> {
    let pin_len = check_header(block, PinBlockFormat::Format1)?;
    if let Some(position) = find_invalid_digit(block, pin_len) {
        return Err(PinBlockError::InvalidPinDigit { position });
    }
    Ok(extract_pin(block, pin_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PIN: [u8; 5] = [1, 2, 3, 4, 5];
    const NONCE: [u8; 8] = [0x9A, 0x33, 0xC5, 0x6F, 0x87, 0xA9, 0xCB, 0xED];
    const BLOCK: [u8; 8] = [0x15, 0x12, 0x34, 0x5E, 0xDC, 0xBA, 0x98, 0x76];

    #[test]
    fn test_encode_with_nonce() {
        let block = encode_format1(&PIN, Some(&NONCE)).unwrap();
        assert_eq!(block.as_bytes(), &BLOCK);
    }

    #[test]
    fn test_encode_random_nonce_is_unique() {
        let a = encode_format1(&PIN, None).unwrap();
        let b = encode_format1(&PIN, None).unwrap();
        assert_eq!(&a.as_bytes()[..3], &BLOCK[..3]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_encode_with_seeded_rng_is_reproducible() {
        let a = encode_format1_with_rng(&PIN, None, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = encode_format1_with_rng(&PIN, None, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_short_nonce() {
        assert_eq!(
            encode_format1(&PIN, Some(&NONCE[..4])).unwrap_err(),
            PinBlockError::InvalidNonceLength {
                required: 5,
                got: 4
            }
        );
    }

    #[test]
    fn test_decode() {
        let pin = decode_format1(&BLOCK).unwrap();
        assert_eq!(pin.as_digits(), &PIN);
    }

    #[test]
    fn test_decode_rejects_non_decimal_digit() {
        let mut block = BLOCK;
        block[1] = 0x1B;
        assert_eq!(
            decode_format1(&block).unwrap_err(),
            PinBlockError::InvalidPinDigit { position: 1 }
        );
    }

    #[test]
    fn test_decode_twelve_digit_pin() {
        let pin = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 9, 8];
        let block = encode_format1(&pin, Some(&[0xAB])).unwrap();
        assert_eq!(block.as_bytes()[7], 0xAB);
        assert_eq!(decode_format1(block.as_bytes()).unwrap().as_digits(), &pin);
    }
}
