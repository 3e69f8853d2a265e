//! Nonce padding for formats 1 and 3
//!
//! Both formats fill the PIN field after the last PIN digit with unpredictable
//! nibbles so that identical PINs do not produce identical blocks.

use crate::error::PinBlockError;
use crate::types::PINBLOCK_SIZE;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Format 3 nonce size in bytes (10 nibbles, enough for a 4-digit PIN)
pub(crate) const FORMAT3_NONCE_SIZE: usize = 5;

/// Number of padding bytes following a PIN of `pin_len` digits
///
/// This covers the PIN field after byte 0 and the packed PIN, rounded so an
/// odd-length PIN shares its last byte with the first padding nibble.
pub(crate) fn padding_len(pin_len: usize) -> usize {
    PINBLOCK_SIZE - 1 - pin_len / 2
}

/// Build the format 1 padding (ISO 9564-1:2017 9.3.3.2)
///
/// Without a nonce, the padding is random. A caller nonce must cover the whole
/// padding; its last `padding_len` bytes are used in reverse order, so that a
/// big-endian transaction counter contributes its fastest changing bytes to
/// the first padding nibbles.
pub(crate) fn build_format1_padding<R: RngCore + CryptoRng>(
    pin_len: usize,
    nonce: Option<&[u8]>,
    rng: &mut R,
) -> Result<Zeroizing<[u8; PINBLOCK_SIZE]>, PinBlockError> {
    let required = padding_len(pin_len);
    let mut padding = Zeroizing::new([0u8; PINBLOCK_SIZE]);

    match nonce {
        Some(nonce) => {
            if nonce.len() < required {
                return Err(PinBlockError::InvalidNonceLength {
                    required,
                    got: nonce.len(),
                });
            }
            for (dst, src) in padding[..required].iter_mut().zip(nonce.iter().rev()) {
                *dst = *src;
            }
        }
        None => rng.fill_bytes(&mut padding[..required]),
    }

    Ok(padding)
}

/// Build the format 3 nonce (ISO 9564-1:2017 9.3.5.2)
///
/// Every nibble is in `[0xA, 0xF]`. Each random byte is scaled with
/// `(b * 6) >> 8`, which slightly favours some values; existing test vectors
/// depend on this exact mapping.
pub(crate) fn build_format3_nonce<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Zeroizing<[u8; FORMAT3_NONCE_SIZE]> {
    let mut random = Zeroizing::new([0u8; FORMAT3_NONCE_SIZE * 2]);
    rng.fill_bytes(random.as_mut_slice());

    let mut nonce = Zeroizing::new([0u8; FORMAT3_NONCE_SIZE]);
    for (dst, pair) in nonce.iter_mut().zip(random.chunks_exact(2)) {
        *dst = (scale_to_fill_nibble(pair[0]) << 4) | scale_to_fill_nibble(pair[1]);
    }
    nonce
}

#[inline]
fn scale_to_fill_nibble(byte: u8) -> u8 {
    (((byte as u16 * 6) >> 8) as u8) + 0xA
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::{OsRng, StdRng};
    use rand::SeedableRng;

    const NONCE: [u8; 8] = [0x9A, 0x33, 0xC5, 0x6F, 0x87, 0xA9, 0xCB, 0xED];

    #[test]
    fn test_padding_len() {
        assert_eq!(padding_len(4), 5);
        assert_eq!(padding_len(5), 5);
        assert_eq!(padding_len(6), 4);
        assert_eq!(padding_len(12), 1);
    }

    #[test]
    fn test_format1_padding_reverses_nonce() {
        let padding = build_format1_padding(5, Some(&NONCE), &mut OsRng).unwrap();
        assert_eq!(&padding[..5], &[0xED, 0xCB, 0xA9, 0x87, 0x6F]);
        assert_eq!(&padding[5..], &[0, 0, 0]);
    }

    #[test]
    fn test_format1_padding_exact_nonce_length() {
        let padding = build_format1_padding(12, Some(&[0x42]), &mut OsRng).unwrap();
        assert_eq!(padding[0], 0x42);
    }

    #[test]
    fn test_format1_padding_short_nonce() {
        let err = build_format1_padding(4, Some(&NONCE[..4]), &mut OsRng).unwrap_err();
        assert_eq!(
            err,
            PinBlockError::InvalidNonceLength {
                required: 5,
                got: 4
            }
        );
    }

    #[test]
    fn test_format1_padding_random() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = build_format1_padding(4, None, &mut rng).unwrap();
        let b = build_format1_padding(4, None, &mut rng).unwrap();
        assert_ne!(&a[..5], &b[..5]);
    }

    #[test]
    fn test_scale_to_fill_nibble_range() {
        assert_eq!(scale_to_fill_nibble(0x00), 0xA);
        assert_eq!(scale_to_fill_nibble(0x2A), 0xA);
        assert_eq!(scale_to_fill_nibble(0x2B), 0xB);
        assert_eq!(scale_to_fill_nibble(0xFF), 0xF);
        for byte in 0..=u8::MAX {
            assert!((0xA..=0xF).contains(&scale_to_fill_nibble(byte)));
        }
    }

    #[test]
    fn test_format3_nonce_nibbles() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let nonce = build_format3_nonce(&mut rng);
            for byte in nonce.iter() {
                assert!(byte >> 4 >= 0xA);
                assert!(byte & 0x0F >= 0xA);
            }
        }
    }
}
