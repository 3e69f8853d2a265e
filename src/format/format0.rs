//! ISO 9564-1:2017 format 0 (ISO-0)
//!
//! The PIN field (`0xF` fill) is XORed with a PAN field built from the 12
//! rightmost PAN digits excluding the check digit.

use super::{check_header, extract_pin, verify_unmasked};
use crate::config::CodecConfig;
use crate::error::PinBlockError;
use crate::nibble::{pack_pin, xor_in_place};
use crate::pan::{build_pan_field, Pan};
use crate::types::{validate_pin, Pin, PinBlock, PinBlockFormat, PINBLOCK_SIZE};
use zeroize::Zeroizing;

const FILL_DIGIT: u8 = 0xF;

/// Encode a format 0 PIN block
///
/// `pin` holds one digit value per byte; `pan` is compressed numeric.
pub fn encode_format0(pin: &[u8], pan: &[u8]) -> Result<PinBlock, PinBlockError> {
    encode(pin, pan, &CodecConfig::default())
}

/// Decode a format 0 PIN block with the PAN used to build it
pub fn decode_format0(block: &[u8], pan: &[u8]) -> Result<Pin, PinBlockError> {
    decode(block, pan, &CodecConfig::default())
}

pub(crate) fn encode(
    pin: &[u8],
    pan: &[u8],
    config: &CodecConfig,
) -> Result<PinBlock, PinBlockError> {
    validate_pin(pin)?;
    let pan = Pan::from_compressed(pan)?;
    let pan_field = build_pan_field(&pan, config.short_pan_policy)?;

    // See ISO 9564-1:2017 9.3.2
    let mut block = PinBlock([0u8; PINBLOCK_SIZE]);
    pack_pin(&mut block.0, PinBlockFormat::Format0, pin, FILL_DIGIT);
    xor_in_place(&mut block.0, pan_field.as_slice());
    Ok(block)
}

pub(crate) fn decode(block: &[u8], pan: &[u8], config: &CodecConfig) -> Result<Pin, PinBlockError> {
    let pin_len = check_header(block, PinBlockFormat::Format0)?;
    let pan = Pan::from_compressed(pan)?;
    let pan_field = build_pan_field(&pan, config.short_pan_policy)?;

    let mut pin_field = Zeroizing::new([0u8; PINBLOCK_SIZE]);
    pin_field.copy_from_slice(block);
    xor_in_place(pin_field.as_mut_slice(), pan_field.as_slice());

    verify_unmasked(
        PinBlockFormat::Format0,
        block,
        pin_field.as_slice(),
        pin_len,
        |nibble| nibble == FILL_DIGIT,
    )?;
    Ok(extract_pin(pin_field.as_slice(), pin_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShortPanPolicy;

    const PIN: [u8; 4] = [1, 2, 3, 4];
    const PAN: [u8; 7] = [0x40, 0x12, 0x34, 0x56, 0x78, 0x90, 0x9F];
    const BAD_PAN: [u8; 7] = [0x40, 0x22, 0x34, 0x56, 0x78, 0x90, 0x9F];
    const BLOCK: [u8; 8] = [0x04, 0x12, 0x74, 0xED, 0xCB, 0xA9, 0x87, 0x6F];

    #[test]
    fn test_encode_vector() {
        let block = encode_format0(&PIN, &PAN).unwrap();
        assert_eq!(block.as_bytes(), &BLOCK);
    }

    #[test]
    fn test_decode_vector() {
        let pin = decode_format0(&BLOCK, &PAN).unwrap();
        assert_eq!(pin.as_digits(), &PIN);
    }

    #[test]
    fn test_decode_with_wrong_pan() {
        assert_eq!(
            decode_format0(&BLOCK, &BAD_PAN).unwrap_err(),
            PinBlockError::MaskIntegrityFailure
        );
    }

    #[test]
    fn test_decode_wrong_format() {
        let mut block = BLOCK;
        block[0] = 0x14;
        assert_eq!(
            decode_format0(&block, &PAN).unwrap_err(),
            PinBlockError::WrongFormat {
                expected: PinBlockFormat::Format0,
                found: 1
            }
        );
    }

    #[test]
    fn test_encode_rejects_bad_pin() {
        assert_eq!(
            encode_format0(&[1, 2, 3], &PAN).unwrap_err(),
            PinBlockError::InvalidPinLength { len: 3 }
        );
        assert_eq!(
            encode_format0(&[1, 2, 3, 0xA], &PAN).unwrap_err(),
            PinBlockError::InvalidPinDigit { position: 3 }
        );
        assert!(matches!(
            encode_format0(&PIN, &[]),
            Err(PinBlockError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_short_pan_policy() {
        let short_pan = [0x12, 0x34, 0x56, 0x7F];
        let config = CodecConfig {
            short_pan_policy: ShortPanPolicy::Reject,
            ..CodecConfig::default()
        };
        assert_eq!(
            encode(&PIN, &short_pan, &config).unwrap_err(),
            PinBlockError::ShortPan { digits: 6 }
        );

        let block = encode_format0(&PIN, &short_pan).unwrap();
        assert_eq!(decode_format0(block.as_bytes(), &short_pan).unwrap().as_digits(), &PIN);
        assert_eq!(
            decode(block.as_bytes(), &short_pan, &config).unwrap_err(),
            PinBlockError::ShortPan { digits: 6 }
        );
    }
}
