//! ISO 9564-1:2017 PIN block format strategies
//!
//! Each format module exposes public `encode_*` / `decode_*` functions that use
//! the default [`CodecConfig`](crate::CodecConfig) and the operating system
//! RNG, and crate-internal `encode` / `decode` functions used by
//! [`PinBlockCodec`](crate::PinBlockCodec).
//!
//! Decoders reject, in this order: a block of the wrong size, a block that
//! declares another format, and a PIN length nibble outside 4..=12.

pub mod format0;
pub mod format1;
pub mod format2;
pub mod format3;
pub mod format4;

use crate::error::PinBlockError;
use crate::nibble::{digit_at, format_nibble, length_nibble, unpack_pin, DIGIT_NIBBLES};
use crate::types::{Pin, PinBlockFormat, PIN_MAX_LEN, PIN_MIN_LEN};
use subtle::ConstantTimeEq;

/// Validate block size, format tag and PIN length nibble
///
/// Returns the declared PIN length.
pub(crate) fn check_header(block: &[u8], expected: PinBlockFormat) -> Result<usize, PinBlockError> {
    if block.is_empty() {
        return Err(PinBlockError::InvalidArgument("PIN block is empty"));
    }
    if block.len() != expected.block_size() {
        return Err(PinBlockError::UnsupportedBlockSize { got: block.len() });
    }

    // First 4 bits are the control field (ISO 9564-1:2017 9.3.1)
    let found = format_nibble(block);
    if found != expected.nibble() {
        return Err(PinBlockError::WrongFormat { expected, found });
    }

    let pin_len = length_nibble(block);
    if !(PIN_MIN_LEN..=PIN_MAX_LEN).contains(&pin_len) {
        return Err(PinBlockError::InvalidPinLength { len: pin_len });
    }
    Ok(pin_len)
}

/// Position of the first PIN digit that is not decimal
pub(crate) fn find_invalid_digit(field: &[u8], pin_len: usize) -> Option<usize> {
    (0..pin_len).find(|&i| digit_at(field, i) > 9)
}

/// Whether every nibble after the PIN in the 8-byte field satisfies `is_fill`
pub(crate) fn fill_matches(field: &[u8], pin_len: usize, is_fill: impl Fn(u8) -> bool) -> bool {
    (pin_len..DIGIT_NIBBLES).all(|i| is_fill(digit_at(field, i)))
}

/// Consistency check of a PIN field unmasked with a PAN field (formats 0, 3)
///
/// The PAN field never reaches the first two bytes, so they must be unchanged
/// by unmasking. Then every PIN digit must be decimal and every fill nibble
/// must satisfy `is_fill`. A PAN that differs from the one used at encode time
/// normally breaks the fill or the digits.
pub(crate) fn verify_unmasked(
    format: PinBlockFormat,
    block: &[u8],
    pin_field: &[u8],
    pin_len: usize,
    is_fill: impl Fn(u8) -> bool,
) -> Result<(), PinBlockError> {
    let header_ok: bool = block[..2].ct_eq(&pin_field[..2]).into();
    let mut valid = header_ok;
    for i in 0..DIGIT_NIBBLES {
        let digit = digit_at(pin_field, i);
        valid &= if i < pin_len { digit <= 9 } else { is_fill(digit) };
    }

    if valid {
        Ok(())
    } else {
        tracing::warn!(%format, "PIN block mask integrity check failed");
        Err(PinBlockError::MaskIntegrityFailure)
    }
}

/// Copy `pin_len` digits out of a validated PIN field
pub(crate) fn extract_pin(field: &[u8], pin_len: usize) -> Pin {
    let mut pin = Pin::zeroed(pin_len);
    unpack_pin(field, pin.digits_mut());
    pin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_header_order() {
        // Size is checked before the format tag
        assert_eq!(
            check_header(&[0x34; 7], PinBlockFormat::Format2).unwrap_err(),
            PinBlockError::UnsupportedBlockSize { got: 7 }
        );
        // Format tag is checked before the PIN length
        assert_eq!(
            check_header(&[0x3F; 8], PinBlockFormat::Format2).unwrap_err(),
            PinBlockError::WrongFormat {
                expected: PinBlockFormat::Format2,
                found: 3
            }
        );
        assert_eq!(
            check_header(&[0x2D; 8], PinBlockFormat::Format2).unwrap_err(),
            PinBlockError::InvalidPinLength { len: 13 }
        );
        assert_eq!(
            check_header(&[0x23; 8], PinBlockFormat::Format2).unwrap_err(),
            PinBlockError::InvalidPinLength { len: 3 }
        );
        assert_eq!(check_header(&[0x2C; 8], PinBlockFormat::Format2).unwrap(), 12);
        assert!(matches!(
            check_header(&[], PinBlockFormat::Format0),
            Err(PinBlockError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_digit_and_fill_checks() {
        let field = [0x25, 0x34, 0x56, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(find_invalid_digit(&field, 5), None);
        assert_eq!(find_invalid_digit(&field, 6), Some(5));
        assert!(fill_matches(&field, 5, |n| n == 0xF));
        assert!(!fill_matches(&field, 4, |n| n == 0xF));
    }

    #[test]
    fn test_extract_pin() {
        let field = [0x25, 0x34, 0x56, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(extract_pin(&field, 5).as_digits(), &[3, 4, 5, 6, 7]);
    }
}
