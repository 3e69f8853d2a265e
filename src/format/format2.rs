//! ISO 9564-1:2017 format 2 (ISO-2)
//!
//! Unmasked PIN with `0xF` fill. Only for offline PIN verification between a
//! terminal and an ICC.

use super::{check_header, extract_pin, fill_matches, find_invalid_digit};
use crate::config::CodecConfig;
use crate::error::PinBlockError;
use crate::nibble::pack_pin;
use crate::types::{validate_pin, Pin, PinBlock, PinBlockFormat, PINBLOCK_SIZE};

const FILL_DIGIT: u8 = 0xF;

/// Encode a format 2 PIN block
pub fn encode_format2(pin: &[u8]) -> Result<PinBlock, PinBlockError> {
    encode(pin)
}

/// Decode a format 2 PIN block, verifying the fill digits
pub fn decode_format2(block: &[u8]) -> Result<Pin, PinBlockError> {
    decode(block, &CodecConfig::default())
}

pub(crate) fn encode(pin: &[u8]) -> Result<PinBlock, PinBlockError> {
    validate_pin(pin)?;

    // See ISO 9564-1:2017 9.3.4
    let mut block = PinBlock([0u8; PINBLOCK_SIZE]);
    pack_pin(&mut block.0, PinBlockFormat::Format2, pin, FILL_DIGIT);
    Ok(block)
}

pub(crate) fn decode(block: &[u8], config: &CodecConfig) -> Result<Pin, PinBlockError> {
    let pin_len = check_header(block, PinBlockFormat::Format2)?;
    if let Some(position) = find_invalid_digit(block, pin_len) {
        return Err(PinBlockError::InvalidPinDigit { position });
    }
    if config.verify_padding && !fill_matches(block, pin_len, |nibble| nibble == FILL_DIGIT) {
        tracing::debug!("format 2 fill digits altered");
        return Err(PinBlockError::InvalidPadding);
    }
    Ok(extract_pin(block, pin_len))
}
