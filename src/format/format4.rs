//! ISO 9564-1:2017 format 4 (ISO-4)
//!
//! Format 4 is built for 128-bit block ciphers. The PIN field and the PAN
//! field are produced separately; combining them with AES is left to the
//! caller.
//!
//! PIN field layout: control field `4`, PIN length, PIN digits and `0xA` fill
//! up to byte 7, then 8 random bytes.

use super::{check_header, extract_pin, fill_matches, find_invalid_digit};
use crate::config::CodecConfig;
use crate::error::PinBlockError;
use crate::nibble::pack_pin;
use crate::pan::{build_format4_pan_field, Pan};
use crate::types::{validate_pin, Block128, Pin, PinBlockFormat, PINBLOCK128_SIZE, PINBLOCK_SIZE};
use rand::{rngs::OsRng, CryptoRng, RngCore};

const FILL_DIGIT: u8 = 0xA;

/// Encode a format 4 PIN field
pub fn encode_format4_pin_field(pin: &[u8]) -> Result<Block128, PinBlockError> {
    encode_pin_field(pin, &mut OsRng)
}

/// Encode a format 4 PIN field using `rng` for the random half
pub fn encode_format4_pin_field_with_rng<R: RngCore + CryptoRng>(
    pin: &[u8],
    rng: &mut R,
) -> Result<Block128, PinBlockError> {
    encode_pin_field(pin, rng)
}

/// Encode a format 4 PAN field from a compressed numeric PAN
pub fn encode_format4_pan_field(pan: &[u8]) -> Result<Block128, PinBlockError> {
    encode_pan_field(pan)
}

/// Decode a format 4 PIN field
///
/// Only the PIN field itself is checked; a PAN field cannot be validated in
/// isolation.
pub fn decode_format4_pin_field(field: &[u8]) -> Result<Pin, PinBlockError> {
    decode_pin_field(field, &CodecConfig::default())
}

pub(crate) fn encode_pin_field<R: RngCore + CryptoRng>(
    pin: &[u8],
    rng: &mut R,
) -> Result<Block128, PinBlockError> {
    validate_pin(pin)?;

    // See ISO 9564-1:2017 9.4.2.2
    let mut field = Block128([0u8; PINBLOCK128_SIZE]);
    pack_pin(&mut field.0[..PINBLOCK_SIZE], PinBlockFormat::Format4, pin, FILL_DIGIT);
    rng.fill_bytes(&mut field.0[PINBLOCK_SIZE..]);
    Ok(field)
}

pub(crate) fn encode_pan_field(pan: &[u8]) -> Result<Block128, PinBlockError> {
    let pan = Pan::from_compressed(pan)?;
    Ok(build_format4_pan_field(&pan))
}

pub(crate) fn decode_pin_field(field: &[u8], config: &CodecConfig) -> Result<Pin, PinBlockError> {
    let pin_len = check_header(field, PinBlockFormat::Format4)?;
    if let Some(position) = find_invalid_digit(field, pin_len) {
        return Err(PinBlockError::InvalidPinDigit { position });
    }
    if config.verify_padding && !fill_matches(field, pin_len, |nibble| nibble == FILL_DIGIT) {
        tracing::debug!("format 4 fill digits altered");
        return Err(PinBlockError::InvalidPadding);
    }
    Ok(extract_pin(field, pin_len))
}
