//! ISO 9564-1:2017 format 3 (ISO-3)
//!
//! Like format 0, but the fill nibbles are random values in `[0xA, 0xF]`, so
//! the same PIN and PAN never produce the same block twice.

use super::{check_header, extract_pin, verify_unmasked};
use crate::config::CodecConfig;
use crate::error::PinBlockError;
use crate::nibble::{pack_padding, pack_pin, xor_in_place};
use crate::nonce::build_format3_nonce;
use crate::pan::{build_pan_field, Pan};
use crate::types::{validate_pin, Pin, PinBlock, PinBlockFormat, PINBLOCK_SIZE};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Encode a format 3 PIN block
pub fn encode_format3(pin: &[u8], pan: &[u8]) -> Result<PinBlock, PinBlockError> {
    encode(pin, pan, &CodecConfig::default(), &mut OsRng)
}

/// Encode a format 3 PIN block using `rng` for the fill nibbles
pub fn encode_format3_with_rng<R: RngCore + CryptoRng>(
    pin: &[u8],
    pan: &[u8],
    rng: &mut R,
) -> Result<PinBlock, PinBlockError> {
    encode(pin, pan, &CodecConfig::default(), rng)
}

/// Decode a format 3 PIN block with the PAN used to build it
pub fn decode_format3(block: &[u8], pan: &[u8]) -> Result<Pin, PinBlockError> {
    decode(block, pan, &CodecConfig::default())
}

pub(crate) fn encode<R: RngCore + CryptoRng>(
    pin: &[u8],
    pan: &[u8],
    config: &CodecConfig,
    rng: &mut R,
) -> Result<PinBlock, PinBlockError> {
    validate_pin(pin)?;
    let pan = Pan::from_compressed(pan)?;
    let pan_field = build_pan_field(&pan, config.short_pan_policy)?;
    let nonce = build_format3_nonce(rng);

    // See ISO 9564-1:2017 9.3.5
    let mut block = PinBlock([0u8; PINBLOCK_SIZE]);
    pack_pin(&mut block.0, PinBlockFormat::Format3, pin, 0xA);
    pack_padding(&mut block.0, pin.len(), nonce.as_slice());
    xor_in_place(&mut block.0, pan_field.as_slice());
    Ok(block)
}

pub(crate) fn decode(block: &[u8], pan: &[u8], config: &CodecConfig) -> Result<Pin, PinBlockError> {
    let pin_len = check_header(block, PinBlockFormat::Format3)?;
    let pan = Pan::from_compressed(pan)?;
    let pan_field = build_pan_field(&pan, config.short_pan_policy)?;

    let mut pin_field = Zeroizing::new([0u8; PINBLOCK_SIZE]);
    pin_field.copy_from_slice(block);
    xor_in_place(pin_field.as_mut_slice(), pan_field.as_slice());

    verify_unmasked(
        PinBlockFormat::Format3,
        block,
        pin_field.as_slice(),
        pin_len,
        |nibble| (0xA..=0xF).contains(&nibble),
    )?;
    Ok(extract_pin(pin_field.as_slice(), pin_len))
}
