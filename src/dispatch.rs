//! Format detection and generic decoding

use crate::config::CodecConfig;
use crate::error::PinBlockError;
use crate::format::{format0, format1, format2, format3, format4};
use crate::nibble::format_nibble;
use crate::types::{DecodedPinBlock, PinBlockFormat, PINBLOCK128_SIZE, PINBLOCK_SIZE};

/// Retrieve the format of a PIN block
///
/// Returns `None` when the length is not a known block size or the control
/// field is not a format that uses blocks of that size.
pub fn get_format(block: &[u8]) -> Option<PinBlockFormat> {
    if block.len() != PINBLOCK_SIZE && block.len() != PINBLOCK128_SIZE {
        return None;
    }
    PinBlockFormat::from_nibble(format_nibble(block))
        .filter(|format| format.block_size() == block.len())
}

/// Decode a PIN block of any supported format
///
/// `other` is the secondary field needed by some formats: the compressed
/// numeric PAN for formats 0 and 3. It is ignored by the other formats.
pub fn decode(block: &[u8], other: Option<&[u8]>) -> Result<DecodedPinBlock, PinBlockError> {
    decode_with_config(block, other, &CodecConfig::default())
}

pub(crate) fn decode_with_config(
    block: &[u8],
    other: Option<&[u8]>,
    config: &CodecConfig,
) -> Result<DecodedPinBlock, PinBlockError> {
    if block.is_empty() {
        return Err(PinBlockError::InvalidArgument("PIN block is empty"));
    }
    if block.len() != PINBLOCK_SIZE && block.len() != PINBLOCK128_SIZE {
        tracing::debug!(size = block.len(), "unsupported PIN block size");
        return Err(PinBlockError::UnsupportedBlockSize { got: block.len() });
    }

    let format = get_format(block).ok_or_else(|| PinBlockError::UnknownFormat {
        found: format_nibble(block),
        size: block.len(),
    })?;
    tracing::debug!(%format, "decoding PIN block");

    let pan: &[u8] = match other {
        Some(pan) => pan,
        None if format.requires_pan() => {
            return Err(PinBlockError::InvalidArgument("PAN required for this format"));
        }
        None => &[],
    };
    let pin = match format {
        PinBlockFormat::Format0 => format0::decode(block, pan, config),
        PinBlockFormat::Format1 => format1::decode(block),
        PinBlockFormat::Format2 => format2::decode(block, config),
        PinBlockFormat::Format3 => format3::decode(block, pan, config),
        PinBlockFormat::Format4 => format4::decode_pin_field(block, config),
    }
    .map_err(|e| {
        tracing::debug!(%format, error = %e, "PIN block rejected");
        e
    })?;

    Ok(DecodedPinBlock { format, pin })
}
