//! PIN block types
//!
//! PIN material and blocks are held in fixed-size buffers that clear their
//! memory on drop.

use crate::error::PinBlockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PIN block size in bytes for ISO 9564-1:2017 formats 0, 1, 2 and 3
pub const PINBLOCK_SIZE: usize = 8;

/// PIN field and PAN field size in bytes for ISO 9564-1:2017 format 4
pub const PINBLOCK128_SIZE: usize = 16;

/// Minimum PIN length (ISO 9564-1:2017 8.1)
pub const PIN_MIN_LEN: usize = 4;

/// Maximum PIN length (ISO 9564-1:2017 8.1)
pub const PIN_MAX_LEN: usize = 12;

/// PIN block formats (ISO 9564-1:2017 9.3)
///
/// The format number is the control field in the most significant nibble of
/// the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PinBlockFormat {
    /// PIN masked with the PAN field, `0xF` fill
    Format0 = 0,
    /// PIN followed by a transaction nonce, no PAN
    Format1 = 1,
    /// PIN with `0xF` fill, for offline PIN verification only
    Format2 = 2,
    /// PIN and `[0xA, 0xF]` random fill, masked with the PAN field
    Format3 = 3,
    /// 128-bit PIN field for AES, with a separate PAN field
    Format4 = 4,
}

impl PinBlockFormat {
    /// Parse from the control field nibble
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0 => Some(Self::Format0),
            1 => Some(Self::Format1),
            2 => Some(Self::Format2),
            3 => Some(Self::Format3),
            4 => Some(Self::Format4),
            _ => None,
        }
    }

    /// Control field nibble for this format
    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// Size in bytes of a block of this format
    pub fn block_size(self) -> usize {
        match self {
            Self::Format0 | Self::Format1 | Self::Format2 | Self::Format3 => PINBLOCK_SIZE,
            Self::Format4 => PINBLOCK128_SIZE,
        }
    }

    /// Whether decoding needs the PAN
    pub fn requires_pan(self) -> bool {
        match self {
            Self::Format0 | Self::Format3 => true,
            Self::Format1 | Self::Format2 | Self::Format4 => false,
        }
    }
}

impl fmt::Display for PinBlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "format {}", self.nibble())
    }
}

/// Validate PIN length and digits
pub(crate) fn validate_pin(pin: &[u8]) -> Result<(), PinBlockError> {
    if pin.is_empty() {
        return Err(PinBlockError::InvalidArgument("PIN is empty"));
    }
    if !(PIN_MIN_LEN..=PIN_MAX_LEN).contains(&pin.len()) {
        return Err(PinBlockError::InvalidPinLength { len: pin.len() });
    }
    if let Some(position) = pin.iter().position(|&d| d > 9) {
        return Err(PinBlockError::InvalidPinDigit { position });
    }
    Ok(())
}

/// Decoded PIN (4 to 12 digit values) that zeroizes on drop
///
/// `Debug` prints the length only.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pin {
    digits: [u8; PIN_MAX_LEN],
    len: usize,
}

impl Pin {
    /// Create a PIN from digit values (one digit per byte)
    pub fn from_digits(digits: &[u8]) -> Result<Self, PinBlockError> {
        validate_pin(digits)?;
        let mut pin = Pin {
            digits: [0u8; PIN_MAX_LEN],
            len: digits.len(),
        };
        pin.digits[..digits.len()].copy_from_slice(digits);
        Ok(pin)
    }

    /// Create a PIN from ASCII decimal text such as `"1234"`
    pub fn from_ascii(text: &str) -> Result<Self, PinBlockError> {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return Err(PinBlockError::InvalidArgument("PIN is empty"));
        }
        if !(PIN_MIN_LEN..=PIN_MAX_LEN).contains(&bytes.len()) {
            return Err(PinBlockError::InvalidPinLength { len: bytes.len() });
        }
        let mut pin = Pin {
            digits: [0u8; PIN_MAX_LEN],
            len: bytes.len(),
        };
        for (i, &c) in bytes.iter().enumerate() {
            if !c.is_ascii_digit() {
                return Err(PinBlockError::InvalidPinDigit { position: i });
            }
            pin.digits[i] = c - b'0';
        }
        Ok(pin)
    }

    /// Zeroed PIN of `len` digits, filled in place by the decoders
    pub(crate) fn zeroed(len: usize) -> Self {
        debug_assert!(len <= PIN_MAX_LEN);
        Pin {
            digits: [0u8; PIN_MAX_LEN],
            len,
        }
    }

    pub(crate) fn digits_mut(&mut self) -> &mut [u8] {
        &mut self.digits[..self.len]
    }

    /// Digit values of the PIN
    pub fn as_digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed PIN
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Pin {
    fn as_ref(&self) -> &[u8] {
        self.as_digits()
    }
}

impl PartialEq for Pin {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && bool::from(self.as_digits().ct_eq(other.as_digits()))
    }
}

impl Eq for Pin {}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pin")
            .field("len", &self.len)
            .field("digits", &"<redacted>")
            .finish()
    }
}

/// 64-bit PIN block (formats 0 to 3) that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct PinBlock(pub(crate) [u8; PINBLOCK_SIZE]);

impl PinBlock {
    /// Create a PIN block from an 8-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PinBlockError> {
        if bytes.len() != PINBLOCK_SIZE {
            return Err(PinBlockError::UnsupportedBlockSize { got: bytes.len() });
        }
        let mut block = [0u8; PINBLOCK_SIZE];
        block.copy_from_slice(bytes);
        Ok(PinBlock(block))
    }

    /// Get a reference to the block bytes
    pub fn as_bytes(&self) -> &[u8; PINBLOCK_SIZE] {
        &self.0
    }

    /// Declared format of this block, if recognised
    pub fn format(&self) -> Option<PinBlockFormat> {
        crate::dispatch::get_format(&self.0)
    }
}

impl AsRef<[u8]> for PinBlock {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PinBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PinBlock({:02X?})", self.0)
    }
}

/// 128-bit field (format 4 PIN field or PAN field) that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct Block128(pub(crate) [u8; PINBLOCK128_SIZE]);

impl Block128 {
    /// Create a field from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PinBlockError> {
        if bytes.len() != PINBLOCK128_SIZE {
            return Err(PinBlockError::UnsupportedBlockSize { got: bytes.len() });
        }
        let mut block = [0u8; PINBLOCK128_SIZE];
        block.copy_from_slice(bytes);
        Ok(Block128(block))
    }

    /// Get a reference to the field bytes
    pub fn as_bytes(&self) -> &[u8; PINBLOCK128_SIZE] {
        &self.0
    }

    /// Declared format of this field, if it is a format 4 PIN field
    pub fn format(&self) -> Option<PinBlockFormat> {
        crate::dispatch::get_format(&self.0)
    }
}

impl AsRef<[u8]> for Block128 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Block128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block128({:02X?})", self.0)
    }
}

/// Result of generic PIN block decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPinBlock {
    /// Format declared by the block
    pub format: PinBlockFormat,
    /// Decoded PIN
    pub pin: Pin,
}
