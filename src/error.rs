//! Error type for PIN block operations
//!
//! Every encode and decode entry point returns [`PinBlockError`]. The variants
//! are kinds, not numeric codes, so callers can tell a malformed input apart
//! from a block of the wrong format or a block that was masked with a
//! different PAN.
//!
//! # Example
//!
//! ```
//! use iso9564::{decode_format0, PinBlockError};
//!
//! let block = [0x04, 0x12, 0x74, 0xED, 0xCB, 0xA9, 0x87, 0x6F];
//! let wrong_pan = [0x40, 0x22, 0x34, 0x56, 0x78, 0x90, 0x9F];
//!
//! match decode_format0(&block, &wrong_pan) {
//!     Err(e) if e.is_integrity_failure() => { /* wrong PAN or tampered block */ }
//!     other => panic!("unexpected result: {:?}", other.map(|p| p.len())),
//! }
//! ```

use crate::types::PinBlockFormat;
use thiserror::Error;

/// Error type for all PIN block operations
///
/// # Error Categories
///
/// - **Input**: missing buffers, bad PIN length or digits, bad nonce, bad PAN
/// - **Format**: block size or format tag does not match the decoder
/// - **Integrity**: unmasked content is inconsistent (formats 0 and 3) or the
///   fill digits were altered (formats 2 and 4)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinBlockError {
    /// A required buffer was empty or missing
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// PIN length outside 4..=12, on encode or in a decoded length nibble
    #[error("Invalid PIN length: {len} (expected 4 to 12 digits)")]
    InvalidPinLength { len: usize },

    /// A PIN digit is not a decimal digit
    #[error("Invalid PIN digit at position {position}")]
    InvalidPinDigit { position: usize },

    /// Caller supplied nonce is shorter than the padding it must fill
    #[error("Invalid nonce length: need at least {required} bytes, got {got}")]
    InvalidNonceLength { required: usize, got: usize },

    /// Block length does not match any known format
    #[error("Unsupported PIN block size: {got} bytes")]
    UnsupportedBlockSize { got: usize },

    /// Block declares a different format than the decoder invoked
    #[error("Wrong PIN block format: expected {expected}, found {found}")]
    WrongFormat { expected: PinBlockFormat, found: u8 },

    /// Format tag is not valid for a block of this size
    #[error("Unknown PIN block format {found} for {size} byte block")]
    UnknownFormat { found: u8, size: usize },

    /// Unmasked PIN field is inconsistent with the supplied PAN
    #[error("PIN block mask integrity check failed")]
    MaskIntegrityFailure,

    /// Fill digits of an unmasked PIN field have been altered
    #[error("Invalid PIN block padding")]
    InvalidPadding,

    /// PAN is not valid compressed numeric
    #[error("Invalid PAN: {reason}")]
    InvalidPan { reason: &'static str },

    /// PAN is too short for the configured policy
    #[error("PAN too short: {digits} digits precede the check digit (12 required)")]
    ShortPan { digits: usize },
}

impl PinBlockError {
    /// Returns a suggestion for resolving this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::InvalidPinLength { .. } => Some("PINs must contain between 4 and 12 digits"),
            Self::InvalidNonceLength { .. } => {
                Some("Supply a longer nonce or none at all to use random padding")
            }
            Self::WrongFormat { .. } | Self::UnknownFormat { .. } => {
                Some("Use get_format() or decode() to detect the block format")
            }
            Self::MaskIntegrityFailure => {
                Some("Check that the PAN matches the one used to build the PIN block")
            }
            Self::InvalidPan { .. } => {
                Some("PAN must be compressed numeric: digits first, then 0xF fill nibbles")
            }
            Self::ShortPan { .. } => {
                Some("Use a PAN with at least 13 digits or relax the short PAN policy")
            }
            _ => None,
        }
    }

    /// Returns true if the error was caused by malformed caller input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::InvalidPinLength { .. }
                | Self::InvalidPinDigit { .. }
                | Self::InvalidNonceLength { .. }
                | Self::InvalidPan { .. }
                | Self::ShortPan { .. }
        )
    }

    /// Returns true if the block size or format tag was rejected
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedBlockSize { .. }
                | Self::WrongFormat { .. }
                | Self::UnknownFormat { .. }
        )
    }

    /// Returns true if the block content failed an integrity check
    ///
    /// Repeated integrity failures against the same account may indicate
    /// probing and are worth surfacing as security events.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::MaskIntegrityFailure | Self::InvalidPadding)
    }
}
