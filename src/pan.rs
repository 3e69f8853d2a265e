//! PAN parsing and PAN field construction
//!
//! PANs are supplied in compressed numeric format (EMV format "cn"): one
//! digit per nibble, left justified, padded with trailing `0xF` nibbles. This
//! is the same layout as EMV field `5A`.

use crate::config::ShortPanPolicy;
use crate::error::PinBlockError;
use crate::nibble::{nibble_at, set_nibble};
use crate::types::{Block128, PINBLOCK128_SIZE, PINBLOCK_SIZE};
use zeroize::Zeroizing;

/// Maximum PAN length (ISO/IEC 7812-1)
pub const PAN_MAX_DIGITS: usize = 19;

/// PAN digits that enter the format 0 and 3 PAN field
const PAN_FIELD_DIGITS: usize = 12;

/// Validated view over a compressed numeric PAN
#[derive(Clone, Copy)]
pub struct Pan<'a> {
    bytes: &'a [u8],
    digits: usize,
}

impl<'a> Pan<'a> {
    /// Parse a compressed numeric PAN
    ///
    /// Accepts 1 to 19 decimal digits followed only by `0xF` fill nibbles.
    pub fn from_compressed(bytes: &'a [u8]) -> Result<Self, PinBlockError> {
        if bytes.is_empty() {
            return Err(PinBlockError::InvalidArgument("PAN is empty"));
        }

        let mut digits = 0;
        let mut fill_seen = false;
        for position in 0..bytes.len() * 2 {
            let nibble = nibble_at(bytes, position);
            if nibble == 0xF {
                fill_seen = true;
            } else if fill_seen {
                return Err(PinBlockError::InvalidPan {
                    reason: "digit after fill nibble",
                });
            } else if nibble > 9 {
                return Err(PinBlockError::InvalidPan {
                    reason: "non-decimal nibble",
                });
            } else {
                digits += 1;
            }
        }

        if digits == 0 {
            return Err(PinBlockError::InvalidPan { reason: "no digits" });
        }
        if digits > PAN_MAX_DIGITS {
            return Err(PinBlockError::InvalidPan {
                reason: "more than 19 digits",
            });
        }

        Ok(Self { bytes, digits })
    }

    /// Number of PAN digits, check digit included
    pub fn digit_count(&self) -> usize {
        self.digits
    }

    /// Digit at `index`, counting from the leftmost digit
    ///
    /// Returns `None` for fill nibbles and positions past the end.
    pub fn digit(&self, index: usize) -> Option<u8> {
        (index < self.digits).then(|| nibble_at(self.bytes, index))
    }

    /// Rightmost digit
    pub fn check_digit(&self) -> u8 {
        self.digit_unchecked(self.digits - 1)
    }

    // Callers keep `index < self.digits`
    fn digit_unchecked(&self, index: usize) -> u8 {
        nibble_at(self.bytes, index)
    }

    /// Number of digits preceding the check digit
    pub fn account_digits(&self) -> usize {
        self.digits - 1
    }
}

impl std::fmt::Debug for Pan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pan")
            .field("digits", &self.digits)
            .finish_non_exhaustive()
    }
}

/// Build the PAN field for formats 0 and 3 (ISO 9564-1:2017 9.3.2.3, 9.3.5.3)
///
/// The field holds the 12 digits immediately preceding the check digit,
/// right justified and left padded with zero nibbles when the PAN is shorter.
pub(crate) fn build_pan_field(
    pan: &Pan<'_>,
    policy: ShortPanPolicy,
) -> Result<Zeroizing<[u8; PINBLOCK_SIZE]>, PinBlockError> {
    let available = pan.account_digits();
    if available < PAN_FIELD_DIGITS {
        match policy {
            ShortPanPolicy::Allow => {
                tracing::debug!(digits = available, "PAN field zero padded");
            }
            ShortPanPolicy::Reject => {
                return Err(PinBlockError::ShortPan { digits: available });
            }
        }
    }

    let mut field = Zeroizing::new([0u8; PINBLOCK_SIZE]);
    let last_position = PINBLOCK_SIZE * 2 - 1;
    // Walk leftwards from the digit just before the check digit
    for offset in 0..available.min(PAN_FIELD_DIGITS) {
        let digit = pan.digit_unchecked(available - 1 - offset);
        set_nibble(field.as_mut_slice(), last_position - offset, digit);
    }
    Ok(field)
}

/// Build the format 4 PAN field (ISO 9564-1:2017 9.4.2.3)
///
/// The first nibble `M` is the number of PAN digits beyond 12. Shorter PANs
/// are right justified in nibbles 1 to 12 with `M = 0`; longer PANs are left
/// justified from nibble 1. The check digit is part of the field.
pub(crate) fn build_format4_pan_field(pan: &Pan<'_>) -> Block128 {
    let count = pan.digit_count();
    let mut field = Block128([0u8; PINBLOCK128_SIZE]);

    let first_position = if count < PAN_FIELD_DIGITS {
        PAN_FIELD_DIGITS + 1 - count
    } else {
        set_nibble(&mut field.0, 0, (count - PAN_FIELD_DIGITS) as u8);
        1
    };
    for index in 0..count {
        set_nibble(&mut field.0, first_position + index, pan.digit_unchecked(index));
    }
    field
}
