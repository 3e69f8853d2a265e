//! Codec configuration
//!
//! Hosts usually load this from their own configuration files, so every field
//! has a default and unknown fields are rejected.
//!
//! ```
//! use iso9564::{CodecConfig, ShortPanPolicy};
//!
//! let config: CodecConfig = serde_json::from_str(r#"{"short_pan_policy": "reject"}"#).unwrap();
//! assert_eq!(config.short_pan_policy, ShortPanPolicy::Reject);
//! assert!(config.verify_padding);
//! ```

use serde::{Deserialize, Serialize};

/// What to do when fewer than 12 PAN digits precede the check digit
///
/// ISO 9564-1 zero-pads the PAN field of formats 0 and 3 in that case, which
/// weakens the masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortPanPolicy {
    /// Zero-pad the PAN field as the standard describes
    #[default]
    Allow,
    /// Fail with `PinBlockError::ShortPan`
    Reject,
}

/// Configuration for [`crate::PinBlockCodec`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Handling of short PANs in formats 0 and 3
    pub short_pan_policy: ShortPanPolicy,
    /// Verify fill digits when decoding formats 2 and 4
    pub verify_padding: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            short_pan_policy: ShortPanPolicy::Allow,
            verify_padding: true,
        }
    }
}
