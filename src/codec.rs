//! Configurable PIN block codec
//!
//! [`PinBlockCodec`] bundles a [`CodecConfig`] with a random source. The free
//! functions at the crate root are equivalent to a codec built with the
//! default configuration and `OsRng`.
//!
//! # Example
//!
//! ```
//! use iso9564::{PinBlockCodec, PinBlockFormat, ShortPanPolicy};
//!
//! # fn example() -> Result<(), iso9564::PinBlockError> {
//! let mut codec = PinBlockCodec::builder()
//!     .short_pan_policy(ShortPanPolicy::Reject)
//!     .build();
//!
//! let pan = [0x40, 0x12, 0x34, 0x56, 0x78, 0x90, 0x9F];
//! let block = codec.encode_format3(&[1, 2, 3, 4], &pan)?;
//! let decoded = codec.decode(block.as_bytes(), Some(&pan))?;
//! assert_eq!(decoded.format, PinBlockFormat::Format3);
//! assert_eq!(decoded.pin.as_digits(), &[1, 2, 3, 4]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::config::{CodecConfig, ShortPanPolicy};
use crate::dispatch::decode_with_config;
use crate::error::PinBlockError;
use crate::format::{format0, format1, format2, format3, format4};
use crate::types::{Block128, DecodedPinBlock, Pin, PinBlock};
use rand::{rngs::OsRng, CryptoRng, RngCore};

/// PIN block encoder/decoder with an explicit configuration and RNG
///
/// Methods that draw random padding take `&mut self`; use one codec per
/// thread.
pub struct PinBlockCodec<R = OsRng> {
    config: CodecConfig,
    rng: R,
}

impl PinBlockCodec<OsRng> {
    /// Create a codec with the default configuration and `OsRng`
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a codec
    pub fn builder() -> PinBlockCodecBuilder<OsRng> {
        PinBlockCodecBuilder::new()
    }
}

impl Default for PinBlockCodec<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> PinBlockCodec<R> {
    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a format 0 PIN block
    pub fn encode_format0(&self, pin: &[u8], pan: &[u8]) -> Result<PinBlock, PinBlockError> {
        format0::encode(pin, pan, &self.config)
    }

    /// Encode a format 1 PIN block, with random padding when `nonce` is `None`
    pub fn encode_format1(
        &mut self,
        pin: &[u8],
        nonce: Option<&[u8]>,
    ) -> Result<PinBlock, PinBlockError> {
        format1::encode(pin, nonce, &mut self.rng)
    }

    /// Encode a format 2 PIN block
    pub fn encode_format2(&self, pin: &[u8]) -> Result<PinBlock, PinBlockError> {
        format2::encode(pin)
    }

    /// Encode a format 3 PIN block
    pub fn encode_format3(&mut self, pin: &[u8], pan: &[u8]) -> Result<PinBlock, PinBlockError> {
        format3::encode(pin, pan, &self.config, &mut self.rng)
    }

    /// Encode a format 4 PIN field
    pub fn encode_format4_pin_field(&mut self, pin: &[u8]) -> Result<Block128, PinBlockError> {
        format4::encode_pin_field(pin, &mut self.rng)
    }

    /// Encode a format 4 PAN field
    pub fn encode_format4_pan_field(&self, pan: &[u8]) -> Result<Block128, PinBlockError> {
        format4::encode_pan_field(pan)
    }

    /// Decode a format 0 PIN block
    pub fn decode_format0(&self, block: &[u8], pan: &[u8]) -> Result<Pin, PinBlockError> {
        format0::decode(block, pan, &self.config)
    }

    /// Decode a format 1 PIN block
    pub fn decode_format1(&self, block: &[u8]) -> Result<Pin, PinBlockError> {
        format1::decode(block)
    }

    /// Decode a format 2 PIN block
    pub fn decode_format2(&self, block: &[u8]) -> Result<Pin, PinBlockError> {
        format2::decode(block, &self.config)
    }

    /// Decode a format 3 PIN block
    pub fn decode_format3(&self, block: &[u8], pan: &[u8]) -> Result<Pin, PinBlockError> {
        format3::decode(block, pan, &self.config)
    }

    /// Decode a format 4 PIN field
    pub fn decode_format4_pin_field(&self, field: &[u8]) -> Result<Pin, PinBlockError> {
        format4::decode_pin_field(field, &self.config)
    }

    /// Decode a PIN block of any supported format
    pub fn decode(
        &self,
        block: &[u8],
        other: Option<&[u8]>,
    ) -> Result<DecodedPinBlock, PinBlockError> {
        decode_with_config(block, other, &self.config)
    }
}

/// Builder for [`PinBlockCodec`]
pub struct PinBlockCodecBuilder<R = OsRng> {
    config: CodecConfig,
    rng: R,
}

impl PinBlockCodecBuilder<OsRng> {
    /// Create a builder with the default configuration and `OsRng`
    pub fn new() -> Self {
        PinBlockCodecBuilder {
            config: CodecConfig::default(),
            rng: OsRng,
        }
    }
}

impl Default for PinBlockCodecBuilder<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> PinBlockCodecBuilder<R> {
    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the short PAN policy for formats 0 and 3 (default: allow)
    #[must_use]
    pub fn short_pan_policy(mut self, policy: ShortPanPolicy) -> Self {
        self.config.short_pan_policy = policy;
        self
    }

    /// Enable or disable fill digit verification for formats 2 and 4 (default: on)
    #[must_use]
    pub fn verify_padding(mut self, verify: bool) -> Self {
        self.config.verify_padding = verify;
        self
    }

    /// Use another cryptographically secure random source
    #[must_use]
    pub fn rng<R2: RngCore + CryptoRng>(self, rng: R2) -> PinBlockCodecBuilder<R2> {
        PinBlockCodecBuilder {
            config: self.config,
            rng,
        }
    }

    /// Build the codec
    pub fn build(self) -> PinBlockCodec<R> {
        PinBlockCodec {
            config: self.config,
            rng: self.rng,
        }
    }
}
