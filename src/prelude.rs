//! Prelude
//!
//! ```rust
//! use iso9564::prelude::*;
//!
//! # fn example() -> Result<(), PinBlockError> {
//! let pin = Pin::from_ascii("4321")?;
//! let block = encode_format2(pin.as_digits())?;
//! assert_eq!(get_format(block.as_bytes()), Some(PinBlockFormat::Format2));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub use crate::codec::{PinBlockCodec, PinBlockCodecBuilder};
pub use crate::config::{CodecConfig, ShortPanPolicy};
pub use crate::dispatch::{decode, get_format};
pub use crate::error::PinBlockError;
pub use crate::format::format0::{decode_format0, encode_format0};
pub use crate::format::format1::{decode_format1, encode_format1};
pub use crate::format::format2::{decode_format2, encode_format2};
pub use crate::format::format3::{decode_format3, encode_format3};
pub use crate::format::format4::{
    decode_format4_pin_field, encode_format4_pan_field, encode_format4_pin_field,
};
pub use crate::types::{Block128, DecodedPinBlock, Pin, PinBlock, PinBlockFormat};
