//! ISO 9564-1:2017 PIN blocks
//!
//! Encoding and decoding of PIN blocks formats 0, 1, 2, 3 and the format 4
//! PIN and PAN fields, as used for PIN transport in payment card processing.
//! The crate produces and consumes plaintext PIN fields only; enciphering
//! them is the caller's job.
//!
//! # Security Features
//!
//! - **Zeroization**: decoded PINs, blocks and every intermediate PIN, PAN or
//!   nonce buffer are cleared with `zeroize`, on error paths too
//! - **Integrity checks**: formats 0 and 3 verify the unmasked field, so a
//!   wrong PAN is reported instead of a wrong PIN
//! - **Redacted debug output**: `Pin` never prints its digits
//!
//! # Example
//!
//! ```
//! use iso9564::{decode, encode_format0, PinBlockFormat};
//!
//! # fn example() -> Result<(), iso9564::PinBlockError> {
//! let pan = [0x40, 0x12, 0x34, 0x56, 0x78, 0x90, 0x9F];
//! let block = encode_format0(&[1, 2, 3, 4], &pan)?;
//! assert_eq!(block.as_bytes(), &[0x04, 0x12, 0x74, 0xED, 0xCB, 0xA9, 0x87, 0x6F]);
//!
//! let decoded = decode(block.as_bytes(), Some(&pan))?;
//! assert_eq!(decoded.format, PinBlockFormat::Format0);
//! assert_eq!(decoded.pin.as_digits(), &[1, 2, 3, 4]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod pan;
pub mod prelude;
pub mod types;

mod nibble;
mod nonce;

pub use codec::{PinBlockCodec, PinBlockCodecBuilder};
pub use config::{CodecConfig, ShortPanPolicy};
pub use dispatch::{decode, get_format};
pub use error::PinBlockError;
pub use format::format0::{decode_format0, encode_format0};
pub use format::format1::{decode_format1, encode_format1, encode_format1_with_rng};
pub use format::format2::{decode_format2, encode_format2};
pub use format::format3::{decode_format3, encode_format3, encode_format3_with_rng};
pub use format::format4::{
    decode_format4_pin_field, encode_format4_pan_field, encode_format4_pin_field,
    encode_format4_pin_field_with_rng,
};
pub use pan::Pan;
pub use types::{
    Block128, DecodedPinBlock, Pin, PinBlock, PinBlockFormat, PINBLOCK128_SIZE, PINBLOCK_SIZE,
    PIN_MAX_LEN, PIN_MIN_LEN,
};
