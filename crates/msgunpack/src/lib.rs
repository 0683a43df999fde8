//! Strict MessagePack decoder.
//!
//! [`decode`] turns one complete MessagePack buffer into an owned [`Value`]
//! tree and rejects unknown tags, truncated input, invalid UTF-8 in strings,
//! excessive nesting, and bytes left over after the value.
//!
//! ```
//! use msgunpack::{decode, Value};
//!
//! let value = decode(&[0x81, 0xa1, 0x61, 0x01]).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::from(1u8)));
//! ```

pub mod cli;
pub mod constants;
mod decoder;
mod error;
mod json;
mod options;
mod value;

pub use decoder::{
    decode, decode_bytes, decode_bytes_with_options, decode_with_consumed, decode_with_options,
    Decoder,
};
pub use error::DecodeError;
pub use json::BIN_URI_START;
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH};
pub use value::{Extension, Integer, Timestamp, Value, MAX_SAFE_INTEGER};

pub use msgunpack_buffers::{BufferError, ByteReader, BytesReader, SliceReader};
