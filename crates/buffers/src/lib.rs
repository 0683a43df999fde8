//! Positional byte readers for binary decoders.
//!
//! A [`ByteReader`] exposes bounds-checked big-endian reads at an explicit
//! offset. Readers never track a cursor of their own; the decoder that
//! drives them owns the read position.

mod bytes_reader;
mod reader;

pub use bytes_reader::BytesReader;
pub use reader::{ByteReader, SliceReader};

use thiserror::Error;

/// Error returned when a read does not fit inside the buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("read of {wanted} byte(s) at offset {offset} exceeds buffer length {len}")]
    EndOfBuffer {
        offset: usize,
        wanted: usize,
        len: usize,
    },
}
