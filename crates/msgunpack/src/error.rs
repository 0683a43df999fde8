//! MessagePack decoder error type.

use msgunpack_buffers::BufferError;
use thiserror::Error;

/// Error type for MessagePack decoding. Every variant aborts the decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized tag byte 0x{tag:02x} at offset {offset}")]
    UnrecognizedTag { tag: u8, offset: usize },
    #[error("unexpected end of input: {wanted} byte(s) needed at offset {offset}")]
    TruncatedInput { offset: usize, wanted: usize },
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("nesting exceeds maximum depth of {max_depth}")]
    MaxDepthExceeded { max_depth: usize },
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { offset, wanted, .. } => {
                DecodeError::TruncatedInput { offset, wanted }
            }
        }
    }
}
