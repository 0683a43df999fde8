//! Core logic behind the `msgpack-unpack` binary.

use thiserror::Error;
use tracing::debug;

use crate::{decode_with_options, DecodeError, DecodeOptions};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Decodes a MessagePack buffer and renders it as JSON text.
pub fn unpack(bytes: &[u8], options: &DecodeOptions, pretty: bool) -> Result<String, CliError> {
    debug!(len = bytes.len(), max_depth = options.max_depth, "decoding input");
    let value = decode_with_options(bytes, options)?;
    debug!(kind = value.kind(), "decoded value");
    let json = value.to_json();
    let out = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(out)
}
