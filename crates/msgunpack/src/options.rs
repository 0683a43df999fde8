//! Decoder configuration.

/// Default limit on nested arrays and maps.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options controlling a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of arrays/maps that may be open at once. Opening one
    /// more fails with [`DecodeError::MaxDepthExceeded`](crate::DecodeError::MaxDepthExceeded).
    /// Scalars, strings, binaries and extensions do not count.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Sets the maximum number of nested arrays and maps.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
