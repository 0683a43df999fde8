//! [`ByteReader`] backend over an owned [`Bytes`] buffer.

use bytes::{Buf, Bytes};

use crate::reader::{checked_end, ByteReader};
use crate::BufferError;

/// A [`ByteReader`] that owns its buffer as reference-counted [`Bytes`].
///
/// Sized reads go through the explicit big-endian accessors of
/// [`bytes::Buf`] instead of slice-and-convert.
#[derive(Debug, Clone, Default)]
pub struct BytesReader {
    data: Bytes,
}

impl BytesReader {
    /// Wraps an owned buffer.
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    /// Zero-copy sub-buffer of `length` bytes at `offset`.
    pub fn slice_bytes(&self, offset: usize, length: usize) -> Result<Bytes, BufferError> {
        let end = checked_end(offset, length, self.data.len())?;
        Ok(self.data.slice(offset..end))
    }

    /// Returns the underlying buffer.
    pub fn into_inner(self) -> Bytes {
        self.data
    }
}

impl From<Bytes> for BytesReader {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for BytesReader {
    fn from(data: Vec<u8>) -> Self {
        Self::new(Bytes::from(data))
    }
}

impl ByteReader for BytesReader {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn slice(&self, offset: usize, length: usize) -> Result<&[u8], BufferError> {
        let end = checked_end(offset, length, self.data.len())?;
        Ok(&self.data[offset..end])
    }

    #[inline]
    fn u8_at(&self, offset: usize) -> Result<u8, BufferError> {
        Ok(self.slice(offset, 1)?.get_u8())
    }

    #[inline]
    fn i8_at(&self, offset: usize) -> Result<i8, BufferError> {
        Ok(self.slice(offset, 1)?.get_i8())
    }

    #[inline]
    fn u16_at(&self, offset: usize) -> Result<u16, BufferError> {
        Ok(self.slice(offset, 2)?.get_u16())
    }

    #[inline]
    fn i16_at(&self, offset: usize) -> Result<i16, BufferError> {
        Ok(self.slice(offset, 2)?.get_i16())
    }

    #[inline]
    fn u32_at(&self, offset: usize) -> Result<u32, BufferError> {
        Ok(self.slice(offset, 4)?.get_u32())
    }

    #[inline]
    fn i32_at(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(self.slice(offset, 4)?.get_i32())
    }

    #[inline]
    fn u64_at(&self, offset: usize) -> Result<u64, BufferError> {
        Ok(self.slice(offset, 8)?.get_u64())
    }

    #[inline]
    fn i64_at(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(self.slice(offset, 8)?.get_i64())
    }

    #[inline]
    fn f32_at(&self, offset: usize) -> Result<f32, BufferError> {
        Ok(self.slice(offset, 4)?.get_f32())
    }

    #[inline]
    fn f64_at(&self, offset: usize) -> Result<f64, BufferError> {
        Ok(self.slice(offset, 8)?.get_f64())
    }
}
