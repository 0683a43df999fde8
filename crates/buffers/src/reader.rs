//! The [`ByteReader`] capability and its borrowed-slice backend.

use crate::BufferError;

/// Read-only, random-access view over an immutable byte buffer.
///
/// All multi-byte reads are big-endian. Implementors only have to provide
/// [`len`](ByteReader::len) and [`slice`](ByteReader::slice); the sized reads
/// have default implementations on top of `slice` and may be overridden by
/// backends that offer native accessors.
pub trait ByteReader {
    /// Total number of bytes in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` when the buffer holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows `length` bytes starting at `offset`.
    fn slice(&self, offset: usize, length: usize) -> Result<&[u8], BufferError>;

    /// Reads an unsigned 8-bit integer at `offset`.
    #[inline]
    fn u8_at(&self, offset: usize) -> Result<u8, BufferError> {
        Ok(self.slice(offset, 1)?[0])
    }

    /// Reads a signed 8-bit integer at `offset`.
    #[inline]
    fn i8_at(&self, offset: usize) -> Result<i8, BufferError> {
        Ok(self.u8_at(offset)? as i8)
    }

    /// Reads a big-endian unsigned 16-bit integer at `offset`.
    #[inline]
    fn u16_at(&self, offset: usize) -> Result<u16, BufferError> {
        array_at(self, offset).map(u16::from_be_bytes)
    }

    /// Reads a big-endian signed 16-bit integer at `offset`.
    #[inline]
    fn i16_at(&self, offset: usize) -> Result<i16, BufferError> {
        array_at(self, offset).map(i16::from_be_bytes)
    }

    /// Reads a big-endian unsigned 32-bit integer at `offset`.
    #[inline]
    fn u32_at(&self, offset: usize) -> Result<u32, BufferError> {
        array_at(self, offset).map(u32::from_be_bytes)
    }

    /// Reads a big-endian signed 32-bit integer at `offset`.
    #[inline]
    fn i32_at(&self, offset: usize) -> Result<i32, BufferError> {
        array_at(self, offset).map(i32::from_be_bytes)
    }

    /// Reads a big-endian unsigned 64-bit integer at `offset`.
    #[inline]
    fn u64_at(&self, offset: usize) -> Result<u64, BufferError> {
        array_at(self, offset).map(u64::from_be_bytes)
    }

    /// Reads a big-endian signed 64-bit integer at `offset`.
    #[inline]
    fn i64_at(&self, offset: usize) -> Result<i64, BufferError> {
        array_at(self, offset).map(i64::from_be_bytes)
    }

    /// Reads a big-endian 32-bit float at `offset`.
    #[inline]
    fn f32_at(&self, offset: usize) -> Result<f32, BufferError> {
        array_at(self, offset).map(f32::from_be_bytes)
    }

    /// Reads a big-endian 64-bit float at `offset`.
    #[inline]
    fn f64_at(&self, offset: usize) -> Result<f64, BufferError> {
        array_at(self, offset).map(f64::from_be_bytes)
    }
}

#[inline]
fn array_at<R: ByteReader + ?Sized, const N: usize>(
    reader: &R,
    offset: usize,
) -> Result<[u8; N], BufferError> {
    let mut out = [0u8; N];
    out.copy_from_slice(reader.slice(offset, N)?);
    Ok(out)
}

/// Validates that `wanted` bytes fit at `offset` and returns the exclusive
/// end of the range.
#[inline]
pub(crate) fn checked_end(offset: usize, wanted: usize, len: usize) -> Result<usize, BufferError> {
    match offset.checked_add(wanted) {
        Some(end) if end <= len => Ok(end),
        _ => Err(BufferError::EndOfBuffer {
            offset,
            wanted,
            len,
        }),
    }
}

/// A [`ByteReader`] over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use msgunpack_buffers::{ByteReader, SliceReader};
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let reader = SliceReader::new(&data);
///
/// assert_eq!(reader.u8_at(0), Ok(0x01));
/// assert_eq!(reader.u16_at(1), Ok(0x0203));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SliceReader<'a> {
    data: &'a [u8],
}

impl<'a> SliceReader<'a> {
    /// Wraps a borrowed byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The whole underlying buffer.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> From<&'a [u8]> for SliceReader<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl ByteReader for SliceReader<'_> {
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
        self.data
            .get(offset)
            .copied()
            .ok_or(BufferError::EndOfBuffer {
                offset,
                wanted: 1,
                len: self.data.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_at() {
        let data = [0x01, 0x02, 0x03];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.u8_at(0), Ok(0x01));
        assert_eq!(reader.u8_at(2), Ok(0x03));
    }

    #[test]
    fn test_u8_at_end_of_buffer() {
        let data = [0x01];
        let reader = SliceReader::new(&data);
        assert_eq!(
            reader.u8_at(1),
            Err(BufferError::EndOfBuffer {
                offset: 1,
                wanted: 1,
                len: 1
            })
        );
    }

    #[test]
    fn test_i8_at_negative() {
        let data = [0xfe];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.i8_at(0), Ok(-2));
    }

    #[test]
    fn test_u16_at() {
        let data = [0x00, 0x01, 0x02, 0x03];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.u16_at(1), Ok(0x0102));
        assert_eq!(reader.u16_at(2), Ok(0x0203));
    }

    #[test]
    fn test_u16_at_partial() {
        let data = [0x01, 0x02];
        let reader = SliceReader::new(&data);
        assert!(matches!(
            reader.u16_at(1),
            Err(BufferError::EndOfBuffer { wanted: 2, .. })
        ));
    }

    #[test]
    fn test_i16_at_negative() {
        // -1000 big-endian
        let data = [0xfc, 0x18];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.i16_at(0), Ok(-1000));
    }

    #[test]
    fn test_u32_and_i32_at() {
        let data = [0xff, 0xff, 0xff, 0xfe];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.u32_at(0), Ok(0xffff_fffe));
        assert_eq!(reader.i32_at(0), Ok(-2));
    }

    #[test]
    fn test_u64_at_full_range() {
        let data = [0xff; 8];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.u64_at(0), Ok(u64::MAX));
        assert_eq!(reader.i64_at(0), Ok(-1));
    }

    #[test]
    fn test_floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_be_bytes());
        data.extend_from_slice(&std::f64::consts::PI.to_be_bytes());
        let reader = SliceReader::new(&data);
        assert_eq!(reader.f32_at(0), Ok(1.5));
        assert_eq!(reader.f64_at(4), Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_slice() {
        let data = [1u8, 2, 3, 4, 5];
        let reader = SliceReader::new(&data);
        assert_eq!(reader.slice(1, 3), Ok(&[2u8, 3, 4][..]));
        assert_eq!(reader.slice(5, 0), Ok(&[0u8; 0][..]));
    }

    #[test]
    fn test_slice_overflowing_length() {
        let data = [1u8, 2];
        let reader = SliceReader::new(&data);
        assert_eq!(
            reader.slice(1, usize::MAX),
            Err(BufferError::EndOfBuffer {
                offset: 1,
                wanted: usize::MAX,
                len: 2
            })
        );
    }

    #[test]
    fn test_empty() {
        let reader = SliceReader::new(&[]);
        assert!(reader.is_empty());
        assert!(reader.u8_at(0).is_err());
    }
}
