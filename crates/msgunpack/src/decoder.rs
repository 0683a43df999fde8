//! `Decoder`: single-pass recursive MessagePack decoder.
//!
//! The decoder owns the cursor; the [`ByteReader`] it drives only answers
//! positional reads. Each tag byte is inspected in place and the cursor
//! moves past the tag and its length prefix only once the prefix has been
//! read, so a short prefix leaves the cursor on the tag.

use bytes::Bytes;
use msgunpack_buffers::{BufferError, ByteReader, BytesReader, SliceReader};

use crate::constants::*;
use crate::{DecodeError, DecodeOptions, Extension, Value};

/// Recursive decoder over a [`ByteReader`], owning the read cursor.
pub struct Decoder<R> {
    reader: R,
    offset: usize,
    depth: usize,
    max_depth: usize,
}

impl<R: ByteReader> Decoder<R> {
    /// Creates a decoder positioned at the start of the buffer.
    pub fn new(reader: R) -> Self {
        Self::with_offset(reader, 0)
    }

    /// Starts decoding at `offset` instead of the beginning of the buffer.
    pub fn with_offset(reader: R, offset: usize) -> Self {
        Self {
            reader,
            offset,
            depth: 0,
            max_depth: DecodeOptions::default().max_depth,
        }
    }

    /// Applies the nesting limit from `options`.
    pub fn with_options(mut self, options: &DecodeOptions) -> Self {
        self.max_depth = options.max_depth;
        self
    }

    /// Offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.reader.len().saturating_sub(self.offset)
    }

    /// The underlying byte reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Decodes one value and requires that it spans the rest of the buffer.
    pub fn decode_exact(mut self) -> Result<Value, DecodeError> {
        let value = self.parse()?;
        match self.remaining() {
            0 => Ok(value),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    /// Decodes the value starting at the cursor.
    ///
    /// After an error the decoder's position is unspecified and it should be
    /// discarded.
    pub fn parse(&mut self) -> Result<Value, DecodeError> {
        let x = self.offset;
        let tag = self.reader.u8_at(x)?;

        if tag <= POSITIVE_FIXINT_MAX {
            self.offset += 1;
            return Ok(Value::from(tag));
        }
        if (FIXMAP_MIN..=FIXMAP_MAX).contains(&tag) {
            self.offset += 1;
            return self.read_map(usize::from(tag & 0x0f));
        }
        if (FIXARRAY_MIN..=FIXARRAY_MAX).contains(&tag) {
            self.offset += 1;
            return self.read_array(usize::from(tag & 0x0f));
        }
        if (FIXSTR_MIN..=FIXSTR_MAX).contains(&tag) {
            self.offset += 1;
            return self.read_str(usize::from(tag & 0x1f)).map(Value::String);
        }
        if tag >= NEGATIVE_FIXINT_MIN {
            self.offset += 1;
            return Ok(Value::from(tag as i8));
        }

        match tag {
            NIL => {
                self.offset += 1;
                Ok(Value::Nil)
            }
            FALSE => {
                self.offset += 1;
                Ok(Value::Bool(false))
            }
            TRUE => {
                self.offset += 1;
                Ok(Value::Bool(true))
            }

            BIN8 => {
                let n = self.fixed(1, R::u8_at)?;
                self.read_bin(usize::from(n)).map(Value::Binary)
            }
            BIN16 => {
                let n = self.fixed(2, R::u16_at)?;
                self.read_bin(usize::from(n)).map(Value::Binary)
            }
            BIN32 => {
                let n = self.fixed(4, R::u32_at)?;
                self.read_bin(n as usize).map(Value::Binary)
            }

            EXT8 => {
                let n = self.reader.u8_at(x + 1)?;
                self.read_ext(usize::from(n), 2)
            }
            EXT16 => {
                let n = self.reader.u16_at(x + 1)?;
                self.read_ext(usize::from(n), 3)
            }
            EXT32 => {
                let n = self.reader.u32_at(x + 1)?;
                self.read_ext(n as usize, 5)
            }

            FLOAT32 => self.fixed(4, R::f32_at).map(Value::F32),
            FLOAT64 => self.fixed(8, R::f64_at).map(Value::F64),

            UINT8 => self.fixed(1, R::u8_at).map(Value::from),
            UINT16 => self.fixed(2, R::u16_at).map(Value::from),
            UINT32 => self.fixed(4, R::u32_at).map(Value::from),
            UINT64 => self.fixed(8, R::u64_at).map(Value::from),

            INT8 => self.fixed(1, R::i8_at).map(Value::from),
            INT16 => self.fixed(2, R::i16_at).map(Value::from),
            INT32 => self.fixed(4, R::i32_at).map(Value::from),
            INT64 => self.fixed(8, R::i64_at).map(Value::from),

            FIXEXT1 => self.read_ext(1, 1),
            FIXEXT2 => self.read_ext(2, 1),
            FIXEXT4 => self.read_ext(4, 1),
            FIXEXT8 => self.read_ext(8, 1),
            FIXEXT16 => self.read_ext(16, 1),

            STR8 => {
                let n = self.fixed(1, R::u8_at)?;
                self.read_str(usize::from(n)).map(Value::String)
            }
            STR16 => {
                let n = self.fixed(2, R::u16_at)?;
                self.read_str(usize::from(n)).map(Value::String)
            }
            STR32 => {
                let n = self.fixed(4, R::u32_at)?;
                self.read_str(n as usize).map(Value::String)
            }

            ARRAY16 => {
                let n = self.fixed(2, R::u16_at)?;
                self.read_array(usize::from(n))
            }
            ARRAY32 => {
                let n = self.fixed(4, R::u32_at)?;
                self.read_array(n as usize)
            }

            MAP16 => {
                let n = self.fixed(2, R::u16_at)?;
                self.read_map(usize::from(n))
            }
            MAP32 => {
                let n = self.fixed(4, R::u32_at)?;
                self.read_map(n as usize)
            }

            // 0xc1 is the only byte left unassigned by the format.
            _ => Err(DecodeError::UnrecognizedTag { tag, offset: x }),
        }
    }

    /// Reads a `width`-byte field right after the tag, then moves the cursor
    /// past both.
    #[inline]
    fn fixed<T>(
        &mut self,
        width: usize,
        read: fn(&R, usize) -> Result<T, BufferError>,
    ) -> Result<T, DecodeError> {
        let value = read(&self.reader, self.offset + 1)?;
        self.offset += 1 + width;
        Ok(value)
    }

    /// Decodes `len` key/value pairs, key before value.
    fn read_map(&mut self, len: usize) -> Result<Value, DecodeError> {
        self.enter()?;
        let mut pairs = Vec::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let key = self.parse()?;
            let value = self.parse()?;
            pairs.push((key, value));
        }
        self.depth -= 1;
        Ok(Value::Map(pairs))
    }

    fn read_array(&mut self, len: usize) -> Result<Value, DecodeError> {
        self.enter()?;
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(self.parse()?);
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// `skip` is the distance from the tag to the extension type byte; the
    /// payload starts right after the type byte.
    fn read_ext(&mut self, len: usize, skip: usize) -> Result<Value, DecodeError> {
        let tag = self.reader.u8_at(self.offset + skip)?;
        self.offset += skip + 1;
        let data = self.read_bin(len)?;
        Ok(Value::Extension(Extension::new(tag, data)))
    }

    fn read_bin(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        self.take(len).map(<[u8]>::to_vec)
    }

    fn read_str(&mut self, len: usize) -> Result<String, DecodeError> {
        let start = self.offset;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| DecodeError::InvalidUtf8 {
                offset: start + e.valid_up_to(),
            })
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let bytes = self.reader.slice(self.offset, len)?;
        self.offset += len;
        Ok(bytes)
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

/// Decodes exactly one MessagePack value spanning all of `input`.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with_options(input, &DecodeOptions::default())
}

/// [`decode`] with explicit [`DecodeOptions`].
pub fn decode_with_options(input: &[u8], options: &DecodeOptions) -> Result<Value, DecodeError> {
    Decoder::new(SliceReader::new(input))
        .with_options(options)
        .decode_exact()
}

/// [`decode`] over an owned, reference-counted buffer.
pub fn decode_bytes(input: Bytes) -> Result<Value, DecodeError> {
    decode_bytes_with_options(input, &DecodeOptions::default())
}

/// [`decode_bytes`] with explicit [`DecodeOptions`].
pub fn decode_bytes_with_options(
    input: Bytes,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    Decoder::new(BytesReader::new(input))
        .with_options(options)
        .decode_exact()
}

/// Decodes the first value in `input` and reports how many bytes it used.
/// Bytes after the value are left untouched.
pub fn decode_with_consumed(input: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder::new(SliceReader::new(input));
    let value = decoder.parse()?;
    Ok((value, decoder.offset()))
}
