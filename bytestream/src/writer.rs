//! Byte-level writer over any [`Write`] sink.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{ByteError, ByteResult};
use crate::varint::{VARINT_U16_PREFIX, VARINT_U32_PREFIX, VARINT_U64_PREFIX};

/// A byte writer for encoding little-endian protocol primitives.
///
/// Writes go straight to the wrapped sink. When a write fails the bytes
/// already emitted stay emitted; the caller decides whether to discard the
/// sink.
#[derive(Debug)]
pub struct ByteWriter<W> {
    inner: W,
    bytes_written: usize,
}

impl<W: Write> ByteWriter<W> {
    /// Creates a new `ByteWriter` wrapping `inner`.
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Consumes the writer, returning the wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> ByteResult<()> {
        self.inner.write_u8(value).map_err(|err| ByteError::io(&err))?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16_le(&mut self, value: u16) -> ByteResult<()> {
        self.inner
            .write_u16::<LittleEndian>(value)
            .map_err(|err| ByteError::io(&err))?;
        self.bytes_written += 2;
        Ok(())
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32_le(&mut self, value: u32) -> ByteResult<()> {
        self.inner
            .write_u32::<LittleEndian>(value)
            .map_err(|err| ByteError::io(&err))?;
        self.bytes_written += 4;
        Ok(())
    }

    /// Writes a little-endian `u64`.
    pub fn write_u64_le(&mut self, value: u64) -> ByteResult<()> {
        self.inner
            .write_u64::<LittleEndian>(value)
            .map_err(|err| ByteError::io(&err))?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Writes a raw byte slice.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.inner
            .write_all(bytes)
            .map_err(|err| ByteError::io(&err))?;
        self.bytes_written += bytes.len();
        Ok(())
    }

    /// Writes `value` as a canonical CompactSize varint.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_varint(&mut self, value: u64) -> ByteResult<()> {
        match value {
            0..=0xFC => self.write_u8(value as u8),
            0xFD..=0xFFFF => {
                self.write_u8(VARINT_U16_PREFIX)?;
                self.write_u16_le(value as u16)
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.write_u8(VARINT_U32_PREFIX)?;
                self.write_u32_le(value as u32)
            }
            _ => {
                self.write_u8(VARINT_U64_PREFIX)?;
                self.write_u64_le(value)
            }
        }
    }

    /// Flushes the wrapped sink.
    pub fn flush(&mut self) -> ByteResult<()> {
        self.inner.flush().map_err(|err| ByteError::io(&err))
    }
}
