//! Byte-level reader over any [`Read`] source.

use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{ByteError, ByteResult};
use crate::varint::{VARINT_U16_PREFIX, VARINT_U32_PREFIX, VARINT_U64_PREFIX};

/// Growth step for [`ByteReader::read_vec`].
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// A byte reader for decoding little-endian protocol primitives.
///
/// The reader does not buffer: every call pulls exactly the bytes it needs
/// from the wrapped source, so it can be created and dropped around any
/// sub-decoder without losing data. A stream that ends early yields
/// [`ByteError::UnexpectedEof`]; the reader never panics on short input.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    bytes_read: usize,
}

impl<R: Read> ByteReader<R> {
    /// Creates a new `ByteReader` wrapping `inner`.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Consumes the reader, returning the wrapped source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> ByteResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(LittleEndian::read_u16(&bytes))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> ByteResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(LittleEndian::read_u32(&bytes))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> ByteResult<u64> {
        let bytes = self.read_array::<8>()?;
        Ok(LittleEndian::read_u64(&bytes))
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let mut out = [0u8; N];
        self.read_exact_into(&mut out)?;
        Ok(out)
    }

    /// Fills `buf` completely from the source.
    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> ByteResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ByteError::UnexpectedEof {
                        requested: buf.len(),
                        available: filled,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.bytes_read += n;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(ByteError::UnexpectedEof {
                        requested: buf.len(),
                        available: filled,
                    });
                }
                Err(err) => return Err(ByteError::io(&err)),
            }
        }
        Ok(())
    }

    /// Reads exactly `len` bytes into a new vector.
    ///
    /// Storage grows one chunk at a time as bytes arrive, so an untrusted
    /// `len` cannot reserve more than a chunk beyond what the source sent.
    pub fn read_vec(&mut self, len: usize) -> ByteResult<Vec<u8>> {
        let mut out = Vec::new();
        while out.len() < len {
            let start = out.len();
            out.resize(start + (len - start).min(READ_CHUNK_SIZE), 0);
            self.read_exact_into(&mut out[start..])
                .map_err(|err| match err {
                    ByteError::UnexpectedEof { available, .. } => ByteError::UnexpectedEof {
                        requested: len,
                        available: start + available,
                    },
                    other => other,
                })?;
        }
        Ok(out)
    }

    /// Reads a CompactSize varint.
    ///
    /// Values below `0xFD` are a single byte; `0xFD`, `0xFE` and `0xFF`
    /// prefix a little-endian `u16`, `u32` and `u64` respectively. An
    /// encoding wider than the value needs is rejected with
    /// [`ByteError::NonCanonicalVarint`].
    pub fn read_varint(&mut self) -> ByteResult<u64> {
        let prefix = self.read_u8()?;
        let (value, min, encoded_len) = match prefix {
            VARINT_U16_PREFIX => (u64::from(self.read_u16_le()?), 0xFD, 3),
            VARINT_U32_PREFIX => (u64::from(self.read_u32_le()?), 0x1_0000, 5),
            VARINT_U64_PREFIX => (self.read_u64_le()?, 0x1_0000_0000, 9),
            inline => return Ok(u64::from(inline)),
        };
        if value < min {
            return Err(ByteError::NonCanonicalVarint { value, encoded_len });
        }
        Ok(value)
    }
}
