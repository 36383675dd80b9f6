//! Byte-level primitives for the invwire codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for decoding and
//! encoding the little-endian integers, fixed-width byte arrays and
//! CompactSize varints that the Bitcoin P2P protocol is built from.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Stream based** - Works over any `std::io::Read` / `std::io::Write`.
//! - **No domain knowledge** - This crate knows nothing about messages or inventory.
//! - **Explicit errors** - Short streams, non-canonical varints and transport
//!   failures are distinct, structured errors; nothing panics.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new(Vec::new());
//! writer.write_varint(300).unwrap();
//! writer.write_u32_le(7).unwrap();
//!
//! let bytes = writer.into_inner();
//!
//! let mut reader = ByteReader::new(&bytes[..]);
//! assert_eq!(reader.read_varint().unwrap(), 300);
//! assert_eq!(reader.read_u32_le().unwrap(), 7);
//! ```

mod error;
mod reader;
mod varint;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use varint::{varint_size, MAX_VARINT_SIZE};
pub use writer::ByteWriter;
