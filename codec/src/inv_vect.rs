//! Inventory vectors: the fixed-size records advertised between peers.

use std::fmt;
use std::io::{Read, Write};

use bytestream::{ByteReader, ByteWriter};
use wire::{EncodeError, ProtocolVersion, WireResult};

use crate::hash::{Hash256, HASH_SIZE};

/// Serialized size of an inventory vector: a 4-byte type tag plus a hash.
pub const INV_VECT_SIZE: usize = 4 + HASH_SIZE;

/// Bit set on witness variants of the data types.
const WITNESS_FLAG: u32 = 1 << 30;

/// The kind of data an inventory vector refers to.
///
/// Tags without a named variant decode to [`InvType::Unknown`] so they can be
/// relayed unchanged. `Unknown` should only hold such unnamed tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvType {
    Error,
    Tx,
    Block,
    FilteredBlock,
    CmpctBlock,
    WitnessTx,
    WitnessBlock,
    WitnessFilteredBlock,
    Unknown(u32),
}

impl InvType {
    /// Parses a type tag read off the wire.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Error,
            1 => Self::Tx,
            2 => Self::Block,
            3 => Self::FilteredBlock,
            4 => Self::CmpctBlock,
            r if r == WITNESS_FLAG | 1 => Self::WitnessTx,
            r if r == WITNESS_FLAG | 2 => Self::WitnessBlock,
            r if r == WITNESS_FLAG | 3 => Self::WitnessFilteredBlock,
            other => Self::Unknown(other),
        }
    }

    /// Returns the wire type tag.
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::Error => 0,
            Self::Tx => 1,
            Self::Block => 2,
            Self::FilteredBlock => 3,
            Self::CmpctBlock => 4,
            Self::WitnessTx => WITNESS_FLAG | 1,
            Self::WitnessBlock => WITNESS_FLAG | 2,
            Self::WitnessFilteredBlock => WITNESS_FLAG | 3,
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for InvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("MSG_ERROR"),
            Self::Tx => f.write_str("MSG_TX"),
            Self::Block => f.write_str("MSG_BLOCK"),
            Self::FilteredBlock => f.write_str("MSG_FILTERED_BLOCK"),
            Self::CmpctBlock => f.write_str("MSG_CMPCT_BLOCK"),
            Self::WitnessTx => f.write_str("MSG_WITNESS_TX"),
            Self::WitnessBlock => f.write_str("MSG_WITNESS_BLOCK"),
            Self::WitnessFilteredBlock => f.write_str("MSG_FILTERED_WITNESS_BLOCK"),
            Self::Unknown(raw) => write!(f, "Unknown InvType (0x{raw:08x})"),
        }
    }
}

/// A single inventory entry: what kind of data, and its hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvVect {
    pub inv_type: InvType,
    pub hash: Hash256,
}

impl InvVect {
    /// Creates a new inventory vector.
    #[must_use]
    pub const fn new(inv_type: InvType, hash: Hash256) -> Self {
        Self { inv_type, hash }
    }
}

/// Reads one inventory vector.
///
/// The layout is the same for every protocol version so far; `pver` is
/// accepted so callers stay version-agnostic.
pub fn read_inv_vect<R: Read>(
    reader: &mut ByteReader<R>,
    _pver: ProtocolVersion,
) -> WireResult<InvVect> {
    let inv_type = InvType::from_raw(reader.read_u32_le()?);
    let hash = Hash256::new(reader.read_array::<HASH_SIZE>()?);
    Ok(InvVect { inv_type, hash })
}

/// Writes one inventory vector.
pub fn write_inv_vect<W: Write>(
    writer: &mut ByteWriter<W>,
    _pver: ProtocolVersion,
    iv: &InvVect,
) -> Result<(), EncodeError> {
    writer.write_u32_le(iv.inv_type.raw())?;
    writer.write_bytes(iv.hash.as_bytes())?;
    Ok(())
}
