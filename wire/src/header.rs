//! Message header types and constants.

use std::fmt;
use std::io::{Read, Write};

use bytestream::{ByteReader, ByteWriter};
use sha2::{Digest, Sha256};

use crate::error::{DecodeError, EncodeError, WireResult};

/// Size of the NUL-padded command field in bytes.
pub const COMMAND_SIZE: usize = 12;

/// Header size in bytes (24 total).
pub const HEADER_SIZE: usize = 4 + COMMAND_SIZE + 4 + 4;

/// Network a message belongs to, identified by the header magic.
///
/// The magic doubles as a message boundary marker in the stream. It is
/// serialized as a little-endian `u32`, so mainnet's `0xD9B4BEF9` appears on
/// the wire as `F9 BE B4 D9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet3,
    Regtest,
    Signet,
}

impl Network {
    /// Returns the header magic for this network.
    #[must_use]
    pub const fn magic(self) -> u32 {
        match self {
            Self::Mainnet => 0xD9B4_BEF9,
            Self::Testnet3 => 0x0709_110B,
            Self::Regtest => 0xDAB5_BFFA,
            Self::Signet => 0x40CF_030A,
        }
    }

    /// Looks up the network for a header magic.
    #[must_use]
    pub const fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            0xD9B4_BEF9 => Some(Self::Mainnet),
            0x0709_110B => Some(Self::Testnet3),
            0xDAB5_BFFA => Some(Self::Regtest),
            0x40CF_030A => Some(Self::Signet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mainnet => "mainnet",
            Self::Testnet3 => "testnet3",
            Self::Regtest => "regtest",
            Self::Signet => "signet",
        };
        write!(f, "{name}")
    }
}

/// A message command as carried in the header.
///
/// Commands are printable ASCII, at most [`COMMAND_SIZE`] bytes, padded with
/// NUL bytes. Once a NUL appears every following byte must also be NUL.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command([u8; COMMAND_SIZE]);

impl Command {
    /// Creates a command from its string form.
    pub fn new(command: &str) -> Result<Self, EncodeError> {
        let bytes = command.as_bytes();
        if bytes.len() > COMMAND_SIZE || !bytes.iter().all(u8::is_ascii_graphic) {
            return Err(EncodeError::InvalidCommand {
                command: command.to_string(),
            });
        }
        let mut raw = [0u8; COMMAND_SIZE];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Validates a raw command field read off the wire.
    pub fn from_raw(raw: [u8; COMMAND_SIZE]) -> WireResult<Self> {
        let len = raw.iter().position(|&b| b == 0).unwrap_or(COMMAND_SIZE);
        let (name, padding) = raw.split_at(len);
        if !name.iter().all(u8::is_ascii_graphic) || padding.iter().any(|&b| b != 0) {
            return Err(DecodeError::InvalidCommand { raw });
        }
        Ok(Self(raw))
    }

    /// Returns the raw NUL-padded bytes.
    #[must_use]
    pub const fn raw(&self) -> &[u8; COMMAND_SIZE] {
        &self.0
    }

    /// Returns the command name without padding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(COMMAND_SIZE);
        std::str::from_utf8(&self.0[..len]).unwrap_or_default()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message header.
///
/// ```text
/// +-----------+--------------+---------------+-------------+
/// | magic (4) | command (12) | length (4 LE) | checksum (4)|
/// +-----------+--------------+---------------+-------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Network magic.
    pub magic: u32,
    /// Command routing the payload to a message type.
    pub command: Command,
    /// Payload length in bytes.
    pub length: u32,
    /// First four bytes of the payload's double SHA-256.
    pub checksum: [u8; 4],
}

impl MessageHeader {
    /// Builds the header for `payload` on `network`.
    #[must_use]
    pub fn for_payload(network: Network, command: Command, payload: &[u8]) -> Self {
        Self {
            magic: network.magic(),
            command,
            // Callers bound payloads well below u32::MAX before framing.
            length: u32::try_from(payload.len()).unwrap_or(u32::MAX),
            checksum: checksum(payload),
        }
    }

    /// Reads a header, validating only the command field.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>) -> WireResult<Self> {
        let magic = reader.read_u32_le()?;
        let command = Command::from_raw(reader.read_array::<COMMAND_SIZE>()?)?;
        let length = reader.read_u32_le()?;
        let checksum = reader.read_array::<4>()?;
        Ok(Self {
            magic,
            command,
            length,
            checksum,
        })
    }

    /// Writes the header.
    pub fn encode<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodeError> {
        writer.write_u32_le(self.magic)?;
        writer.write_bytes(self.command.raw())?;
        writer.write_u32_le(self.length)?;
        writer.write_bytes(&self.checksum)?;
        Ok(())
    }
}

/// Computes the header checksum: the first four bytes of SHA256(SHA256(payload)).
#[must_use]
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}
