//! The `notfound` message.

use std::io::{Read, Write};

use bytestream::{ByteReader, ByteWriter};
use wire::{EncodeError, Message, ProtocolVersion, WireResult};

use crate::error::CapacityExceeded;
use crate::inv_vect::InvVect;
use crate::list::{decode_list, encode_list, InventoryList, MAX_INV_PAYLOAD};

/// Command string for [`MsgNotFound`].
pub const CMD_NOTFOUND: &str = "notfound";

/// Answers a `getdata` for data the sender cannot provide.
///
/// Each message carries at most [`MAX_INV_PER_MSG`](crate::MAX_INV_PER_MSG)
/// inventory vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MsgNotFound {
    inv_list: InventoryList,
}

impl MsgNotFound {
    /// Creates an empty `notfound` message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inv_list: InventoryList::new(),
        }
    }

    /// Adds an inventory vector, failing if the message is full.
    pub fn add_inv_vect(&mut self, iv: InvVect) -> Result<(), CapacityExceeded> {
        self.inv_list.append_in(iv, "MsgNotFound::add_inv_vect")
    }

    /// Returns the inventory the sender could not serve.
    #[must_use]
    pub const fn inventory(&self) -> &InventoryList {
        &self.inv_list
    }

    /// Consumes the message, returning its inventory.
    #[must_use]
    pub fn into_inventory(self) -> InventoryList {
        self.inv_list
    }
}

impl From<InventoryList> for MsgNotFound {
    fn from(inv_list: InventoryList) -> Self {
        Self { inv_list }
    }
}

impl Message for MsgNotFound {
    fn command(&self) -> &'static str {
        CMD_NOTFOUND
    }

    fn max_payload_length(&self, _pver: ProtocolVersion) -> u32 {
        MAX_INV_PAYLOAD
    }

    fn encode(&self, writer: &mut dyn Write, pver: ProtocolVersion) -> Result<(), EncodeError> {
        let mut writer = ByteWriter::new(writer);
        encode_list(&self.inv_list, &mut writer, pver, "MsgNotFound::encode")
    }

    fn decode(&mut self, reader: &mut dyn Read, pver: ProtocolVersion) -> WireResult<()> {
        let mut reader = ByteReader::new(reader);
        self.inv_list = decode_list(&mut reader, pver, "MsgNotFound::decode")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{DecodeError, EncodeError};

    #[test]
    fn implements_message_contract() {
        let msg = MsgNotFound::new();
        assert_eq!(msg.command(), "notfound");
        assert_eq!(msg.max_payload_length(ProtocolVersion::default()), MAX_INV_PAYLOAD);
    }

    #[test]
    fn empty_roundtrip() {
        let mut buf = Vec::new();
        MsgNotFound::new()
            .encode(&mut buf, ProtocolVersion::default())
            .unwrap();
        assert_eq!(buf, vec![0x00]);

        let mut decoded = MsgNotFound::new();
        decoded
            .decode(&mut buf.as_slice(), ProtocolVersion::default())
            .unwrap();
        assert!(decoded.inventory().is_empty());
    }

    #[test]
    fn errors_name_message() {
        let mut bytes: &[u8] = &[0xFE, 0x00, 0x00, 0x01, 0x00];
        let err = MsgNotFound::new()
            .decode(&mut bytes, ProtocolVersion::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooManyItems {
                context: "MsgNotFound::decode",
                ..
            }
        ));

        // A closed sink surfaces as an I/O error.
        let mut closed = [0u8; 0];
        let err = MsgNotFound::new()
            .encode(&mut closed.as_mut_slice(), ProtocolVersion::default())
            .unwrap_err();
        assert!(matches!(err, EncodeError::Io { .. }));
    }
}
