//! The `getdata` message.

use std::io::{Read, Write};

use bytestream::{ByteReader, ByteWriter};
use wire::{EncodeError, Message, ProtocolVersion, WireResult};

use crate::error::CapacityExceeded;
use crate::inv_vect::InvVect;
use crate::list::{decode_list, encode_list, InventoryList, MAX_INV_PAYLOAD};

/// Command string for [`MsgGetData`].
pub const CMD_GETDATA: &str = "getdata";

/// Requests the data behind a list of inventory vectors.
///
/// Usually sent after an `inv` to fetch the blocks and transactions the
/// receiver does not have yet. Each message carries at most
/// [`MAX_INV_PER_MSG`](crate::MAX_INV_PER_MSG) inventory vectors; build it up
/// with [`add_inv_vect`](Self::add_inv_vect).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MsgGetData {
    inv_list: InventoryList,
}

impl MsgGetData {
    /// Creates an empty `getdata` message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inv_list: InventoryList::new(),
        }
    }

    /// Adds an inventory vector, failing if the message is full.
    pub fn add_inv_vect(&mut self, iv: InvVect) -> Result<(), CapacityExceeded> {
        self.inv_list.append_in(iv, "MsgGetData::add_inv_vect")
    }

    /// Returns the requested inventory.
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

impl From<InventoryList> for MsgGetData {
    fn from(inv_list: InventoryList) -> Self {
        Self { inv_list }
    }
}

impl Message for MsgGetData {
    fn command(&self) -> &'static str {
        CMD_GETDATA
    }

    fn max_payload_length(&self, _pver: ProtocolVersion) -> u32 {
        MAX_INV_PAYLOAD
    }

    fn encode(&self, writer: &mut dyn Write, pver: ProtocolVersion) -> Result<(), EncodeError> {
        let mut writer = ByteWriter::new(writer);
        encode_list(&self.inv_list, &mut writer, pver, "MsgGetData::encode")
    }

    fn decode(&mut self, reader: &mut dyn Read, pver: ProtocolVersion) -> WireResult<()> {
        let mut reader = ByteReader::new(reader);
        self.inv_list = decode_list(&mut reader, pver, "MsgGetData::decode")?;
        Ok(())
    }
}
