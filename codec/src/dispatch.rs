//! Routing framed messages to the inventory message types by command.

use std::io::{Read, Write};

use log::debug;
use wire::{
    decode_payload, read_message, DecodeError, EncodeError, Limits, Message, Network,
    ProtocolVersion, RawMessage, WireResult,
};

use crate::getdata::{MsgGetData, CMD_GETDATA};
use crate::inv::{MsgInv, CMD_INV};
use crate::list::InventoryList;
use crate::notfound::{MsgNotFound, CMD_NOTFOUND};

/// Creates an empty message for `command`, ready to decode into.
///
/// Generic framing code holds the result as `dyn Message` and never looks
/// at the concrete type.
pub fn make_empty_message(command: &str) -> WireResult<Box<dyn Message>> {
    match command {
        CMD_INV => Ok(Box::new(MsgInv::new())),
        CMD_GETDATA => Ok(Box::new(MsgGetData::new())),
        CMD_NOTFOUND => Ok(Box::new(MsgNotFound::new())),
        other => Err(DecodeError::UnknownCommand {
            command: other.to_string(),
        }),
    }
}

/// Any inventory-bearing message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryMessage {
    Inv(MsgInv),
    GetData(MsgGetData),
    NotFound(MsgNotFound),
}

impl InventoryMessage {
    /// Creates an empty message of the type `command` names.
    pub fn empty(command: &str) -> WireResult<Self> {
        match command {
            CMD_INV => Ok(Self::Inv(MsgInv::new())),
            CMD_GETDATA => Ok(Self::GetData(MsgGetData::new())),
            CMD_NOTFOUND => Ok(Self::NotFound(MsgNotFound::new())),
            other => Err(DecodeError::UnknownCommand {
                command: other.to_string(),
            }),
        }
    }

    /// Returns the carried inventory.
    #[must_use]
    pub const fn inventory(&self) -> &InventoryList {
        match self {
            Self::Inv(msg) => msg.inventory(),
            Self::GetData(msg) => msg.inventory(),
            Self::NotFound(msg) => msg.inventory(),
        }
    }

    fn as_message(&self) -> &dyn Message {
        match self {
            Self::Inv(msg) => msg,
            Self::GetData(msg) => msg,
            Self::NotFound(msg) => msg,
        }
    }

    fn as_message_mut(&mut self) -> &mut dyn Message {
        match self {
            Self::Inv(msg) => msg,
            Self::GetData(msg) => msg,
            Self::NotFound(msg) => msg,
        }
    }
}

impl Message for InventoryMessage {
    fn command(&self) -> &'static str {
        self.as_message().command()
    }

    fn max_payload_length(&self, pver: ProtocolVersion) -> u32 {
        self.as_message().max_payload_length(pver)
    }

    fn encode(&self, writer: &mut dyn Write, pver: ProtocolVersion) -> Result<(), EncodeError> {
        self.as_message().encode(writer, pver)
    }

    fn decode(&mut self, reader: &mut dyn Read, pver: ProtocolVersion) -> WireResult<()> {
        self.as_message_mut().decode(reader, pver)
    }
}

/// Decodes the payload of a framed inventory message.
///
/// The message type is chosen by the header command; the payload length is
/// checked against that type's bound before decoding starts.
pub fn decode_message(raw: &RawMessage, pver: ProtocolVersion) -> WireResult<InventoryMessage> {
    let mut message = InventoryMessage::empty(raw.command())?;
    decode_payload(&mut message, raw, pver)?;
    debug!(
        "decoded {} with {} inventory vectors",
        message.command(),
        message.inventory().len()
    );
    Ok(message)
}

/// Reads one framed message from `reader` and decodes it as inventory.
pub fn read_inventory_message<R: Read>(
    reader: &mut R,
    pver: ProtocolVersion,
    network: Network,
    limits: &Limits,
) -> WireResult<InventoryMessage> {
    let raw = read_message(reader, network, limits)?;
    decode_message(&raw, pver)
}
