//! Message framing and the message contract for the invwire codec.
//!
//! This crate handles the Bitcoin P2P message envelope: the 24-byte header,
//! network magic, payload checksums and limit enforcement. It also defines the
//! [`Message`] trait every payload type implements, so framing code can treat
//! all message types uniformly. It does not know about inventory or any other
//! payload layout.
//!
//! # Design Principles
//!
//! - **Bounded decoding** - Claimed lengths are validated against limits before
//!   anything is allocated or read.
//! - **Uniform contract** - Framing only sees `dyn Message`.
//! - **No domain knowledge** - This crate handles framing, not payloads.
//!
//! Protocol reference:
//! <https://developer.bitcoin.org/reference/p2p_networking.html>

mod error;
mod frame;
mod header;
mod limits;
mod message;

pub use error::{DecodeError, EncodeError, LimitKind, Malformation, WireResult};
pub use frame::{decode_payload, encode_payload, read_message, write_message, RawMessage};
pub use header::{checksum, Command, MessageHeader, Network, COMMAND_SIZE, HEADER_SIZE};
pub use limits::{Limits, MAX_MESSAGE_PAYLOAD};
pub use message::{Message, ProtocolVersion, PROTOCOL_VERSION};
