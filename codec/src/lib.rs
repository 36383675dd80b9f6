//! Inventory messages for the Bitcoin peer-to-peer protocol.
//!
//! This crate builds on `bytestream` and `wire` to encode and decode the
//! three messages that carry inventory vectors: `inv`, `getdata` and
//! `notfound`. All three share one payload layout, a CompactSize count
//! followed by that many 36-byte vectors.
//!
//! # Bounds
//!
//! A message carries at most [`MAX_INV_PER_MSG`] vectors. The bound holds
//! everywhere a list can grow:
//!
//! - [`InventoryList::append`] refuses the item that would exceed it.
//! - Decoding checks the claimed count before reading any vector, and never
//!   allocates for more than the bound.
//! - Encoding re-checks the count before writing a single byte.
//!
//! # Example
//!
//! ```
//! use codec::{Hash256, InvType, InvVect, MsgInv};
//! use wire::{Message, ProtocolVersion};
//!
//! let mut msg = MsgInv::new();
//! msg.add_inv_vect(InvVect::new(InvType::Tx, Hash256::new([7; 32])))
//!     .unwrap();
//!
//! let mut payload = Vec::new();
//! msg.encode(&mut payload, ProtocolVersion::default()).unwrap();
//! assert_eq!(payload.len(), 1 + 36);
//!
//! let mut decoded = MsgInv::new();
//! decoded
//!     .decode(&mut payload.as_slice(), ProtocolVersion::default())
//!     .unwrap();
//! assert_eq!(decoded, msg);
//! ```

mod dispatch;
mod error;
mod getdata;
mod hash;
mod inv;
mod inv_vect;
mod list;
mod notfound;

pub use dispatch::{decode_message, make_empty_message, read_inventory_message, InventoryMessage};
pub use error::CapacityExceeded;
pub use getdata::{MsgGetData, CMD_GETDATA};
pub use hash::{Hash256, HASH_SIZE};
pub use inv::{MsgInv, CMD_INV};
pub use inv_vect::{read_inv_vect, write_inv_vect, InvType, InvVect, INV_VECT_SIZE};
pub use list::{InventoryList, MAX_INV_PAYLOAD, MAX_INV_PER_MSG};
pub use notfound::{MsgNotFound, CMD_NOTFOUND};
pub use wire::{DecodeError, EncodeError, Message, ProtocolVersion, PROTOCOL_VERSION};
