//! Inspection, decoding and encoding tools for framed inventory messages.
//!
//! The binary is a thin shell over these functions:
//!
//! - [`inspect_message`] summarizes a frame: header fields and, for the
//!   inventory family, how many vectors of each type it carries.
//! - [`decode_message_report`] decodes a frame into a serializable report.
//! - [`encode_inventory_message`] builds and frames a message from
//!   `TYPE:HASH` item specs parsed with [`parse_item`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use codec::{
    decode_message, Hash256, InvType, InvVect, InventoryList, InventoryMessage, MsgGetData,
    MsgInv, MsgNotFound, CMD_GETDATA, CMD_INV, CMD_NOTFOUND,
};
use serde::Serialize;
use wire::{read_message, write_message, Limits, Message, Network, ProtocolVersion};

/// Header fields of one frame plus an inventory summary when applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub network: String,
    pub command: String,
    pub payload_len: usize,
    pub checksum: String,
    /// Present only for `inv`, `getdata` and `notfound`.
    pub inventory: Option<InventorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub count: usize,
    /// Vector count per type, keyed by type name.
    pub by_type: BTreeMap<String, usize>,
}

/// A fully decoded frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub network: String,
    pub command: String,
    pub payload_len: usize,
    pub message: InventoryMessage,
}

fn is_inventory_command(command: &str) -> bool {
    matches!(command, CMD_INV | CMD_GETDATA | CMD_NOTFOUND)
}

/// Reads one frame from `bytes` and summarizes it.
///
/// Frames outside the inventory family are reported without decoding their
/// payload.
pub fn inspect_message(
    bytes: &[u8],
    network: Network,
    limits: &Limits,
    pver: ProtocolVersion,
) -> Result<InspectReport> {
    let mut reader = bytes;
    let raw = read_message(&mut reader, network, limits).context("read framed message")?;
    if !reader.is_empty() {
        log::warn!("{} trailing bytes after frame ignored", reader.len());
    }

    let inventory = if is_inventory_command(raw.command()) {
        let message = decode_message(&raw, pver).context("decode inventory payload")?;
        let list = message.inventory();
        let mut by_type = BTreeMap::new();
        for iv in list {
            *by_type.entry(iv.inv_type.to_string()).or_insert(0) += 1;
        }
        Some(InventorySummary {
            count: list.len(),
            by_type,
        })
    } else {
        None
    };

    Ok(InspectReport {
        network: network.to_string(),
        command: raw.command().to_string(),
        payload_len: raw.payload.len(),
        checksum: hex::encode(raw.header.checksum),
        inventory,
    })
}

/// Reads and decodes one inventory frame from `bytes`.
pub fn decode_message_report(
    bytes: &[u8],
    network: Network,
    limits: &Limits,
    pver: ProtocolVersion,
) -> Result<DecodeReport> {
    let raw = read_message(&mut &bytes[..], network, limits).context("read framed message")?;
    let message = decode_message(&raw, pver)
        .with_context(|| format!("decode {} payload", raw.command()))?;
    Ok(DecodeReport {
        network: network.to_string(),
        command: raw.command().to_string(),
        payload_len: raw.payload.len(),
        message,
    })
}

/// Renders a decode report as indented text, one vector per line.
pub fn format_report_pretty(report: &DecodeReport) -> String {
    let inventory = report.message.inventory();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} on {} ({} payload bytes)",
        report.command, report.network, report.payload_len
    );
    let _ = writeln!(out, "inventory: {} vectors", inventory.len());
    for (index, iv) in inventory.iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {} {}", iv.inv_type, iv.hash);
    }
    out
}

/// Parses an item spec of the form `TYPE:HASH`.
///
/// `TYPE` is a type name such as `tx`, `block` or `witness_block`, or a raw
/// numeric tag (decimal or `0x` hex). `HASH` is 64 hex digits in display
/// order.
pub fn parse_item(spec: &str) -> Result<InvVect> {
    let Some((kind, hash)) = spec.split_once(':') else {
        bail!("item {spec:?} is not of the form TYPE:HASH");
    };
    let inv_type = parse_inv_type(kind)?;
    let hash: Hash256 = hash
        .parse()
        .with_context(|| format!("invalid hash in item {spec:?}"))?;
    Ok(InvVect::new(inv_type, hash))
}

fn parse_inv_type(kind: &str) -> Result<InvType> {
    let inv_type = match kind.to_ascii_lowercase().as_str() {
        "error" => InvType::Error,
        "tx" => InvType::Tx,
        "block" => InvType::Block,
        "filtered_block" => InvType::FilteredBlock,
        "cmpct_block" => InvType::CmpctBlock,
        "witness_tx" => InvType::WitnessTx,
        "witness_block" => InvType::WitnessBlock,
        "witness_filtered_block" => InvType::WitnessFilteredBlock,
        other => {
            let raw = match other.strip_prefix("0x") {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => other.parse(),
            }
            .with_context(|| format!("unknown inventory type {kind:?}"))?;
            InvType::from_raw(raw)
        }
    };
    Ok(inv_type)
}

/// Builds a `command` message holding `items` and frames it for `network`.
pub fn encode_inventory_message(
    command: &str,
    items: &[InvVect],
    network: Network,
    pver: ProtocolVersion,
) -> Result<Vec<u8>> {
    let list = InventoryList::try_from(items.to_vec()).context("build inventory list")?;
    let message = match command {
        CMD_INV => InventoryMessage::Inv(MsgInv::from(list)),
        CMD_GETDATA => InventoryMessage::GetData(MsgGetData::from(list)),
        CMD_NOTFOUND => InventoryMessage::NotFound(MsgNotFound::from(list)),
        other => bail!("{other:?} is not an inventory command"),
    };

    let mut buf = Vec::new();
    let written = write_message(&mut buf, &message, pver, network, &Limits::default())
        .with_context(|| format!("encode {} message", message.command()))?;
    log::debug!("framed {command} with {} items ({written} bytes)", items.len());
    Ok(buf)
}
