//! Message framing: header + payload over a byte stream.

use std::io::{Read, Write};

use bytestream::{ByteReader, ByteWriter};
use log::{debug, warn};

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::header::{checksum, Command, MessageHeader, Network};
use crate::limits::Limits;
use crate::message::{Message, ProtocolVersion};

/// A framed message whose payload has not been decoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub header: MessageHeader,
    pub payload: Vec<u8>,
}

impl RawMessage {
    /// Returns the command name from the header.
    #[must_use]
    pub fn command(&self) -> &str {
        self.header.command.as_str()
    }
}

/// Reads one framed message from `reader`.
///
/// The header's magic and claimed payload length are validated before the
/// payload is read, and the checksum is verified after. The payload itself
/// is not interpreted.
pub fn read_message<R: Read>(
    reader: &mut R,
    network: Network,
    limits: &Limits,
) -> WireResult<RawMessage> {
    let mut reader = ByteReader::new(reader);
    let header = MessageHeader::decode(&mut reader)?;

    if header.magic != network.magic() {
        warn!(
            "rejecting message with magic 0x{:08X} on {network}",
            header.magic
        );
        return Err(DecodeError::InvalidMagic {
            found: header.magic,
            expected: network.magic(),
        });
    }

    let length = usize::try_from(header.length).unwrap_or(usize::MAX);
    if length > limits.max_payload_bytes {
        warn!(
            "rejecting {} message: payload length {length} exceeds {}",
            header.command, limits.max_payload_bytes
        );
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::PayloadBytes,
            limit: limits.max_payload_bytes,
            actual: length,
        });
    }

    let payload = reader.read_vec(length)?;

    let found = checksum(&payload);
    if found != header.checksum {
        warn!("rejecting {} message: checksum mismatch", header.command);
        return Err(DecodeError::ChecksumMismatch {
            expected: header.checksum,
            found,
        });
    }

    debug!("read {} message ({length} payload bytes)", header.command);
    Ok(RawMessage { header, payload })
}

/// Encodes `message`'s payload into a fresh buffer.
///
/// Fails if the payload is larger than the message's own
/// `max_payload_length`.
pub fn encode_payload(
    message: &dyn Message,
    pver: ProtocolVersion,
) -> Result<Vec<u8>, EncodeError> {
    let mut payload = Vec::new();
    message.encode(&mut payload, pver)?;

    let max = usize::try_from(message.max_payload_length(pver)).unwrap_or(usize::MAX);
    if payload.len() > max {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::MessagePayload,
            limit: max,
            actual: payload.len(),
        });
    }
    Ok(payload)
}

/// Encodes and frames `message`, writing header and payload to `writer`.
///
/// Returns the total number of bytes written. If the writer fails part way,
/// an unspecified prefix of the frame has been written and the stream should
/// be considered unusable.
pub fn write_message<W: Write>(
    writer: &mut W,
    message: &dyn Message,
    pver: ProtocolVersion,
    network: Network,
    limits: &Limits,
) -> Result<usize, EncodeError> {
    let command = Command::new(message.command())?;
    let payload = encode_payload(message, pver)?;
    if payload.len() > limits.max_payload_bytes {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::PayloadBytes,
            limit: limits.max_payload_bytes,
            actual: payload.len(),
        });
    }

    let header = MessageHeader::for_payload(network, command, &payload);
    let mut writer = ByteWriter::new(writer);
    header.encode(&mut writer)?;
    writer.write_bytes(&payload)?;

    debug!(
        "wrote {command} message ({} payload bytes)",
        payload.len()
    );
    Ok(writer.bytes_written())
}

/// Decodes a framed payload into `message`.
///
/// The caller selects `message` by the header command; a mismatch is
/// reported as [`DecodeError::CommandMismatch`]. The payload length is checked
/// against the message's `max_payload_length` before any decoding.
pub fn decode_payload(
    message: &mut dyn Message,
    raw: &RawMessage,
    pver: ProtocolVersion,
) -> WireResult<()> {
    if raw.command() != message.command() {
        return Err(DecodeError::CommandMismatch {
            expected: message.command(),
            found: raw.command().to_string(),
        });
    }

    let max = usize::try_from(message.max_payload_length(pver)).unwrap_or(usize::MAX);
    if raw.payload.len() > max {
        warn!(
            "rejecting {} message: payload length {} exceeds {max}",
            raw.command(),
            raw.payload.len()
        );
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::MessagePayload,
            limit: max,
            actual: raw.payload.len(),
        });
    }

    let mut payload = raw.payload.as_slice();
    message.decode(&mut payload, pver)
}
