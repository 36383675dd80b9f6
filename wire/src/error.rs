//! Error types for wire format operations.

use std::fmt;
use std::io;

use bytestream::ByteError;

use crate::header::COMMAND_SIZE;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a message or its payload.
///
/// Every variant indicates a protocol violation or a dead transport; callers
/// are expected to drop the peer rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The stream ended before the expected bytes were available.
    Truncated { requested: usize, available: usize },

    /// Bytes were present but do not form a valid value.
    Malformed(Malformation),

    /// A count prefix claims more items than the message allows.
    TooManyItems {
        context: &'static str,
        count: u64,
        max: usize,
    },

    /// The underlying reader failed.
    Io { kind: io::ErrorKind, message: String },

    /// The header magic does not match the expected network.
    InvalidMagic { found: u32, expected: u32 },

    /// The header command field is not NUL-padded printable ASCII.
    InvalidCommand { raw: [u8; COMMAND_SIZE] },

    /// No message type is registered for the command.
    UnknownCommand { command: String },

    /// A frame was routed to a message type with a different command.
    CommandMismatch {
        expected: &'static str,
        found: String,
    },

    /// The payload checksum does not match the header.
    ChecksumMismatch { expected: [u8; 4], found: [u8; 4] },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific reasons a value can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// A varint used a wider encoding than its value requires.
    NonCanonicalVarint { value: u64, encoded_len: usize },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// The transport-wide payload limit from [`Limits`](crate::Limits).
    PayloadBytes,
    /// The per-message bound reported by `Message::max_payload_length`.
    MessagePayload,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The message holds more items than the protocol allows.
    TooManyItems {
        context: &'static str,
        count: usize,
        max: usize,
    },

    /// The encoded payload is larger than allowed.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// The command string does not fit the header command field.
    InvalidCommand { command: String },

    /// The underlying writer failed.
    Io { kind: io::ErrorKind, message: String },
}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Truncated {
                requested,
                available,
            },
            ByteError::NonCanonicalVarint { value, encoded_len } => {
                Self::Malformed(Malformation::NonCanonicalVarint { value, encoded_len })
            }
            ByteError::Io { kind, message } => Self::Io { kind, message },
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::Io { kind, message } => Self::Io { kind, message },
            other => Self::Io {
                kind: io::ErrorKind::Other,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                requested,
                available,
            } => {
                write!(
                    f,
                    "truncated: need {requested} bytes but only {available} available"
                )
            }
            Self::Malformed(reason) => write!(f, "malformed: {reason}"),
            Self::TooManyItems {
                context,
                count,
                max,
            } => {
                write!(f, "{context}: too many items in message [{count} > {max}]")
            }
            Self::Io { kind, message } => write!(f, "i/o error ({kind:?}): {message}"),
            Self::InvalidMagic { found, expected } => {
                write!(
                    f,
                    "invalid magic number: 0x{found:08X}, expected 0x{expected:08X}"
                )
            }
            Self::InvalidCommand { raw } => write!(f, "invalid command field: {raw:02X?}"),
            Self::UnknownCommand { command } => write!(f, "unknown command: {command:?}"),
            Self::CommandMismatch { expected, found } => {
                write!(f, "command mismatch: expected {expected:?}, found {found:?}")
            }
            Self::ChecksumMismatch { expected, found } => {
                write!(
                    f,
                    "checksum mismatch: header {expected:02x?}, payload {found:02x?}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonCanonicalVarint { value, encoded_len } => {
                write!(
                    f,
                    "non-canonical varint: value {value} encoded in {encoded_len} bytes"
                )
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PayloadBytes => "payload bytes",
            Self::MessagePayload => "message payload",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyItems {
                context,
                count,
                max,
            } => {
                write!(f, "{context}: too many items in message [{count} > {max}]")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::InvalidCommand { command } => {
                write!(
                    f,
                    "invalid command {command:?}: must be at most {COMMAND_SIZE} printable ASCII bytes"
                )
            }
            Self::Io { kind, message } => write!(f, "i/o error ({kind:?}): {message}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_invalid_magic() {
        let err = DecodeError::InvalidMagic {
            found: 0xDEAD_BEEF,
            expected: 0xD9B4_BEF9,
        };
        let msg = err.to_string();
        assert!(msg.contains("DEADBEEF"));
        assert!(msg.contains("D9B4BEF9"));
    }

    #[test]
    fn decode_error_display_too_many_items() {
        let err = DecodeError::TooManyItems {
            context: "MsgInv::decode",
            count: 50_001,
            max: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("MsgInv::decode"));
        assert!(msg.contains("50001"));
        assert!(msg.contains("50000"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::PayloadBytes,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("payload bytes"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn decode_error_display_command_mismatch() {
        let err = DecodeError::CommandMismatch {
            expected: "inv",
            found: "getdata".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"inv\""));
        assert!(msg.contains("\"getdata\""));
    }

    #[test]
    fn byte_eof_maps_to_truncated() {
        let err = DecodeError::from(ByteError::UnexpectedEof {
            requested: 36,
            available: 10,
        });
        assert_eq!(
            err,
            DecodeError::Truncated {
                requested: 36,
                available: 10
            }
        );
    }

    #[test]
    fn byte_non_canonical_maps_to_malformed() {
        let err = DecodeError::from(ByteError::NonCanonicalVarint {
            value: 1,
            encoded_len: 3,
        });
        assert!(matches!(
            err,
            DecodeError::Malformed(Malformation::NonCanonicalVarint { value: 1, .. })
        ));
        assert!(err.to_string().contains("non-canonical"));
    }

    #[test]
    fn byte_io_maps_to_io() {
        let source = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        let decode = DecodeError::from(ByteError::io(&source));
        let encode = EncodeError::from(ByteError::io(&source));
        assert!(matches!(
            decode,
            DecodeError::Io {
                kind: io::ErrorKind::ConnectionReset,
                ..
            }
        ));
        assert!(matches!(
            encode,
            EncodeError::Io {
                kind: io::ErrorKind::ConnectionReset,
                ..
            }
        ));
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::TooManyItems {
            context: "MsgInv::encode",
            count: 50_001,
            max: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("too many items"));

        let err = EncodeError::InvalidCommand {
            command: "waytoolongcommand".to_string(),
        };
        assert!(err.to_string().contains("waytoolongcommand"));
    }
}
