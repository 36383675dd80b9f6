//! The contract shared by every message type.

use std::fmt;
use std::io::{Read, Write};

use crate::error::{EncodeError, WireResult};

/// Protocol version negotiated by the `version` handshake.
pub const PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion::new(70016);

/// A negotiated protocol version.
///
/// Some record layouts change with the version, so every encode and decode
/// call receives one even when the message at hand ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u32);

impl ProtocolVersion {
    /// Creates a protocol version.
    #[must_use]
    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        PROTOCOL_VERSION
    }
}

impl From<u32> for ProtocolVersion {
    fn from(version: u32) -> Self {
        Self(version)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A protocol message.
///
/// Framing code works against `dyn Message`: it never inspects the concrete
/// type, only the command string and the four operations below. The trait is
/// object safe.
pub trait Message: fmt::Debug + Send + Sync {
    /// Returns the command identifier routing this message.
    fn command(&self) -> &'static str;

    /// Returns an upper bound on the encoded payload size.
    ///
    /// Framing rejects larger payloads before decoding them.
    fn max_payload_length(&self, pver: ProtocolVersion) -> u32;

    /// Writes the payload.
    fn encode(&self, writer: &mut dyn Write, pver: ProtocolVersion) -> Result<(), EncodeError>;

    /// Reads the payload into `self`.
    ///
    /// On error `self` is left as it was before the call.
    fn decode(&mut self, reader: &mut dyn Read, pver: ProtocolVersion) -> WireResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_version_default() {
        assert_eq!(ProtocolVersion::default().raw(), 70016);
        assert_eq!(ProtocolVersion::default(), PROTOCOL_VERSION);
    }

    #[test]
    fn protocol_version_ordering() {
        assert!(ProtocolVersion::new(60002) < PROTOCOL_VERSION);
        assert_eq!(ProtocolVersion::from(60002).to_string(), "60002");
    }

    #[test]
    fn message_is_object_safe() {
        fn assert_object_safe(_: Option<&dyn Message>) {}
        assert_object_safe(None);
    }
}
