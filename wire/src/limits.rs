//! Configurable limits for bounded decoding.

/// Largest payload any message may carry (32 MiB).
pub const MAX_MESSAGE_PAYLOAD: usize = 32 * 1024 * 1024;

/// Wire-level limits for message framing.
///
/// These limits are enforced on the header's claimed payload length before
/// the payload is read, so a peer cannot force a large allocation with a
/// single header. Per-message bounds (item counts, record sizes) belong to the
/// message types themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum payload size in bytes.
    pub max_payload_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_payload_bytes: MAX_MESSAGE_PAYLOAD,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_payload_bytes: 64 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_payload_bytes() {
        let limits = Limits::default();
        assert_eq!(limits.max_payload_bytes, 32 * 1024 * 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        assert!(Limits::for_testing().max_payload_bytes < Limits::default().max_payload_bytes);
    }

    #[test]
    fn limits_equality() {
        assert_eq!(Limits::default(), Limits::default());
        assert_ne!(Limits::default(), Limits::for_testing());
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_payload_bytes, 64 * 1024);
    }
}
