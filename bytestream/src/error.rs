//! Error types for byte stream operations.

use std::fmt;
use std::io;

/// Result type for byte stream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing byte primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// The stream ended before the requested bytes were available.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes that were actually read before the end.
        available: usize,
    },

    /// A varint used a wider encoding than its value requires.
    NonCanonicalVarint {
        /// The decoded value.
        value: u64,
        /// Number of bytes the value was encoded with.
        encoded_len: usize,
    },

    /// The underlying reader or writer failed.
    ///
    /// `io::Error` is not `Clone`, so only its kind and message are kept.
    Io {
        /// Kind of the original I/O error.
        kind: io::ErrorKind,
        /// Rendered message of the original I/O error.
        message: String,
    },
}

impl ByteError {
    /// Captures an I/O error that is not an end-of-stream condition.
    #[must_use]
    pub fn io(err: &io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Returns `true` if the stream ended early.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of stream: requested {requested} bytes but only {available} available"
                )
            }
            Self::NonCanonicalVarint { value, encoded_len } => {
                write!(
                    f,
                    "non-canonical varint: value {value} encoded in {encoded_len} bytes"
                )
            }
            Self::Io { kind, message } => write!(f, "i/o error ({kind:?}): {message}"),
        }
    }
}

impl std::error::Error for ByteError {}
