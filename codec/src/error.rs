//! Error types for codec operations.

use std::fmt;

/// An application tried to grow an inventory list past its bound.
///
/// The list is left unchanged when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    /// The operation that rejected the item, e.g. `"MsgInv::add_inv_vect"`.
    pub context: &'static str,
    /// Maximum number of items the list may hold.
    pub limit: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: too many inventory vectors in message [max {}]",
            self.context, self.limit
        )
    }
}

impl std::error::Error for CapacityExceeded {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_display() {
        let err = CapacityExceeded {
            context: "MsgInv::add_inv_vect",
            limit: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("MsgInv::add_inv_vect: "));
        assert!(msg.contains("max 50000"));
    }

    #[test]
    fn capacity_exceeded_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CapacityExceeded>();
    }
}
