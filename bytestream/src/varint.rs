//! CompactSize varint sizing.

/// Prefix introducing a 2-byte little-endian value.
pub(crate) const VARINT_U16_PREFIX: u8 = 0xFD;

/// Prefix introducing a 4-byte little-endian value.
pub(crate) const VARINT_U32_PREFIX: u8 = 0xFE;

/// Prefix introducing an 8-byte little-endian value.
pub(crate) const VARINT_U64_PREFIX: u8 = 0xFF;

/// Largest number of bytes a varint can occupy on the wire.
pub const MAX_VARINT_SIZE: usize = 9;

/// Returns the number of bytes the canonical encoding of `value` occupies.
#[must_use]
pub const fn varint_size(value: u64) -> usize {
    if value < VARINT_U16_PREFIX as u64 {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        MAX_VARINT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_at_boundaries() {
        assert_eq!(varint_size(0), 1);
        assert_eq!(varint_size(0xFC), 1);
        assert_eq!(varint_size(0xFD), 3);
        assert_eq!(varint_size(0xFFFF), 3);
        assert_eq!(varint_size(0x1_0000), 5);
        assert_eq!(varint_size(0xFFFF_FFFF), 5);
        assert_eq!(varint_size(0x1_0000_0000), 9);
        assert_eq!(varint_size(u64::MAX), MAX_VARINT_SIZE);
    }

    #[test]
    fn size_is_const_evaluable() {
        const SIZE: usize = varint_size(50_000);
        assert_eq!(SIZE, 3);
    }
}
