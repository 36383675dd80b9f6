//! Bounded inventory lists and their wire codec.

use std::io::{Read, Write};
use std::slice;

use bytestream::{ByteReader, ByteWriter, MAX_VARINT_SIZE};
use log::warn;
use wire::{DecodeError, EncodeError, ProtocolVersion, WireResult};

use crate::error::CapacityExceeded;
use crate::inv_vect::{read_inv_vect, write_inv_vect, InvVect, INV_VECT_SIZE};

/// Maximum number of inventory vectors in a single message.
pub const MAX_INV_PER_MSG: usize = 50_000;

/// Upper bound on the encoded size of an inventory list: the count varint
/// plus `MAX_INV_PER_MSG` records.
#[allow(clippy::cast_possible_truncation)]
pub const MAX_INV_PAYLOAD: u32 = (MAX_VARINT_SIZE + MAX_INV_PER_MSG * INV_VECT_SIZE) as u32;

/// An ordered list of inventory vectors holding at most [`MAX_INV_PER_MSG`]
/// entries.
///
/// Order is the advertisement order and is preserved through encode and
/// decode. The bound holds at all times: [`append`](Self::append) is the only
/// way to grow a list, and decoding goes through it as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<InvVect>", into = "Vec<InvVect>")
)]
pub struct InventoryList {
    items: Vec<InvVect>,
}

impl InventoryList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` entries, capped at
    /// [`MAX_INV_PER_MSG`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(MAX_INV_PER_MSG)),
        }
    }

    /// Appends `item`, failing without modifying the list if it is full.
    pub fn append(&mut self, item: InvVect) -> Result<(), CapacityExceeded> {
        self.append_in(item, "InventoryList::append")
    }

    /// Appends `item`, attributing a bound violation to `context`.
    pub(crate) fn append_in(
        &mut self,
        item: InvVect,
        context: &'static str,
    ) -> Result<(), CapacityExceeded> {
        if self.items.len() + 1 > MAX_INV_PER_MSG {
            return Err(CapacityExceeded {
                context,
                limit: MAX_INV_PER_MSG,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if no further entry can be appended.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_INV_PER_MSG
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> slice::Iter<'_, InvVect> {
        self.items.iter()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[InvVect] {
        &self.items
    }

    /// Returns the upper bound on the encoded size of any list.
    #[must_use]
    pub const fn max_payload_length(_pver: ProtocolVersion) -> u32 {
        MAX_INV_PAYLOAD
    }

    /// Returns the exact encoded size of this list.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        bytestream::varint_size(self.items.len() as u64) + self.items.len() * INV_VECT_SIZE
    }

    /// Decodes a count-prefixed list.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>, pver: ProtocolVersion) -> WireResult<Self> {
        decode_list(reader, pver, "InventoryList::decode")
    }

    /// Encodes the list as a count followed by each entry.
    pub fn encode<W: Write>(
        &self,
        writer: &mut ByteWriter<W>,
        pver: ProtocolVersion,
    ) -> Result<(), EncodeError> {
        encode_list(self, writer, pver, "InventoryList::encode")
    }
}

/// Decodes a list, attributing bound violations to `context`.
///
/// The claimed count is checked against [`MAX_INV_PER_MSG`] before any entry
/// is read or any storage is reserved. A failure part way through discards
/// everything read so far.
pub(crate) fn decode_list<R: Read>(
    reader: &mut ByteReader<R>,
    pver: ProtocolVersion,
    context: &'static str,
) -> WireResult<InventoryList> {
    let count = reader.read_varint()?;
    if count > MAX_INV_PER_MSG as u64 {
        warn!("{context}: rejecting inventory count {count} (max {MAX_INV_PER_MSG})");
        return Err(DecodeError::TooManyItems {
            context,
            count,
            max: MAX_INV_PER_MSG,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut list = InventoryList::with_capacity(count as usize);
    for _ in 0..count {
        let item = read_inv_vect(reader, pver)?;
        list.append_in(item, context)
            .map_err(|CapacityExceeded { limit, .. }| DecodeError::TooManyItems {
                context,
                count,
                max: limit,
            })?;
    }
    Ok(list)
}

/// Encodes a list, attributing bound violations to `context`.
///
/// The bound is re-checked before anything is written.
pub(crate) fn encode_list<W: Write>(
    list: &InventoryList,
    writer: &mut ByteWriter<W>,
    pver: ProtocolVersion,
    context: &'static str,
) -> Result<(), EncodeError> {
    let count = list.items.len();
    if count > MAX_INV_PER_MSG {
        return Err(EncodeError::TooManyItems {
            context,
            count,
            max: MAX_INV_PER_MSG,
        });
    }

    writer.write_varint(count as u64)?;
    for item in &list.items {
        write_inv_vect(writer, pver, item)?;
    }
    Ok(())
}

impl<'a> IntoIterator for &'a InventoryList {
    type Item = &'a InvVect;
    type IntoIter = slice::Iter<'a, InvVect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for InventoryList {
    type Item = InvVect;
    type IntoIter = std::vec::IntoIter<InvVect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl TryFrom<Vec<InvVect>> for InventoryList {
    type Error = CapacityExceeded;

    fn try_from(items: Vec<InvVect>) -> Result<Self, Self::Error> {
        if items.len() > MAX_INV_PER_MSG {
            return Err(CapacityExceeded {
                context: "InventoryList::try_from",
                limit: MAX_INV_PER_MSG,
            });
        }
        Ok(Self { items })
    }
}

impl From<InventoryList> for Vec<InvVect> {
    fn from(list: InventoryList) -> Self {
        list.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Hash256;
    use crate::inv_vect::InvType;

    fn iv(n: u32) -> InvVect {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&n.to_le_bytes());
        InvVect::new(InvType::Tx, Hash256::new(bytes))
    }

    fn full_list() -> InventoryList {
        let mut list = InventoryList::with_capacity(MAX_INV_PER_MSG);
        for n in 0..MAX_INV_PER_MSG as u32 {
            list.append(iv(n)).unwrap();
        }
        list
    }

    fn encode(list: &InventoryList) -> Vec<u8> {
        let mut writer = ByteWriter::new(Vec::new());
        list.encode(&mut writer, ProtocolVersion::default()).unwrap();
        writer.into_inner()
    }

    fn decode(bytes: &[u8]) -> WireResult<InventoryList> {
        InventoryList::decode(&mut ByteReader::new(bytes), ProtocolVersion::default())
    }

    #[test]
    fn new_is_empty() {
        let list = InventoryList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(!list.is_full());
    }

    #[test]
    fn append_preserves_order() {
        let mut list = InventoryList::new();
        for n in 0..5 {
            list.append(iv(n)).unwrap();
        }
        let items: Vec<InvVect> = list.iter().copied().collect();
        assert_eq!(items, (0..5).map(iv).collect::<Vec<_>>());
    }

    #[test]
    fn append_to_full_list_fails_unchanged() {
        let mut list = full_list();
        assert!(list.is_full());
        let before = list.clone();

        let err = list.append(iv(u32::MAX)).unwrap_err();
        assert_eq!(
            err,
            CapacityExceeded {
                context: "InventoryList::append",
                limit: MAX_INV_PER_MSG
            }
        );
        assert_eq!(list, before);
        assert_eq!(list.len(), MAX_INV_PER_MSG);
    }

    #[test]
    fn with_capacity_is_capped() {
        let list = InventoryList::with_capacity(usize::MAX);
        assert!(list.items.capacity() >= MAX_INV_PER_MSG);
        assert!(list.is_empty());
    }

    #[test]
    fn try_from_vec_enforces_bound() {
        let ok = InventoryList::try_from(vec![iv(1), iv(2)]).unwrap();
        assert_eq!(ok.len(), 2);

        let too_many = vec![iv(0); MAX_INV_PER_MSG + 1];
        assert_eq!(
            InventoryList::try_from(too_many).unwrap_err(),
            CapacityExceeded {
                context: "InventoryList::try_from",
                limit: MAX_INV_PER_MSG
            }
        );
    }

    #[test]
    fn empty_list_encodes_to_single_zero() {
        let bytes = encode(&InventoryList::new());
        assert_eq!(bytes, vec![0x00]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn roundtrip_small() {
        let list = InventoryList::try_from((0..3).map(iv).collect::<Vec<_>>()).unwrap();
        let bytes = encode(&list);
        assert_eq!(bytes.len(), 1 + 3 * INV_VECT_SIZE);
        assert_eq!(bytes.len(), list.encoded_len());
        assert_eq!(decode(&bytes).unwrap(), list);
    }

    #[test]
    fn roundtrip_full() {
        let list = full_list();
        let bytes = encode(&list);
        assert_eq!(bytes.len(), 3 + MAX_INV_PER_MSG * INV_VECT_SIZE);
        assert_eq!(decode(&bytes).unwrap(), list);
    }

    #[test]
    fn oversized_count_rejected_before_items() {
        // Count only; no item bytes follow.
        let mut writer = ByteWriter::new(Vec::new());
        writer.write_varint(MAX_INV_PER_MSG as u64 + 1).unwrap();
        let err = decode(&writer.into_inner()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooManyItems {
                context: "InventoryList::decode",
                count: MAX_INV_PER_MSG as u64 + 1,
                max: MAX_INV_PER_MSG,
            }
        );
    }

    #[test]
    fn huge_count_rejected() {
        let err = decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooManyItems {
                count: u64::MAX,
                ..
            }
        ));
    }

    #[test]
    fn truncated_item_discards_list() {
        let list = InventoryList::try_from((0..2).map(iv).collect::<Vec<_>>()).unwrap();
        let mut bytes = encode(&list);
        bytes[0] = 3;
        let err = decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                requested: 4,
                available: 0
            }
        );
    }

    #[test]
    fn missing_count_is_truncated() {
        assert!(matches!(
            decode(&[]).unwrap_err(),
            DecodeError::Truncated { .. }
        ));
    }

    #[test]
    fn non_canonical_count_is_malformed() {
        let err = decode(&[0xFD, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn encode_rechecks_bound_without_writing() {
        // Bypass append to build a list the bound should never allow.
        let list = InventoryList {
            items: vec![iv(0); MAX_INV_PER_MSG + 1],
        };
        let mut writer = ByteWriter::new(Vec::new());
        let err = list
            .encode(&mut writer, ProtocolVersion::default())
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::TooManyItems {
                context: "InventoryList::encode",
                count: MAX_INV_PER_MSG + 1,
                max: MAX_INV_PER_MSG,
            }
        );
        assert_eq!(writer.bytes_written(), 0);
    }

    #[test]
    fn max_payload_formula() {
        assert_eq!(MAX_INV_PAYLOAD, 1_800_009);
        for pver in [0, 60_002, 70_016, u32::MAX] {
            assert_eq!(
                InventoryList::max_payload_length(ProtocolVersion::new(pver)),
                (MAX_VARINT_SIZE + MAX_INV_PER_MSG * INV_VECT_SIZE) as u32
            );
        }
    }

    #[test]
    fn into_iterators() {
        let list = InventoryList::try_from(vec![iv(7), iv(8)]).unwrap();
        let borrowed: Vec<&InvVect> = (&list).into_iter().collect();
        assert_eq!(borrowed.len(), 2);
        let owned: Vec<InvVect> = list.into_iter().collect();
        assert_eq!(owned, vec![iv(7), iv(8)]);
    }
}
