use codec::{
    Hash256, InvType, InvVect, InventoryList, MsgGetData, MsgInv, MsgNotFound, INV_VECT_SIZE,
    MAX_INV_PAYLOAD, MAX_INV_PER_MSG,
};
use wire::{DecodeError, EncodeError, Message, ProtocolVersion};

fn pver() -> ProtocolVersion {
    ProtocolVersion::default()
}

fn varint(count: u64) -> Vec<u8> {
    let mut writer = bytestream::ByteWriter::new(Vec::new());
    writer.write_varint(count).unwrap();
    writer.into_inner()
}

/// `count` as a varint followed by `records` copies of one block vector.
fn payload(count: u64, records: usize) -> Vec<u8> {
    let mut bytes = varint(count);
    bytes.reserve(records * INV_VECT_SIZE);
    for _ in 0..records {
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[0x5A; 32]);
    }
    bytes
}

#[test]
fn decode_accepts_exactly_the_maximum() {
    let bytes = payload(MAX_INV_PER_MSG as u64, MAX_INV_PER_MSG);
    assert_eq!(bytes.len(), 3 + MAX_INV_PER_MSG * INV_VECT_SIZE);

    let mut msg = MsgInv::new();
    msg.decode(&mut bytes.as_slice(), pver()).unwrap();
    assert_eq!(msg.inventory().len(), MAX_INV_PER_MSG);
    assert!(msg.inventory().is_full());
    assert!(msg
        .inventory()
        .iter()
        .all(|iv| iv.inv_type == InvType::Block));
}

#[test]
fn decode_rejects_one_over_the_maximum() {
    // Same trailing records as the accepted case; only the count differs.
    let bytes = payload(MAX_INV_PER_MSG as u64 + 1, MAX_INV_PER_MSG);
    let mut remaining = bytes.as_slice();

    let err = MsgGetData::new().decode(&mut remaining, pver()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::TooManyItems {
            context: "MsgGetData::decode",
            count: MAX_INV_PER_MSG as u64 + 1,
            max: MAX_INV_PER_MSG,
        }
    );
    // Nothing past the count was consumed.
    assert_eq!(remaining.len(), MAX_INV_PER_MSG * INV_VECT_SIZE);
}

#[test]
fn huge_count_fails_without_reading_records() {
    let bytes = varint(u64::MAX);
    let err = MsgNotFound::new()
        .decode(&mut bytes.as_slice(), pver())
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TooManyItems {
            count: u64::MAX,
            ..
        }
    ));
}

#[test]
fn truncated_records_are_reported() {
    let mut bytes = payload(3, 2);
    bytes.extend_from_slice(&[1, 0, 0, 0, 0xEE]);

    let err = MsgInv::new().decode(&mut bytes.as_slice(), pver()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            requested: 32,
            available: 1
        }
    );
}

#[test]
fn empty_inventory_roundtrip() {
    for message in [
        &MsgInv::new() as &dyn Message,
        &MsgGetData::new(),
        &MsgNotFound::new(),
    ] {
        let mut buf = Vec::new();
        message.encode(&mut buf, pver()).unwrap();
        assert_eq!(buf, [0x00]);
    }

    let mut msg = MsgInv::new();
    msg.decode(&mut &[0x00][..], pver()).unwrap();
    assert!(msg.inventory().is_empty());
}

#[test]
fn full_message_encodes_within_max_payload() {
    let mut msg = MsgInv::new();
    for i in 0..MAX_INV_PER_MSG {
        let mut hash = [0u8; 32];
        hash[..8].copy_from_slice(&(i as u64).to_le_bytes());
        msg.add_inv_vect(InvVect::new(InvType::Tx, Hash256::new(hash)))
            .unwrap();
    }
    let overflow = InvVect::new(InvType::Tx, Hash256::default());
    let err = msg.add_inv_vect(overflow).unwrap_err();
    assert_eq!(err.context, "MsgInv::add_inv_vect");
    assert_eq!(err.limit, MAX_INV_PER_MSG);
    assert_eq!(msg.inventory().len(), MAX_INV_PER_MSG);

    let mut buf = Vec::new();
    msg.encode(&mut buf, pver()).unwrap();
    assert!(buf.len() <= MAX_INV_PAYLOAD as usize);
    assert_eq!(buf.len(), msg.inventory().encoded_len());

    let mut decoded = MsgInv::new();
    decoded.decode(&mut buf.as_slice(), pver()).unwrap();
    assert_eq!(decoded, msg);
}

#[test]
fn list_conversion_enforces_bound() {
    let items = vec![InvVect::new(InvType::Block, Hash256::default()); MAX_INV_PER_MSG + 1];
    let err = InventoryList::try_from(items).unwrap_err();
    assert_eq!(err.limit, MAX_INV_PER_MSG);
    assert_eq!(err.context, "InventoryList::try_from");
}

#[test]
fn encode_into_failing_writer_reports_io() {
    let mut msg = MsgGetData::new();
    msg.add_inv_vect(InvVect::new(InvType::WitnessTx, Hash256::new([1; 32])))
        .unwrap();

    let mut sink = [0u8; 10];
    let err = msg.encode(&mut &mut sink[..], pver()).unwrap_err();
    assert!(matches!(err, EncodeError::Io { .. }));
}
