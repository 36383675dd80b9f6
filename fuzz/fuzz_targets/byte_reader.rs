#![no_main]

use bytestream::{varint_size, ByteReader, ByteWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut ops = 0usize;

    // The first byte of each step picks the operation; the rest is input.
    while ops < 1024 {
        ops += 1;
        let Ok(op) = reader.read_u8() else { break };
        let done = match op % 5 {
            0 => reader.read_u16_le().is_err(),
            1 => reader.read_u32_le().is_err(),
            2 => reader.read_u64_le().is_err(),
            3 => reader.read_array::<32>().is_err(),
            _ => match reader.read_varint() {
                Ok(value) => {
                    // Accepted varints are canonical, so they re-encode identically.
                    let mut writer = ByteWriter::new(Vec::new());
                    writer.write_varint(value).unwrap();
                    assert_eq!(writer.into_inner().len(), varint_size(value));
                    false
                }
                Err(_) => true,
            },
        };
        if done {
            break;
        }
    }
    assert!(reader.bytes_read() <= data.len());
});
