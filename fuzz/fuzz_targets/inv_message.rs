#![no_main]

use codec::{decode_message, make_empty_message, MAX_INV_PER_MSG};
use libfuzzer_sys::fuzz_target;
use wire::{Message, Network, ProtocolVersion};

fuzz_target!(|data: &[u8]| {
    let pver = ProtocolVersion::default();

    // Raw payloads straight into each message type.
    for command in ["inv", "getdata", "notfound"] {
        let Ok(mut message) = make_empty_message(command) else {
            continue;
        };
        if message.decode(&mut &data[..], pver).is_ok() {
            let mut out = Vec::new();
            message.encode(&mut out, pver).unwrap();
            assert!(out.len() <= data.len());
        }
    }

    // The same bytes as a framed message.
    let limits = wire::Limits::for_testing();
    if let Ok(raw) = wire::read_message(&mut &data[..], Network::Mainnet, &limits) {
        if let Ok(message) = decode_message(&raw, pver) {
            assert!(message.inventory().len() <= MAX_INV_PER_MSG);
        }
    }
});
