#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoder darf auf beliebigen Octets nie panicken
    if let Ok(msg) = ruper::BcchBchMessage::decode_from_bytes(data) {
        let bytes = msg.encode_to_bytes().unwrap();
        // Re-Encode ist kanonisch: erneutes Decode liefert dieselbe Nachricht
        assert_eq!(ruper::BcchBchMessage::decode_from_bytes(&bytes).unwrap(), msg);
    }
});
