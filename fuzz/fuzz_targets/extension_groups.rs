#![no_main]
use libfuzzer_sys::fuzz_target;
use ruper::bitstream::BitReader;
use ruper::{constrained_integer, extension};

fuzz_target!(|data: &[u8]| {
    // Gruppen-Container auf beliebigen Octets: Fehler ja, Panic nein.
    // Einmal als Release mit einer bekannten Gruppe, einmal als aeltere
    // Release, die alles ueberspringen muss.
    let mut r = BitReader::new(data);
    let _ = extension::decode_groups(&mut r, 1, |r, _| {
        constrained_integer::decode(r, 0, 255).map(|_| ())
    });

    let mut r = BitReader::new(data);
    let _ = extension::decode_groups(&mut r, 0, |_, _| Ok(()));
});
