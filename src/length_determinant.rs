//! General length determinant encoding (X.691 §10.9, unconstrained form).
//!
//! Unaligned-PER Bitmuster:
//! - `0` + 7 Bits fuer Laengen 0..=127 (§10.9.3.6)
//! - `10` + 14 Bits fuer Laengen 128..=16383 (§10.9.3.7)
//! - `11` + 6-Bit-Multiplikator: fragmentierte Laengen ab 16384 (§10.9.3.8) —
//!   bewusst nicht unterstuetzt, Broadcast-SI-Payloads erreichen sie nie.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result};

/// Largest length this engine encodes or decodes without fragmentation.
pub const MAX_LENGTH: u64 = 16383;

/// Encodes an unconstrained length determinant (X.691 §10.9.3.6–10.9.3.7).
///
/// Returns `Error::LengthTooLarge` for lengths that would require
/// fragmentation.
pub fn encode(writer: &mut BitWriter, len: u64) -> Result<()> {
    if len < 128 {
        writer.write_bit(false);
        writer.write_bits(len, 7);
    } else if len <= MAX_LENGTH {
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bits(len, 14);
    } else {
        return Err(Error::LengthTooLarge(len));
    }
    Ok(())
}

/// Decodes an unconstrained length determinant (X.691 §10.9.3.6–10.9.3.8).
///
/// A fragment marker (`11`) yields `Error::LengthTooLarge` carrying the
/// fragment size the peer announced.
pub fn decode(reader: &mut BitReader) -> Result<u64> {
    if !reader.read_bit()? {
        return reader.read_bits(7);
    }
    if !reader.read_bit()? {
        return reader.read_bits(14);
    }
    // §10.9.3.8: Multiplikator m in 1..=4, Fragmentlaenge m * 16384
    let m = reader.read_bits(6)?;
    Err(Error::LengthTooLarge(m * 16384))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(len: u64) -> u64 {
        let mut w = BitWriter::new();
        encode(&mut w, len).unwrap();
        let data = w.into_vec();
        let mut r = BitReader::new(&data);
        decode(&mut r).unwrap()
    }

    // §10.9.3.6: kurze Form, 8 Bits gesamt
    #[test]
    fn kurze_form() {
        for len in [0u64, 1, 64, 127] {
            assert_eq!(round_trip(len), len);
        }
        let mut w = BitWriter::new();
        encode(&mut w, 5).unwrap();
        assert_eq!(w.bit_position(), 8);
        assert_eq!(w.into_vec(), vec![0x05]);
    }

    // §10.9.3.7: lange Form, 16 Bits gesamt, Praefix '10'
    #[test]
    fn lange_form() {
        for len in [128u64, 1000, MAX_LENGTH] {
            assert_eq!(round_trip(len), len);
        }
        let mut w = BitWriter::new();
        encode(&mut w, 128).unwrap();
        assert_eq!(w.bit_position(), 16);
        assert_eq!(w.into_vec(), vec![0x80, 0x80]);
    }

    // §10.9.3.8: Fragmentierung wird auf beiden Seiten abgelehnt
    #[test]
    fn fragmentierung_abgelehnt() {
        let mut w = BitWriter::new();
        assert_eq!(
            encode(&mut w, 16384).unwrap_err(),
            Error::LengthTooLarge(16384)
        );

        // '11' + Multiplikator 2 → Peer kuendigt 32768 Octets an
        let mut w = BitWriter::new();
        w.write_bits(0b11, 2);
        w.write_bits(2, 6);
        let data = w.into_vec();
        let mut r = BitReader::new(&data);
        assert_eq!(decode(&mut r).unwrap_err(), Error::LengthTooLarge(32768));
    }

    #[test]
    fn decode_eof() {
        let mut r = BitReader::new(&[]);
        assert_eq!(decode(&mut r).unwrap_err(), Error::PrematureEndOfStream);

        // Praefix-Bit vorhanden, Laengenfeld abgeschnitten
        let mut r = BitReader::new(&[0x00]);
        let _ = decode(&mut r).unwrap();
        let mut r = BitReader::new(&[0x80]);
        assert_eq!(decode(&mut r).unwrap_err(), Error::PrematureEndOfStream);
    }

    #[test]
    fn grenze_kurz_lang() {
        // 127 bleibt kurz, 128 wird lang
        let mut w = BitWriter::new();
        encode(&mut w, 127).unwrap();
        assert_eq!(w.bit_position(), 8);

        let mut w = BitWriter::new();
        encode(&mut w, 128).unwrap();
        assert_eq!(w.bit_position(), 16);
    }
}
