//! CHOICE discriminant encoding (X.691 §22).
//!
//! The discriminant is the 0-based index of the active alternative,
//! encoded as a constrained whole number over `[0, count-1]` (§22.4–22.6);
//! the alternative's own codec follows immediately. Extensible choices
//! carry a leading marker bit (§22.5).
//!
//! Die Exklusivitaet — genau EIN Payload lebt, ein Diskriminantwechsel
//! zerstoert den alten Payload — liegt nicht hier, sondern in den
//! Message-Typen selbst: sie sind native Rust-Enums mit Payload. Ein
//! Zugriff auf die falsche Alternative ist damit gar nicht formulierbar,
//! und `match` erzwingt vollstaendige Behandlung.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, constrained_integer};

/// Encodes a non-extensible CHOICE discriminant (X.691 §22.6).
///
/// Returns `Error::InvalidChoiceIndex` if `index >= count`.
pub fn encode_index(writer: &mut BitWriter, index: usize, count: usize) -> Result<()> {
    if index >= count {
        return Err(Error::InvalidChoiceIndex { index, count });
    }
    constrained_integer::encode(writer, index as i64, 0, count as i64 - 1)
}

/// Decodes a non-extensible CHOICE discriminant (X.691 §22.6).
///
/// A discriminant with no matching alternative is
/// `Error::InvalidChoiceIndex` — anders als bei extensiblen Enumerations
/// gibt es hier keinen Payload-Laengenrahmen, ein unbekannter Zweig ist
/// nicht ueberspringbar.
pub fn decode_index(reader: &mut BitReader, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(Error::InvalidChoiceIndex { index: 0, count: 0 });
    }
    match constrained_integer::decode(reader, 0, count as i64 - 1) {
        Ok(index) => Ok(index as usize),
        Err(Error::ValueOutOfRange { value, .. }) => {
            Err(Error::InvalidChoiceIndex { index: value as usize, count })
        }
        Err(e) => Err(e),
    }
}

/// Encodes an extensible CHOICE discriminant from the root alternative set
/// (X.691 §22.5): marker bit 0, then the root index.
///
/// Alternatives added after the extension marker would require an
/// open-type wrapper; no message in this catalogue encodes one.
pub fn encode_index_extensible(
    writer: &mut BitWriter,
    index: usize,
    count: usize,
) -> Result<()> {
    if index >= count {
        return Err(Error::InvalidChoiceIndex { index, count });
    }
    writer.write_bit(false);
    constrained_integer::encode(writer, index as i64, 0, count as i64 - 1)
}

/// Decodes an extensible CHOICE discriminant (X.691 §22.5).
///
/// A set extension marker selects an alternative from a later release this
/// decoder cannot construct: `Error::InvalidChoiceIndex` with
/// `index == count`.
pub fn decode_index_extensible(reader: &mut BitReader, count: usize) -> Result<usize> {
    if reader.read_bit()? {
        return Err(Error::InvalidChoiceIndex { index: count, count });
    }
    decode_index(reader, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(index: usize, count: usize) -> usize {
        let mut w = BitWriter::new();
        encode_index(&mut w, index, count).unwrap();
        let data = w.into_vec();
        let mut r = BitReader::new(&data);
        decode_index(&mut r, count).unwrap()
    }

    // X.691 §22.6: Diskriminant als Constrained Integer
    #[test]
    fn diskriminanten_round_trip() {
        for i in 0..5 {
            assert_eq!(round_trip(i, 5), i);
        }
        let mut w = BitWriter::new();
        encode_index(&mut w, 0, 5).unwrap();
        assert_eq!(w.bit_position(), 3);
    }

    // Zwei Alternativen: genau 1 Bit
    #[test]
    fn zwei_alternativen_ein_bit() {
        let mut w = BitWriter::new();
        encode_index(&mut w, 1, 2).unwrap();
        assert_eq!(w.bit_position(), 1);
        assert_eq!(w.into_vec(), vec![0x80]);
    }

    // Eine Alternative: 0 Bits
    #[test]
    fn eine_alternative_null_bits() {
        let mut w = BitWriter::new();
        encode_index(&mut w, 0, 1).unwrap();
        assert_eq!(w.bit_position(), 0);

        let mut r = BitReader::new(&[]);
        assert_eq!(decode_index(&mut r, 1).unwrap(), 0);
    }

    #[test]
    fn encode_index_zu_gross() {
        let mut w = BitWriter::new();
        assert_eq!(
            encode_index(&mut w, 2, 2).unwrap_err(),
            Error::InvalidChoiceIndex { index: 2, count: 2 }
        );
    }

    // §22.6: unbekannter Diskriminant ist ein Decode-Fehler
    #[test]
    fn decode_unbekannter_diskriminant() {
        // 3 Alternativen → 2 Bits; Wert 3 matcht keine
        let mut w = BitWriter::new();
        w.write_bits(3, 2);
        let data = w.into_vec();
        let mut r = BitReader::new(&data);
        assert_eq!(
            decode_index(&mut r, 3).unwrap_err(),
            Error::InvalidChoiceIndex { index: 3, count: 3 }
        );
    }

    // §22.5: Marker-Bit vor dem Root-Index
    #[test]
    fn extensibel_round_trip() {
        let mut w = BitWriter::new();
        encode_index_extensible(&mut w, 1, 2).unwrap();
        assert_eq!(w.bit_position(), 2);
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        assert_eq!(decode_index_extensible(&mut r, 2).unwrap(), 1);
    }

    // §22.5: gesetzter Marker = Alternative aus spaeterem Release
    #[test]
    fn extensibel_unbekannte_alternative() {
        let mut w = BitWriter::new();
        w.write_bit(true);
        let data = w.into_vec();
        let mut r = BitReader::new(&data);
        assert_eq!(
            decode_index_extensible(&mut r, 2).unwrap_err(),
            Error::InvalidChoiceIndex { index: 2, count: 2 }
        );
    }

    #[test]
    fn decode_eof() {
        let mut r = BitReader::new(&[]);
        assert_eq!(
            decode_index(&mut r, 4).unwrap_err(),
            Error::PrematureEndOfStream
        );
    }
}
