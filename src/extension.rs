//! Extension-group containers (X.691 §18.1, §18.7–18.9).
//!
//! The forward-compatibility mechanism of every extensible SEQUENCE: fields
//! added together in one protocol release form an extension *group*. On the
//! wire a message with extensions carries, after all root fields:
//!
//! 1. die Anzahl der Gruppen als Normally Small Number, Wert `count - 1`
//!    (§18.8) — der Decoder erfaehrt die ECHTE Anzahl des Senders, nie
//!    seine eigene;
//! 2. ein Presence-Bitmap mit `count` Bits, ein Bit pro Gruppe (§18.7);
//! 3. jede praesente Gruppe als Open Type (§18.9, §10.2): der Inhalt wird
//!    auf ganze Octets (mindestens eines) mit Null-Bits aufgefuellt und
//!    mit einem Octet-Length-Determinant praefixiert.
//!
//! Dank des Laengenpraefixes kann ein Decoder Gruppen ueberspringen, deren
//! Release er nicht modelliert, ohne ihren Inhalt zu verstehen — genau so
//! parst ein aelteres Netzelement eine SIB mit Feldern spaeterer Releases.
//!
//! The leading "has extensions" bit of the SEQUENCE (§18.1) sits at the
//! very front of the message, before the optional bitmap; the group data
//! trails all root fields. [`encode_marker`]/[`decode_marker`] cover the
//! front, [`encode_groups`]/[`decode_groups`] the tail.

use log::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, length_determinant, normally_small, presence};

/// Writes the extension-presence bit of an extensible SEQUENCE
/// (X.691 §18.1). `present` is true iff at least one group is present.
#[inline]
pub fn encode_marker(writer: &mut BitWriter, present: bool) {
    writer.write_bit(present);
}

/// Reads the extension-presence bit (X.691 §18.1).
#[inline]
pub fn decode_marker(reader: &mut BitReader) -> Result<bool> {
    reader.read_bit()
}

/// Encodes the trailing extension-group section (X.691 §18.7–18.9).
///
/// `present` holds one flag per group defined at this release, in release
/// order; `encode_group(w, i)` serializes the fields of group `i`. Only
/// call this when [`encode_marker`] wrote `true`; `present` must contain at
/// least one set flag.
///
/// # Panics
///
/// Panics if `present` is empty (an extensible type always defines its
/// groups statically; an empty slice is a schema construction error).
pub fn encode_groups<F>(
    writer: &mut BitWriter,
    present: &[bool],
    mut encode_group: F,
) -> Result<()>
where
    F: FnMut(&mut BitWriter, usize) -> Result<()>,
{
    assert!(!present.is_empty(), "extensible type without extension groups");
    normally_small::encode(writer, present.len() as u64 - 1)?;
    presence::encode_bitmap(writer, present);
    for (i, &p) in present.iter().enumerate() {
        if !p {
            continue;
        }
        // Gruppe in einen Scratch-Writer serialisieren; into_vec() fuellt
        // auf ganze Octets auf. Leerer Inhalt belegt trotzdem ein Octet
        // (§10.2.1).
        let mut scratch = BitWriter::new();
        encode_group(&mut scratch, i)?;
        let mut body = scratch.into_vec();
        if body.is_empty() {
            body.push(0);
        }
        length_determinant::encode(writer, body.len() as u64)?;
        writer.write_bit_slice(&body, body.len() * 8);
    }
    Ok(())
}

/// Decodes the trailing extension-group section (X.691 §18.7–18.9).
///
/// `known` is the number of groups this decoder's release models;
/// `decode_group(r, i)` parses the fields of group `i < known`. Present
/// groups `>= known` are skipped wholesale via their length prefix. Within
/// a known group, unread trailing bits of the wrapper (fields from a later
/// minor revision, plus pad) are skipped the same way.
///
/// Only call this when [`decode_marker`] returned `true`.
pub fn decode_groups<F>(reader: &mut BitReader, known: usize, mut decode_group: F) -> Result<()>
where
    F: FnMut(&mut BitReader, usize) -> Result<()>,
{
    let transmitted = normally_small::decode(reader)?;
    // Das Bitmap braucht transmitted+1 Bits; ein Zaehler jenseits des
    // Reststroms ist Truncation oder Muell und darf nie eine Allokation
    // dieser Groesse ausloesen
    if transmitted >= reader.remaining_bits() as u64 {
        return Err(Error::PrematureEndOfStream);
    }
    let count = transmitted as usize + 1;
    let present = presence::decode_bitmap(reader, count)?;
    for (i, &p) in present.iter().enumerate() {
        if !p {
            continue;
        }
        let octets = length_determinant::decode(reader)? as usize;
        if octets == 0 {
            return Err(Error::MalformedExtensionLength { declared_octets: 0, consumed_bits: 0 });
        }
        let body_bits = octets * 8;
        if i < known {
            let start = reader.bit_position();
            decode_group(reader, i)?;
            let consumed = reader.bit_position() - start;
            if consumed > body_bits {
                return Err(Error::MalformedExtensionLength {
                    declared_octets: octets,
                    consumed_bits: consumed,
                });
            }
            reader.skip_bits(body_bits - consumed)?;
        } else {
            debug!("skipping unknown extension group {i} ({octets} octets)");
            reader.skip_bits(body_bits)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constrained_integer;

    /// Eine Gruppe mit einem [0,15]-Feld, Wert 9.
    fn encode_one_group() -> Vec<u8> {
        let mut w = BitWriter::new();
        encode_groups(&mut w, &[true], |w, _| constrained_integer::encode(w, 9, 0, 15)).unwrap();
        w.into_vec()
    }

    // §18.8/§18.9: Anzahl, Bitmap, Open-Type-Wrapper
    #[test]
    fn eine_gruppe_bitlayout() {
        let data = encode_one_group();
        // 7 Bits Anzahl (0) + 1 Bit Bitmap + 8 Bits Laenge (1) + 8 Bits Koerper
        assert_eq!(data.len(), 3);

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(7).unwrap(), 0); // count - 1
        assert!(r.read_bit().unwrap()); // Gruppe praesent
        assert_eq!(r.read_bits(8).unwrap(), 1); // 1 Octet
        assert_eq!(r.read_bits(4).unwrap(), 9); // Feldwert
        assert_eq!(r.read_bits(4).unwrap(), 0); // Octet-Pad der Gruppe
    }

    #[test]
    fn round_trip_bekannte_gruppe() {
        let data = encode_one_group();

        let mut r = BitReader::new(&data);
        let mut value = None;
        decode_groups(&mut r, 1, |r, _| {
            value = Some(constrained_integer::decode(r, 0, 15)?);
            Ok(())
        })
        .unwrap();
        assert_eq!(value, Some(9));
        assert_eq!(r.remaining_bits(), 0);
    }

    /// Decoder kennt nur Gruppe 0, Sender schickt zusaetzlich Gruppe 1:
    /// Gruppe 1 wird per Laengenpraefix uebersprungen, Folgedaten intakt.
    #[test]
    fn unbekannte_gruppe_wird_uebersprungen() {
        let mut w = BitWriter::new();
        encode_groups(&mut w, &[true, true], |w, i| match i {
            0 => constrained_integer::encode(w, 9, 0, 15),
            _ => {
                // spaeteres Release: zwei Felder, 20 Bits
                constrained_integer::encode(w, 1000, 0, 65535)?;
                constrained_integer::encode(w, 7, 0, 15)
            }
        })
        .unwrap();
        w.write_bits(0b1100, 4); // Daten NACH dem Container
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        let mut value = None;
        decode_groups(&mut r, 1, |r, _| {
            value = Some(constrained_integer::decode(r, 0, 15)?);
            Ok(())
        })
        .unwrap();
        assert_eq!(value, Some(9));
        assert_eq!(r.read_bits(4).unwrap(), 0b1100);
    }

    /// Praesente Gruppe, deren einziges Optional absent ist: der Wrapper
    /// wird trotzdem emittiert, ein Octet mit Presence-Bit 0.
    #[test]
    fn gruppe_mit_absentem_optional() {
        let field: Option<i64> = None;
        let mut w = BitWriter::new();
        encode_groups(&mut w, &[true], |w, _| {
            presence::encode_bitmap(w, &[field.is_some()]);
            if let Some(v) = field {
                constrained_integer::encode(w, v, 0, 15)?;
            }
            Ok(())
        })
        .unwrap();
        let data = w.into_vec();
        // Anzahl (7) + Bitmap (1) + Laenge (8) + 1 Octet Koerper
        assert_eq!(data.len(), 3);

        let mut r = BitReader::new(&data);
        let mut decoded = Some(0i64);
        decode_groups(&mut r, 1, |r, _| {
            let present = presence::decode_bitmap(r, 1)?;
            decoded = if present[0] {
                Some(constrained_integer::decode(r, 0, 15)?)
            } else {
                None
            };
            Ok(())
        })
        .unwrap();
        assert_eq!(decoded, None);
    }

    /// Leerer Gruppeninhalt belegt trotzdem ein Octet (§10.2.1).
    #[test]
    fn leere_gruppe_ein_octet() {
        let mut w = BitWriter::new();
        encode_groups(&mut w, &[true], |_, _| Ok(())).unwrap();
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(7).unwrap(), 0);
        assert!(r.read_bit().unwrap());
        assert_eq!(r.read_bits(8).unwrap(), 1); // ein Octet
        assert_eq!(r.read_bits(8).unwrap(), 0); // nur Pad
    }

    /// Alle Gruppen absent: nur Anzahl + Bitmap, keine Wrapper.
    #[test]
    fn alle_gruppen_absent() {
        let mut w = BitWriter::new();
        encode_groups(&mut w, &[false, false], |_, _| {
            unreachable!("no group is present")
        })
        .unwrap();
        // 7 Bits Anzahl (1) + 2 Bitmap-Bits
        assert_eq!(w.bit_position(), 9);
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        decode_groups(&mut r, 2, |_, _| unreachable!("no group is present")).unwrap();
    }

    /// Gruppen-Decoder liest mehr als der Wrapper hergibt: malformed.
    #[test]
    fn gruppendecoder_ueberliest_wrapper() {
        let data = encode_one_group(); // Koerper: 1 Octet

        let mut r = BitReader::new(&data);
        let err = decode_groups(&mut r, 1, |r, _| {
            let _ = constrained_integer::decode(r, 0, 4095)?; // 12 Bits > 8
            Ok(())
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::MalformedExtensionLength { declared_octets: 1, consumed_bits: 12 }
        );
    }

    /// Laengenpraefix 0 Octets ist kein gueltiger Open Type.
    #[test]
    fn null_octet_wrapper_malformed() {
        let mut w = BitWriter::new();
        normally_small::encode(&mut w, 0).unwrap();
        w.write_bit(true);
        length_determinant::encode(&mut w, 0).unwrap();
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        let err = decode_groups(&mut r, 1, |_, _| Ok(())).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedExtensionLength { declared_octets: 0, consumed_bits: 0 }
        );
    }

    /// Abgeschnittener Wrapper: Skip laeuft ins Stream-Ende.
    #[test]
    fn abgeschnittene_gruppe_eof() {
        let mut w = BitWriter::new();
        normally_small::encode(&mut w, 0).unwrap();
        w.write_bit(true);
        length_determinant::encode(&mut w, 4).unwrap(); // 4 Octets angekuendigt
        w.write_bits(0xAB, 8); // nur 1 vorhanden
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        let err = decode_groups(&mut r, 0, |_, _| Ok(())).unwrap_err();
        assert_eq!(err, Error::PrematureEndOfStream);
    }

    /// Langform-Zaehler 2^40-1 in einer 7-Octet-Eingabe: der Decoder darf
    /// kein Bitmap dieser Groesse anfassen, sondern meldet den Strom als
    /// zu kurz.
    #[test]
    fn absurde_gruppenzahl_ohne_allokation() {
        let mut w = BitWriter::new();
        w.write_bit(true); // Normally-Small-Langform
        length_determinant::encode(&mut w, 5).unwrap();
        for _ in 0..5 {
            w.write_bits(0xFF, 8);
        }
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        let err = decode_groups(&mut r, 1, |_, _| Ok(())).unwrap_err();
        assert_eq!(err, Error::PrematureEndOfStream);
    }

    /// Zaehler u64::MAX: auch das `+ 1` auf die uebertragene Anzahl darf
    /// nicht ueberlaufen.
    #[test]
    fn gruppenzahl_u64_max() {
        let mut w = BitWriter::new();
        w.write_bit(true);
        length_determinant::encode(&mut w, 8).unwrap();
        for _ in 0..8 {
            w.write_bits(0xFF, 8);
        }
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        let err = decode_groups(&mut r, 0, |_, _| Ok(())).unwrap_err();
        assert_eq!(err, Error::PrematureEndOfStream);
    }

    #[test]
    fn marker_round_trip() {
        let mut w = BitWriter::new();
        encode_marker(&mut w, true);
        encode_marker(&mut w, false);
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        assert!(decode_marker(&mut r).unwrap());
        assert!(!decode_marker(&mut r).unwrap());
    }

    #[test]
    #[should_panic(expected = "without extension groups")]
    fn leere_gruppenliste_panik() {
        let mut w = BitWriter::new();
        let _ = encode_groups(&mut w, &[], |_, _| Ok(()));
    }
}
