//! Normally small non-negative whole numbers (X.691 §10.6).
//!
//! Der Indexraum fuer Erweiterungen: Extension-Ordinale extensibler
//! Enumerations (§13.3) und die Anzahl der Extension-Additions einer
//! SEQUENCE (§18.8). Werte sind in der Praxis winzig, daher die Kurzform:
//! - Flag `0` + 6 Bits fuer Werte 0..=63 (§10.6.1)
//! - Flag `1` + semi-constrained whole number mit Octet-Length-Determinant
//!   fuer groessere Werte (§10.6.2, §10.3, §10.9)

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, length_determinant};

/// Encodes a normally small non-negative whole number (X.691 §10.6).
pub fn encode(writer: &mut BitWriter, value: u64) -> Result<()> {
    if value <= 63 {
        writer.write_bit(false);
        writer.write_bits(value, 6);
        return Ok(());
    }
    writer.write_bit(true);
    // §10.3: minimale Octet-Anzahl fuer den Wert, mindestens 1
    let octets = u64::from(((u64::BITS - value.leading_zeros()) + 7) / 8);
    length_determinant::encode(writer, octets)?;
    for i in (0..octets).rev() {
        writer.write_bits((value >> (i * 8)) & 0xFF, 8);
    }
    Ok(())
}

/// Decodes a normally small non-negative whole number (X.691 §10.6).
///
/// Returns `Error::MalformedWholeNumber` when the large-form octet count is
/// 0 or exceeds the 8 octets a `u64` can hold.
pub fn decode(reader: &mut BitReader) -> Result<u64> {
    if !reader.read_bit()? {
        return reader.read_bits(6);
    }
    let octets = length_determinant::decode(reader)?;
    if octets == 0 || octets > 8 {
        return Err(Error::MalformedWholeNumber { octets });
    }
    let mut value = 0u64;
    for _ in 0..octets {
        value = (value << 8) | reader.read_bits(8)?;
    }
    Ok(value)
}
