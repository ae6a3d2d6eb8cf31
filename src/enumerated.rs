//! Enumeration encoding (X.691 §13).
//!
//! Ordinals are encoded as constrained whole numbers over `[0, count-1]`
//! in schema order (§13.2). Extensible enumerations carry a leading marker
//! bit (§13.3): marker 0 selects the root ordinal, marker 1 an extension
//! ordinal as normally small number. Root-Ordinale werden unabhaengig von
//! der Extensibility identisch codiert — ein Release-Upgrade aendert keine
//! bestehenden Bitmuster.
//!
//! Forward compatibility: ein decodierter Extension-Ordinal, den dieser
//! Decoder nicht kennt, ist KEIN Fehler. Er wird auf den Unknown-Sentinel
//! abgebildet, der Cursor steht danach korrekt hinter dem Wert.

use log::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, constrained_integer, normally_small};

/// A decoded value of an extensible enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtEnumerated {
    /// Ordinal aus dem Root-Set (0-basiert, Schema-Reihenfolge).
    Base(usize),
    /// Ordinal aus dem Extension-Set (0-basiert, Release-Reihenfolge).
    Extension(usize),
    /// A well-formed value this decoder's release does not model.
    ///
    /// Never encoded on the wire; presentation-only sentinel.
    Unknown,
}

/// Encodes a non-extensible enumeration ordinal (X.691 §13.2).
///
/// Returns `Error::InvalidEnumerationIndex` if `index >= count`.
pub fn encode(writer: &mut BitWriter, index: usize, count: usize) -> Result<()> {
    if index >= count {
        return Err(Error::InvalidEnumerationIndex { index, count });
    }
    constrained_integer::encode(writer, index as i64, 0, count as i64 - 1)
}

/// Decodes a non-extensible enumeration ordinal (X.691 §13.2).
///
/// Returns `Error::InvalidEnumerationIndex` if the decoded ordinal has no
/// named value (reachable when `count` is not a power of two). Closed sets
/// have no forward-compatibility story; overrange here is corruption.
pub fn decode(reader: &mut BitReader, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(Error::InvalidEnumerationIndex { index: 0, count: 0 });
    }
    match constrained_integer::decode(reader, 0, count as i64 - 1) {
        Ok(index) => Ok(index as usize),
        Err(Error::ValueOutOfRange { value, .. }) => {
            Err(Error::InvalidEnumerationIndex { index: value as usize, count })
        }
        Err(e) => Err(e),
    }
}

/// Encodes a value of an extensible enumeration (X.691 §13.3).
///
/// `base_count`/`ext_count` are the sizes of the root and extension sets at
/// this release. The `Unknown` sentinel has no wire representation and is
/// rejected with `Error::SentinelNotEncodable`.
pub fn encode_extensible(
    writer: &mut BitWriter,
    value: ExtEnumerated,
    base_count: usize,
    ext_count: usize,
) -> Result<()> {
    match value {
        ExtEnumerated::Base(index) => {
            if index >= base_count {
                return Err(Error::InvalidEnumerationIndex { index, count: base_count });
            }
            writer.write_bit(false);
            encode(writer, index, base_count)
        }
        ExtEnumerated::Extension(index) => {
            if index >= ext_count {
                return Err(Error::InvalidEnumerationIndex { index, count: ext_count });
            }
            writer.write_bit(true);
            normally_small::encode(writer, index as u64)
        }
        ExtEnumerated::Unknown => Err(Error::SentinelNotEncodable),
    }
}

/// Decodes a value of an extensible enumeration (X.691 §13.3).
///
/// Ordinals beyond `base_count`/`ext_count` decode to
/// [`ExtEnumerated::Unknown`] with the cursor advanced past the value, so
/// an old decoder keeps interoperating with newer peers.
pub fn decode_extensible(
    reader: &mut BitReader,
    base_count: usize,
    ext_count: usize,
) -> Result<ExtEnumerated> {
    if !reader.read_bit()? {
        let index = constrained_integer::decode(reader, 0, base_count as i64 - 1);
        return match index {
            Ok(index) => Ok(ExtEnumerated::Base(index as usize)),
            // Root-Set keine Zweierpotenz und Offset darueber: ebenfalls
            // nur "unbekannt", der Wert ist vollstaendig konsumiert.
            Err(Error::ValueOutOfRange { value, .. }) => {
                debug!("unknown root enumeration ordinal {value}, mapping to sentinel");
                Ok(ExtEnumerated::Unknown)
            }
            Err(e) => Err(e),
        };
    }
    let index = normally_small::decode(reader)?;
    if (index as usize) < ext_count {
        Ok(ExtEnumerated::Extension(index as usize))
    } else {
        debug!("unknown extension enumeration ordinal {index}, mapping to sentinel");
        Ok(ExtEnumerated::Unknown)
    }
}
