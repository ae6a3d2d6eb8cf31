//! Bounded SEQUENCE OF encoding (X.691 §19).
//!
//! The element count is encoded as a constrained whole number over
//! `[min, max]` (§19.5), followed by exactly that many elements in order.
//! Reihenfolge bleibt exakt erhalten — kein Umsortieren, kein Deduplizieren.
//!
//! The `encode_item`/`decode_item` closures carry the element codec, so
//! one generic loop serves every element type.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, constrained_integer};

/// Encodes a bounded SEQUENCE OF (X.691 §19.5–19.6).
///
/// Returns `Error::LengthOutOfRange` unless `min <= items.len() <= max`.
pub fn encode<T, F>(
    writer: &mut BitWriter,
    items: &[T],
    min: usize,
    max: usize,
    mut encode_item: F,
) -> Result<()>
where
    F: FnMut(&mut BitWriter, &T) -> Result<()>,
{
    if items.len() < min || items.len() > max {
        return Err(Error::LengthOutOfRange { len: items.len(), min, max });
    }
    constrained_integer::encode(writer, items.len() as i64, min as i64, max as i64)?;
    for item in items {
        encode_item(writer, item)?;
    }
    Ok(())
}

/// Decodes a bounded SEQUENCE OF (X.691 §19.5–19.6).
///
/// Reads the count, then exactly that many elements. The first element
/// failure aborts the whole decode.
pub fn decode<T, F>(
    reader: &mut BitReader,
    min: usize,
    max: usize,
    mut decode_item: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut BitReader) -> Result<T>,
{
    let len = match constrained_integer::decode(reader, min as i64, max as i64) {
        Ok(len) => len as usize,
        Err(Error::ValueOutOfRange { value, .. }) => {
            return Err(Error::LengthOutOfRange { len: value as usize, min, max });
        }
        Err(e) => return Err(e),
    };
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(decode_item(reader)?);
    }
    Ok(items)
}
