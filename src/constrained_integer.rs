//! Constrained whole number encoding (X.691 §10.5).
//!
//! A value with a statically known range `[lo, hi]` is encoded as the
//! offset `v - lo` in exactly `⌈log₂(hi - lo + 1)⌉` bits. When `lo == hi`
//! nothing is written at all (§10.5.4). Jedes numerische Feld, jedes
//! Laengenfeld und jeder Diskriminant reduziert sich letztlich hierauf.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, bit_width};

/// Encodes `value` as a constrained whole number over `[lo, hi]` (X.691 §10.5).
///
/// Returns `Error::ValueOutOfRange` if `value` lies outside the range.
/// The destination buffer may then hold a partially written prefix; the
/// caller discards it.
pub fn encode(writer: &mut BitWriter, value: i64, lo: i64, hi: i64) -> Result<()> {
    if value < lo || value > hi {
        return Err(Error::ValueOutOfRange { value, min: lo, max: hi });
    }
    let n = bit_width::for_range(lo, hi);
    writer.write_bits(value.wrapping_sub(lo) as u64, n);
    Ok(())
}

/// Decodes a constrained whole number over `[lo, hi]` (X.691 §10.5).
///
/// Returns `Error::ValueOutOfRange` if the decoded offset exceeds the range
/// (reachable when the range size is not a power of two).
pub fn decode(reader: &mut BitReader, lo: i64, hi: i64) -> Result<i64> {
    let n = bit_width::for_range(lo, hi);
    let raw = reader.read_bits(n)?;
    let span = hi.wrapping_sub(lo) as u64;
    if raw > span {
        return Err(Error::ValueOutOfRange {
            value: lo.wrapping_add(raw as i64),
            min: lo,
            max: hi,
        });
    }
    Ok(lo.wrapping_add(raw as i64))
}
