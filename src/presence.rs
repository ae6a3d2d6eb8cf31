//! Optional-field presence bitmaps (X.691 §18.2–18.3).
//!
//! A SEQUENCE with optional root components emits one presence bit per
//! optional field, contiguously, in declaration order, ahead of ALL field
//! bodies. Diese Reihenfolge ist tragend: Encoder und Decoder muessen das
//! Bitmap exakt gleich dimensionieren und anordnen, sonst verrutscht jeder
//! nachfolgende Bit-Offset.
//!
//! Message code models optional fields as `Option<T>`; the bitmap is
//! derived from `is_some()` at encode time, so a stale presence flag next
//! to stale field data is unrepresentable.

use crate::Result;
use crate::bitstream::{BitReader, BitWriter};

/// Writes one presence bit per optional field, declaration order
/// (X.691 §18.2).
pub fn encode_bitmap(writer: &mut BitWriter, present: &[bool]) {
    for &p in present {
        writer.write_bit(p);
    }
}

/// Reads `count` presence bits, declaration order (X.691 §18.2).
pub fn decode_bitmap(reader: &mut BitReader, count: usize) -> Result<Vec<bool>> {
    let mut present = Vec::with_capacity(count);
    for _ in 0..count {
        present.push(reader.read_bit()?);
    }
    Ok(present)
}
