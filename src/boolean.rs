//! Boolean encoding (X.691 §11).
//!
//! A BOOLEAN value is a single bit, 1 = TRUE, 0 = FALSE. The same primitive
//! carries the extension-presence bit of extensible SEQUENCEs (§18.1) and
//! every optional-field presence bit (§18.2).

use crate::Result;
use crate::bitstream::{BitReader, BitWriter};

/// Encodes a boolean as a single bit (X.691 §11.1).
#[inline]
pub fn encode(writer: &mut BitWriter, value: bool) {
    writer.write_bit(value);
}

/// Decodes a boolean from a single bit (X.691 §11.1).
#[inline]
pub fn decode(reader: &mut BitReader) -> Result<bool> {
    reader.read_bit()
}
