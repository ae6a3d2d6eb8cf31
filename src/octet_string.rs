//! OCTET STRING encoding (X.691 §16).
//!
//! Fixed-size strings are a flat run of exactly `n` octets (§16.7);
//! bounded strings carry a constrained-integer length prefix over
//! `[min, max]` followed by that many octets (§16.8). Unaligned PER fuegt
//! keinerlei Byte-Alignment ein — die Octets koennen auf dem Draht ueber
//! Bytegrenzen hinweg verschoben liegen.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, constrained_integer};

/// Encodes a fixed-size octet string of exactly `n` octets (X.691 §16.7).
///
/// Returns `Error::LengthOutOfRange` if the value's length is not `n`.
pub fn encode_fixed(writer: &mut BitWriter, value: &[u8], n: usize) -> Result<()> {
    if value.len() != n {
        return Err(Error::LengthOutOfRange { len: value.len(), min: n, max: n });
    }
    writer.write_bit_slice(value, n * 8);
    Ok(())
}

/// Decodes a fixed-size octet string of exactly `n` octets (X.691 §16.7).
pub fn decode_fixed(reader: &mut BitReader, n: usize) -> Result<Vec<u8>> {
    reader.read_bit_slice(n * 8)
}

/// Encodes a bounded octet string: length prefix over `[min, max]`, then
/// the octets (X.691 §16.8).
pub fn encode_bounded(
    writer: &mut BitWriter,
    value: &[u8],
    min: usize,
    max: usize,
) -> Result<()> {
    if value.len() < min || value.len() > max {
        return Err(Error::LengthOutOfRange { len: value.len(), min, max });
    }
    constrained_integer::encode(writer, value.len() as i64, min as i64, max as i64)?;
    writer.write_bit_slice(value, value.len() * 8);
    Ok(())
}

/// Decodes a bounded octet string (X.691 §16.8).
pub fn decode_bounded(reader: &mut BitReader, min: usize, max: usize) -> Result<Vec<u8>> {
    let len = match constrained_integer::decode(reader, min as i64, max as i64) {
        Ok(len) => len as usize,
        Err(Error::ValueOutOfRange { value, .. }) => {
            return Err(Error::LengthOutOfRange { len: value as usize, min, max });
        }
        Err(e) => return Err(e),
    };
    decode_fixed(reader, len)
}
