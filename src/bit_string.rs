//! BIT STRING encoding (X.691 §15).
//!
//! Fixed-size strings are a flat run of exactly `n` bits without any
//! prefix (§15.8); bounded strings carry a constrained-integer length
//! prefix over `[min, max]` followed by that many bits (§15.10).

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result, constrained_integer};

/// An owned bit string: MSB-first packed bytes plus an exact bit length.
///
/// Kanonische Form: die Pad-Bits des letzten Bytes sind immer 0, dadurch
/// ist `PartialEq` ueber die rohen Bytes korrekt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitString {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitString {
    /// Creates an empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bit string from MSB-first packed bytes, keeping the first
    /// `bit_len` bits. Trailing pad bits are forced to zero.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `bit_len` bits.
    pub fn from_bytes(bytes: &[u8], bit_len: usize) -> Self {
        assert!(bit_len <= bytes.len() * 8, "byte slice shorter than {bit_len} bits");
        let mut bytes = bytes[..bit_len.div_ceil(8)].to_vec();
        let rem = bit_len % 8;
        if rem != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - rem);
            }
        }
        Self { bytes, bit_len }
    }

    /// Creates a bit string of `bit_len` bits from the low bits of `value`,
    /// most significant first. Convenient for short schema fields
    /// (systemFrameNumber, spare bits).
    ///
    /// # Panics
    ///
    /// Panics if `bit_len > 64` or `value` does not fit in `bit_len` bits.
    pub fn from_u64(value: u64, bit_len: usize) -> Self {
        let mut w = BitWriter::new();
        w.write_bits(value, bit_len as u8);
        Self { bytes: w.into_vec(), bit_len }
    }

    /// Returns the first (up to 64) bits right-aligned in a `u64`.
    ///
    /// # Panics
    ///
    /// Panics if the string is longer than 64 bits.
    pub fn to_u64(&self) -> u64 {
        assert!(self.bit_len <= 64, "bit string of {} bits exceeds u64", self.bit_len);
        let mut r = BitReader::new(&self.bytes);
        match r.read_bits(self.bit_len as u8) {
            Ok(v) => v,
            // bytes haelt per Konstruktion immer bit_len Bits
            Err(_) => unreachable!("canonical BitString shorter than its bit_len"),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// `true` if the string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The packed bytes, trailing pad bits zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns bit `i` (0 = first/most significant).
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.bit_len, "bit index {i} out of range 0..{}", self.bit_len);
        (self.bytes[i / 8] >> (7 - (i % 8))) & 1 != 0
    }
}

/// Encodes a fixed-size bit string of exactly `n` bits (X.691 §15.8).
///
/// Returns `Error::LengthOutOfRange` if the value's length is not `n`.
pub fn encode_fixed(writer: &mut BitWriter, value: &BitString, n: usize) -> Result<()> {
    if value.len() != n {
        return Err(Error::LengthOutOfRange { len: value.len(), min: n, max: n });
    }
    writer.write_bit_slice(value.as_bytes(), n);
    Ok(())
}

/// Decodes a fixed-size bit string of exactly `n` bits (X.691 §15.8).
pub fn decode_fixed(reader: &mut BitReader, n: usize) -> Result<BitString> {
    let bytes = reader.read_bit_slice(n)?;
    Ok(BitString { bytes, bit_len: n })
}

/// Encodes a bounded bit string: length prefix over `[min, max]`, then the
/// bits (X.691 §15.10).
pub fn encode_bounded(
    writer: &mut BitWriter,
    value: &BitString,
    min: usize,
    max: usize,
) -> Result<()> {
    if value.len() < min || value.len() > max {
        return Err(Error::LengthOutOfRange { len: value.len(), min, max });
    }
    constrained_integer::encode(writer, value.len() as i64, min as i64, max as i64)?;
    writer.write_bit_slice(value.as_bytes(), value.len());
    Ok(())
}

/// Decodes a bounded bit string (X.691 §15.10).
pub fn decode_bounded(reader: &mut BitReader, min: usize, max: usize) -> Result<BitString> {
    let len = match constrained_integer::decode(reader, min as i64, max as i64) {
        Ok(len) => len as usize,
        Err(Error::ValueOutOfRange { value, .. }) => {
            return Err(Error::LengthOutOfRange { len: value as usize, min, max });
        }
        Err(e) => return Err(e),
    };
    decode_fixed(reader, len)
}
