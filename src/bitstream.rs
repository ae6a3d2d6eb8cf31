//! Bit-level stream reader and writer for UPER encoding.
//!
//! UPER uses MSB-first bit packing (X.691 §10.1): bits within each byte are
//! numbered 7 (most significant, written/read first) down to 0. Both cursors
//! only ever advance; there is no rewind. A writer owns its growing buffer,
//! a reader borrows an immutable byte slice for the duration of one decode.

use crate::{Error, Result};

/// Writes individual bits into a growable byte buffer, MSB first (X.691 §10.1).
///
/// Intern wird ein u64-Akkumulator verwendet: Bits werden zuerst in `accum`
/// gesammelt und erst bei >= 8 akkumulierten Bits als volle Bytes in `buf`
/// geflusht. Das reduziert Vec-Zugriffe bei kleinen Writes (1-4 Bits,
/// Presence-Bits, Enum-Ordinale) drastisch.
pub struct BitWriter {
    buf: Vec<u8>,
    /// Akkumulator: enthaelt die naechsten `accum_bits` Bits (MSB = aeltestes Bit).
    accum: u64,
    /// Anzahl gueltiger Bits im Akkumulator (nach jedem Write < 8).
    accum_bits: u8,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    pub fn new() -> Self {
        Self { buf: Vec::new(), accum: 0, accum_bits: 0 }
    }

    /// Creates a `BitWriter` with a pre-allocated buffer of `bytes` bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self { buf: Vec::with_capacity(bytes), accum: 0, accum_bits: 0 }
    }

    /// Flusht volle Bytes aus dem Akkumulator in den Buffer.
    #[inline(always)]
    fn flush_to_buf(&mut self) {
        while self.accum_bits >= 8 {
            self.accum_bits -= 8;
            self.buf.push((self.accum >> self.accum_bits) as u8);
        }
        if self.accum_bits > 0 {
            self.accum &= (1u64 << self.accum_bits) - 1;
        } else {
            self.accum = 0;
        }
    }

    /// Writes a single bit. `true` = 1, `false` = 0.
    #[inline(always)]
    pub fn write_bit(&mut self, val: bool) {
        self.accum = (self.accum << 1) | u64::from(val);
        self.accum_bits += 1;
        if self.accum_bits >= 8 {
            self.flush_to_buf();
        }
    }

    /// Writes the lower `n` bits of `val`, MSB first.
    /// When `n` is 0 this is a no-op (zero-width fields, X.691 §10.5.4).
    ///
    /// # Panics
    ///
    /// Panics if `n > 64` or if `val` does not fit in `n` bits. Both are
    /// programmer errors against the schema, not wire conditions.
    #[inline]
    pub fn write_bits(&mut self, val: u64, n: u8) {
        assert!(n <= 64, "bit count must be 0..=64, got {n}");
        assert!(
            n == 64 || val < (1u64 << n),
            "value {val} does not fit in {n} bits"
        );
        if n == 0 {
            return;
        }
        let total = self.accum_bits as u16 + n as u16;
        if total <= 64 {
            // Fast path: alles passt in den Akkumulator
            if n < 64 {
                self.accum = (self.accum << n) | val;
            } else {
                // n == 64, accum_bits ist hier zwingend 0
                self.accum = val;
            }
            self.accum_bits = total as u8;
        } else {
            // Slow path: n > 57, muss splitten (extrem selten)
            let first = 64 - self.accum_bits;
            let rest = n - first;
            self.accum = (self.accum << first) | ((val >> rest) & ((1u64 << first) - 1));
            self.accum_bits = 64;
            self.flush_to_buf();
            self.accum = val & ((1u64 << rest) - 1);
            self.accum_bits = rest;
        }
        if self.accum_bits >= 8 {
            self.flush_to_buf();
        }
    }

    /// Appends the first `nbits` of `bytes` (MSB-first packed), preserving
    /// their bit order. Used to splice pre-serialized open-type bodies into
    /// the outer stream (X.691 §10.2).
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `nbits` bits.
    pub fn write_bit_slice(&mut self, bytes: &[u8], nbits: usize) {
        assert!(nbits <= bytes.len() * 8, "bit slice shorter than {nbits} bits");
        let full = nbits / 8;
        let rem = (nbits % 8) as u8;
        if self.accum_bits == 0 {
            // Byte-aligned: volle Bytes direkt uebernehmen (O(1) amortized)
            self.buf.extend_from_slice(&bytes[..full]);
        } else {
            for &b in &bytes[..full] {
                self.write_bits(u64::from(b), 8);
            }
        }
        if rem > 0 {
            self.write_bits(u64::from(bytes[full] >> (8 - rem)), rem);
        }
    }

    /// Pads with zero bits until the current position is byte-aligned
    /// (X.691 §10.1.3 outermost-value padding). No-op if already aligned.
    pub fn align_to_byte(&mut self) {
        if self.accum_bits > 0 {
            self.buf.push((self.accum << (8 - self.accum_bits)) as u8);
            self.accum = 0;
            self.accum_bits = 0;
        }
    }

    /// Returns the current bit position (number of bits written so far).
    pub fn bit_position(&self) -> usize {
        self.buf.len() * 8 + self.accum_bits as usize
    }

    /// Finalises the writer, padding the last byte with zero bits, and
    /// returns the buffer.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.buf
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads individual bits from a byte slice, MSB first (X.691 §10.1).
///
/// Verwendet einen u64-Akkumulator fuer schnellen Bit-Zugriff: Bits werden
/// batch-weise aus `data` geladen und per Shift/Mask extrahiert. Das
/// reduziert Boundary-Checks auf den Refill statt auf jedes Bit.
#[derive(Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Naechstes ungelesenes Byte in data.
    byte_pos: usize,
    /// Akkumulator: `accum_bits` gueltige Bits, linksbuendig (Bit 63 = aeltestes).
    accum: u64,
    /// Anzahl gueltiger Bits im Akkumulator (0..=64).
    accum_bits: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, byte_pos: 0, accum: 0, accum_bits: 0 }
    }

    /// Fuellt den Akkumulator byteweise nach, solange accum_bits <= 56.
    #[inline(always)]
    fn refill(&mut self) {
        while self.accum_bits <= 56 && self.byte_pos < self.data.len() {
            self.accum |= (self.data[self.byte_pos] as u64) << (56 - self.accum_bits);
            self.byte_pos += 1;
            self.accum_bits += 8;
        }
    }

    /// Returns the number of bits not yet consumed.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() - self.byte_pos) * 8 + self.accum_bits as usize
    }

    /// Returns the current bit position (number of bits consumed so far).
    pub fn bit_position(&self) -> usize {
        self.byte_pos * 8 - self.accum_bits as usize
    }

    /// Reads a single bit. Returns `true` for 1, `false` for 0.
    #[inline(always)]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.refill();
        if self.accum_bits == 0 {
            return Err(Error::PrematureEndOfStream);
        }
        let val = (self.accum >> 63) != 0;
        self.accum <<= 1;
        self.accum_bits -= 1;
        Ok(val)
    }

    /// Reads `n` bits and returns them right-aligned in a `u64`.
    /// When `n` is 0 this reads nothing and returns 0.
    ///
    /// # Panics
    ///
    /// Panics if `n > 64`.
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        assert!(n <= 64, "bit count must be 0..=64, got {n}");
        if n == 0 {
            return Ok(0);
        }
        if usize::from(n) > self.remaining_bits() {
            return Err(Error::PrematureEndOfStream);
        }
        let mut out = 0u64;
        let mut remaining = n;
        while remaining > 0 {
            self.refill();
            let take = remaining.min(self.accum_bits);
            if take == 64 {
                out = self.accum;
                self.accum = 0;
            } else {
                out = (out << take) | (self.accum >> (64 - take));
                self.accum <<= take;
            }
            self.accum_bits -= take;
            remaining -= take;
        }
        Ok(out)
    }

    /// Reads `nbits` into a fresh MSB-first packed byte vector; trailing
    /// bits of the last byte are zero. Mirror of
    /// [`BitWriter::write_bit_slice`].
    pub fn read_bit_slice(&mut self, nbits: usize) -> Result<Vec<u8>> {
        if nbits > self.remaining_bits() {
            return Err(Error::PrematureEndOfStream);
        }
        let mut out = Vec::with_capacity(nbits.div_ceil(8));
        let full = nbits / 8;
        let rem = (nbits % 8) as u8;
        for _ in 0..full {
            out.push(self.read_bits(8)? as u8);
        }
        if rem > 0 {
            out.push((self.read_bits(rem)? as u8) << (8 - rem));
        }
        Ok(out)
    }

    /// Discards the next `n` bits without interpreting them. Used to jump
    /// over unknown extension groups (X.691 §18.9).
    pub fn skip_bits(&mut self, n: usize) -> Result<()> {
        if n > self.remaining_bits() {
            return Err(Error::PrematureEndOfStream);
        }
        let mut remaining = n;
        while remaining > 0 {
            let take = remaining.min(64) as u8;
            let _ = self.read_bits(take)?;
            remaining -= usize::from(take);
        }
        Ok(())
    }

    /// Advances to the next byte boundary, discarding the pad bits without
    /// checking their value (X.691 §10.1.3). No-op if already aligned.
    ///
    /// Kann nicht fehlschlagen: `data` ist ein Byte-Slice, die Pad-Bits des
    /// angebrochenen Bytes sind immer vorhanden.
    pub fn align_to_byte(&mut self) {
        let pad = (8 - (self.bit_position() & 7) as u8) & 7;
        if pad > 0 {
            self.refill();
            self.accum <<= pad;
            self.accum_bits -= pad;
        }
    }
}
