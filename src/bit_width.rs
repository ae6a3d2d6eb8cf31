//! Zentrale Bitbreiten-Berechnung (X.691 §10.5.3).
//!
//! Berechnet `⌈log₂(n)⌉` — die Anzahl Bits, um `n` unterschiedliche Werte
//! zu codieren. Wird von Constrained Integers (§10.5), Enumerations (§13),
//! Choice-Diskriminanten (§22) und Laengenpraefixen (§15, §16, §19) verwendet.

/// Berechnet die Anzahl Bits fuer `n` unterschiedliche Werte: `⌈log₂(n)⌉`.
///
/// - `n = 0` oder `n = 1`: 0 Bits (kein Bit noetig)
/// - `n = 2`: 1 Bit
/// - `n = 3..4`: 2 Bits
/// - `n = 5..8`: 3 Bits
/// - usw.
#[inline]
pub fn for_count(n: u64) -> u8 {
    if n <= 1 {
        0
    } else {
        (u64::BITS - (n - 1).leading_zeros()) as u8
    }
}

/// Bitbreite eines Constrained Whole Number ueber `[lo, hi]` (X.691 §10.5.3):
/// `⌈log₂(hi - lo + 1)⌉`, 0 wenn `lo == hi`.
///
/// Die Differenz wird vorzeichenlos gebildet, damit auch Bereiche wie
/// `[-70, -22]` (q-RxLevMin-artige Felder) korrekt breit sind.
///
/// # Panics
///
/// Panics if `lo > hi` (schema construction error, not a wire condition).
#[inline]
pub fn for_range(lo: i64, hi: i64) -> u8 {
    assert!(lo <= hi, "invalid range: lo {lo} > hi {hi}");
    let span = hi.wrapping_sub(lo) as u64;
    if span == u64::MAX {
        64
    } else {
        for_count(span + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // X.691 §10.5.3: ceil(log2(n))
    #[test]
    fn grundwerte() {
        assert_eq!(for_count(0), 0);
        assert_eq!(for_count(1), 0);
        assert_eq!(for_count(2), 1);
        assert_eq!(for_count(3), 2);
        assert_eq!(for_count(4), 2);
        assert_eq!(for_count(5), 3);
        assert_eq!(for_count(8), 3);
        assert_eq!(for_count(9), 4);
        assert_eq!(for_count(16), 4);
        assert_eq!(for_count(17), 5);
        assert_eq!(for_count(256), 8);
        assert_eq!(for_count(257), 9);
    }

    #[test]
    fn bereiche() {
        // lo == hi: 0 Bits, der Wert steht fest
        assert_eq!(for_range(7, 7), 0);
        // [0, 15]: 16 Werte, 4 Bits
        assert_eq!(for_range(0, 15), 4);
        // [1, 32]: 32 Werte, 5 Bits
        assert_eq!(for_range(1, 32), 5);
        // [0, 16]: 17 Werte, 5 Bits
        assert_eq!(for_range(0, 16), 5);
        // negative Schranken
        assert_eq!(for_range(-70, -22), 6); // 49 Werte
        assert_eq!(for_range(-1, 0), 1);
    }

    #[test]
    fn extreme_bereiche() {
        assert_eq!(for_range(i64::MIN, i64::MAX), 64);
        assert_eq!(for_range(0, i64::MAX), 63);
        assert_eq!(for_range(i64::MIN, -1), 63);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn vertauschte_schranken_panik() {
        let _ = for_range(1, 0);
    }
}
