//! Central error types for the UPER codec engine.
//!
//! Each variant references the relevant ITU-T X.691 (07/2002) clause.
//! Encode-side variants are caller contract violations against the schema
//! (value outside its declared bound); decode-side variants are wire
//! conditions. API misuse that is neither (z.B. Bitbreiten > 64) panikt
//! stattdessen laut — siehe [`crate::bitstream`].

use core::fmt;

/// All error conditions the engine can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A constrained whole number lies outside its declared range (X.691 §10.5).
    ValueOutOfRange {
        /// Der Wert, der codiert werden sollte bzw. decodiert wurde.
        value: i64,
        /// Untere Schranke (inklusive).
        min: i64,
        /// Obere Schranke (inklusive).
        max: i64,
    },
    /// A string or SEQUENCE OF length lies outside its declared range (X.691 §15, §16, §19).
    LengthOutOfRange {
        /// Tatsaechliche Laenge.
        len: usize,
        /// Untere Schranke (inklusive).
        min: usize,
        /// Obere Schranke (inklusive).
        max: usize,
    },
    /// An enumeration ordinal has no named value in a closed set (X.691 §13).
    ///
    /// Only reachable on decode when the set size is not a power of two.
    /// Extensible enumerations never produce this on the extension path;
    /// unknown values decode to the sentinel instead.
    InvalidEnumerationIndex {
        /// Decodierter bzw. zu codierender Ordinal.
        index: usize,
        /// Anzahl benannter Werte.
        count: usize,
    },
    /// A CHOICE discriminant selects no known alternative (X.691 §22).
    InvalidChoiceIndex {
        /// Decodierter bzw. zu codierender Diskriminant.
        index: usize,
        /// Anzahl bekannter Alternativen.
        count: usize,
    },
    /// The stream ended before the expected bits were available.
    PrematureEndOfStream,
    /// A length determinant requires fragmentation (X.691 §10.9.3.8).
    ///
    /// Laengen >= 16384 kommen in Broadcast-SI-Payloads nicht vor;
    /// Fragment-Reassembly ist bewusst nicht implementiert.
    LengthTooLarge(u64),
    /// A whole-number field has an impossible octet count (X.691 §10.3, §10.6).
    ///
    /// Semi-constrained whole numbers occupy 1..=8 octets in this engine
    /// (values beyond u64 are not representable).
    MalformedWholeNumber {
        /// Anzahl Octets laut Length Determinant.
        octets: u64,
    },
    /// An extension-group decoder consumed more bits than the group's
    /// open-type wrapper declared (X.691 §18.9, §10.2).
    MalformedExtensionLength {
        /// Laenge des Wrappers laut Length Determinant, in Octets.
        declared_octets: usize,
        /// Tatsaechlich decodierte Bits.
        consumed_bits: usize,
    },
    /// The unknown-value sentinel of an extensible enumeration has no wire
    /// representation (X.691 §13.3) and cannot be encoded.
    SentinelNotEncodable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange { value, min, max } => {
                write!(f, "value {value} outside range {min}..={max} (X.691 §10.5)")
            }
            Self::LengthOutOfRange { len, min, max } => {
                write!(f, "length {len} outside range {min}..={max} (X.691 §19)")
            }
            Self::InvalidEnumerationIndex { index, count } => {
                write!(f, "enumeration index {index} exceeds {count} named values (X.691 §13)")
            }
            Self::InvalidChoiceIndex { index, count } => {
                write!(f, "choice index {index} matches none of {count} alternatives (X.691 §22)")
            }
            Self::PrematureEndOfStream => write!(f, "premature end of UPER stream"),
            Self::LengthTooLarge(len) => {
                write!(f, "length {len} requires fragmentation (X.691 §10.9.3.8), not supported")
            }
            Self::MalformedWholeNumber { octets } => {
                write!(f, "whole number of {octets} octets outside 1..=8 (X.691 §10.3, §10.6)")
            }
            Self::MalformedExtensionLength { declared_octets, consumed_bits } => {
                write!(
                    f,
                    "extension group decoded {consumed_bits} bits but its wrapper declares \
                     {declared_octets} octets (X.691 §18.9)"
                )
            }
            Self::SentinelNotEncodable => {
                write!(f, "unknown-value sentinel has no wire representation (X.691 §13.3)")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
