//! ruper – unaligned PER (ITU-T X.691 07/2002) codec engine
//!
//! Schema-getriebenes Bit-Level-Codec fuer UPER-Nachrichten: generische
//! Bausteine (Constrained Integers, Enumerations, BIT/OCTET STRINGs,
//! Presence-Bitmaps, SEQUENCE OF, CHOICE, Extension-Gruppen) ueber einem
//! MSB-first Bitstrom, plus der MIB/BCCH-BCH-Message-Katalog aus
//! 3GPP TS 38.331 als ausgearbeitete Instanz.
//!
//! # Beispiel
//!
//! ```
//! use ruper::mib::{BcchBchMessage, Mib, CellBarred};
//!
//! // Encode
//! let mut mib = Mib::default();
//! mib.cell_barred = CellBarred::Barred;
//! let bytes = BcchBchMessage::Mib(mib.clone()).encode_to_bytes().unwrap();
//! assert_eq!(bytes.len(), 3);
//!
//! // Decode
//! let decoded = BcchBchMessage::decode_from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, BcchBchMessage::Mib(mib));
//! ```

pub mod bit_string;
pub mod bit_width;
pub mod bitstream;
pub mod boolean;
pub mod choice;
pub mod constrained_integer;
pub mod enumerated;
pub mod error;
pub mod extension;
pub mod length_determinant;
pub mod mib;
pub mod normally_small;
pub mod octet_string;
pub mod presence;
pub mod sequence_of;

pub use error::{Error, Result};

// Public API: Bitstrom
pub use bitstream::{BitReader, BitWriter};

// Public API: Werttypen
pub use bit_string::BitString;
pub use enumerated::ExtEnumerated;

// Public API: Nachrichtenkatalog
pub use mib::{
    BcchBchMessage, CellBarred, DmrsTypeAPosition, IntraFreqReselection, Mib,
    PdcchConfigSib1, SubCarrierSpacingCommon,
};
