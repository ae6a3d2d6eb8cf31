//! BCCH-BCH-Message and MIB (3GPP TS 38.331 §6.2.1 / §6.2.2).
//!
//! The worked schema instantiation of the engine: the Master Information
//! Block broadcast on the PBCH. Alle Felder laufen durch die generischen
//! Codecs — Constrained Integers, 1-Bit-Enumerations, BIT STRINGs und ein
//! nicht-extensibler CHOICE. Das Top-Level-Framing ist byte-aligned mit
//! Null-Padding (X.691 §10.1.3): 1 Choice-Bit + 23 MIB-Bits = 3 Octets.
//!
//! Optionale Felder und Extension-Gruppen kommen im MIB nicht vor; die
//! zugehoerigen Codecs werden von den Integrationstests und spaeteren
//! Message-Typen exerziert.

use crate::bit_string::{self, BitString};
use crate::bitstream::{BitReader, BitWriter};
use crate::{Result, choice, constrained_integer, enumerated};

/// subCarrierSpacingCommon ENUMERATED {scs15or60, scs30or120}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCarrierSpacingCommon {
    /// 15 kHz (FR1) bzw. 60 kHz (FR2).
    Scs15Or60,
    /// 30 kHz (FR1) bzw. 120 kHz (FR2).
    Scs30Or120,
}

/// dmrs-TypeA-Position ENUMERATED {pos2, pos3}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmrsTypeAPosition {
    /// First DM-RS on OFDM symbol 2.
    Pos2,
    /// First DM-RS on OFDM symbol 3.
    Pos3,
}

/// cellBarred ENUMERATED {barred, notBarred}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellBarred {
    Barred,
    NotBarred,
}

/// intraFreqReselection ENUMERATED {allowed, notAllowed}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntraFreqReselection {
    Allowed,
    NotAllowed,
}

macro_rules! two_valued_enum_codec {
    ($ty:ident, $a:ident, $b:ident) => {
        impl $ty {
            fn encode(self, writer: &mut BitWriter) -> Result<()> {
                enumerated::encode(writer, self as usize, 2)
            }

            fn decode(reader: &mut BitReader) -> Result<Self> {
                Ok(match enumerated::decode(reader, 2)? {
                    0 => Self::$a,
                    _ => Self::$b,
                })
            }
        }
    };
}

two_valued_enum_codec!(SubCarrierSpacingCommon, Scs15Or60, Scs30Or120);
two_valued_enum_codec!(DmrsTypeAPosition, Pos2, Pos3);
two_valued_enum_codec!(CellBarred, Barred, NotBarred);
two_valued_enum_codec!(IntraFreqReselection, Allowed, NotAllowed);

/// PDCCH-ConfigSIB1 (TS 38.331 §6.3.2): CORESET#0 und SearchSpace#0,
/// je INTEGER (0..15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PdcchConfigSib1 {
    pub control_resource_set_zero: u8,
    pub search_space_zero: u8,
}

impl PdcchConfigSib1 {
    fn encode(&self, writer: &mut BitWriter) -> Result<()> {
        constrained_integer::encode(writer, i64::from(self.control_resource_set_zero), 0, 15)?;
        constrained_integer::encode(writer, i64::from(self.search_space_zero), 0, 15)
    }

    fn decode(reader: &mut BitReader) -> Result<Self> {
        Ok(Self {
            control_resource_set_zero: constrained_integer::decode(reader, 0, 15)? as u8,
            search_space_zero: constrained_integer::decode(reader, 0, 15)? as u8,
        })
    }
}

/// MIB (TS 38.331 §6.2.2), 23 Bits. Not extensible and free of optional
/// fields by design: the PBCH payload budget is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mib {
    /// systemFrameNumber BIT STRING (SIZE (6)) — die 6 MSBs der SFN,
    /// die 4 LSBs traegt der PBCH-Transportkanal selbst.
    pub system_frame_number: BitString,
    pub sub_carrier_spacing_common: SubCarrierSpacingCommon,
    /// ssb-SubcarrierOffset INTEGER (0..15), k_SSB.
    pub ssb_subcarrier_offset: u8,
    pub dmrs_type_a_position: DmrsTypeAPosition,
    pub pdcch_config_sib1: PdcchConfigSib1,
    pub cell_barred: CellBarred,
    pub intra_freq_reselection: IntraFreqReselection,
    /// spare BIT STRING (SIZE (1)).
    pub spare: BitString,
}

impl Mib {
    /// Bit count of systemFrameNumber.
    pub const SFN_BITS: usize = 6;
    /// Bit count of spare.
    pub const SPARE_BITS: usize = 1;

    /// Encodes the MIB body in declaration order (TS 38.331 §6.2.2).
    pub fn encode(&self, writer: &mut BitWriter) -> Result<()> {
        bit_string::encode_fixed(writer, &self.system_frame_number, Self::SFN_BITS)?;
        self.sub_carrier_spacing_common.encode(writer)?;
        constrained_integer::encode(writer, i64::from(self.ssb_subcarrier_offset), 0, 15)?;
        self.dmrs_type_a_position.encode(writer)?;
        self.pdcch_config_sib1.encode(writer)?;
        self.cell_barred.encode(writer)?;
        self.intra_freq_reselection.encode(writer)?;
        bit_string::encode_fixed(writer, &self.spare, Self::SPARE_BITS)
    }

    /// Decodes the MIB body in declaration order (TS 38.331 §6.2.2).
    pub fn decode(reader: &mut BitReader) -> Result<Self> {
        Ok(Self {
            system_frame_number: bit_string::decode_fixed(reader, Self::SFN_BITS)?,
            sub_carrier_spacing_common: SubCarrierSpacingCommon::decode(reader)?,
            ssb_subcarrier_offset: constrained_integer::decode(reader, 0, 15)? as u8,
            dmrs_type_a_position: DmrsTypeAPosition::decode(reader)?,
            pdcch_config_sib1: PdcchConfigSib1::decode(reader)?,
            cell_barred: CellBarred::decode(reader)?,
            intra_freq_reselection: IntraFreqReselection::decode(reader)?,
            spare: bit_string::decode_fixed(reader, Self::SPARE_BITS)?,
        })
    }
}

impl Default for Mib {
    fn default() -> Self {
        Self {
            system_frame_number: BitString::from_u64(0, Self::SFN_BITS),
            sub_carrier_spacing_common: SubCarrierSpacingCommon::Scs15Or60,
            ssb_subcarrier_offset: 0,
            dmrs_type_a_position: DmrsTypeAPosition::Pos2,
            pdcch_config_sib1: PdcchConfigSib1::default(),
            cell_barred: CellBarred::NotBarred,
            intra_freq_reselection: IntraFreqReselection::Allowed,
            spare: BitString::from_u64(0, Self::SPARE_BITS),
        }
    }
}

/// BCCH-BCH-Message (TS 38.331 §6.2.1): CHOICE {mib, messageClassExtension}.
///
/// Ein natives Enum mit Payload: ein Diskriminantwechsel ersetzt den
/// Payload atomar, die inaktive Alternative ist nicht adressierbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BcchBchMessage {
    Mib(Mib),
    /// messageClassExtension SEQUENCE {} — reserved, carries no fields.
    MessageClassExtension,
}

impl BcchBchMessage {
    const ALTERNATIVES: usize = 2;

    /// Encodes the message body (choice bit + payload).
    pub fn encode(&self, writer: &mut BitWriter) -> Result<()> {
        match self {
            Self::Mib(mib) => {
                choice::encode_index(writer, 0, Self::ALTERNATIVES)?;
                mib.encode(writer)
            }
            Self::MessageClassExtension => {
                // leere SEQUENCE: nur der Diskriminant
                choice::encode_index(writer, 1, Self::ALTERNATIVES)
            }
        }
    }

    /// Decodes the message body (choice bit + payload).
    pub fn decode(reader: &mut BitReader) -> Result<Self> {
        match choice::decode_index(reader, Self::ALTERNATIVES)? {
            0 => Ok(Self::Mib(Mib::decode(reader)?)),
            _ => Ok(Self::MessageClassExtension),
        }
    }

    /// Encodes the message for the transport channel: body plus zero
    /// padding to a whole octet (X.691 §10.1.3). MIB output is always
    /// exactly 3 octets.
    pub fn encode_to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(3);
        self.encode(&mut writer)?;
        Ok(writer.into_vec())
    }

    /// Decodes a transport-channel buffer, consuming and discarding the
    /// trailing pad without checking its value.
    pub fn decode_from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = BitReader::new(data);
        let message = Self::decode(&mut reader)?;
        reader.align_to_byte();
        Ok(message)
    }
}
