#![no_main]
use libfuzzer_sys::fuzz_target;
use ruper::bit_string::BitString;
use ruper::mib::{
    BcchBchMessage, CellBarred, DmrsTypeAPosition, IntraFreqReselection, Mib, PdcchConfigSib1,
    SubCarrierSpacingCommon,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Vier Input-Octets auf die MIB-Felder verteilen
    let mib = Mib {
        system_frame_number: BitString::from_u64(u64::from(data[0] & 0x3F), 6),
        sub_carrier_spacing_common: if data[0] & 0x40 != 0 {
            SubCarrierSpacingCommon::Scs30Or120
        } else {
            SubCarrierSpacingCommon::Scs15Or60
        },
        ssb_subcarrier_offset: data[1] & 0x0F,
        dmrs_type_a_position: if data[1] & 0x10 != 0 {
            DmrsTypeAPosition::Pos3
        } else {
            DmrsTypeAPosition::Pos2
        },
        pdcch_config_sib1: PdcchConfigSib1 {
            control_resource_set_zero: data[2] & 0x0F,
            search_space_zero: data[2] >> 4,
        },
        cell_barred: if data[3] & 1 != 0 { CellBarred::Barred } else { CellBarred::NotBarred },
        intra_freq_reselection: if data[3] & 2 != 0 {
            IntraFreqReselection::NotAllowed
        } else {
            IntraFreqReselection::Allowed
        },
        spare: BitString::from_u64(u64::from(data[3] >> 7), 1),
    };

    let msg = BcchBchMessage::Mib(mib);
    let bytes = msg.encode_to_bytes().unwrap();
    assert_eq!(bytes.len(), 3);
    assert_eq!(BcchBchMessage::decode_from_bytes(&bytes).unwrap(), msg);
});
