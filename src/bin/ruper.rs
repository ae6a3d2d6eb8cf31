//! ruper CLI — MIB <-> UPER conversion.

#[cfg(feature = "fast-alloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ruper::bit_string::BitString;
use ruper::mib::{
    BcchBchMessage, CellBarred, DmrsTypeAPosition, IntraFreqReselection, Mib, PdcchConfigSib1,
    SubCarrierSpacingCommon,
};
use std::io::{IsTerminal, Read, Write};
use std::process;

#[derive(Parser)]
#[command(name = "ruper", about = "UPER encode/decode for BCCH-BCH (MIB) messages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a MIB from field values to UPER hex
    Encode(EncodeArgs),
    /// Decode a UPER message (hex or raw) and print its fields
    Decode(DecodeArgs),
}

#[derive(Copy, Clone, ValueEnum)]
enum ScsArg {
    /// 15 kHz (FR1) / 60 kHz (FR2)
    Scs15or60,
    /// 30 kHz (FR1) / 120 kHz (FR2)
    Scs30or120,
}

#[derive(Copy, Clone, ValueEnum)]
enum DmrsArg {
    Pos2,
    Pos3,
}

#[derive(Args)]
struct EncodeArgs {
    /// systemFrameNumber MSBs (0..63)
    #[arg(long, default_value_t = 0)]
    sfn: u8,

    /// subCarrierSpacingCommon
    #[arg(long, value_enum, default_value_t = ScsArg::Scs15or60)]
    scs: ScsArg,

    /// ssb-SubcarrierOffset k_SSB (0..15)
    #[arg(long, default_value_t = 0)]
    ssb_offset: u8,

    /// dmrs-TypeA-Position
    #[arg(long, value_enum, default_value_t = DmrsArg::Pos2)]
    dmrs: DmrsArg,

    /// controlResourceSetZero (0..15)
    #[arg(long, default_value_t = 0)]
    coreset0: u8,

    /// searchSpaceZero (0..15)
    #[arg(long, default_value_t = 0)]
    search_space0: u8,

    /// cellBarred = barred (default: notBarred)
    #[arg(long)]
    barred: bool,

    /// intraFreqReselection = notAllowed (default: allowed)
    #[arg(long)]
    no_intra_freq_reselection: bool,

    /// Output file for raw octets (- for stdout; default: hex on stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct DecodeArgs {
    /// Hex string ("000004"); omit to read raw octets from --input
    hex: Option<String>,

    /// Input file with raw octets (- for stdin)
    #[arg(short, long, conflicts_with = "hex")]
    input: Option<String>,
}

impl EncodeArgs {
    fn to_message(&self) -> Result<BcchBchMessage, String> {
        if self.sfn > 63 {
            return Err(format!("sfn {} ausserhalb 0..63", self.sfn));
        }
        Ok(BcchBchMessage::Mib(Mib {
            system_frame_number: BitString::from_u64(u64::from(self.sfn), Mib::SFN_BITS),
            sub_carrier_spacing_common: match self.scs {
                ScsArg::Scs15or60 => SubCarrierSpacingCommon::Scs15Or60,
                ScsArg::Scs30or120 => SubCarrierSpacingCommon::Scs30Or120,
            },
            ssb_subcarrier_offset: self.ssb_offset,
            dmrs_type_a_position: match self.dmrs {
                DmrsArg::Pos2 => DmrsTypeAPosition::Pos2,
                DmrsArg::Pos3 => DmrsTypeAPosition::Pos3,
            },
            pdcch_config_sib1: PdcchConfigSib1 {
                control_resource_set_zero: self.coreset0,
                search_space_zero: self.search_space0,
            },
            cell_barred: if self.barred { CellBarred::Barred } else { CellBarred::NotBarred },
            intra_freq_reselection: if self.no_intra_freq_reselection {
                IntraFreqReselection::NotAllowed
            } else {
                IntraFreqReselection::Allowed
            },
            spare: BitString::from_u64(0, Mib::SPARE_BITS),
        }))
    }
}

fn read_input(path: &str) -> Result<Vec<u8>, String> {
    if path == "-" {
        if std::io::stdin().is_terminal() {
            eprintln!("Lese von stdin (Ctrl+D zum Beenden)...");
        }
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("Lesefehler (stdin): {e}"))?;
        Ok(buf)
    } else {
        std::fs::read(path).map_err(|e| format!("Lesefehler '{}': {e}", path))
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Fehler: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Encode(args) => run_encode(args),
        Command::Decode(args) => run_decode(args),
    }
}

fn run_encode(args: EncodeArgs) -> Result<(), String> {
    let message = args.to_message()?;
    let bytes = message
        .encode_to_bytes()
        .map_err(|e| format!("Encode-Fehler: {e}"))?;

    match args.output.as_deref() {
        None => println!("{}", hex::encode(&bytes)),
        Some("-") => std::io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("Schreibfehler (stdout): {e}"))?,
        Some(path) => {
            std::fs::write(path, &bytes).map_err(|e| format!("Schreibfehler '{}': {e}", path))?
        }
    }
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<(), String> {
    let bytes = match (&args.hex, args.input.as_deref()) {
        (Some(hex_str), _) => {
            hex::decode(hex_str.trim()).map_err(|e| format!("Hex-Fehler: {e}"))?
        }
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Err("entweder Hex-Argument oder --input angeben".into()),
    };

    let message =
        BcchBchMessage::decode_from_bytes(&bytes).map_err(|e| format!("Decode-Fehler: {e}"))?;
    match message {
        BcchBchMessage::Mib(mib) => print_mib(&mib),
        BcchBchMessage::MessageClassExtension => {
            println!("BCCH-BCH-Message: messageClassExtension (leer)");
        }
    }
    Ok(())
}

fn print_mib(mib: &Mib) {
    println!("BCCH-BCH-Message: mib");
    let sfn = mib.system_frame_number.to_u64();
    println!("  systemFrameNumber     {sfn:06b} ({sfn})");
    println!(
        "  subCarrierSpacingCommon {}",
        match mib.sub_carrier_spacing_common {
            SubCarrierSpacingCommon::Scs15Or60 => "scs15or60",
            SubCarrierSpacingCommon::Scs30Or120 => "scs30or120",
        }
    );
    println!("  ssb-SubcarrierOffset  {}", mib.ssb_subcarrier_offset);
    println!(
        "  dmrs-TypeA-Position   {}",
        match mib.dmrs_type_a_position {
            DmrsTypeAPosition::Pos2 => "pos2",
            DmrsTypeAPosition::Pos3 => "pos3",
        }
    );
    println!(
        "  pdcch-ConfigSIB1      coreset0={} searchSpace0={}",
        mib.pdcch_config_sib1.control_resource_set_zero, mib.pdcch_config_sib1.search_space_zero
    );
    println!(
        "  cellBarred            {}",
        match mib.cell_barred {
            CellBarred::Barred => "barred",
            CellBarred::NotBarred => "notBarred",
        }
    );
    println!(
        "  intraFreqReselection  {}",
        match mib.intra_freq_reselection {
            IntraFreqReselection::Allowed => "allowed",
            IntraFreqReselection::NotAllowed => "notAllowed",
        }
    );
    println!("  spare                 {:01b}", mib.spare.to_u64());
}
