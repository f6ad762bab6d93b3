//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use peptide_dose_core::{
    DisplayMode, DoseUnit, PotencyUnit, ReadingKind, RoundingPrecision, SyringeCapacity,
};

/// Reconstitution and dose calculator for peptide vials and pens.
#[derive(Parser)]
#[command(name = "dosecalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// State database path (overrides DOSECALC_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Decimal separator: dot or comma (overrides DOSECALC_LOCALE)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Fractional digits shown (overrides DOSECALC_DECIMALS)
    #[arg(long, global = true)]
    pub decimals: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Volume and syringe mark for a reconstituted vial
    Calc(CalcArgs),

    /// Dose held by a syringe reading
    Inverse(InverseArgs),

    /// Clicks and volume for a pen cartridge
    Pen(PenArgs),

    /// Convert a single quantity
    Convert {
        #[arg(value_enum)]
        conversion: Conversion,

        value: f64,
    },

    /// Saved inputs
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

/// Inputs for `calc`. Omitted values come from the saved state.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Vial content in mg
    #[arg(long)]
    pub vial: Option<String>,

    /// Diluent volume in mL
    #[arg(long)]
    pub diluent: Option<String>,

    /// Target dose
    #[arg(long)]
    pub dose: Option<String>,

    /// Dose unit (mg or mcg)
    #[arg(long)]
    pub unit: Option<DoseUnit>,

    /// Round the syringe mark to a step: none, 1 or 0.5
    #[arg(long)]
    pub round: Option<RoundingPrecision>,

    /// What to show: ml, u100 or both
    #[arg(long)]
    pub display: Option<DisplayMode>,

    /// Syringe barrel volume in mL: 0.3, 0.5 or 1
    #[arg(long, default_value_t = 0.3, value_parser = parse_syringe)]
    pub syringe: f64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Do not update the saved inputs
    #[arg(long)]
    pub no_save: bool,
}

fn parse_syringe(value: &str) -> Result<f64, String> {
    let volume: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a volume in mL", value))?;
    match SyringeCapacity::common(volume) {
        Some(syringe) => Ok(syringe.volume_ml),
        None => {
            let sizes: Vec<String> = SyringeCapacity::COMMON_SIZES_ML
                .iter()
                .map(|size| size.to_string())
                .collect();
            Err(format!("unsupported syringe size (expected one of {})", sizes.join(", ")))
        }
    }
}

/// Inputs for `inverse`.
#[derive(Args, Debug)]
pub struct InverseArgs {
    /// Syringe reading
    pub value: String,

    /// Reading type (ml or units)
    #[arg(long, default_value = "units")]
    pub kind: ReadingKind,

    /// Concentration in mg/mL; defaults to the saved vial's
    #[arg(long)]
    pub concentration: Option<f64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Inputs for `pen`.
#[derive(Args, Debug)]
pub struct PenArgs {
    /// Cartridge content
    #[arg(long)]
    pub cartridge: f64,

    /// Cartridge content unit (iu or mg)
    #[arg(long, default_value = "iu")]
    pub cartridge_unit: PotencyUnit,

    /// Desired dose
    #[arg(long)]
    pub dose: f64,

    /// Dose unit (iu or mg)
    #[arg(long, default_value = "iu")]
    pub dose_unit: PotencyUnit,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Single-quantity conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Conversion {
    MgToIu,
    IuToMg,
    MlToUnits,
    UnitsToMl,
    McgToMg,
    MgToMcg,
}

/// State subcommands.
#[derive(Subcommand)]
pub enum StateAction {
    /// Print the saved inputs
    Show,

    /// Forget the saved inputs
    Reset,
}
