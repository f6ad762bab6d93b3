//! Terminal and JSON rendering of calculator results.

use colored::Colorize;
use serde::Serialize;

use peptide_dose_core::engine::parse_amount;
use peptide_dose_core::{
    format_number_with, CalculationResult, CalculatorInputs, DoseWarning,
    InverseCalculationResult, NumberLocale, PenResult, SyringeCapacity,
};

pub const DISCLAIMER: &str = "For educational and informational purposes only; this is not medical advice. \
Always consult a healthcare professional.";

/// Number formatting settings for one render.
#[derive(Debug, Clone, Copy)]
pub struct NumberStyle {
    pub locale: NumberLocale,
    pub decimals: usize,
}

impl NumberStyle {
    fn num(&self, value: f64) -> String {
        format_number_with(value, self.decimals, self.locale)
    }

    /// Syringe marks are read to one decimal.
    fn mark(&self, value: f64) -> String {
        format_number_with(value, 1, self.locale)
    }
}

/// JSON body for `calc --json`.
#[derive(Debug, Serialize)]
pub struct CalcReport<'a> {
    pub inputs: &'a CalculatorInputs,
    pub result: &'a CalculationResult,
    pub warnings: Vec<DoseWarning>,
    pub syringe: SyringeReport,
}

#[derive(Debug, Serialize)]
pub struct SyringeReport {
    pub volume_ml: f64,
    pub max_units: f64,
    pub fill_percent: f64,
    pub fits: bool,
}

impl SyringeReport {
    pub fn new(syringe: &SyringeCapacity, units: f64) -> Self {
        Self {
            volume_ml: syringe.volume_ml,
            max_units: syringe.max_units(),
            fill_percent: syringe.fill_percent(units),
            fits: syringe.holds(units),
        }
    }
}

/// Human-readable summary of a reconstitution.
pub fn render_calculation(
    inputs: &CalculatorInputs,
    result: &CalculationResult,
    syringe: &SyringeCapacity,
    style: NumberStyle,
) -> String {
    if !result.is_valid {
        return "Enter a vial amount, diluent volume and dose greater than zero.\n".to_string();
    }

    let mode = inputs.display_mode;
    let dose = format!(
        "{} {}",
        style.num(parse_amount(&inputs.target_dose)),
        inputs.dose_unit.as_str()
    );

    let mut lines = Vec::new();
    let headline = if mode.shows_units() {
        format!(
            "For a dose of {}, draw the syringe to {} units",
            dose,
            style.mark(result.units_u100_rounded)
        )
    } else {
        format!(
            "For a dose of {}, draw {} mL",
            dose,
            style.num(result.volume_ml_rounded)
        )
    };
    lines.push(headline.bold().to_string());

    if mode.shows_ml() {
        lines.push(format!(
            "  Volume:         {} mL",
            style.num(result.volume_ml_rounded)
        ));
    }
    lines.push(format!(
        "  Concentration:  {} mg/mL ({} mcg/mL)",
        style.num(result.concentration_mg_per_ml),
        style.num(result.concentration_mcg_per_ml)
    ));
    if mode.shows_units() {
        lines.push(format!(
            "  Syringe:        {} / {} units ({}% full)",
            style.mark(result.units_u100_rounded),
            style.mark(syringe.max_units()),
            format_number_with(syringe.fill_percent(result.units_u100_rounded), 0, style.locale)
        ));
    }
    if result.was_rounded() {
        lines.push(format!(
            "  Delivered dose after rounding: {} mcg ({} mg)",
            style.num(result.actual_dose_mcg),
            style.num(result.actual_dose_mg)
        ));
    }

    for warning in result.warnings() {
        lines.push(format!("Warning: {}", warning).yellow().to_string());
    }
    if !syringe.holds(result.units_u100_rounded) {
        lines.push(
            format!(
                "Warning: the draw does not fit in a {} mL syringe.",
                style.num(syringe.volume_ml)
            )
            .yellow()
            .to_string(),
        );
    }

    lines.push(DISCLAIMER.dimmed().to_string());
    lines.join("\n") + "\n"
}

/// Human-readable inverse result.
pub fn render_inverse(result: &InverseCalculationResult, style: NumberStyle) -> String {
    if !result.is_valid {
        return "Enter a reading and a concentration greater than zero.\n".to_string();
    }
    format!(
        "That reading holds {} mg ({} mcg)\n",
        style.num(result.dose_mg),
        style.num(result.dose_mcg)
    )
}

/// Human-readable pen result.
pub fn render_pen(result: &PenResult, style: NumberStyle) -> String {
    if !result.is_valid {
        return "Enter a cartridge amount and dose greater than zero.\n".to_string();
    }

    let mut lines = vec![
        format!("Dial {} clicks", result.clicks_needed).bold().to_string(),
        format!(
            "  Dose:           {} IU ({} mg)",
            style.num(result.dose_iu),
            style.num(result.dose_mg)
        ),
        format!(
            "  Concentration:  {} IU/mL ({} mg/mL)",
            style.num(result.concentration_iu_per_ml),
            style.num(result.concentration_mg_per_ml)
        ),
        format!("  Volume:         {} mL", style.num(result.injected_volume_ml)),
    ];
    if result.injected_dose_iu != result.dose_iu {
        lines.push(format!(
            "  Delivered at {} clicks: {} IU",
            result.clicks_needed,
            style.num(result.injected_dose_iu)
        ));
    }
    if result.exceeds_cartridge {
        lines.push(
            "Warning: The dose exceeds the total content of the cartridge."
                .yellow()
                .to_string(),
        );
    }
    lines.push(DISCLAIMER.dimmed().to_string());
    lines.join("\n") + "\n"
}
