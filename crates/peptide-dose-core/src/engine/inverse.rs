//! Inverse calculation: from a syringe reading back to the dose it holds.

use crate::convert::{mg_to_mcg, units_to_ml};
use crate::models::{InverseCalculationInputs, InverseCalculationResult, ReadingKind};

use super::parse_amount;

/// Dose contained in a reading at `concentration_mg_per_ml`.
pub fn inverse(
    inputs: &InverseCalculationInputs,
    concentration_mg_per_ml: f64,
) -> InverseCalculationResult {
    let value = parse_amount(&inputs.volume_or_units);

    if value <= 0.0 || !(concentration_mg_per_ml > 0.0 && concentration_mg_per_ml.is_finite()) {
        return InverseCalculationResult::invalid();
    }

    let volume_ml = match inputs.input_type {
        ReadingKind::Units => units_to_ml(value),
        ReadingKind::Ml => value,
    };

    let dose_mg = volume_ml * concentration_mg_per_ml;

    InverseCalculationResult {
        dose_mg,
        dose_mcg: mg_to_mcg(dose_mg),
        is_valid: true,
    }
}
