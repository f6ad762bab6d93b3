//! Reconstitution engine.
//!
//! Pipeline: Parse → Concentration → Dose in mg → Volume → U-100 mark → Rounding
//!
//! Every function here is pure; results depend only on the inputs passed in.

mod inverse;
mod parse;

pub use inverse::*;
pub use parse::*;

use crate::convert::{mcg_to_mg, mg_to_mcg, ml_to_units, units_to_ml, MIN_PRACTICAL_VOLUME_ML};
use crate::models::{CalculationResult, CalculatorInputs, DoseUnit, RoundingPrecision};

/// Round a U-100 reading to the nearest multiple of the precision step.
///
/// Ties round away from zero, so 2.5 units at step 1 becomes 3.
pub fn round_units(units: f64, precision: RoundingPrecision) -> f64 {
    match precision.step() {
        Some(step) => (units / step).round() * step,
        None => units,
    }
}

/// Compute draw volume, syringe mark and delivered dose for a vial.
///
/// Never fails: unusable inputs yield [`CalculationResult::invalid`].
pub fn compute(inputs: &CalculatorInputs) -> CalculationResult {
    let vial_mg = parse_amount(&inputs.vial_amount);
    let diluent_ml = parse_amount(&inputs.diluent_volume);
    let target_dose = parse_amount(&inputs.target_dose);

    if vial_mg <= 0.0 || diluent_ml <= 0.0 || target_dose <= 0.0 {
        tracing::trace!(vial_mg, diluent_ml, target_dose, "inputs not positive");
        return CalculationResult::invalid();
    }

    let mg_per_ml = vial_mg / diluent_ml;

    let dose_mg = match inputs.dose_unit {
        DoseUnit::Mcg => mcg_to_mg(target_dose),
        DoseUnit::Mg => target_dose,
    };

    let volume_ml = dose_mg / mg_per_ml;
    let units_u100 = ml_to_units(volume_ml);

    // The rounded volume always comes from the rounded mark
    let (units_u100_rounded, volume_ml_rounded) = if inputs.rounding_active() {
        let rounded = round_units(units_u100, inputs.rounding_precision);
        (rounded, units_to_ml(rounded))
    } else {
        (units_u100, volume_ml)
    };

    let actual_dose_mg = volume_ml_rounded * mg_per_ml;

    let result = CalculationResult {
        concentration_mg_per_ml: mg_per_ml,
        concentration_mcg_per_ml: mg_to_mcg(mg_per_ml),
        volume_ml,
        volume_ml_rounded,
        units_u100,
        units_u100_rounded,
        actual_dose_mg,
        actual_dose_mcg: mg_to_mcg(actual_dose_mg),
        is_valid: true,
        exceeds_vial: dose_mg > vial_mg,
        volume_too_small: volume_ml > 0.0 && volume_ml < MIN_PRACTICAL_VOLUME_ML,
    };

    tracing::trace!(
        mg_per_ml,
        volume_ml,
        units_u100_rounded,
        exceeds_vial = result.exceeds_vial,
        volume_too_small = result.volume_too_small,
        "reconstitution computed"
    );

    result
}

/// Engine that skips recomputation while the inputs stay the same.
#[derive(Debug, Default)]
pub struct MemoizedEngine {
    last: Option<(CalculatorInputs, CalculationResult)>,
}

impl MemoizedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute, reusing the previous result if `inputs` is unchanged.
    pub fn compute(&mut self, inputs: &CalculatorInputs) -> CalculationResult {
        if let Some((cached_inputs, cached)) = &self.last {
            if cached_inputs == inputs {
                return *cached;
            }
        }
        let result = compute(inputs);
        self.last = Some((inputs.clone(), result));
        result
    }

    /// Whether a result is cached for exactly these inputs.
    pub fn is_cached(&self, inputs: &CalculatorInputs) -> bool {
        matches!(&self.last, Some((cached, _)) if cached == inputs)
    }
}
