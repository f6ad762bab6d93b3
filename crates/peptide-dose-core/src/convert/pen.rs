//! Pen-mode dose computation.

use crate::models::{PenInputs, PenResult, PotencyUnit};

use super::units::{
    clicks_needed, clicks_to_iu, iu_to_mg, mg_to_iu, pen_concentration, pen_volume_ml,
};

/// Express an amount in IU regardless of how it was entered.
pub fn to_iu(amount: f64, unit: PotencyUnit) -> f64 {
    match unit {
        PotencyUnit::Iu => amount,
        PotencyUnit::Mg => mg_to_iu(amount),
    }
}

/// Compute clicks and volumes for a pen dose.
///
/// Returns an all-zero invalid result when the cartridge or dose is not
/// a positive finite amount.
pub fn compute_pen(inputs: &PenInputs) -> PenResult {
    let cartridge_iu = to_iu(inputs.cartridge_amount, inputs.cartridge_unit);
    let dose_iu = to_iu(inputs.dose, inputs.dose_unit);

    if !is_positive(cartridge_iu) || !is_positive(dose_iu) {
        tracing::trace!(?inputs, "pen inputs not positive");
        return PenResult::invalid();
    }

    let concentration_iu_per_ml = pen_concentration(cartridge_iu);
    let clicks = clicks_needed(dose_iu);
    let injected_dose_iu = clicks_to_iu(clicks);

    PenResult {
        concentration_iu_per_ml,
        concentration_mg_per_ml: iu_to_mg(concentration_iu_per_ml),
        dose_iu,
        dose_mg: iu_to_mg(dose_iu),
        clicks_needed: clicks,
        volume_ml: pen_volume_ml(dose_iu, concentration_iu_per_ml),
        injected_volume_ml: pen_volume_ml(injected_dose_iu, concentration_iu_per_ml),
        injected_dose_iu,
        is_valid: true,
        exceeds_cartridge: dose_iu > cartridge_iu,
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
