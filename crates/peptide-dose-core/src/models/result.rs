//! Reconstitution result models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of one reconstitution computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CalculationResult {
    /// Solution strength after reconstitution
    pub concentration_mg_per_ml: f64,
    pub concentration_mcg_per_ml: f64,
    /// Volume to draw for the exact requested dose
    pub volume_ml: f64,
    /// Volume at the rounded syringe mark (equals `volume_ml` when not rounding)
    pub volume_ml_rounded: f64,
    /// U-100 syringe mark for `volume_ml`
    pub units_u100: f64,
    pub units_u100_rounded: f64,
    /// Dose actually delivered at the rounded mark
    pub actual_dose_mg: f64,
    pub actual_dose_mcg: f64,
    pub is_valid: bool,
    /// Requested dose is more than the whole vial holds
    pub exceeds_vial: bool,
    /// Draw is below what a syringe can measure reliably
    pub volume_too_small: bool,
}

impl CalculationResult {
    /// The all-zero result returned for unusable inputs.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// True when rounding moved the draw away from the exact volume.
    pub fn was_rounded(&self) -> bool {
        self.units_u100_rounded != self.units_u100
    }

    /// Advisory warnings in display order.
    ///
    /// `VolumeTooSmall` is not reported alongside `ExceedsVial`.
    pub fn warnings(&self) -> Vec<DoseWarning> {
        let mut warnings = Vec::new();
        if !self.is_valid {
            return warnings;
        }
        if self.exceeds_vial {
            warnings.push(DoseWarning::ExceedsVial);
        } else if self.volume_too_small {
            warnings.push(DoseWarning::VolumeTooSmall);
        }
        warnings
    }
}

/// Advisory condition on an otherwise valid result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DoseWarning {
    ExceedsVial,
    VolumeTooSmall,
}

impl DoseWarning {
    /// Stable identifier for presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            DoseWarning::ExceedsVial => "exceeds_vial",
            DoseWarning::VolumeTooSmall => "volume_too_small",
        }
    }
}

impl fmt::Display for DoseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseWarning::ExceedsVial => {
                write!(f, "The dose exceeds the total content of the vial.")
            }
            DoseWarning::VolumeTooSmall => write!(
                f,
                "Very small volume (<0.02 mL); it may be hard to measure accurately."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_all_zero() {
        let result = CalculationResult::invalid();
        assert!(!result.is_valid);
        assert_eq!(result.volume_ml, 0.0);
        assert_eq!(result.units_u100_rounded, 0.0);
        assert_eq!(result.actual_dose_mcg, 0.0);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_exceeds_vial_suppresses_small_volume() {
        let result = CalculationResult {
            is_valid: true,
            exceeds_vial: true,
            volume_too_small: true,
            ..Default::default()
        };
        assert_eq!(result.warnings(), vec![DoseWarning::ExceedsVial]);

        let result = CalculationResult {
            is_valid: true,
            volume_too_small: true,
            ..Default::default()
        };
        assert_eq!(result.warnings(), vec![DoseWarning::VolumeTooSmall]);
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(DoseWarning::ExceedsVial.code(), "exceeds_vial");
        assert_eq!(
            serde_json::to_string(&DoseWarning::VolumeTooSmall).unwrap(),
            "\"volume_too_small\""
        );
        assert!(DoseWarning::VolumeTooSmall.to_string().contains("0.02 mL"));
    }
}
