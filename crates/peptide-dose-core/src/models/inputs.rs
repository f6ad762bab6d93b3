//! Calculator input models.

use serde::{Deserialize, Serialize};

/// Unit the target dose is entered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Mg,
    #[default]
    Mcg,
}

impl DoseUnit {
    /// Canonical short name ("mg" / "mcg").
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::Mg => "mg",
            DoseUnit::Mcg => "mcg",
        }
    }
}

/// How results should be shown. Carried with the inputs so the
/// presentation layer can restore it; the math ignores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Ml,
    U100,
    #[default]
    Both,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Ml => "ml",
            DisplayMode::U100 => "u100",
            DisplayMode::Both => "both",
        }
    }

    /// Whether the mL volume should be displayed.
    pub fn shows_ml(&self) -> bool {
        matches!(self, DisplayMode::Ml | DisplayMode::Both)
    }

    /// Whether the U-100 syringe mark should be displayed.
    pub fn shows_units(&self) -> bool {
        matches!(self, DisplayMode::U100 | DisplayMode::Both)
    }
}

/// Syringe-unit step used when rounding the draw to a measurable mark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RoundingPrecision {
    #[serde(rename = "none")]
    None,
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "0.5")]
    Half,
}

impl RoundingPrecision {
    /// Step size in U-100 units, or `None` when rounding is disabled.
    pub fn step(&self) -> Option<f64> {
        match self {
            RoundingPrecision::None => None,
            RoundingPrecision::One => Some(1.0),
            RoundingPrecision::Half => Some(0.5),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingPrecision::None => "none",
            RoundingPrecision::One => "1",
            RoundingPrecision::Half => "0.5",
        }
    }
}

/// Raw calculator inputs as typed by the user.
///
/// Numeric fields keep the user's text; the engine parses them leniently
/// and treats anything unparsable as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatorInputs {
    /// Lyophilized content of the vial, in mg
    pub vial_amount: String,
    /// Diluent added to the vial, in mL
    pub diluent_volume: String,
    /// Desired dose, in `dose_unit`
    pub target_dose: String,
    pub dose_unit: DoseUnit,
    #[serde(default)]
    pub display_mode: DisplayMode,
    pub rounding_enabled: bool,
    pub rounding_precision: RoundingPrecision,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            vial_amount: "5".into(),
            diluent_volume: "1".into(),
            target_dose: "250".into(),
            dose_unit: DoseUnit::Mcg,
            display_mode: DisplayMode::Both,
            rounding_enabled: false,
            rounding_precision: RoundingPrecision::One,
        }
    }
}

impl CalculatorInputs {
    /// Create inputs from numeric values with rounding disabled.
    pub fn new(vial_mg: f64, diluent_ml: f64, target_dose: f64, dose_unit: DoseUnit) -> Self {
        Self {
            vial_amount: vial_mg.to_string(),
            diluent_volume: diluent_ml.to_string(),
            target_dose: target_dose.to_string(),
            dose_unit,
            display_mode: DisplayMode::Both,
            rounding_enabled: false,
            rounding_precision: RoundingPrecision::None,
        }
    }

    /// Enable rounding to the given precision.
    pub fn with_rounding(mut self, precision: RoundingPrecision) -> Self {
        self.rounding_enabled = true;
        self.rounding_precision = precision;
        self
    }

    /// True when the rounding policy actually changes the draw.
    pub fn rounding_active(&self) -> bool {
        self.rounding_enabled && self.rounding_precision != RoundingPrecision::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.vial_amount, "5");
        assert_eq!(inputs.diluent_volume, "1");
        assert_eq!(inputs.target_dose, "250");
        assert_eq!(inputs.dose_unit, DoseUnit::Mcg);
        assert!(!inputs.rounding_enabled);
        assert_eq!(inputs.rounding_precision, RoundingPrecision::One);
    }

    #[test]
    fn test_rounding_active() {
        let inputs = CalculatorInputs::new(5.0, 1.0, 250.0, DoseUnit::Mcg);
        assert!(!inputs.rounding_active());

        let inputs = inputs.with_rounding(RoundingPrecision::Half);
        assert!(inputs.rounding_active());

        let mut inputs = CalculatorInputs::default();
        inputs.rounding_enabled = true;
        inputs.rounding_precision = RoundingPrecision::None;
        assert!(!inputs.rounding_active());
    }

    #[test]
    fn test_serde_tags_match_stored_format() {
        let inputs = CalculatorInputs::default().with_rounding(RoundingPrecision::Half);
        let json = serde_json::to_value(&inputs).unwrap();

        assert_eq!(json["dose_unit"], "mcg");
        assert_eq!(json["display_mode"], "both");
        assert_eq!(json["rounding_precision"], "0.5");

        let back: CalculatorInputs = serde_json::from_value(json).unwrap();
        assert_eq!(back, inputs);
    }

    #[test]
    fn test_missing_display_mode_defaults() {
        let json = r#"{
            "vial_amount": "10",
            "diluent_volume": "2",
            "target_dose": "1",
            "dose_unit": "mg",
            "rounding_enabled": true,
            "rounding_precision": "none"
        }"#;
        let inputs: CalculatorInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.display_mode, DisplayMode::Both);
        assert_eq!(inputs.dose_unit, DoseUnit::Mg);
        assert_eq!(inputs.rounding_precision, RoundingPrecision::None);
    }

    #[test]
    fn test_display_mode_flags() {
        assert!(DisplayMode::Both.shows_ml() && DisplayMode::Both.shows_units());
        assert!(DisplayMode::Ml.shows_ml() && !DisplayMode::Ml.shows_units());
        assert!(!DisplayMode::U100.shows_ml() && DisplayMode::U100.shows_units());
    }
}
