//! Inverse calculation models (measured volume back to dose).

use serde::{Deserialize, Serialize};

/// What a measured reading is expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    /// Millilitres
    Ml,
    /// U-100 syringe units
    #[default]
    Units,
}

impl ReadingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingKind::Ml => "ml",
            ReadingKind::Units => "units",
        }
    }
}

/// A syringe reading to convert back into a dose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InverseCalculationInputs {
    /// Raw reading text
    pub volume_or_units: String,
    pub input_type: ReadingKind,
}

impl InverseCalculationInputs {
    pub fn new(value: f64, input_type: ReadingKind) -> Self {
        Self {
            volume_or_units: value.to_string(),
            input_type,
        }
    }
}

/// Dose represented by a reading at a known concentration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct InverseCalculationResult {
    pub dose_mg: f64,
    pub dose_mcg: f64,
    pub is_valid: bool,
}

impl InverseCalculationResult {
    pub fn invalid() -> Self {
        Self::default()
    }
}
