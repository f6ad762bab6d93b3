//! Pen (cartridge) delivery models.

use serde::{Deserialize, Serialize};

/// Unit for hormone quantities entered in pen mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PotencyUnit {
    /// International Units
    #[default]
    Iu,
    Mg,
}

impl PotencyUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PotencyUnit::Iu => "iu",
            PotencyUnit::Mg => "mg",
        }
    }
}

/// Pen-mode inputs. Cartridge volume is fixed, so only amounts are entered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PenInputs {
    /// Total content of the cartridge
    pub cartridge_amount: f64,
    pub cartridge_unit: PotencyUnit,
    /// Desired dose
    pub dose: f64,
    pub dose_unit: PotencyUnit,
}

impl PenInputs {
    /// Cartridge and dose both entered in IU.
    pub fn in_iu(cartridge_iu: f64, dose_iu: f64) -> Self {
        Self {
            cartridge_amount: cartridge_iu,
            cartridge_unit: PotencyUnit::Iu,
            dose: dose_iu,
            dose_unit: PotencyUnit::Iu,
        }
    }
}

/// Derived pen quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PenResult {
    pub concentration_iu_per_ml: f64,
    pub concentration_mg_per_ml: f64,
    pub dose_iu: f64,
    pub dose_mg: f64,
    /// Dial clicks to set (1 click = 1 IU)
    pub clicks_needed: u32,
    /// Volume for the exact dose
    pub volume_ml: f64,
    /// Volume delivered at `clicks_needed`
    pub injected_volume_ml: f64,
    /// IU delivered at `clicks_needed`
    pub injected_dose_iu: f64,
    pub is_valid: bool,
    /// Dose is more than the whole cartridge holds
    pub exceeds_cartridge: bool,
}

impl PenResult {
    pub fn invalid() -> Self {
        Self::default()
    }
}
