//! Peptide Dose Core Library
//!
//! Reconstitution and dose-conversion engine for injectable peptide/HGH vials
//! and pens.
//!
//! # Architecture
//!
//! ```text
//! Raw inputs (text) → Parse → Reconstitution Engine → CalculationResult
//!                                     │                      │
//!                       concentration │                      ▼
//!                                     ▼                  Formatter
//!                             Inverse Calculator             │
//!                                                            ▼
//!                                                   Presentation layer
//!
//!   Unit Converter: mg↔IU, mL↔U-100 units, IU↔pen clicks
//!   State store:    load at start / save on change (SQLite)
//! ```
//!
//! # Core Principle
//!
//! **Calculation never fails.** Unusable inputs produce a result flagged
//! invalid with every quantity zeroed; unsafe or impractical inputs produce
//! advisory warnings. This is an educational tool, not a dosing authority.
//!
//! # Modules
//!
//! - [`engine`]: reconstitution and inverse calculation
//! - [`convert`]: unit conversions, pen mode, unit-name parsing
//! - [`format`]: display formatting
//! - [`models`]: domain types (CalculatorInputs, CalculationResult, etc.)
//! - [`db`]: SQLite store for last-used inputs

pub mod convert;
pub mod db;
pub mod engine;
pub mod format;
pub mod models;

// Re-export commonly used types
pub use convert::{compute_pen, SyringeCapacity, UnitParseError};
pub use db::Database;
pub use engine::{compute, inverse, MemoizedEngine};
pub use format::{format_number_with, NumberLocale};
pub use models::{
    CalculationResult, CalculatorInputs, DisplayMode, DoseUnit, DoseWarning,
    InverseCalculationInputs, InverseCalculationResult, PenInputs, PenResult, PotencyUnit,
    ReadingKind, RoundingPrecision,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DoseCalcError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for DoseCalcError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Json(e) => DoseCalcError::SerializationError(e.to_string()),
            other => DoseCalcError::DatabaseError(other.to_string()),
        }
    }
}

impl From<UnitParseError> for DoseCalcError {
    fn from(e: UnitParseError) -> Self {
        DoseCalcError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DoseCalcError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DoseCalcError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Calculation Functions (exported to FFI)
// =========================================================================

/// Compute volume, syringe mark and delivered dose for a reconstituted vial.
#[uniffi::export]
pub fn compute_reconstitution(
    inputs: FfiCalculatorInputs,
) -> Result<FfiCalculationResult, DoseCalcError> {
    let inputs = CalculatorInputs::try_from(inputs)?;
    Ok(compute(&inputs).into())
}

/// Dose held by a syringe reading ("ml" or "units") at a known concentration.
#[uniffi::export]
pub fn compute_inverse(
    volume_or_units: String,
    input_type: String,
    concentration_mg_per_ml: f64,
) -> Result<FfiInverseResult, DoseCalcError> {
    let inputs = InverseCalculationInputs {
        volume_or_units,
        input_type: input_type.parse()?,
    };
    Ok(inverse(&inputs, concentration_mg_per_ml).into())
}

/// Clicks and volumes for a pen dose. Units are "iu" or "mg".
#[uniffi::export]
pub fn compute_pen_dose(
    cartridge_amount: f64,
    cartridge_unit: String,
    dose: f64,
    dose_unit: String,
) -> Result<FfiPenResult, DoseCalcError> {
    let inputs = PenInputs {
        cartridge_amount,
        cartridge_unit: cartridge_unit.parse()?,
        dose,
        dose_unit: dose_unit.parse()?,
    };
    Ok(compute_pen(&inputs).into())
}

/// Format a value for display; `comma` selects the `1,5` convention.
#[uniffi::export]
pub fn format_number(value: f64, max_decimals: u32, comma: bool) -> String {
    let locale = if comma {
        NumberLocale::Comma
    } else {
        NumberLocale::Dot
    };
    format_number_with(value, max_decimals as usize, locale)
}

#[uniffi::export]
pub fn mg_to_iu(mg: f64) -> f64 {
    convert::mg_to_iu(mg)
}

#[uniffi::export]
pub fn iu_to_mg(iu: f64) -> f64 {
    convert::iu_to_mg(iu)
}

/// Whether partially typed text is an acceptable amount.
#[uniffi::export]
pub fn is_numeric_text(text: String) -> bool {
    engine::is_numeric_text(&text)
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a state store at the given path.
#[uniffi::export]
pub fn open_state_store(path: String) -> Result<Arc<DoseCalcCore>, DoseCalcError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(DoseCalcCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory state store (for testing).
#[uniffi::export]
pub fn open_state_store_in_memory() -> Result<Arc<DoseCalcCore>, DoseCalcError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DoseCalcCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe state store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DoseCalcCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl DoseCalcCore {
    /// Last-used inputs, or the defaults on first launch.
    pub fn load_inputs(&self) -> Result<FfiCalculatorInputs, DoseCalcError> {
        let db = self.db.lock()?;
        Ok(db.load_inputs()?.into())
    }

    /// Persist inputs. Returns false when nothing changed.
    pub fn save_inputs(&self, inputs: FfiCalculatorInputs) -> Result<bool, DoseCalcError> {
        let inputs = CalculatorInputs::try_from(inputs)?;
        let db = self.db.lock()?;
        Ok(db.save_inputs(&inputs)?)
    }

    /// Forget the saved inputs.
    pub fn clear_inputs(&self) -> Result<bool, DoseCalcError> {
        let db = self.db.lock()?;
        Ok(db.clear_inputs()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe calculator inputs.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalculatorInputs {
    pub vial_amount: String,
    pub diluent_volume: String,
    pub target_dose: String,
    pub dose_unit: String,
    pub display_mode: String,
    pub rounding_enabled: bool,
    pub rounding_precision: String,
}

impl From<CalculatorInputs> for FfiCalculatorInputs {
    fn from(inputs: CalculatorInputs) -> Self {
        Self {
            vial_amount: inputs.vial_amount,
            diluent_volume: inputs.diluent_volume,
            target_dose: inputs.target_dose,
            dose_unit: inputs.dose_unit.as_str().to_string(),
            display_mode: inputs.display_mode.as_str().to_string(),
            rounding_enabled: inputs.rounding_enabled,
            rounding_precision: inputs.rounding_precision.as_str().to_string(),
        }
    }
}

impl TryFrom<FfiCalculatorInputs> for CalculatorInputs {
    type Error = UnitParseError;

    fn try_from(inputs: FfiCalculatorInputs) -> Result<Self, Self::Error> {
        Ok(CalculatorInputs {
            vial_amount: inputs.vial_amount,
            diluent_volume: inputs.diluent_volume,
            target_dose: inputs.target_dose,
            dose_unit: inputs.dose_unit.parse()?,
            display_mode: inputs.display_mode.parse()?,
            rounding_enabled: inputs.rounding_enabled,
            rounding_precision: inputs.rounding_precision.parse()?,
        })
    }
}

/// FFI-safe calculation result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalculationResult {
    pub concentration_mg_per_ml: f64,
    pub concentration_mcg_per_ml: f64,
    pub volume_ml: f64,
    pub volume_ml_rounded: f64,
    pub units_u100: f64,
    pub units_u100_rounded: f64,
    pub actual_dose_mg: f64,
    pub actual_dose_mcg: f64,
    pub is_valid: bool,
    pub exceeds_vial: bool,
    pub volume_too_small: bool,
    /// Warning codes in display order
    pub warnings: Vec<String>,
}

impl From<CalculationResult> for FfiCalculationResult {
    fn from(result: CalculationResult) -> Self {
        Self {
            concentration_mg_per_ml: result.concentration_mg_per_ml,
            concentration_mcg_per_ml: result.concentration_mcg_per_ml,
            volume_ml: result.volume_ml,
            volume_ml_rounded: result.volume_ml_rounded,
            units_u100: result.units_u100,
            units_u100_rounded: result.units_u100_rounded,
            actual_dose_mg: result.actual_dose_mg,
            actual_dose_mcg: result.actual_dose_mcg,
            is_valid: result.is_valid,
            exceeds_vial: result.exceeds_vial,
            volume_too_small: result.volume_too_small,
            warnings: result
                .warnings()
                .iter()
                .map(|w| w.code().to_string())
                .collect(),
        }
    }
}

/// FFI-safe inverse result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInverseResult {
    pub dose_mg: f64,
    pub dose_mcg: f64,
    pub is_valid: bool,
}

impl From<InverseCalculationResult> for FfiInverseResult {
    fn from(result: InverseCalculationResult) -> Self {
        Self {
            dose_mg: result.dose_mg,
            dose_mcg: result.dose_mcg,
            is_valid: result.is_valid,
        }
    }
}

/// FFI-safe pen result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPenResult {
    pub concentration_iu_per_ml: f64,
    pub concentration_mg_per_ml: f64,
    pub dose_iu: f64,
    pub dose_mg: f64,
    pub clicks_needed: u32,
    pub volume_ml: f64,
    pub injected_volume_ml: f64,
    pub injected_dose_iu: f64,
    pub is_valid: bool,
    pub exceeds_cartridge: bool,
}

impl From<PenResult> for FfiPenResult {
    fn from(result: PenResult) -> Self {
        Self {
            concentration_iu_per_ml: result.concentration_iu_per_ml,
            concentration_mg_per_ml: result.concentration_mg_per_ml,
            dose_iu: result.dose_iu,
            dose_mg: result.dose_mg,
            clicks_needed: result.clicks_needed,
            volume_ml: result.volume_ml,
            injected_volume_ml: result.injected_volume_ml,
            injected_dose_iu: result.injected_dose_iu,
            is_valid: result.is_valid,
            exceeds_cartridge: result.exceeds_cartridge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_inputs() -> FfiCalculatorInputs {
        FfiCalculatorInputs {
            vial_amount: "5".into(),
            diluent_volume: "1".into(),
            target_dose: "6".into(),
            dose_unit: "mg".into(),
            display_mode: "both".into(),
            rounding_enabled: false,
            rounding_precision: "1".into(),
        }
    }

    #[test]
    fn test_compute_reconstitution_ffi() {
        let result = compute_reconstitution(ffi_inputs()).unwrap();
        assert!(result.is_valid);
        assert!(result.exceeds_vial);
        assert_eq!(result.warnings, vec!["exceeds_vial".to_string()]);
    }

    #[test]
    fn test_bad_unit_is_invalid_input() {
        let mut inputs = ffi_inputs();
        inputs.dose_unit = "grams".into();
        let err = compute_reconstitution(inputs).unwrap_err();
        assert!(matches!(err, DoseCalcError::InvalidInput(_)));
    }

    #[test]
    fn test_inverse_and_pen_ffi() {
        let result = compute_inverse("10".into(), "units".into(), 5.0).unwrap();
        assert!((result.dose_mcg - 500.0).abs() < 1e-9);

        let pen = compute_pen_dose(12.0, "iu".into(), 4.0, "IU".into()).unwrap();
        assert_eq!(pen.clicks_needed, 4);

        assert!(compute_pen_dose(12.0, "litres".into(), 4.0, "iu".into()).is_err());
    }

    #[test]
    fn test_format_number_ffi() {
        assert_eq!(format_number(1.25, 3, true), "1,25");
        assert_eq!(format_number(f64::NAN, 3, false), "—");
        assert_eq!(format_number(1.0, u32::MAX, false), "1");
        assert_eq!(format_number(0.5, 70_000, true), "0,5");
    }

    #[test]
    fn test_state_store_object() {
        let core = open_state_store_in_memory().unwrap();

        let loaded = core.load_inputs().unwrap();
        assert_eq!(loaded.vial_amount, "5");
        assert_eq!(loaded.dose_unit, "mcg");
        assert_eq!(loaded.rounding_precision, "1");

        assert!(core.save_inputs(ffi_inputs()).unwrap());
        assert!(!core.save_inputs(ffi_inputs()).unwrap());
        assert_eq!(core.load_inputs().unwrap().target_dose, "6");

        assert!(core.clear_inputs().unwrap());
        assert_eq!(core.load_inputs().unwrap().target_dose, "250");
    }
}
