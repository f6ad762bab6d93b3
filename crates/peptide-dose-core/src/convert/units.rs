//! Fixed-ratio conversions between physical quantities.
//!
//! Each function converts exactly one quantity; callers compose them.
//! Inputs are expected to be non-negative.

/// International Units per milligram for the supported hormone.
pub const IU_PER_MG: f64 = 3.0;

/// Micrograms per milligram.
pub const MCG_PER_MG: f64 = 1000.0;

/// Graduations per mL on a U-100 syringe.
pub const U100_UNITS_PER_ML: f64 = 100.0;

/// Fixed volume of a pen cartridge, in mL.
pub const PEN_CARTRIDGE_VOLUME_ML: f64 = 3.0;

/// IU delivered by one pen dial click.
pub const IU_PER_CLICK: f64 = 1.0;

/// Smallest draw a syringe can measure reliably, in mL.
pub const MIN_PRACTICAL_VOLUME_ML: f64 = 0.02;

pub fn mg_to_iu(mg: f64) -> f64 {
    mg * IU_PER_MG
}

pub fn iu_to_mg(iu: f64) -> f64 {
    iu / IU_PER_MG
}

pub fn mcg_to_mg(mcg: f64) -> f64 {
    mcg / MCG_PER_MG
}

pub fn mg_to_mcg(mg: f64) -> f64 {
    mg * MCG_PER_MG
}

/// mL to U-100 syringe units.
pub fn ml_to_units(ml: f64) -> f64 {
    ml * U100_UNITS_PER_ML
}

/// U-100 syringe units to mL.
pub fn units_to_ml(units: f64) -> f64 {
    units / U100_UNITS_PER_ML
}

/// Dial clicks for a dose, rounded half up.
///
/// Non-positive or non-finite doses need no clicks.
pub fn clicks_needed(dose_iu: f64) -> u32 {
    let clicks = dose_iu / IU_PER_CLICK;
    if !clicks.is_finite() || clicks <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX
    clicks.round() as u32
}

/// IU delivered by a number of clicks.
pub fn clicks_to_iu(clicks: u32) -> f64 {
    f64::from(clicks) * IU_PER_CLICK
}

/// Concentration of a cartridge holding `cartridge_iu`, in IU/mL.
pub fn pen_concentration(cartridge_iu: f64) -> f64 {
    cartridge_iu / PEN_CARTRIDGE_VOLUME_ML
}

/// Volume carrying `dose_iu` at `concentration_iu_per_ml`.
pub fn pen_volume_ml(dose_iu: f64, concentration_iu_per_ml: f64) -> f64 {
    if concentration_iu_per_ml <= 0.0 {
        return 0.0;
    }
    dose_iu / concentration_iu_per_ml
}

/// A syringe barrel, described by its total volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyringeCapacity {
    pub volume_ml: f64,
}

impl SyringeCapacity {
    /// Common insulin syringe sizes, in mL.
    pub const COMMON_SIZES_ML: [f64; 3] = [0.3, 0.5, 1.0];

    pub fn new(volume_ml: f64) -> Self {
        Self { volume_ml }
    }

    /// The common size matching `volume_ml`, if any.
    pub fn common(volume_ml: f64) -> Option<Self> {
        Self::COMMON_SIZES_ML
            .iter()
            .find(|size| (*size - volume_ml).abs() < 1e-9)
            .map(|size| Self::new(*size))
    }

    /// Highest mark on the barrel.
    pub fn max_units(&self) -> f64 {
        ml_to_units(self.volume_ml)
    }

    /// Whether `units` fits in one draw.
    pub fn holds(&self, units: f64) -> bool {
        units <= self.max_units()
    }

    /// Fill level for a reading, as a percentage clamped to [0, 100].
    pub fn fill_percent(&self, units: f64) -> f64 {
        let max = self.max_units();
        if max <= 0.0 || !units.is_finite() {
            return 0.0;
        }
        (units / max * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for SyringeCapacity {
    fn default() -> Self {
        Self::new(0.3)
    }
}
