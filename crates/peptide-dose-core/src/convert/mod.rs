//! Unit conversions shared by syringe and pen modes.
//!
//! - [`units`]: fixed ratios (mg↔IU, mL↔U-100, IU↔clicks) and syringe capacity
//! - [`pen`]: pen cartridge dose computation
//! - [`names`]: parsing of unit and mode names

mod names;
mod pen;
mod units;

pub use names::*;
pub use pen::*;
pub use units::*;
