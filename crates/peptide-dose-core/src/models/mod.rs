//! Domain models for the dose calculator.

mod inputs;
mod inverse;
mod pen;
mod result;

pub use inputs::*;
pub use inverse::*;
pub use pen::*;
pub use result::*;
