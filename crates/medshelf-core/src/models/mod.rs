//! Domain models for the medshelf system.

mod medicine;
mod prescription;

pub use medicine::*;
pub use prescription::*;
