//! Coordinates and great-circle distances. Pure functions only.

pub mod coordinate;
pub mod distance;

pub use coordinate::*;
pub use distance::*;
