//! Spatial data structures shared between pipeline stages

/// Displacement offsets for a single frame
pub mod field;

pub use field::DisplacementField;
