//! Line boil effect for still images, rendered as looping animated GIFs
//!
//! Every frame warps the source through a fresh smooth random displacement
//! field, flattens the result onto a background color and appends it to a GIF
//! that loops forever, so static line art appears to wobble like hand-drawn
//! animation.

#![forbid(unsafe_code)]

/// Displacement generation, resampling, compositing and the frame pipeline
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Numerical kernels for smoothing and interpolation
pub mod math;
/// Spatial data structures shared between pipeline stages
pub mod spatial;

pub use algorithm::executor::{EffectParameters, LineBoil, generate_ripple_animation};
pub use io::error::{AlgorithmError, Result};
