//! Numerical kernels for smoothing and resampling

/// Gaussian smoothing with sigma-derived kernel extent
pub mod gaussian;
/// Bilinear sampling with transparent borders
pub mod interpolation;
