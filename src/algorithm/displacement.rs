//! Smooth random displacement fields that make line art wobble

use crate::algorithm::random::NoiseSource;
use crate::io::error::{Result, invalid_parameter};
use crate::math::gaussian::{GaussianKernel, gaussian_blur};
use crate::spatial::DisplacementField;

/// Produces one displacement field per frame for a fixed image size
///
/// Each field is uniform noise in [-1, 1] smoothed by a Gaussian, then scaled
/// by the amplitude. Smoothing turns per-pixel static into a coherent wobble;
/// the amplitude bounds how far any pixel can move.
#[derive(Debug, Clone)]
pub struct DisplacementGenerator {
    width: u32,
    height: u32,
    kernel: GaussianKernel,
    amplitude: f32,
}

impl DisplacementGenerator {
    /// Create a generator for `width` x `height` fields
    ///
    /// `amplitude` is in pixels, already scaled from the percentage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - `sigma` is not a finite positive number, or too large for a kernel
    /// - `amplitude` is negative or not finite
    pub fn new(width: u32, height: u32, sigma: f64, amplitude: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &"field must have at least one pixel",
            ));
        }
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(invalid_parameter(
                "amplitude",
                &amplitude,
                &"must be a finite non-negative number of pixels",
            ));
        }

        Ok(Self {
            width,
            height,
            kernel: GaussianKernel::new(sigma)?,
            amplitude: amplitude as f32,
        })
    }

    /// Field size as (width, height)
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Displacement amplitude in pixels
    pub const fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Smoothing kernel applied to the raw noise
    pub const fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Draw the next field from `noise`
    ///
    /// The horizontal grid is drawn in full before the vertical one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the two smoothed grids disagree in shape
    pub fn generate(&self, noise: &mut NoiseSource) -> Result<DisplacementField> {
        let shape = (self.height as usize, self.width as usize);
        let noise_x = noise.uniform_grid(shape.0, shape.1);
        let noise_y = noise.uniform_grid(shape.0, shape.1);

        let dx = gaussian_blur(&noise_x, &self.kernel) * self.amplitude;
        let dy = gaussian_blur(&noise_y, &self.kernel) * self.amplitude;

        DisplacementField::new(dx, dy)
    }
}
