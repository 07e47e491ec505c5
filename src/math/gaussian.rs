//! Separable Gaussian smoothing with kernel size derived from sigma
//!
//! The kernel extent follows the float-image convention used by common imaging
//! libraries: `ksize = round(2 * 4 * sigma + 1)`, forced odd. Borders are
//! handled by reflect-101 mirroring, which never repeats the edge sample.

use crate::io::configuration::{KERNEL_SIGMA_EXTENT, MAX_KERNEL_RADIUS};
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, Axis};

/// Normalized one-dimensional Gaussian kernel
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Build a kernel whose radius is derived from `sigma`
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not a finite positive number or its
    /// kernel radius exceeds [`MAX_KERNEL_RADIUS`]
    pub fn new(sigma: f64) -> Result<Self> {
        check_sigma(sigma)?;

        let radius = Self::radius_for(sigma);
        let denom = 2.0 * sigma * sigma;
        // Tiny sigma underflows the exponent denominator
        if radius == 0 || !denom.is_normal() {
            return Ok(Self {
                weights: vec![1.0],
            });
        }

        let radius = radius as i64;
        let raw: Vec<f64> = (-radius..=radius)
            .map(|i| {
                let x = i as f64;
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();

        Ok(Self {
            weights: raw.iter().map(|w| (w / sum) as f32).collect(),
        })
    }

    /// Kernel radius in samples for a given sigma
    pub fn radius_for(sigma: f64) -> usize {
        let size = KERNEL_SIGMA_EXTENT.mul_add(2.0 * sigma, 1.0).round() as usize | 1;
        size / 2
    }

    /// Kernel radius in samples
    pub const fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Kernel weights, centre sample in the middle
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Check that `sigma` yields a usable kernel
///
/// # Errors
///
/// Returns an error if `sigma` is not a finite positive number or its kernel
/// radius exceeds [`MAX_KERNEL_RADIUS`]
pub fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(invalid_parameter(
            "sigma",
            &sigma,
            &"must be a finite number greater than zero",
        ));
    }
    if GaussianKernel::radius_for(sigma) > MAX_KERNEL_RADIUS {
        return Err(invalid_parameter(
            "sigma",
            &sigma,
            &format!("kernel radius would exceed {MAX_KERNEL_RADIUS} samples"),
        ));
    }
    Ok(())
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge
///
/// `-1` maps to `1` and `len` maps to `len - 2`. Repeats until the index lands
/// inside the range, so radii larger than the grid are handled.
pub const fn reflect_101(index: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

/// Smooth a grid with an isotropic Gaussian, rows first then columns
pub fn gaussian_blur(grid: &Array2<f32>, kernel: &GaussianKernel) -> Array2<f32> {
    let horizontal = convolve_axis(grid, kernel, Axis(1));
    convolve_axis(&horizontal, kernel, Axis(0))
}

fn convolve_axis(grid: &Array2<f32>, kernel: &GaussianKernel, axis: Axis) -> Array2<f32> {
    let len = grid.len_of(axis);
    let radius = kernel.radius() as isize;
    let mut output = Array2::zeros(grid.raw_dim());

    for (source, mut target) in grid.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        for (position, value) in target.iter_mut().enumerate() {
            *value = kernel
                .weights()
                .iter()
                .enumerate()
                .map(|(tap, &weight)| {
                    let index = reflect_101(position as isize + tap as isize - radius, len);
                    source.get(index).map_or(0.0, |&sample| weight * sample)
                })
                .sum();
        }
    }

    output
}
