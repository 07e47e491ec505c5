//! Tests for sigma-derived Gaussian kernels and separable smoothing

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use lineboil::algorithm::displacement::DisplacementGenerator;
    use lineboil::algorithm::random::NoiseSource;
    use lineboil::io::configuration::MAX_KERNEL_RADIUS;
    use lineboil::math::gaussian::{GaussianKernel, check_sigma, gaussian_blur, reflect_101};
    use lineboil::{AlgorithmError, EffectParameters, LineBoil};
    use ndarray::Array2;

    // Tests kernel radius follows the 4-sigma float convention
    // Verified by switching to the 3-sigma byte convention
    #[test]
    fn test_radius_derived_from_sigma() {
        assert_eq!(GaussianKernel::radius_for(1.0), 4);
        assert_eq!(GaussianKernel::radius_for(1.5), 6);
        assert_eq!(GaussianKernel::radius_for(5.0), 20);
        assert_eq!(GaussianKernel::radius_for(15.0), 60);
        assert_eq!(GaussianKernel::radius_for(0.3), 1);
    }

    // Tests weights are normalized, symmetric and peaked at the centre
    // Verified by skipping normalization
    #[test]
    fn test_kernel_shape() {
        let kernel = GaussianKernel::new(2.0).unwrap_or_else(|e| unreachable!("{e}"));
        let weights = kernel.weights();

        assert_eq!(weights.len(), 2 * kernel.radius() + 1);
        let sum: f32 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "weights sum to {sum}");

        for (left, right) in weights.iter().zip(weights.iter().rev()) {
            assert!((left - right).abs() < f32::EPSILON);
        }

        let centre = weights.get(kernel.radius()).copied().unwrap_or_default();
        assert!(weights.iter().all(|&w| w <= centre));
    }

    // Tests non-positive and non-finite sigma are rejected
    // Verified by removing the sigma check
    #[test]
    fn test_invalid_sigma() {
        assert!(GaussianKernel::new(0.0).is_err());
        assert!(GaussianKernel::new(-1.0).is_err());
        assert!(GaussianKernel::new(f64::NAN).is_err());
        assert!(GaussianKernel::new(f64::INFINITY).is_err());
    }

    // Tests mirroring skips the edge sample and wraps repeatedly
    // Verified by using reflect-without-skip (edge duplicated)
    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(7, 3), 1);
        assert_eq!(reflect_101(-9, 3), 1);
        assert_eq!(reflect_101(4, 1), 0);
        assert_eq!(reflect_101(-4, 1), 0);
    }

    // Tests constant grids pass through unchanged, including near borders
    // Verified by zero-padding borders instead of mirroring
    #[test]
    fn test_blur_preserves_constant() {
        let grid = Array2::from_elem((7, 11), 0.75_f32);
        let kernel = GaussianKernel::new(5.0).unwrap_or_else(|e| unreachable!("{e}"));

        let blurred = gaussian_blur(&grid, &kernel);

        assert_eq!(blurred.dim(), (7, 11));
        assert!(blurred.iter().all(|v| (v - 0.75).abs() < 1e-5));
    }

    // Tests smoothing makes neighbouring noise samples agree
    // Verified by returning the input unchanged
    #[test]
    fn test_blur_smooths_noise() {
        let noise = NoiseSource::deterministic(3).uniform_grid(64, 64);
        let kernel = GaussianKernel::new(3.0).unwrap_or_else(|e| unreachable!("{e}"));

        let blurred = gaussian_blur(&noise, &kernel);

        let roughness = |grid: &Array2<f32>| -> f32 {
            let (rows, cols) = grid.dim();
            let mut total = 0.0;
            for r in 0..rows {
                for c in 1..cols {
                    total += (grid[[r, c]] - grid[[r, c - 1]]).abs();
                }
            }
            total / (rows * (cols - 1)) as f32
        };

        assert!(roughness(&noise) > 0.5);
        assert!(roughness(&blurred) < 0.05);
        assert!(blurred.iter().all(|v| v.abs() <= 1.0));
    }

    // Tests a single impulse spreads into the kernel profile
    // Verified by transposing the vertical pass
    #[test]
    fn test_blur_impulse_response() {
        let mut grid = Array2::<f32>::zeros((21, 21));
        grid[[10, 10]] = 1.0;
        let kernel = GaussianKernel::new(1.0).unwrap_or_else(|e| unreachable!("{e}"));
        let weights = kernel.weights();
        let r = kernel.radius();

        let blurred = gaussian_blur(&grid, &kernel);

        for offset in 0..=r {
            let expected = weights[r] * weights[r + offset];
            assert!((blurred[[10, 10 + offset]] - expected).abs() < 1e-6);
            assert!((blurred[[10 + offset, 10]] - expected).abs() < 1e-6);
        }
        let total: f32 = blurred.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    // Tests a vanishingly small sigma gives an identity kernel
    // Verified by computing taps with an underflowed denominator
    #[test]
    fn test_tiny_sigma_identity_kernel() {
        for sigma in [1e-200, f64::MIN_POSITIVE, 1e-3] {
            let kernel = GaussianKernel::new(sigma).unwrap_or_else(|e| unreachable!("{e}"));
            assert_eq!(kernel.weights(), &[1.0]);
            assert_eq!(kernel.radius(), 0);
        }

        let noise = NoiseSource::deterministic(4).uniform_grid(5, 6);
        let kernel = GaussianKernel::new(1e-200).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(gaussian_blur(&noise, &kernel), noise);
    }

    // Tests a tiny sigma with zero amplitude still reproduces the source
    // Verified by letting NaN weights reach the resampler
    #[test]
    fn test_tiny_sigma_zero_amplitude_warp() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let parameters = EffectParameters {
            amplitude_percent: 0.0,
            sigma: 1e-200,
            seed: 42,
            ..EffectParameters::default()
        };
        let mut boil =
            LineBoil::new(source.clone(), parameters).unwrap_or_else(|e| unreachable!("{e}"));

        let warped = boil
            .render_warped_frame()
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(warped, source);
    }

    // Tests sigma beyond the kernel radius limit is refused instead of allocated
    // Verified by removing the radius limit
    #[test]
    fn test_huge_sigma_rejected() {
        for sigma in [1e12, f64::MAX] {
            assert!(matches!(
                GaussianKernel::new(sigma),
                Err(AlgorithmError::InvalidParameter {
                    parameter: "sigma",
                    ..
                })
            ));
            assert!(check_sigma(sigma).is_err());
            assert!(DisplacementGenerator::new(4, 4, sigma, 1.0).is_err());
        }

        let largest = (MAX_KERNEL_RADIUS as f64 - 0.5) / 4.0;
        assert!(GaussianKernel::radius_for(largest) <= MAX_KERNEL_RADIUS);
        assert!(check_sigma(largest).is_ok());
    }
}
