//! Seeded noise source shared by every frame of one animation

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random source for displacement noise
///
/// One instance is created per animation and handed to each frame in turn, so
/// the draw order (and therefore the output) is fixed by the seed.
pub struct NoiseSource {
    rng: StdRng,
    deterministic: bool,
}

impl NoiseSource {
    /// Seed 0 draws from operating system entropy, any other seed is reproducible
    pub fn from_seed(seed: u64) -> Self {
        if seed == 0 {
            Self {
                rng: StdRng::from_os_rng(),
                deterministic: false,
            }
        } else {
            Self::deterministic(seed)
        }
    }

    /// Reproducible source for any seed value, including 0
    pub fn deterministic(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            deterministic: true,
        }
    }

    /// Whether repeated runs with the same seed produce the same noise
    pub const fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Grid of independent uniform samples in [-1, 1), filled row by row
    pub fn uniform_grid(&mut self, rows: usize, cols: usize) -> Array2<f32> {
        Array2::from_shape_simple_fn((rows, cols), || {
            self.rng.random::<f64>().mul_add(2.0, -1.0) as f32
        })
    }
}
