//! Per-pixel displacement offsets consumed by the resampler

use crate::io::error::{Result, dimension_mismatch};
use ndarray::Array2;

/// Horizontal and vertical offsets for every destination pixel
///
/// Both grids are indexed `[row, col]` and always share one shape. A value of
/// `dx[[y, x]]` means destination pixel `(x, y)` reads the source at
/// `x + dx[[y, x]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementField {
    dx: Array2<f32>,
    dy: Array2<f32>,
}

impl DisplacementField {
    /// Pair two offset grids
    ///
    /// # Errors
    ///
    /// Returns an error if the grids differ in shape
    pub fn new(dx: Array2<f32>, dy: Array2<f32>) -> Result<Self> {
        if dx.dim() != dy.dim() {
            return Err(dimension_mismatch(
                "displacement field",
                grid_size(&dx),
                grid_size(&dy),
            ));
        }
        Ok(Self { dx, dy })
    }

    /// A field that leaves every pixel in place
    pub fn zeros(width: u32, height: u32) -> Self {
        let shape = (height as usize, width as usize);
        Self {
            dx: Array2::zeros(shape),
            dy: Array2::zeros(shape),
        }
    }

    /// Field size as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        grid_size(&self.dx)
    }

    /// Horizontal offsets
    pub const fn dx(&self) -> &Array2<f32> {
        &self.dx
    }

    /// Vertical offsets
    pub const fn dy(&self) -> &Array2<f32> {
        &self.dy
    }

    /// Offset `(dx, dy)` for destination pixel `(x, y)`
    pub fn offset_at(&self, x: u32, y: u32) -> Option<(f32, f32)> {
        let index = [y as usize, x as usize];
        Some((*self.dx.get(index)?, *self.dy.get(index)?))
    }

    /// Largest absolute offset along either axis
    pub fn max_magnitude(&self) -> f32 {
        self.dx
            .iter()
            .chain(self.dy.iter())
            .fold(0.0_f32, |max, value| max.max(value.abs()))
    }
}

fn grid_size(grid: &Array2<f32>) -> (u32, u32) {
    let (rows, cols) = grid.dim();
    (cols as u32, rows as u32)
}
