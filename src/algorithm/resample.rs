//! Warping a source image through a displacement field

use crate::io::error::{Result, dimension_mismatch};
use crate::math::interpolation::{bilinear_sample, to_channel};
use crate::spatial::DisplacementField;
use image::{Rgba, RgbaImage};

/// Resample `source` so each destination pixel reads from its displaced location
///
/// Pixel `(x, y)` takes the bilinear sample at `(x + dx, y + dy)`. Samples that
/// leave the source come back transparent, which lets the background show
/// through along the wobbling edges.
///
/// # Errors
///
/// Returns an error if the field and image sizes differ
pub fn warp(source: &RgbaImage, field: &DisplacementField) -> Result<RgbaImage> {
    if field.dimensions() != source.dimensions() {
        return Err(dimension_mismatch(
            "resampler",
            source.dimensions(),
            field.dimensions(),
        ));
    }

    let mut warped = RgbaImage::new(source.width(), source.height());
    for ((&dx, &dy), (x, y, pixel)) in field
        .dx()
        .iter()
        .zip(field.dy().iter())
        .zip(warped.enumerate_pixels_mut())
    {
        let sample = bilinear_sample(source, x as f32 + dx, y as f32 + dy);
        *pixel = Rgba(sample.map(to_channel));
    }

    Ok(warped)
}
