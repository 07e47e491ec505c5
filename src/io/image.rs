//! Source image loading and normalization to RGBA

use crate::algorithm::executor::{EffectParameters, generate_ripple_animation};
use crate::io::error::{AlgorithmError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Convert any decoded image to 8-bit RGBA
///
/// Images without an alpha channel become fully opaque.
pub fn normalize(image: &DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(rgba) => rgba.clone(),
        other => other.to_rgba8(),
    }
}

/// Load an image file and normalize it to RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or if the image
/// has no pixels
pub fn load_source_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path_buf = path.as_ref().to_path_buf();
    let decoded = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
        path: path_buf.clone(),
        source: e,
    })?;

    let rgba = normalize(&decoded);
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(AlgorithmError::InvalidSourceData {
            reason: format!("'{}' contains no pixels", path_buf.display()),
        });
    }
    Ok(rgba)
}

/// Apply the effect to an optional image, as supplied by an interactive caller
///
/// A missing image is not an error: `Ok(None)` is returned and no file is
/// written, leaving it to the caller to tell the user.
///
/// # Errors
///
/// Returns an error if the effect itself fails
pub fn process_image(
    image: Option<&DynamicImage>,
    parameters: &EffectParameters,
) -> Result<Option<PathBuf>> {
    let Some(image) = image else {
        return Ok(None);
    };
    generate_ripple_animation(&normalize(image), parameters).map(Some)
}
