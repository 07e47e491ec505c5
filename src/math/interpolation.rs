//! Bilinear sampling of RGBA images at fractional coordinates
//!
//! Neighbours that fall outside the image contribute a transparent black
//! sample, so sampling fades to nothing across the border instead of clamping
//! or wrapping.

use image::RgbaImage;
use num_traits::ToPrimitive;

/// Fully transparent zero sample used for out-of-bounds neighbours
pub const TRANSPARENT: [f32; 4] = [0.0; 4];

/// Sample all four channels at `(x, y)` with bilinear weights
///
/// Integer coordinates return the pixel exactly. A location whose four
/// neighbours are all outside the image returns [`TRANSPARENT`].
pub fn bilinear_sample(image: &RgbaImage, x: f32, y: f32) -> [f32; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let corners = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1.0, y0, fx * (1.0 - fy)),
        (x0, y0 + 1.0, (1.0 - fx) * fy),
        (x0 + 1.0, y0 + 1.0, fx * fy),
    ];

    let mut result = TRANSPARENT;
    for (cx, cy, weight) in corners {
        if weight <= 0.0 {
            continue;
        }
        let sample = pixel_or_transparent(image, cx, cy);
        for (acc, channel) in result.iter_mut().zip(sample) {
            *acc += weight * channel;
        }
    }
    result
}

fn pixel_or_transparent(image: &RgbaImage, x: f32, y: f32) -> [f32; 4] {
    let (Some(px), Some(py)) = (x.to_u32(), y.to_u32()) else {
        return TRANSPARENT;
    };
    image
        .get_pixel_checked(px, py)
        .map_or(TRANSPARENT, |pixel| pixel.0.map(f32::from))
}

/// Round an interpolated channel value to the nearest representable byte
pub fn to_channel(value: f32) -> u8 {
    num_traits::clamp(value.round(), 0.0, 255.0)
        .to_u8()
        .unwrap_or(0)
}
