//! Alpha-over flattening of warped frames onto an opaque background

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Flatten a transparent frame onto a solid `background`
///
/// Every frame is flattened, whether or not the source had transparency, so
/// the encoder always receives opaque RGB frames of one format.
pub fn flatten_onto(frame: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    let mut flat = RgbImage::new(frame.width(), frame.height());
    for (target, source) in flat.pixels_mut().zip(frame.pixels()) {
        *target = blend_pixel(*source, background);
    }
    flat
}

/// Alpha-over a single pixel onto an opaque background color
///
/// Alpha 0 yields the background exactly, alpha 255 yields the source exactly.
pub fn blend_pixel(source: Rgba<u8>, background: Rgb<u8>) -> Rgb<u8> {
    let Rgba([r, g, b, a]) = source;
    let alpha = u16::from(a);
    let blend = |src: u8, bg: u8| -> u8 {
        let mixed = (u16::from(src) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255;
        mixed.min(255) as u8
    };
    let Rgb([br, bg, bb]) = background;
    Rgb([blend(r, br), blend(g, bg), blend(b, bb)])
}
