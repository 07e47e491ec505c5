//! Hex color parsing for the compositing background

use crate::io::error::{Result, invalid_parameter};
use image::Rgb;

/// Parse a hex RGB color such as `#FFFFFF`, `ffffff`, `#fff` or `FFF`
///
/// Short forms expand each digit, so `#f80` is `#ff8800`.
///
/// # Errors
///
/// Returns an error if the string is not 3 or 6 hex digits after an optional `#`
pub fn parse_hex_color(text: &str) -> Result<Rgb<u8>> {
    let digits = text.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_parameter(
            "background",
            &text,
            &"color must contain only hex digits",
        ));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        let part = digits.get(range).unwrap_or_default();
        let value = u8::from_str_radix(part, 16)
            .map_err(|e| invalid_parameter("background", &text, &e))?;
        // Short form: a single digit d stands for dd
        Ok(if part.len() == 1 { value * 17 } else { value })
    };

    match digits.len() {
        3 => Ok(Rgb([channel(0..1)?, channel(1..2)?, channel(2..3)?])),
        6 => Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?])),
        _ => Err(invalid_parameter(
            "background",
            &text,
            &"expected 3 or 6 hex digits",
        )),
    }
}

/// Format a color as uppercase `#RRGGBB`
pub fn format_hex_color(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}
