//! RGB565 color constants and hex string conversion
//!
//! All pixel values in the driver are packed RGB565, the panel's native
//! format. The named constants are the palette the stock UI uses.

use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::pixelcolor::raw::RawU16;

/// Black
pub const BLACK: u16 = 0x0000;
/// White
pub const WHITE: u16 = 0xFFFF;
/// Red
pub const RED: u16 = 0xF800;
/// Green
pub const GREEN: u16 = 0x07E0;
/// Blue
pub const BLUE: u16 = 0x001F;
/// 50% gray
pub const GRAY_50: u16 = 0x7BEF;
/// Dark gray used for UI separators and loading-bar troughs
pub const SEPARATOR: u16 = 0x39E7;
/// Purple (pill widget)
pub const PURPLE: u16 = 0x780F;
/// Cyan (water droplet widget)
pub const CYAN: u16 = 0x07FF;

/// Convert a packed RGB565 value to an `embedded-graphics` color.
pub fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Parse a `#RRGGBB` web color into packed RGB565.
///
/// The leading `#` is optional and exactly the first six hex digits are
/// consumed. The conversion is lossy: each channel is truncated to the 5 or
/// 6 bits RGB565 keeps. Malformed input (too short, non-hex digits) yields
/// [`WHITE`] so a bad remote command still draws something visible.
pub fn hex_to_rgb565(hex: &str) -> u16 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() < 6 || !digits.is_char_boundary(6) {
        return WHITE;
    }

    let Ok(rgb) = u32::from_str_radix(&digits[..6], 16) else {
        return WHITE;
    };

    let r = (rgb >> 16) as u16;
    let g = (rgb >> 8) as u16;
    let b = rgb as u16;
    ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | ((b & 0xFF) >> 3)
}

/// Parse an optional `#RRGGBB` string, with a caller-chosen fallback for
/// absent input. Malformed (but present) input still falls back to [`WHITE`].
pub fn hex_or(hex: Option<&str>, default: u16) -> u16 {
    hex.map_or(default, hex_to_rgb565)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_round_to_full_channels() {
        assert_eq!(hex_to_rgb565("#FF0000"), RED);
        assert_eq!(hex_to_rgb565("#00FF00"), GREEN);
        assert_eq!(hex_to_rgb565("#0000FF"), BLUE);
        assert_eq!(hex_to_rgb565("#FFFFFF"), WHITE);
        assert_eq!(hex_to_rgb565("#000000"), BLACK);
    }

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(hex_to_rgb565("FF0000"), RED);
    }

    #[test]
    fn conversion_is_lossy_masking() {
        // Low channel bits are truncated, not rounded.
        assert_eq!(hex_to_rgb565("#0F0F0F"), 0x0861);
        assert_eq!(hex_to_rgb565("#070307"), 0x0000);
    }

    #[test]
    fn malformed_input_yields_white() {
        assert_eq!(hex_to_rgb565(""), WHITE);
        assert_eq!(hex_to_rgb565("#FFF"), WHITE);
        assert_eq!(hex_to_rgb565("#GGGGGG"), WHITE);
        assert_eq!(hex_to_rgb565("nope"), WHITE);
    }

    #[test]
    fn extra_digits_are_ignored() {
        assert_eq!(hex_to_rgb565("#FF0000CC"), RED);
    }

    #[test]
    fn optional_parsing_uses_fallback_only_when_absent() {
        assert_eq!(hex_or(None, BLACK), BLACK);
        assert_eq!(hex_or(Some("#FF0000"), BLACK), RED);
        assert_eq!(hex_or(Some("bad"), BLACK), WHITE);
    }

    #[test]
    fn rgb565_wrapper_preserves_raw_value() {
        use embedded_graphics_core::pixelcolor::raw::ToBytes;
        assert_eq!(rgb565(RED).to_be_bytes(), [0xF8, 0x00]);
    }
}
