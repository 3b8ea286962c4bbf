// Simple RGB color, created from an unsigned 32 holding 0x00RRGGBB or from a
// "#RRGGBB" hex string. Alpha is never stored: every paint call supplies its own.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Gold, green, red and blue: the four colors a particle can be born with.
pub const PALETTE: [Color; 4] = [
    Color::from_u32(0xFFD700),
    Color::from_u32(0x00FF41),
    Color::from_u32(0xFF4444),
    Color::from_u32(0x4488FF),
];

/// Dark tint painted over the whole surface every frame.
pub const TRAIL_TINT: Color = Color::rgb(10, 10, 20);

pub const WHITE: Color = Color::rgb(255, 255, 255);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional, digits are case
    /// insensitive). Anything else yields white.
    pub fn from_hex(hex: &str) -> Color {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return WHITE;
        }
        match u32::from_str_radix(digits, 16) {
            Ok(num) => Color::from_u32(num),
            Err(_) => WHITE,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string with `alpha` clamped into [0, 1].
    pub fn to_css(self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.max(0.0).min(1.0) };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<String> for Color {
    fn from(hex: String) -> Color {
        Color::from_hex(&hex)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_hex()
    }
}
