use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let len = if s.is_ascii() { s.len() } else { 0 };
        let (r, g, b, a) = match len {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => {
                log::warn!("invalid hex color {hex:?}, using black");
                (0, 0, 0, 255)
            }
        };
        Color(r, g, b, a)
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
    pub fn alpha(self) -> u8 {
        self.3
    }
}

/// `round(255 * fraction)`, with `fraction` clamped to [0, 1].
pub fn alpha_from_fraction(fraction: f32) -> u8 {
    (255.0 * fraction.clamp(0.0, 1.0)).round() as u8
}

/// Multiplies an 8-bit alpha by a fraction in [0, 1], rounding.
pub fn scale_alpha(alpha: u8, fraction: f32) -> u8 {
    (alpha as f32 * fraction.clamp(0.0, 1.0)).round() as u8
}
