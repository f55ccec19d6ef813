//! Style value types: colors, fills, shadows and font attributes.
//!
//! Colors arrive from the host as CSS-like strings (a color picker, a preset
//! swatch). [`Color`] parses the subset the studio accepts: `#rgb`,
//! `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::fmt;
use std::str::FromStr;

/// Failure to parse a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color value")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid color function: {0}")]
    InvalidFunction(String),
    #[error("unsupported color syntax: {0}")]
    Unsupported(String),
}

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` form, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..=1 opacity.
    #[must_use]
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}{:02x}", self.to_hex(), self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(|()| ColorParseError::InvalidHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
            return parse_rgb_function(args).map_err(|()| ColorParseError::InvalidFunction(s.to_string()));
        }
        match lower.as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "transparent" => Ok(Self::rgba(0, 0, 0, 0)),
            _ => Err(ColorParseError::Unsupported(s.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Result<Color, ()> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(());
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17).map_err(drop);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(drop);
    match hex.len() {
        3 => Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => Err(()),
    }
}

fn parse_rgb_function(args: &str) -> Result<Color, ()> {
    let inner = args.strip_suffix(')').ok_or(())?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let channel = |p: &str| p.parse::<u8>().map_err(drop);
    match parts.as_slice() {
        [r, g, b] => Ok(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().map_err(drop)?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(());
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let a = (alpha * 255.0).round() as u8;
            Ok(Color::rgba(channel(r)?, channel(g)?, channel(b)?, a))
        }
        _ => Err(()),
    }
}

/// One color stop of a gradient. `offset` is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient spanning the filled object's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Direction in degrees, CSS convention: 0° points up, 90° points right.
    pub angle_deg: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Two-stop gradient from `start` at 0% to `end` at 100%.
    #[must_use]
    pub fn two_stop(angle_deg: f64, start: Color, end: Color) -> Self {
        Self {
            angle_deg,
            stops: vec![GradientStop { offset: 0.0, color: start }, GradientStop { offset: 1.0, color: end }],
        }
    }

    /// Gradient vector endpoints `(x1, y1, x2, y2)` in bounding-box units.
    #[must_use]
    pub fn vector(&self) -> (f64, f64, f64, f64) {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        (0.5 - 0.5 * sin, 0.5 + 0.5 * cos, 0.5 + 0.5 * sin, 0.5 - 0.5 * cos)
    }
}

/// Paint for a background.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Linear(LinearGradient),
}

/// Drop shadow cast by text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// How a text object's position relates to its rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Position is the top-left corner of the text block.
    #[default]
    TopLeft,
    /// Position is the center of the text block.
    Center,
}
