//! Geometry value types shared by every drawable.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas (logical pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Per-axis scale factors applied around an object's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
}

impl Scale {
    /// Identity scale.
    pub const ONE: Self = Self { sx: 1.0, sy: 1.0 };

    #[must_use]
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }

    /// The same factor on both axes.
    #[must_use]
    pub fn uniform(s: f64) -> Self {
        Self { sx: s, sy: s }
    }

    /// Scale factors must be finite and non-negative to be drawable.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.sx.is_finite() && self.sy.is_finite() && self.sx >= 0.0 && self.sy >= 0.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Canvas dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for layout math.
    #[must_use]
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float, for layout math.
    #[must_use]
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }
}
