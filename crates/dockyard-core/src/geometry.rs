#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Docking works in device-independent units, so everything here is `f64`.
//! Values are stored exactly as given: negative sizes and NaN are legal and
//! callers decide what they mean.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (visible, pinned and tab bounds).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A position (pointer and pointer-screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height pair where NaN means "size automatically".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Both dimensions unset.
    pub const AUTO: Self = Self {
        width: f64::NAN,
        height: f64::NAN,
    };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::AUTO
    }
}
