//! Core types for the rasterizer

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// RGBA color (float channels, nominally 0.0-1.0)
///
/// Channels are never clamped by arithmetic except subtraction, which floors
/// each channel at zero. Addition may exceed 1.0; export clamps with `min(1.0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Colour {
    pub const BLACK: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    /// Black with zero alpha, what a plain `clear()` fills with
    pub const TRANSPARENT: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const WHITE: Colour = Colour { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Colour = Colour { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Colour = Colour { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Colour = Colour { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as ARGB (`a << 24 | r << 16 | g << 8 | b`), each channel `* 255` truncated
    pub fn to_u32(self) -> u32 {
        let r = (self.r * 255.0) as u32;
        let g = (self.g * 255.0) as u32;
        let b = (self.b * 255.0) as u32;
        let a = (self.a * 255.0) as u32;
        (a << 24) | (r << 16) | (g << 8) | b
    }

    /// Convert to [u8; 4] for image export (`min(1.0, channel) * 255`, truncated)
    pub fn to_bytes(self) -> [u8; 4] {
        [
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            channel_byte(self.a),
        ]
    }
}

fn channel_byte(value: f32) -> u8 {
    // `as` saturates, so negative channels land on 0
    (value.min(1.0) * 255.0) as u8
}

impl Add for Colour {
    type Output = Colour;
    fn add(self, other: Colour) -> Colour {
        Colour {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            a: self.a + other.a,
        }
    }
}

impl Sub for Colour {
    type Output = Colour;
    fn sub(self, other: Colour) -> Colour {
        Colour {
            r: (self.r - other.r).max(0.0),
            g: (self.g - other.g).max(0.0),
            b: (self.b - other.b).max(0.0),
            a: (self.a - other.a).max(0.0),
        }
    }
}

impl Mul for Colour {
    type Output = Colour;
    fn mul(self, other: Colour) -> Colour {
        Colour {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }
}

impl Mul<f32> for Colour {
    type Output = Colour;
    fn mul(self, s: f32) -> Colour {
        Colour {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
            a: self.a * s,
        }
    }
}

/// One triangle side in pixel space, ordered so that `y0 <= y1`
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub col0: Colour,
    pub x0: i32,
    pub y0: i32,
    pub col1: Colour,
    pub x1: i32,
    pub y1: i32,
}

impl Edge {
    pub fn new(col0: Colour, x0: i32, y0: i32, col1: Colour, x1: i32, y1: i32) -> Self {
        if y0 < y1 {
            Self { col0, x0, y0, col1, x1, y1 }
        } else {
            Self {
                col0: col1,
                x0: x1,
                y0: y1,
                col1: col0,
                x1: x0,
                y1: y0,
            }
        }
    }

    /// Vertical extent (never negative)
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// One horizontal pixel run, ordered so that `x0 <= x1`
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub col0: Colour,
    pub x0: i32,
    pub col1: Colour,
    pub x1: i32,
}

impl Span {
    pub fn new(col0: Colour, x0: i32, col1: Colour, x1: i32) -> Self {
        if x0 < x1 {
            Self { col0, x0, col1, x1 }
        } else {
            Self {
                col0: col1,
                x0: x1,
                col1: col0,
                x1: x0,
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }
}

/// Which pixels the half-space fill visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every pixel of the buffer, regardless of triangle size
    FullFrame,
    /// Only the triangle's integer bounding box, clipped to the buffer
    BoundingBox,
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Pixel range scanned by the half-space fill
    pub scan: ScanMode,
    /// Show a progress bar on stderr while scanning
    pub show_progress: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            scan: ScanMode::BoundingBox,
            show_progress: false,
        }
    }
}
