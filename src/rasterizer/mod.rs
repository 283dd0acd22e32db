//! 2D software triangle rasterizer
//!
//! Features:
//! - NDC input ([-1, 1], +y up) mapped onto a top-left origin pixel buffer
//! - Edge/span scanline fill and half-space (edge function) fill
//! - DDA lines with colour blending, single-colour Bresenham lines
//! - Binary PPM and PNG export

mod math;
mod types;
mod render;
mod export;

pub use math::*;
pub use types::*;
pub use render::*;
pub use export::*;

/// Default frame dimensions
pub const DEFAULT_WIDTH: usize = 800;
pub const DEFAULT_HEIGHT: usize = 800;
