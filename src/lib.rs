//! Softras: software triangle rasterizer
//!
//! Rasterizes NDC triangles and lines into an owned RGBA float buffer and
//! exports it as binary PPM (or PNG):
//! - Edge/span scanline fill and half-space fill
//! - DDA and Bresenham lines
//! - RON scene files and built-in demo scenes

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod scene;

pub use rasterizer::{Colour, Rasterizer, RasterSettings, ScanMode, Vector2};
pub use scene::{render_scene, Scene, SceneError};
