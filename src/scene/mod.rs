//! Scene module - shapes described in NDC, rendered to an image file
//!
//! - RON scene files (size, clear colour, shapes, output)
//! - Built-in demo scenes
//! - Scene runner driving the rasterizer

mod description;
mod file;
mod demo;

pub use description::*;
pub use file::*;
pub use demo::*;
