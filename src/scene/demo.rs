//! Built-in demo scenes
//!
//! Red/green/blue vertex triangles filled with the half-space method on an
//! 800x800 frame, each written to its own PPM.

use crate::rasterizer::{Colour, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::{FillMethod, Scene, Shape, Vertex};

fn rgb_triangle(v0: (f32, f32), v1: (f32, f32), v2: (f32, f32)) -> Shape {
    Shape::triangle(
        FillMethod::HalfSpace,
        Vertex::new(Colour::RED, v0.0, v0.1),
        Vertex::new(Colour::GREEN, v1.0, v1.1),
        Vertex::new(Colour::BLUE, v2.0, v2.1),
    )
}

pub fn equilateral_triangle() -> Scene {
    Scene::new("equilateral_triangle.ppm", DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .with_shape(rgb_triangle((-1.0, -1.0), (0.0, 1.0), (1.0, -1.0)))
}

/// Two triangles sharing the v1-v2 diagonal
pub fn quad() -> Scene {
    let v0 = (-0.5, -0.5);
    let v1 = (-0.5, 0.5);
    let v2 = (0.5, -0.5);
    let v3 = (0.5, 0.5);
    Scene::new("quad.ppm", DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .with_shape(rgb_triangle(v0, v1, v2))
        .with_shape(rgb_triangle(v2, v3, v1))
}

pub fn obtuse_scalene_triangle() -> Scene {
    Scene::new("obtuse_scalene_triangle.ppm", DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .with_shape(rgb_triangle((1.0, -1.0), (0.0, -0.6), (-0.8, 1.0)))
}

pub fn right_angle_triangle() -> Scene {
    Scene::new("right_angle_triangle.ppm", DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .with_shape(rgb_triangle((-0.5, -1.0), (-0.5, 1.0), (1.0, -1.0)))
}

/// All demo scenes, in render order
pub fn demo_scenes() -> Vec<Scene> {
    vec![
        equilateral_triangle(),
        quad(),
        obtuse_scalene_triangle(),
        right_angle_triangle(),
    ]
}
