//! Scene description types and the scene runner

use std::path::{Path, PathBuf};

use log::info;
use serde::{Serialize, Deserialize};

use crate::rasterizer::{Colour, Rasterizer, Vector2, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::file::SceneError;

/// A coloured point in NDC space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub colour: Colour,
    pub pos: Vector2,
}

impl Vertex {
    pub fn new(colour: Colour, x: f32, y: f32) -> Self {
        Self {
            colour,
            pos: Vector2::new(x, y),
        }
    }
}

/// Which triangle fill to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMethod {
    /// Edge function test per pixel, flat second-vertex colour
    #[default]
    HalfSpace,
    /// Edge/span scanline fill
    Spans,
}

/// Which line algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineMethod {
    /// Dominant-axis stepping with colour blending
    #[default]
    Dda,
    /// Integer error accumulator, first colour only
    Bresenham,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Triangle {
        #[serde(default)]
        fill: FillMethod,
        vertices: [Vertex; 3],
    },
    Line {
        #[serde(default)]
        method: LineMethod,
        from: Vertex,
        to: Vertex,
    },
}

impl Shape {
    pub fn triangle(fill: FillMethod, v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Shape::Triangle {
            fill,
            vertices: [v0, v1, v2],
        }
    }

    pub fn line(method: LineMethod, from: Vertex, to: Vertex) -> Self {
        Shape::Line { method, from, to }
    }

    pub fn draw(&self, ras: &mut Rasterizer) {
        match self {
            Shape::Triangle { fill, vertices: [a, b, c] } => match fill {
                FillMethod::HalfSpace => {
                    ras.triangle(a.colour, a.pos, b.colour, b.pos, c.colour, c.pos)
                }
                FillMethod::Spans => {
                    ras.draw_triangle(a.colour, a.pos, b.colour, b.pos, c.colour, c.pos)
                }
            },
            Shape::Line { method, from, to } => match method {
                LineMethod::Dda => ras.draw_line(from.colour, from.pos, to.colour, to.pos),
                LineMethod::Bresenham => {
                    ras.bresenham_line(from.colour, from.pos, to.colour, to.pos)
                }
            },
        }
    }
}

/// Output image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Ppm,
    Png,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

/// One image: frame size, background, shapes drawn in order, and where to write it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Output file name, used verbatim (include the extension)
    pub output: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Background; `None` clears to transparent black
    #[serde(default)]
    pub clear: Option<Colour>,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(output: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            output: output.into(),
            width,
            height,
            clear: None,
            format: ImageFormat::default(),
            shapes: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Size the buffer for this scene (reallocating only on a size change),
    /// clear it, then draw every shape
    pub fn draw(&self, ras: &mut Rasterizer) {
        if !ras.is_allocated() || ras.width() != self.width || ras.height() != self.height {
            ras.allocate_frame_buffer(self.width, self.height);
        }

        match self.clear {
            Some(colour) => ras.clear_with(colour),
            None => ras.clear(),
        }

        for shape in &self.shapes {
            shape.draw(ras);
        }
    }
}

/// Draw `scene` and write it into `out_dir`, returning the written path
pub fn render_scene(ras: &mut Rasterizer, scene: &Scene, out_dir: &Path) -> Result<PathBuf, SceneError> {
    info!(
        "rendering {} ({}x{}, {} shapes)",
        scene.output,
        scene.width,
        scene.height,
        scene.shapes.len()
    );
    scene.draw(ras);

    let path = out_dir.join(&scene.output);
    match scene.format {
        ImageFormat::Ppm => ras.write_ppm(&path)?,
        ImageFormat::Png => ras.write_png(&path)?,
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_reuses_buffer_of_same_size() {
        let mut ras = Rasterizer::new();
        ras.set_frame_buffer(vec![Colour::RED; 16], 4, 4);

        let scene = Scene::new("unused.ppm", 4, 4);
        scene.draw(&mut ras);
        assert_eq!(ras.pixels().len(), 16);
        assert!(ras.pixels().iter().all(|&c| c == Colour::TRANSPARENT));

        let resized = Scene::new("unused.ppm", 2, 8);
        resized.draw(&mut ras);
        assert_eq!((ras.width(), ras.height()), (2, 8));
    }

    #[test]
    fn test_shapes_draw_in_order() {
        let mut scene = Scene::new("unused.ppm", 8, 8)
            .with_shape(Shape::triangle(
                FillMethod::HalfSpace,
                Vertex::new(Colour::RED, -1.0, 1.0),
                Vertex::new(Colour::GREEN, 1.0, 1.0),
                Vertex::new(Colour::BLUE, -1.0, -1.0),
            ))
            .with_shape(Shape::line(
                LineMethod::Bresenham,
                Vertex::new(Colour::WHITE, -1.0, 1.0),
                Vertex::new(Colour::WHITE, 1.0, 1.0),
            ));
        scene.clear = Some(Colour::BLACK);

        let mut ras = Rasterizer::new();
        scene.draw(&mut ras);

        // Top row overdrawn by the line, the rest of the triangle keeps its fill
        assert_eq!(ras.pixel(3, 0), Some(Colour::WHITE));
        assert_eq!(ras.pixel(1, 2), Some(Colour::GREEN));
        assert_eq!(ras.pixel(7, 7), Some(Colour::BLACK));
    }

    #[test]
    fn test_render_scene_writes_output() {
        let dir = std::env::temp_dir();
        let name = format!("softras-scene-{}.png", std::process::id());
        let mut scene = Scene::new(name.clone(), 6, 6).with_shape(Shape::line(
            LineMethod::Dda,
            Vertex::new(Colour::RED, -1.0, 0.0),
            Vertex::new(Colour::RED, 1.0, 0.0),
        ));
        scene.format = ImageFormat::Png;

        let mut ras = Rasterizer::new();
        let path = render_scene(&mut ras, &scene, &dir).unwrap();
        assert_eq!(path, dir.join(&name));

        let img = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(img.get_pixel(2, 3).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_render_scene_reports_export_failure() {
        let dir = std::env::temp_dir().join(format!("softras-missing-{}", std::process::id()));
        let scene = Scene::new("image.ppm", 2, 2);
        let mut ras = Rasterizer::new();
        assert!(matches!(
            render_scene(&mut ras, &scene, &dir),
            Err(SceneError::ExportError(_))
        ));
    }
}
