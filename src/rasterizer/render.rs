//! Core rendering functions
//! Buffer ownership, NDC transform, triangle fills and line drawing

use std::mem;
use std::ops::Range;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, trace, warn};

use super::math::{edge_function, Vector2};
use super::types::{Colour, Edge, RasterSettings, ScanMode, Span};

/// Software rasterizer that owns its frame buffer.
///
/// The buffer is either absent (width = height = 0) or holds `width * height`
/// colours in row-major order. Drawing into an absent buffer is a caller bug
/// and panics.
pub struct Rasterizer {
    frame: Option<Vec<Colour>>,
    width: usize,
    height: usize,
    pub settings: RasterSettings,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::with_settings(RasterSettings::default())
    }

    pub fn with_settings(settings: RasterSettings) -> Self {
        Self {
            frame: None,
            width: 0,
            height: 0,
            settings,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_allocated(&self) -> bool {
        self.frame.is_some()
    }

    /// Replace any existing buffer with a fresh `width * height` one, filled opaque black
    pub fn allocate_frame_buffer(&mut self, width: usize, height: usize) {
        self.release();

        debug!("allocating {}x{} frame buffer", width, height);
        self.width = width;
        self.height = height;
        self.frame = Some(vec![Colour::BLACK; width * height]);
    }

    pub fn deallocate_frame_buffer(&mut self) {
        self.release();
    }

    /// Adopt caller-built storage as the frame buffer.
    ///
    /// The vector is moved in, so the caller's handle is gone. Its length is not
    /// checked against `width * height`; writes that fall past its end are dropped.
    pub fn set_frame_buffer(&mut self, pixels: Vec<Colour>, width: usize, height: usize) {
        self.release();

        debug!("adopting {}x{} frame buffer ({} cells)", width, height, pixels.len());
        self.frame = Some(pixels);
        self.width = width;
        self.height = height;
    }

    /// Hand the buffer back to the caller, leaving the rasterizer unallocated
    pub fn take_frame_buffer(&mut self) -> Option<Vec<Colour>> {
        let frame = self.frame.take();
        self.width = 0;
        self.height = 0;
        frame
    }

    fn release(&mut self) {
        if self.frame.take().is_some() {
            debug!("releasing {}x{} frame buffer", self.width, self.height);
        }
        self.width = 0;
        self.height = 0;
    }

    fn frame_mut(&mut self) -> &mut [Colour] {
        match self.frame.as_deref_mut() {
            Some(frame) => frame,
            None => panic!("frame buffer is not allocated"),
        }
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Colour] {
        match self.frame.as_deref() {
            Some(frame) => frame,
            None => panic!("frame buffer is not allocated"),
        }
    }

    /// Get pixel at x,y coordinates
    pub fn pixel(&self, x: usize, y: usize) -> Option<Colour> {
        if x < self.width && y < self.height {
            self.pixels().get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Fill with transparent black
    pub fn clear(&mut self) {
        self.clear_with(Colour::TRANSPARENT);
    }

    pub fn clear_with(&mut self, colour: Colour) {
        trace!("clearing buffer");
        self.frame_mut().fill(colour);
    }

    pub fn ndc_to_pixel(&self, ndc: Vector2) -> Vector2 {
        Vector2 {
            x: (ndc.x + 1.0) * self.width as f32 * 0.5,
            y: (1.0 - ndc.y) * self.height as f32 * 0.5,
        }
    }

    pub fn pixel_to_ndc(&self, pixel: Vector2) -> Vector2 {
        Vector2 {
            x: pixel.x / (self.width as f32 / 2.0) - 1.0,
            y: 1.0 - pixel.y / (self.height as f32 / 2.0),
        }
    }

    /// Write one pixel at the truncated coordinates.
    /// Negative, NaN and out-of-range coordinates are silently dropped.
    pub fn set_pixel(&mut self, x: f32, y: f32, colour: Colour) {
        let (width, height) = (self.width, self.height);
        let frame = self.frame_mut();
        let in_range = x >= 0.0 && y >= 0.0 && x < width as f32 && y < height as f32;
        if !in_range {
            return;
        }
        let idx = (y as usize) * width + x as usize;
        if let Some(slot) = frame.get_mut(idx) {
            *slot = colour;
        }
    }

    /// Draw `[x0, x1)` on row `y`, blending from `col0` towards `col1` by x fraction
    pub fn draw_span(&mut self, span: &Span, y: i32) {
        let x_delta = span.width();
        if x_delta == 0 {
            debug!("span on row {} has zero width, skipping", y);
            return;
        }

        let colour_delta = span.col1 - span.col0;
        let step = 1.0 / x_delta as f32;
        let mut factor = 0.0_f32;

        for x in span.x0..span.x1 {
            self.set_pixel(x as f32, y as f32, span.col0 + colour_delta * factor);
            factor += step;
        }
    }

    /// Fill the rows covered by `short` with spans running to the `long` edge.
    ///
    /// Each span takes the start colour of its two edges; colour does not vary
    /// down the edges, so shading is flat along y.
    pub fn draw_spans_between_edges(&mut self, long: &Edge, short: &Edge) {
        let long_height = long.height() as f32;
        let short_height = short.height() as f32;
        if long_height == 0.0 || short_height == 0.0 {
            warn!("edge has zero height, skipping");
            return;
        }

        let long_width = (long.x1 - long.x0) as f32;
        let short_width = (short.x1 - short.x0) as f32;

        let mut factor0 = (short.y0 - long.y0) as f32 / long_height;
        let mut factor1 = 0.0_f32;
        let step0 = 1.0 / long_height;
        let step1 = 1.0 / short_height;

        for y in short.y0..short.y1 {
            let span = Span::new(
                long.col0,
                long.x0 + (long_width * factor0) as i32,
                short.col0,
                short.x0 + (short_width * factor1) as i32,
            );
            self.draw_span(&span, y);

            factor0 += step0;
            factor1 += step1;
        }
    }

    /// Edge/span scanline fill of an NDC triangle
    pub fn draw_triangle(
        &mut self,
        colour0: Colour,
        v0: Vector2,
        colour1: Colour,
        v1: Vector2,
        colour2: Colour,
        v2: Vector2,
    ) {
        assert!(self.is_allocated(), "frame buffer is not allocated");
        trace!("drawing triangle (spans)");

        let (x0, y0) = self.ndc_to_pixel(v0).to_i32();
        let (x1, y1) = self.ndc_to_pixel(v1).to_i32();
        let (x2, y2) = self.ndc_to_pixel(v2).to_i32();

        let edges = [
            Edge::new(colour0, x0, y0, colour1, x1, y1),
            Edge::new(colour1, x1, y1, colour2, x2, y2),
            Edge::new(colour2, x2, y2, colour0, x0, y0),
        ];

        let mut max_height = 0;
        let mut long = 0;
        for (i, edge) in edges.iter().enumerate() {
            if edge.height() > max_height {
                max_height = edge.height();
                long = i;
            }
        }

        let short0 = (long + 1) % 3;
        let short1 = (long + 2) % 3;

        self.draw_spans_between_edges(&edges[long], &edges[short0]);
        self.draw_spans_between_edges(&edges[long], &edges[short1]);
    }

    /// Half-space (edge function) fill of an NDC triangle.
    ///
    /// Every covered pixel gets `colour1`, the second input colour. Pixel centres
    /// lying exactly on an edge count as covered, for either winding.
    pub fn triangle(
        &mut self,
        _colour0: Colour,
        v0: Vector2,
        colour1: Colour,
        v1: Vector2,
        _colour2: Colour,
        v2: Vector2,
    ) {
        assert!(self.is_allocated(), "frame buffer is not allocated");

        let mut v0 = self.ndc_to_pixel(v0);
        let mut v1 = self.ndc_to_pixel(v1);
        let mut v2 = self.ndc_to_pixel(v2);

        // Order by |x + y|, nearest the origin first
        let key = |v: Vector2| (v.x + v.y).abs();
        if key(v0) > key(v1) {
            mem::swap(&mut v0, &mut v1);
        }
        if key(v1) > key(v2) {
            mem::swap(&mut v1, &mut v2);
        }
        if key(v0) > key(v1) {
            mem::swap(&mut v0, &mut v1);
        }

        let area = edge_function(v0, v1, v2);
        if area == 0.0 {
            warn!("triangle has zero area, skipping");
            return;
        }

        let (rows, columns) = self.scan_range(v0, v1, v2);
        trace!(
            "drawing triangle (half-space) over rows {:?}, columns {:?} of {}x{}",
            rows, columns, self.width, self.height
        );

        let progress = self.scan_progress(rows.len() as u64);
        for y in rows {
            for x in columns.clone() {
                let p = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge_function(v1, v2, p);
                let w1 = edge_function(v2, v0, p);
                let w2 = edge_function(v0, v1, p);
                let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                    || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if inside {
                    self.set_pixel(x as f32, y as f32, colour1);
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();
    }

    /// Rows and columns the half-space fill visits
    fn scan_range(&self, v0: Vector2, v1: Vector2, v2: Vector2) -> (Range<usize>, Range<usize>) {
        match self.settings.scan {
            ScanMode::FullFrame => (0..self.height, 0..self.width),
            ScanMode::BoundingBox => {
                let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as usize;
                let max_x = v0.x.max(v1.x).max(v2.x).ceil().clamp(0.0, self.width as f32) as usize;
                let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as usize;
                let max_y = v0.y.max(v1.y).max(v2.y).ceil().clamp(0.0, self.height as f32) as usize;
                (min_y..max_y, min_x..max_x)
            }
        }
    }

    fn scan_progress(&self, rows: u64) -> ProgressBar {
        if !self.settings.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(rows);
        if let Ok(style) = ProgressStyle::with_template("triangle [{bar:40}] {pos}/{len} rows") {
            bar.set_style(style);
        }
        bar
    }

    /// DDA line: step one pixel along the dominant axis, blending `colour0`
    /// towards `colour1` by the distance travelled from the first point
    pub fn draw_line(&mut self, colour0: Colour, p0: Vector2, colour1: Colour, p1: Vector2) {
        assert!(self.is_allocated(), "frame buffer is not allocated");
        trace!("drawing line");

        let a = self.ndc_to_pixel(p0);
        let b = self.ndc_to_pixel(p1);
        let x_delta = b.x - a.x;
        let y_delta = b.y - a.y;

        // Both ends on the same point
        if x_delta == 0.0 && y_delta == 0.0 {
            self.set_pixel(a.x, a.y, colour0);
            return;
        }

        let colour_delta = colour1 - colour0;

        if x_delta.abs() > y_delta.abs() {
            let slope = y_delta / x_delta;
            let (x_min, x_max) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
            let mut x = x_min;
            while x <= x_max {
                let y = a.y + (x - a.x) * slope;
                let t = (x - a.x) / x_delta;
                self.set_pixel(x, y, colour0 + colour_delta * t);
                x += 1.0;
            }
        } else {
            let slope = x_delta / y_delta;
            let (y_min, y_max) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
            let mut y = y_min;
            while y <= y_max {
                let x = a.x + (y - a.y) * slope;
                let t = (y - a.y) / y_delta;
                self.set_pixel(x, y, colour0 + colour_delta * t);
                y += 1.0;
            }
        }
    }

    /// Bresenham line in `colour0` only. The far end is not drawn.
    pub fn bresenham_line(&mut self, colour0: Colour, p0: Vector2, _colour1: Colour, p1: Vector2) {
        assert!(self.is_allocated(), "frame buffer is not allocated");
        trace!("drawing line (bresenham)");

        let mut a = self.ndc_to_pixel(p0);
        let mut b = self.ndc_to_pixel(p1);

        let steep = (b.y - a.y).abs() > (b.x - a.x).abs();
        if steep {
            mem::swap(&mut a.x, &mut a.y);
            mem::swap(&mut b.x, &mut b.y);
        }
        if a.x > b.x {
            mem::swap(&mut a, &mut b);
        }

        let dx = b.x - a.x;
        let dy = (b.y - a.y).abs();
        let mut error = dx / 2.0;
        let y_step = if a.y < b.y { 1 } else { -1 };

        let (start_x, mut y) = a.to_i32();
        let end_x = b.x as i32;

        for x in start_x..end_x {
            if steep {
                self.set_pixel(y as f32, x as f32, colour0);
            } else {
                self.set_pixel(x as f32, y as f32, colour0);
            }

            error -= dy;
            if error < 0.0 {
                y += y_step;
                error += dx;
            }
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}
