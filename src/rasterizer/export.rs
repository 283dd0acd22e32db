//! Image export
//!
//! Binary PPM (`P6`) is the native output: an ASCII header followed by one
//! R, G, B byte triple per pixel, row-major. Alpha is dropped. PNG keeps alpha.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{error, info};

use super::render::Rasterizer;

/// Error type for image export
#[derive(Debug)]
pub enum ExportError {
    /// Width or height is zero
    EmptyImage,
    /// The buffer does not hold `width * height` pixels (adopted storage)
    BufferSize { expected: usize, actual: usize },
    IoError(std::io::Error),
    ImageError(image::ImageError),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::IoError(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::ImageError(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::EmptyImage => write!(f, "can't save an empty image"),
            ExportError::BufferSize { expected, actual } => {
                write!(f, "frame buffer holds {} pixels, expected {}", actual, expected)
            }
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::ImageError(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl Rasterizer {
    /// Check the buffer can be exported and return its pixel count
    fn export_size(&self) -> Result<usize, ExportError> {
        let pixels = self.pixels();
        if self.width() == 0 || self.height() == 0 {
            return Err(ExportError::EmptyImage);
        }
        let expected = self.width() * self.height();
        if pixels.len() != expected {
            return Err(ExportError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(expected)
    }

    /// Encode the buffer as binary PPM into `out`
    pub fn encode_ppm<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        let count = self.export_size()?;

        write!(out, "P6\n{} {}\n255\n", self.width(), self.height())?;

        let mut body = Vec::with_capacity(count * 3);
        for colour in self.pixels() {
            let [r, g, b, _] = colour.to_bytes();
            body.extend_from_slice(&[r, g, b]);
        }
        out.write_all(&body)?;
        Ok(())
    }

    /// Write the buffer to `path` as binary PPM.
    ///
    /// The path is used as given; no extension is appended. Failures are logged
    /// and returned, and nothing is written for an empty buffer.
    pub fn write_ppm<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let result = self.export_size().and_then(|_| {
            let mut out = BufWriter::new(File::create(path)?);
            self.encode_ppm(&mut out)?;
            out.flush()?;
            Ok(())
        });

        match &result {
            Ok(()) => info!("wrote {}x{} image to {}", self.width(), self.height(), path.display()),
            Err(e) => error!("failed to write {}: {}", path.display(), e),
        }
        result
    }

    /// Write the buffer to `path` as PNG, alpha included
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let result = self.export_size().and_then(|count| {
            let mut bytes = Vec::with_capacity(count * 4);
            for colour in self.pixels() {
                bytes.extend_from_slice(&colour.to_bytes());
            }
            let img = image::RgbaImage::from_raw(self.width() as u32, self.height() as u32, bytes)
                .ok_or(ExportError::BufferSize {
                    expected: count,
                    actual: self.pixels().len(),
                })?;
            img.save_with_format(path, image::ImageFormat::Png)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!("wrote {}x{} image to {}", self.width(), self.height(), path.display()),
            Err(e) => error!("failed to write {}: {}", path.display(), e),
        }
        result
    }
}
