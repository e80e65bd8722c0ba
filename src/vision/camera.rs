//! Camera links that deliver color frames.

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use embedded_graphics::{
    Pixel,
    pixelcolor::Rgb888,
    prelude::{OriginDimensions, Point},
};
use log::debug;
use tinybmp::Bmp;

use crate::vision::{
    VisionError,
    image::{BufferLedger, ColorImage},
};

/// The transport that brings frames from the camera.
pub trait CameraLink {
    /// Whether a frame newer than the last one fetched is waiting.
    fn fresh_image(&mut self) -> bool;

    /// Fetches the newest frame into a buffer registered with `ledger`.
    ///
    /// Transport failures are [`VisionError::CameraLink`]. A frame that
    /// arrived but cannot be decoded is [`VisionError::Processing`].
    fn get_image(&mut self, ledger: &BufferLedger) -> Result<ColorImage, VisionError>;
}

/// A robot without a camera. Never has a frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl CameraLink for NoCamera {
    fn fresh_image(&mut self) -> bool { false }

    fn get_image(&mut self, _ledger: &BufferLedger) -> Result<ColorImage, VisionError> {
        Err(VisionError::CameraLink("no camera attached".into()))
    }
}

/// Serves a BMP file from disk as the camera frame.
///
/// A frame counts as fresh whenever the file's modification time differs
/// from the one last served, which makes it easy to bench-test the pipeline
/// by dropping new captures into place.
#[derive(Debug, Clone)]
pub struct BmpCamera {
    path:        PathBuf,
    last_served: Option<SystemTime>,
}

impl BmpCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:        path.into(),
            last_served: None,
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn modified(&self) -> Option<SystemTime> { fs::metadata(&self.path).and_then(|m| m.modified()).ok() }
}

impl CameraLink for BmpCamera {
    fn fresh_image(&mut self) -> bool {
        match self.modified() {
            Some(modified) => self.last_served != Some(modified),
            None => false,
        }
    }

    fn get_image(&mut self, ledger: &BufferLedger) -> Result<ColorImage, VisionError> {
        let data = fs::read(&self.path).map_err(|e| {
            VisionError::CameraLink(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let image = decode_bmp(ledger, &data)?;
        self.last_served = self.modified();
        debug!("Served {}x{} frame from {}", image.width(), image.height(), self.path.display());
        Ok(image)
    }
}

/// Decodes a BMP file into a color image.
pub fn decode_bmp(ledger: &BufferLedger, data: &[u8]) -> Result<ColorImage, VisionError> {
    let bmp = Bmp::<Rgb888>::from_slice(data)
        .map_err(|e| VisionError::Processing(format!("malformed frame: {:?}", e)))?;
    let size = bmp.size();
    let mut pixels = vec![Rgb888::new(0, 0, 0); size.width as usize * size.height as usize];
    for Pixel(Point { x, y }, color) in bmp.pixels() {
        if x >= 0 && y >= 0 && (x as u32) < size.width && (y as u32) < size.height {
            pixels[y as usize * size.width as usize + x as usize] = color;
        }
    }
    ColorImage::from_pixels(ledger, size.width, size.height, pixels)
}
