//! Diagnostic image files.
//!
//! The vision pipeline exports each stage so the drive team can check the
//! color threshold after a match. Everything is written as an uncompressed
//! 24-bit BMP through the `image` crate, which any viewer opens and which
//! reads back with `tinybmp`.

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::vision::{
    VisionError,
    image::{BinaryMask, ColorImage},
};

/// Destination for exported images.
pub trait ArtifactSink {
    fn write_color(&mut self, name: &str, image: &ColorImage) -> Result<(), VisionError>;
    fn write_mask(&mut self, name: &str, mask: &BinaryMask) -> Result<(), VisionError>;
}

/// Writes artifacts as BMP files into a directory.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    fn save(&self, name: &str, image: &RgbImage) -> Result<(), VisionError> {
        let path = self.root.join(name);
        fs::create_dir_all(&self.root)
            .map_err(|e| VisionError::Processing(format!("cannot create {}: {}", self.root.display(), e)))?;
        image
            .save_with_format(&path, ImageFormat::Bmp)
            .map_err(|e| VisionError::Processing(format!("cannot write {}: {}", path.display(), e)))?;
        debug!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
        Ok(())
    }
}

impl ArtifactSink for ArtifactDir {
    fn write_color(&mut self, name: &str, image: &ColorImage) -> Result<(), VisionError> {
        self.save(name, &color_raster(image))
    }

    fn write_mask(&mut self, name: &str, mask: &BinaryMask) -> Result<(), VisionError> {
        self.save(name, &mask_raster(mask))
    }
}

/// Discards every artifact.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoArtifacts;

impl ArtifactSink for NoArtifacts {
    fn write_color(&mut self, _name: &str, _image: &ColorImage) -> Result<(), VisionError> { Ok(()) }

    fn write_mask(&mut self, _name: &str, _mask: &BinaryMask) -> Result<(), VisionError> { Ok(()) }
}

fn rgb(color: Rgb888) -> Rgb<u8> { Rgb([color.r(), color.g(), color.b()]) }

pub fn color_raster(image: &ColorImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        rgb(image.pixel(x, y).unwrap_or(Rgb888::BLACK))
    })
}

/// Masks are drawn white-on-black.
pub fn mask_raster(mask: &BinaryMask) -> RgbImage {
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        rgb(if mask.get(x, y) { Rgb888::WHITE } else { Rgb888::BLACK })
    })
}

/// Encodes a raster as an in-memory BMP file.
pub fn encode_bmp(raster: &RgbImage) -> Result<Vec<u8>, VisionError> {
    let mut out = Cursor::new(Vec::new());
    raster
        .write_to(&mut out, ImageFormat::Bmp)
        .map_err(|e| VisionError::Processing(format!("cannot encode bitmap: {}", e)))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{Pixel, prelude::*};
    use tinybmp::Bmp;

    use super::*;
    use crate::vision::image::BufferLedger;

    #[test]
    fn color_bmp_decodes_with_row_padding() {
        let ledger = BufferLedger::new();
        // Width 3 needs one padding byte per row.
        let pixels = vec![
            Rgb888::new(1, 2, 3),
            Rgb888::new(4, 5, 6),
            Rgb888::new(7, 8, 9),
            Rgb888::new(10, 11, 12),
            Rgb888::new(13, 14, 15),
            Rgb888::new(16, 17, 18),
        ];
        let image = ColorImage::from_pixels(&ledger, 3, 2, pixels).unwrap();
        let data = encode_bmp(&color_raster(&image)).unwrap();

        let bmp = Bmp::<Rgb888>::from_slice(&data).unwrap();
        assert_eq!(bmp.size(), Size::new(3, 2));
        let mut seen = 0;
        for Pixel(point, color) in bmp.pixels() {
            assert_eq!(Some(color), image.pixel(point.x as u32, point.y as u32));
            seen += 1;
        }
        assert_eq!(seen, 6);
    }

    #[test]
    fn mask_bmp_is_white_on_black() {
        let ledger = BufferLedger::new();
        let mask = BinaryMask::from_bits(&ledger, 2, 1, vec![true, false]).unwrap();
        let data = encode_bmp(&mask_raster(&mask)).unwrap();
        let bmp = Bmp::<Rgb888>::from_slice(&data).unwrap();
        let colors: Vec<Rgb888> = bmp.pixels().map(|Pixel(_, color)| color).collect();
        assert_eq!(colors, vec![Rgb888::WHITE, Rgb888::BLACK]);
    }

    #[test]
    fn artifact_dir_writes_named_files() {
        let root = std::env::temp_dir().join(format!("briareus-artifacts-{}", std::process::id()));
        let ledger = BufferLedger::new();
        let mask = BinaryMask::from_bits(&ledger, 2, 2, vec![true, false, false, true]).unwrap();

        let mut dir = ArtifactDir::new(&root);
        dir.write_mask("filteredImage.bmp", &mask).unwrap();

        let data = fs::read(root.join("filteredImage.bmp")).unwrap();
        let bmp = Bmp::<Rgb888>::from_slice(&data).unwrap();
        assert_eq!(bmp.size(), Size::new(2, 2));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unwritable_root_is_a_processing_error() {
        let file = std::env::temp_dir().join(format!("briareus-not-a-dir-{}", std::process::id()));
        fs::write(&file, b"").unwrap();
        let ledger = BufferLedger::new();
        let mask = BinaryMask::from_bits(&ledger, 1, 1, vec![true]).unwrap();

        let result = ArtifactDir::new(&file).write_mask("convexHull.bmp", &mask);
        assert!(matches!(result, Err(VisionError::Processing(_))));

        fs::remove_file(&file).unwrap();
    }
}
