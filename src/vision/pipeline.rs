//! Target-finding pipeline.
//!
//! One call to [`VisionPipeline::process`] takes a captured frame through
//! four stages:
//!
//! 1. export the raw capture,
//! 2. equalize the color planes (exported),
//! 3. threshold against the target HSV box,
//! 4. fill the convex hull of the thresholded pixels,
//!
//! and finally exports the hull and threshold masks. The frame and every
//! derived buffer are owned by the call and released when it returns, on
//! success and on every error path alike; only the [`TargetReport`] leaves.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use log::{debug, info};

use crate::{
    fs::artifact::ArtifactSink,
    vision::{
        VisionError,
        hsv::HsvThreshold,
        image::{BinaryMask, ColorImage},
        ops::{SoftwareVision, VisionOps},
    },
};

/// File names for the exported stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub original:  String,
    pub equalized: String,
    pub threshold: String,
    pub hull:      String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            original:  "originalCapture.bmp".into(),
            equalized: "equalized.bmp".into(),
            threshold: "filteredImage.bmp".into(),
            hull:      "convexHull.bmp".into(),
        }
    }
}

/// What the pipeline found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetReport {
    /// Pixels inside the HSV box.
    pub threshold_pixels: usize,
    /// Pixels inside the convex hull.
    pub hull_pixels:      usize,
    /// Bounding box of the hull, if anything matched.
    pub bounds:           Option<Rectangle>,
}

impl TargetReport {
    fn from_masks(threshold: &BinaryMask, hull: &BinaryMask) -> Self {
        Self {
            threshold_pixels: threshold.count(),
            hull_pixels:      hull.count(),
            bounds:           bounding_box(hull),
        }
    }

    /// Whether any target pixel was found.
    pub fn found(&self) -> bool { self.threshold_pixels > 0 }
}

fn bounding_box(mask: &BinaryMask) -> Option<Rectangle> {
    let mut points = mask.points();
    let (x, y) = points.next()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (x, x, y, y);
    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    Some(Rectangle::new(
        Point::new(min_x as i32, min_y as i32),
        Size::new(max_x - min_x + 1, max_y - min_y + 1),
    ))
}

/// The target-finding pipeline.
#[derive(Debug)]
pub struct VisionPipeline<V: VisionOps = SoftwareVision> {
    ops:       V,
    threshold: HsvThreshold,
    names:     ArtifactNames,
}

impl VisionPipeline<SoftwareVision> {
    pub fn new(threshold: HsvThreshold, names: ArtifactNames) -> Self {
        Self::with_ops(SoftwareVision, threshold, names)
    }
}

impl<V: VisionOps> VisionPipeline<V> {
    pub fn with_ops(ops: V, threshold: HsvThreshold, names: ArtifactNames) -> Self {
        Self {
            ops,
            threshold,
            names,
        }
    }

    pub fn threshold(&self) -> &HsvThreshold { &self.threshold }

    /// Runs every stage on `frame`, consuming it.
    ///
    /// Any error aborts the remaining stages. Buffers allocated up to that
    /// point are released before the error is returned.
    pub fn process(
        &mut self,
        frame: ColorImage,
        sink: &mut dyn ArtifactSink,
    ) -> Result<TargetReport, VisionError> {
        debug!("Processing {}x{} frame", frame.width(), frame.height());
        sink.write_color(&self.names.original, &frame)?;

        let equalized = self.ops.equalize(&frame)?;
        sink.write_color(&self.names.equalized, &equalized)?;

        let threshold = self.ops.threshold_hsv(&equalized, &self.threshold)?;
        let hull = self.ops.convex_hull(&threshold)?;

        sink.write_mask(&self.names.hull, &hull)?;
        sink.write_mask(&self.names.threshold, &threshold)?;

        let report = TargetReport::from_masks(&threshold, &hull);
        info!(
            "Target: {} pixels, hull {} pixels, bounds {:?}",
            report.threshold_pixels, report.hull_pixels, report.bounds
        );
        Ok(report)
    }
}
