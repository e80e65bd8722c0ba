//! Target vision.
//!
//! Frames come in over a [`camera::CameraLink`], are run through the
//! [`pipeline::VisionPipeline`] and leave as a [`pipeline::TargetReport`]
//! plus a set of exported images.
//!
//! # Example
//!
//! ```ignore
//! use briareus::{
//!     config::TARGET_THRESHOLD,
//!     fs::artifact::ArtifactDir,
//!     vision::{camera::{BmpCamera, CameraLink}, image::BufferLedger, pipeline::*},
//! };
//!
//! let ledger = BufferLedger::new();
//! let mut camera = BmpCamera::new("capture.bmp");
//! let mut pipeline = VisionPipeline::new(TARGET_THRESHOLD, ArtifactNames::default());
//!
//! if camera.fresh_image() {
//!     let frame = camera.get_image(&ledger)?;
//!     let report = pipeline.process(frame, &mut ArtifactDir::new("vision"))?;
//! }
//! ```

use thiserror::Error;

/// Frame sources.
pub mod camera;

/// HSV conversion and thresholds.
pub mod hsv;

/// Image buffers and the allocation ledger.
pub mod image;

/// Equalization, thresholding and convex hull.
pub mod ops;

/// The capture-to-report pipeline.
pub mod pipeline;

/// Failures of the vision subsystem.
#[derive(Debug, Error)]
pub enum VisionError {
    /// An image operation failed.
    #[error("Vision: {0}")]
    Processing(String),

    /// The camera transport failed.
    #[error("Camera: {0}")]
    CameraLink(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_subsystem() {
        assert_eq!(
            VisionError::Processing("empty image".into()).to_string(),
            "Vision: empty image"
        );
        assert_eq!(
            VisionError::CameraLink("timed out".into()).to_string(),
            "Camera: timed out"
        );
    }
}
