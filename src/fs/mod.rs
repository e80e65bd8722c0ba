//! Filesystem utilities.
//!
//! - [`logger`]: a file-backed implementation of the [`log`] facade.
//! - [`artifact`]: BMP export of vision pipeline stages.
//!
//! # Example
//!
//! ```ignore
//! use briareus::fs::logger;
//! use log::{info, LevelFilter};
//!
//! // Initialize the logger at program start
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//!
//! info!("Robot initialized");
//! ```

/// Diagnostic image files.
pub mod artifact;

/// File-based logging.
///
/// Provides a logger implementation that writes to both the console
/// and a log file.
pub mod logger;
