//! # Briareus
//!
//! Briareus is the control program of a pneumatic goal-scoring robot. It
//! drives a differential base, feeds balls on a conveyor, works a three-piston
//! scoring arm and looks for the ball color with a small vision pipeline.
//!
//! - **Control loop**: [`robot::Robot`] runs init, the autonomous routine and
//!   the 50 Hz driver-control tick.
//! - **Pneumatics**: double solenoids, the scoring-arm pistons and the
//!   compressor with its pressure-switch interlock.
//! - **Operator input**: edge-triggered toggles and level-triggered axes.
//! - **Autonomous**: data-driven piston sequences and a drive-and-feed loop.
//! - **Vision**: equalize, HSV threshold and convex hull, with every stage
//!   exported as a BMP file.
//! - **Logging**: a file-based logger for match review.
//!
//! ## Quick Start
//!
//! ```ignore
//! use briareus::{config::RobotConfig, robot::Robot};
//!
//! let mut robot = Robot::new(RobotConfig::default(), hardware);
//! robot.init();
//! loop {
//!     robot.teleop_tick(&read_controller());
//!     sleep(Duration::from_millis(20));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`robot`]: the control loop.
//! - [`config`]: wiring, button map and tuning constants.
//! - [`peripherals`]: device traits and the drive, pneumatic and compressor logic.
//! - [`opcontrol`]: operator input policies.
//! - [`auton`]: autonomous routines.
//! - [`vision`]: target vision.
//! - [`display`]: the status line.
//! - [`fs`]: logging and artifact files.
//! - [`hardware`]: platform backends.

/// Autonomous routines.
///
/// - **Sequences**: timed piston steps run by one sequencer.
/// - **Feed loop**: drive forward with the conveyor running.
pub mod auton;

/// Robot constants: button map, channels, threshold and routines.
pub mod config;

/// Status line output.
///
/// Provides an [`embedded-graphics`](https://crates.io/crates/embedded-graphics)
/// console behind one trait, and an adapter for rectangle-filling screens.
pub mod display;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording robot telemetry and debug
/// information to files on the V5 Brain's SD card, and the vision artifact
/// writer.
pub mod fs;

/// Platform backends.
pub mod hardware;

/// Operator control utilities module.
///
/// Input policies applied per button during driver control.
pub mod opcontrol;

/// Device abstractions and the logic that sits directly on them.
pub mod peripherals;

/// The control loop.
pub mod robot;

/// Target vision.
pub mod vision;

#[cfg(test)]
mod mock;
