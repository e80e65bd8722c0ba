//! Device abstractions for the robot.
//!
//! The control logic talks to hardware only through the small traits in this
//! module and its children. A backend (see [`crate::hardware`]) implements
//! them for real devices; tests implement them with recorders.

use std::time::Duration;

/// Operator input snapshots and the V5 button layout.
pub mod controller;

/// Air compressor relay and pressure-switch interlock.
pub mod compressor;

/// Differential drivetrain with tank, arcade and curve drive modes.
pub mod drivetrain;

/// The named pistons of the scoring arm.
pub mod pneumatics;

/// Double-acting valves (double solenoids).
pub mod solenoid;

/// A motor controller that accepts a normalized speed.
pub trait SpeedController {
    /// Sets the output, in [-1, 1].
    fn set_speed(&mut self, speed: f64);
}

impl<T: SpeedController + ?Sized> SpeedController for Box<T> {
    fn set_speed(&mut self, speed: f64) { (**self).set_speed(speed) }
}

/// Blocks the calling context for a while.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

impl<T: Delay + ?Sized> Delay for Box<T> {
    fn delay(&mut self, duration: Duration) { (**self).delay(duration) }
}

/// A [`Delay`] that sleeps the current OS thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) { std::thread::sleep(duration) }
}
