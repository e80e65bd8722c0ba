//! Drive-and-feed loop run at the start of autonomous.

use std::time::Duration;

use log::info;

use crate::peripherals::{Delay, SpeedController, drivetrain::Differential};

/// Drives forward with the conveyor running for a fixed number of periods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedLoop {
    pub iterations:     u32,
    pub drive_speed:    f64,
    pub drive_curve:    f64,
    pub conveyor_speed: f64,
    pub period:         Duration,
}

impl Default for FeedLoop {
    fn default() -> Self {
        Self {
            iterations:     6,
            drive_speed:    0.75,
            drive_curve:    0.0,
            conveyor_speed: 0.7,
            period:         Duration::from_millis(500),
        }
    }
}

impl FeedLoop {
    /// Total time the loop holds the caller.
    pub fn duration(&self) -> Duration { self.period * self.iterations }

    /// Runs the loop, then stops the conveyor and the drive.
    pub fn run<C, D>(&self, drivetrain: &mut Differential, conveyor: &mut C, delay: &mut D)
    where
        C: SpeedController + ?Sized,
        D: Delay + ?Sized,
    {
        info!("Feed loop: {} x {:?}", self.iterations, self.period);
        for _ in 0..self.iterations {
            drivetrain.drive(self.drive_speed, self.drive_curve);
            conveyor.set_speed(self.conveyor_speed);
            delay.delay(self.period);
        }
        conveyor.set_speed(0.0);
        drivetrain.stop();
        info!("Feed loop complete");
    }
}
