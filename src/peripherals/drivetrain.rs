//! Differential drivetrain control.
//!
//! This module provides the `Differential` struct for driving a robot with
//! separate left and right motor groups. Motor direction is a property of the
//! motors themselves: configure the right side reversed in hardware so that a
//! positive output drives both sides forward.
//!
//! # Drive Modes
//!
//! - **Tank**: raw left/right outputs.
//! - **Arcade**: one axis for forward/backward, another for turning.
//! - **Curve**: a magnitude and a curvature, used during autonomous.
//!
//! # Example
//!
//! ```ignore
//! use briareus::peripherals::drivetrain::Differential;
//!
//! let mut drivetrain = Differential::new([front_left, rear_left], [front_right, rear_right]);
//!
//! // In the control loop:
//! drivetrain.arcade(input.y, input.x, true);
//! ```

use crate::peripherals::SpeedController;

/// How sharply [`Differential::drive`] turns for a given curve value.
pub const CURVE_SENSITIVITY: f64 = 0.5;

/// A differential drivetrain.
pub struct Differential {
    /// The left motor group.
    left:  Vec<Box<dyn SpeedController>>,
    /// The right motor group.
    right: Vec<Box<dyn SpeedController>>,
}

impl Differential {
    /// Creates a drivetrain from its left and right motor groups.
    pub fn new<L, R, M>(left: L, right: R) -> Self
    where
        L: IntoIterator<Item = M>,
        R: IntoIterator<Item = M>,
        M: SpeedController + 'static,
    {
        Self {
            left:  left.into_iter().map(|m| Box::new(m) as Box<dyn SpeedController>).collect(),
            right: right.into_iter().map(|m| Box::new(m) as Box<dyn SpeedController>).collect(),
        }
    }

    /// Applies raw left and right outputs, clamped to [-1, 1].
    pub fn tank(&mut self, left: f64, right: f64) {
        let left = left.clamp(-1.0, 1.0);
        let right = right.clamp(-1.0, 1.0);
        for motor in self.left.iter_mut() {
            motor.set_speed(left);
        }
        for motor in self.right.iter_mut() {
            motor.set_speed(right);
        }
    }

    /// Drive the robot using arcade controls.
    ///
    /// Behavior:
    /// - `move_value` and `rotate_value` are clamped to [-1, 1].
    /// - With `squared` set, each input is squared with its sign preserved,
    ///   which gives finer control near the center of the stick.
    /// - Positive `move_value` drives forward and positive `rotate_value`
    ///   turns right (clockwise seen from above).
    /// - The two values are mixed quadrant by quadrant so that no output
    ///   exceeds the larger of the two inputs.
    pub fn arcade(&mut self, move_value: f64, rotate_value: f64, squared: bool) {
        let (left, right) = arcade_mix(move_value, rotate_value, squared);
        self.tank(left, right);
    }

    /// Drives at `magnitude` along a curve.
    ///
    /// A `curve` of zero drives straight. Negative values turn left and
    /// positive values turn right; the inner side is slowed by a ratio
    /// derived from the logarithm of the curve.
    pub fn drive(&mut self, magnitude: f64, curve: f64) {
        let (left, right) = curve_mix(magnitude, curve);
        self.tank(left, right);
    }

    /// Sets every drive motor to zero.
    pub fn stop(&mut self) { self.tank(0.0, 0.0); }
}

impl core::fmt::Debug for Differential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Differential")
            .field("left", &self.left.len())
            .field("right", &self.right.len())
            .finish()
    }
}

fn square_keep_sign(value: f64) -> f64 { value * value.abs() }

/// Computes `(left, right)` outputs for arcade drive.
pub fn arcade_mix(move_value: f64, rotate_value: f64, squared: bool) -> (f64, f64) {
    let mut fwd = move_value.clamp(-1.0, 1.0);
    let mut turn = rotate_value.clamp(-1.0, 1.0);
    if squared {
        fwd = square_keep_sign(fwd);
        turn = square_keep_sign(turn);
    }

    if fwd > 0.0 {
        if turn > 0.0 {
            (fwd.max(turn), fwd - turn)
        } else {
            (fwd + turn, fwd.max(-turn))
        }
    } else if turn > 0.0 {
        (fwd + turn, -(-fwd).max(turn))
    } else {
        (-(-fwd).max(-turn), fwd - turn)
    }
}

/// Computes `(left, right)` outputs for curve drive.
pub fn curve_mix(magnitude: f64, curve: f64) -> (f64, f64) {
    let ratio = |c: f64| {
        let value = c.ln();
        let ratio = (value - CURVE_SENSITIVITY) / (value + CURVE_SENSITIVITY);
        if ratio == 0.0 { 1.0e-10 } else { ratio }
    };

    if curve < 0.0 {
        (magnitude / ratio(-curve), magnitude)
    } else if curve > 0.0 {
        (magnitude, magnitude / ratio(curve))
    } else {
        (magnitude, magnitude)
    }
}
