//! Double-acting pneumatic valves.
//!
//! A double solenoid drives one piston through two valve coils: energizing
//! the forward coil extends the piston, energizing the reverse coil retracts
//! it, and leaving both off vents the piston so it floats. Only one coil may
//! be energized at any time.
//!
//! # Example
//!
//! ```ignore
//! use briareus::peripherals::solenoid::{DoubleSolenoid, SolenoidValue};
//!
//! let mut clamp = DoubleSolenoid::new(valve);
//! clamp.set(SolenoidValue::Forward);
//! assert_eq!(clamp.get(), SolenoidValue::Forward);
//! ```

use log::trace;

/// The commanded position of a double solenoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SolenoidValue {
    /// Both coils de-energized.
    #[default]
    Off,
    /// Forward coil energized.
    Forward,
    /// Reverse coil energized.
    Reverse,
}

impl SolenoidValue {
    /// Returns the opposite end position. `Off` inverts to `Forward`.
    pub fn toggled(self) -> Self {
        match self {
            SolenoidValue::Forward => SolenoidValue::Reverse,
            SolenoidValue::Reverse | SolenoidValue::Off => SolenoidValue::Forward,
        }
    }

    /// Coil levels `(forward, reverse)` for this value.
    fn coils(self) -> (bool, bool) {
        match self {
            SolenoidValue::Off => (false, false),
            SolenoidValue::Forward => (true, false),
            SolenoidValue::Reverse => (false, true),
        }
    }
}

/// One of the two coils of a double-acting valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveChannel {
    Forward,
    Reverse,
}

/// The physical outputs behind a [`DoubleSolenoid`].
///
/// Writes are fire-and-forget. Implementations that can fail should log the
/// failure instead of returning it.
pub trait ValveChannels {
    /// Energizes or de-energizes one coil.
    fn energize(&mut self, channel: ValveChannel, on: bool);
}

/// A bistable actuator wrapping one double-acting valve.
///
/// [`get`](DoubleSolenoid::get) reports the last commanded value. There is no
/// feedback sensor, so it reflects intent rather than the piston's measured
/// position.
pub struct DoubleSolenoid {
    channels: Box<dyn ValveChannels>,
    value:    SolenoidValue,
}

impl DoubleSolenoid {
    /// Wraps a valve. Nothing is written until the first [`set`](Self::set).
    pub fn new<C: ValveChannels + 'static>(channels: C) -> Self {
        Self {
            channels: Box::new(channels),
            value:    SolenoidValue::Off,
        }
    }

    /// Commands the valve to `value`.
    ///
    /// The coil being released is always written before the coil being
    /// energized, so both coils are never on together, even mid-call.
    pub fn set(&mut self, value: SolenoidValue) {
        let (forward, reverse) = value.coils();
        if forward {
            self.channels.energize(ValveChannel::Reverse, false);
            self.channels.energize(ValveChannel::Forward, true);
        } else {
            self.channels.energize(ValveChannel::Forward, false);
            self.channels.energize(ValveChannel::Reverse, reverse);
        }
        trace!("Solenoid {:?} -> {:?}", self.value, value);
        self.value = value;
    }

    /// The last commanded value.
    pub fn get(&self) -> SolenoidValue { self.value }
}

impl core::fmt::Debug for DoubleSolenoid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DoubleSolenoid").field("value", &self.value).finish()
    }
}
