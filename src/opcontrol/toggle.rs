//! Edge-triggered toggle buttons.
//!
//! A [`ToggleDebouncer`] turns a button that is sampled once per control
//! tick into one event per physical press. Holding the button for one tick
//! or a thousand produces the same single event; the next event needs a
//! release first.
//!
//! [`toggle_group`] is the action the robot attaches to its toggle buttons:
//! it flips one or more pistons between their end positions as a unit.
//!
//! # Example
//!
//! ```ignore
//! use briareus::opcontrol::toggle::{ToggleDebouncer, toggle_group};
//!
//! let mut clamp_button = ToggleDebouncer::new();
//!
//! // Every tick:
//! if clamp_button.sample(input.button(1)) {
//!     toggle_group([&mut pneumatics.clamp]);
//! }
//! ```

use heapless::Vec;
use log::warn;

use crate::peripherals::solenoid::{DoubleSolenoid, SolenoidValue};

/// The most pistons one toggle button may drive.
pub const MAX_GROUP: usize = 8;

/// Press detector for one button.
///
/// Two states: released (initial) and pressed. Only the released → pressed
/// transition reports an event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToggleDebouncer {
    /// Whether the button was held on the previous tick.
    held: bool,
}

impl ToggleDebouncer {
    pub const fn new() -> Self { Self { held: false } }

    /// Records this tick's button level. Returns `true` exactly on the tick
    /// the button goes from released to held.
    pub fn sample(&mut self, held: bool) -> bool {
        let pressed = held && !self.held;
        self.held = held;
        pressed
    }
}

/// Flips a group of pistons together and returns the value they were set to.
///
/// The group counts as "on" only when every piston already reads
/// [`SolenoidValue::Forward`]; then all of them go to
/// [`SolenoidValue::Reverse`]. Any other mix, including `Off` or pistons that
/// disagree, counts as "off" and all of them go forward. Pistons in one group
/// are always commanded together.
///
/// At most [`MAX_GROUP`] pistons are driven; any beyond that are left alone.
pub fn toggle_group<'a, I>(pistons: I) -> SolenoidValue
where
    I: IntoIterator<Item = &'a mut DoubleSolenoid>,
{
    let mut group: Vec<&'a mut DoubleSolenoid, MAX_GROUP> = Vec::new();
    for piston in pistons {
        if group.push(piston).is_err() {
            warn!("Toggle group is limited to {} pistons, ignoring the rest", MAX_GROUP);
            break;
        }
    }
    let all_forward =
        !group.is_empty() && group.iter().all(|piston| piston.get() == SolenoidValue::Forward);
    let next = if all_forward { SolenoidValue::Reverse } else { SolenoidValue::Forward };
    for piston in group {
        piston.set(next);
    }
    next
}
