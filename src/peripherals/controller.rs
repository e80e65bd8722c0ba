//! Per-tick operator input.
//!
//! The control loop never polls the joystick itself. The harness samples it
//! once per tick into a [`ControllerSnapshot`] and hands that over, so every
//! stage of a tick sees the same input.
//!
//! Buttons are addressed by their raw number (1-based), the way the robot's
//! button map is written. Hardware backends translate their own button layout
//! into numbers; on the V5 controller the [`ControllerButton`] order is used.
//!
//! # Example
//!
//! ```ignore
//! use briareus::peripherals::controller::ControllerSnapshot;
//!
//! let input = ControllerSnapshot::new(0.0, -0.5, 0.2).with_button(3, true);
//! assert!(input.button(3));
//! ```

/// One sample of the operator's joystick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerSnapshot {
    /// Turning axis, in [-1, 1].
    pub x:   f64,
    /// Forward/backward axis, in [-1, 1].
    pub y:   f64,
    /// Auxiliary axis (throttle), in [-1, 1].
    pub z:   f64,
    buttons: u32,
}

impl ControllerSnapshot {
    /// The highest raw button number a snapshot can hold.
    pub const MAX_BUTTONS: u8 = 32;

    pub fn new(x: f64, y: f64, z: f64) -> Self { Self { x, y, z, buttons: 0 } }

    /// Returns a copy with button `number` set to `pressed`.
    pub fn with_button(mut self, number: u8, pressed: bool) -> Self {
        self.set_button(number, pressed);
        self
    }

    /// Sets button `number`. Numbers outside `1..=MAX_BUTTONS` are ignored.
    pub fn set_button(&mut self, number: u8, pressed: bool) {
        if let Some(mask) = button_mask(number) {
            if pressed {
                self.buttons |= mask;
            } else {
                self.buttons &= !mask;
            }
        }
    }

    /// Whether button `number` is held. Unknown numbers read as released.
    pub fn button(&self, number: u8) -> bool {
        button_mask(number).is_some_and(|mask| self.buttons & mask != 0)
    }
}

fn button_mask(number: u8) -> Option<u32> {
    if (1..=ControllerSnapshot::MAX_BUTTONS).contains(&number) {
        Some(1 << (number - 1))
    } else {
        None
    }
}

/// The buttons of a V5 controller, in raw-number order.
///
/// # Example
///
/// ```ignore
/// assert_eq!(ControllerButton::ButtonA.number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

impl ControllerButton {
    pub const ALL: [ControllerButton; 12] = [
        ControllerButton::ButtonA,
        ControllerButton::ButtonB,
        ControllerButton::ButtonX,
        ControllerButton::ButtonY,
        ControllerButton::ButtonUp,
        ControllerButton::ButtonDown,
        ControllerButton::ButtonLeft,
        ControllerButton::ButtonRight,
        ControllerButton::ButtonL1,
        ControllerButton::ButtonL2,
        ControllerButton::ButtonR1,
        ControllerButton::ButtonR2,
    ];

    /// The raw button number this button reports as.
    pub fn number(self) -> u8 { self as u8 + 1 }
}
