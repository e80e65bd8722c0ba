//! Level-triggered input.
//!
//! Some controls follow the button continuously instead of once per press:
//! the conveyor runs at the throttle axis value for exactly as long as its
//! button is held. [`HeldAxis`] is that policy; the edge-triggered policy is
//! [`ToggleDebouncer`](super::toggle::ToggleDebouncer).

/// Passes an axis through while a button is held, and outputs zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldAxis {
    /// Multiplier applied to the axis. A negative scale reverses the output.
    pub scale: f64,
}

impl Default for HeldAxis {
    fn default() -> Self { Self { scale: 1.0 } }
}

impl HeldAxis {
    pub fn new(scale: f64) -> Self { Self { scale } }

    /// The output for this tick, clamped to [-1, 1].
    pub fn apply(&self, held: bool, axis: f64) -> f64 {
        if held { (axis * self.scale).clamp(-1.0, 1.0) } else { 0.0 }
    }
}
