//! Operator control utilities for the driver-controlled period.
//!
//! Each input channel is read through one of two policies:
//!
//! - **Edge-triggered**: [`toggle::ToggleDebouncer`] fires once per press.
//!   Used for the piston toggles and the image capture button.
//! - **Level-triggered**: [`input::HeldAxis`] follows an axis while a button
//!   is held. Used for the conveyor.
//!
//! # Example
//!
//! ```ignore
//! use briareus::opcontrol::{input::HeldAxis, toggle::ToggleDebouncer};
//!
//! let conveyor = HeldAxis::new(-1.0);
//! let mut clamp = ToggleDebouncer::new();
//!
//! let speed = conveyor.apply(input.button(2), input.z);
//! if clamp.sample(input.button(1)) {
//!     // flip the clamp
//! }
//! ```

/// Level-triggered axis pass-through.
pub mod input;

/// Edge-triggered toggle buttons and the piston toggle action.
pub mod toggle;
