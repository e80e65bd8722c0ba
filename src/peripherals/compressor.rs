//! Air compressor with a pressure-switch interlock.

use log::info;

/// The compressor relay and its pressure switch.
pub trait CompressorHardware {
    /// Turns the compressor motor relay on or off.
    fn set_relay(&mut self, on: bool);
    /// Reads the pressure switch. `true` means the tanks are full.
    fn pressure_switch(&self) -> bool;
}

/// Why the compressor was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator released the air system.
    AllStop,
    /// The pressure switch reported full tanks.
    PressureReached,
}

/// Drives the compressor relay.
///
/// A stopped compressor stays stopped until [`start`](Compressor::start) is
/// called again.
pub struct Compressor {
    hardware: Box<dyn CompressorHardware>,
    enabled:  bool,
}

impl Compressor {
    pub fn new<H: CompressorHardware + 'static>(hardware: H) -> Self {
        Self {
            hardware: Box::new(hardware),
            enabled:  false,
        }
    }

    /// Turns the compressor on.
    pub fn start(&mut self) {
        info!("Compressor started");
        self.enabled = true;
        self.hardware.set_relay(true);
    }

    /// Turns the compressor off, whatever its previous state.
    pub fn stop(&mut self, reason: StopReason) {
        if self.enabled {
            info!("Compressor stopped: {:?}", reason);
        }
        self.enabled = false;
        self.hardware.set_relay(false);
    }

    pub fn is_enabled(&self) -> bool { self.enabled }

    pub fn pressure_switch_value(&self) -> bool { self.hardware.pressure_switch() }

    /// Stops the compressor when the pressure switch reads full.
    ///
    /// Returns `true` when the switch tripped on this call.
    pub fn regulate(&mut self) -> bool {
        if self.pressure_switch_value() {
            self.stop(StopReason::PressureReached);
            true
        } else {
            false
        }
    }
}

impl core::fmt::Debug for Compressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Compressor").field("enabled", &self.enabled).finish()
    }
}
