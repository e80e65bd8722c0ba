//! Hardware backends.
//!
//! The rest of the crate only sees the device traits in
//! [`peripherals`](crate::peripherals), [`vision`](crate::vision) and
//! [`display`](crate::display). A backend implements them for one platform
//! and assembles a [`Robot`](crate::robot::Robot).
//!
//! Backends wire devices by the channel numbers in
//! [`RobotConfig`](crate::config::RobotConfig). A [`PortBank`] hands each
//! numbered port out at most once, so a bad channel map is reported before
//! any device is driven.

use thiserror::Error;

/// VEX V5 Brain backend built on vexide.
#[cfg(target_os = "vexos")]
pub mod vex;

/// A channel map that cannot be wired.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WiringError {
    #[error("{bus} port {port} does not exist")]
    NoSuchPort { bus: &'static str, port: u8 },

    #[error("{bus} port {port} is assigned twice")]
    PortReused { bus: &'static str, port: u8 },
}

/// The ports of one bus, numbered from 1, each claimable once.
#[derive(Debug)]
pub struct PortBank<T, const N: usize> {
    bus:   &'static str,
    ports: [Option<T>; N],
}

impl<T, const N: usize> PortBank<T, N> {
    /// A bank whose port `n` is `ports[n - 1]`.
    pub fn new(bus: &'static str, ports: [T; N]) -> Self {
        Self {
            bus,
            ports: ports.map(Some),
        }
    }

    /// Takes port `port` out of the bank.
    pub fn claim(&mut self, port: u8) -> Result<T, WiringError> {
        let bus = self.bus;
        let slot = port
            .checked_sub(1)
            .and_then(|index| self.ports.get_mut(usize::from(index)))
            .ok_or(WiringError::NoSuchPort { bus, port })?;
        slot.take().ok_or(WiringError::PortReused { bus, port })
    }

    /// Ports not claimed yet.
    pub fn remaining(&self) -> usize { self.ports.iter().filter(|port| port.is_some()).count() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotConfig;

    fn smart() -> PortBank<u8, 21> { PortBank::new("smart", core::array::from_fn(|i| i as u8 + 1)) }

    #[test]
    fn claims_ports_by_number() {
        let mut bank = smart();
        assert_eq!(bank.claim(1), Ok(1));
        assert_eq!(bank.claim(21), Ok(21));
        assert_eq!(bank.remaining(), 19);
    }

    #[test]
    fn out_of_range_ports_are_rejected() {
        let mut bank = smart();
        assert_eq!(bank.claim(0), Err(WiringError::NoSuchPort { bus: "smart", port: 0 }));
        assert_eq!(bank.claim(22), Err(WiringError::NoSuchPort { bus: "smart", port: 22 }));
        assert_eq!(bank.remaining(), 21);
    }

    #[test]
    fn a_port_is_handed_out_once() {
        let mut bank = smart();
        bank.claim(5).unwrap();
        let error = bank.claim(5).unwrap_err();
        assert_eq!(error.to_string(), "smart port 5 is assigned twice");
    }

    #[test]
    fn default_channel_maps_fit_their_buses() {
        let config = RobotConfig::default();

        let mut motors = smart();
        let pwm = config.pwm;
        for port in [pwm.front_left, pwm.rear_left, pwm.front_right, pwm.rear_right, pwm.conveyor] {
            motors.claim(port).unwrap();
        }
        motors.claim(config.compressor.expander).unwrap();

        let mut valves: PortBank<u8, 8> = PortBank::new("ADI", core::array::from_fn(|i| i as u8 + 1));
        let valve = config.solenoids;
        for pair in [valve.extend, valve.clamp, valve.raise] {
            valves.claim(pair.forward).unwrap();
            valves.claim(pair.reverse).unwrap();
        }

        let mut expander: PortBank<u8, 8> = PortBank::new("expander", core::array::from_fn(|i| i as u8 + 1));
        expander.claim(config.compressor.relay).unwrap();
        expander.claim(config.compressor.pressure_switch).unwrap();
    }
}
