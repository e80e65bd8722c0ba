//! The robot's three pistons, addressed by name.

use log::debug;

use crate::peripherals::solenoid::{DoubleSolenoid, SolenoidValue};

/// Names the pistons of the scoring arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piston {
    /// Grips the ball.
    Clamp,
    /// Lifts the arm.
    Raise,
    /// Pushes the arm outward.
    Extend,
}

impl Piston {
    pub const ALL: [Piston; 3] = [Piston::Clamp, Piston::Raise, Piston::Extend];
}

/// Anything that can command a piston by name.
///
/// [`Pneumatics`] is the real implementation; tests substitute recorders to
/// assert on the emitted commands.
pub trait PistonBank {
    fn set_piston(&mut self, piston: Piston, value: SolenoidValue);
    fn piston(&self, piston: Piston) -> SolenoidValue;
}

/// The clamp, raise and extend solenoids.
#[derive(Debug)]
pub struct Pneumatics {
    pub clamp:  DoubleSolenoid,
    pub raise:  DoubleSolenoid,
    pub extend: DoubleSolenoid,
}

impl Pneumatics {
    pub fn new(clamp: DoubleSolenoid, raise: DoubleSolenoid, extend: DoubleSolenoid) -> Self {
        Self { clamp, raise, extend }
    }

    pub fn get_mut(&mut self, piston: Piston) -> &mut DoubleSolenoid {
        match piston {
            Piston::Clamp => &mut self.clamp,
            Piston::Raise => &mut self.raise,
            Piston::Extend => &mut self.extend,
        }
    }

    pub fn get(&self, piston: Piston) -> &DoubleSolenoid {
        match piston {
            Piston::Clamp => &self.clamp,
            Piston::Raise => &self.raise,
            Piston::Extend => &self.extend,
        }
    }

    /// Vents every piston.
    pub fn all_off(&mut self) {
        debug!("Venting all pistons");
        for piston in Piston::ALL {
            self.get_mut(piston).set(SolenoidValue::Off);
        }
    }
}

impl PistonBank for Pneumatics {
    fn set_piston(&mut self, piston: Piston, value: SolenoidValue) {
        self.get_mut(piston).set(value);
    }

    fn piston(&self, piston: Piston) -> SolenoidValue { self.get(piston).get() }
}
