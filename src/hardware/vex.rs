//! VEX V5 Brain backend.
//!
//! # Wiring
//!
//! Every device is placed by the channel maps in [`RobotConfig`]. With the
//! default maps:
//!
//! | Device               | Port                                        |
//! |----------------------|---------------------------------------------|
//! | Drive motors         | smart ports 2, 1 (left) and 4, 3 (right)    |
//! | Conveyor motor       | smart port 5                                |
//! | Extend valve         | ADI A (forward), ADI B (reverse)            |
//! | Clamp valve          | ADI C (forward), ADI D (reverse)            |
//! | Raise valve          | ADI E (forward), ADI F (reverse)            |
//! | ADI expander         | smart port 6                                |
//! | Pressure switch      | expander A                                  |
//! | Compressor relay     | expander E                                  |
//!
//! Camera frames are replayed from `capture.bmp` on the SD card and the
//! exported stages are written to `vision/`. The status line is drawn on the
//! top text row of the Brain screen.
//!
//! # Example
//!
//! ```ignore
//! use briareus::{config::RobotConfig, fs::logger, hardware::vex::Competition};
//! use log::LevelFilter;
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     match Competition::new(peripherals, RobotConfig::default()) {
//!         Ok(robot) => robot.compete().await,
//!         Err(e) => log::error!("Wiring error: {}", e),
//!     }
//! }
//! ```

use std::time::Duration;

use embedded_graphics::{
    pixelcolor::{Rgb888, RgbColor},
    prelude::Size,
    primitives::Rectangle,
};
use log::warn;
use vexide::{
    adi::{AdiExpander, AdiPort},
    color::Rgb,
    controller::{ButtonState, ControllerState},
    display::{Display, Rect},
    prelude::{AdiDigitalIn, AdiDigitalOut, Compete, Controller, Direction, Gearset, Motor, Peripherals},
    smart::SmartPort,
    time::{sleep, user_uptime},
};

use crate::{
    config::{RobotConfig, ValvePorts},
    display::{LcdConsole, Screen, ScreenSurface},
    fs::artifact::ArtifactDir,
    hardware::{PortBank, WiringError},
    peripherals::{
        Delay, SpeedController,
        compressor::{Compressor, CompressorHardware},
        controller::{ControllerButton, ControllerSnapshot},
        drivetrain::Differential,
        pneumatics::Pneumatics,
        solenoid::{DoubleSolenoid, ValveChannel, ValveChannels},
    },
    robot::{Robot, RobotHardware},
    vision::camera::BmpCamera,
};

/// Driver-control tick period (50 Hz).
pub const TICK: Duration = Duration::from_millis(20);

/// Full-scale motor voltage.
const MAX_VOLTAGE: f64 = 12.0;

/// A double solenoid driven by two ADI digital outputs.
pub struct AdiValve {
    forward: AdiDigitalOut,
    reverse: AdiDigitalOut,
}

impl AdiValve {
    pub fn new(forward: AdiDigitalOut, reverse: AdiDigitalOut) -> Self { Self { forward, reverse } }
}

impl ValveChannels for AdiValve {
    fn energize(&mut self, channel: ValveChannel, on: bool) {
        let port = match channel {
            ValveChannel::Forward => &mut self.forward,
            ValveChannel::Reverse => &mut self.reverse,
        };
        let result = if on { port.set_high() } else { port.set_low() };
        result.unwrap_or_else(|e| {
            warn!("Valve {:?} write error: {}", channel, e);
        });
    }
}

impl SpeedController for Motor {
    fn set_speed(&mut self, speed: f64) {
        self.set_voltage(speed.clamp(-1.0, 1.0) * MAX_VOLTAGE)
            .unwrap_or_else(|e| {
                warn!("Motor Voltage Error: {}", e);
            });
    }
}

/// Compressor relay on an ADI output, pressure switch on an ADI input.
pub struct AdiCompressor {
    relay:  AdiDigitalOut,
    switch: AdiDigitalIn,
}

impl AdiCompressor {
    pub fn new(relay: AdiDigitalOut, switch: AdiDigitalIn) -> Self { Self { relay, switch } }
}

impl CompressorHardware for AdiCompressor {
    fn set_relay(&mut self, on: bool) {
        let result = if on { self.relay.set_high() } else { self.relay.set_low() };
        result.unwrap_or_else(|e| {
            warn!("Compressor relay error: {}", e);
        });
    }

    /// An unreadable switch reads as full, which keeps the compressor off.
    fn pressure_switch(&self) -> bool {
        self.switch.is_high().unwrap_or_else(|e| {
            warn!("Pressure switch error: {}", e);
            true
        })
    }
}

/// Busy-waits on the Brain's uptime clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn delay(&mut self, duration: Duration) {
        let deadline = user_uptime() + duration;
        while user_uptime() < deadline {
            core::hint::spin_loop();
        }
    }
}

impl ScreenSurface for Display {
    fn size(&self) -> Size {
        Size::new(Display::HORIZONTAL_RESOLUTION as u32, Display::VERTICAL_RESOLUTION as u32)
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888) {
        let Some(corner) = area.bottom_right() else {
            return;
        };
        let start = [area.top_left.x as i16, area.top_left.y as i16];
        let end = [corner.x as i16, corner.y as i16];
        self.fill(&Rect::new(start, end), Rgb::new(color.r(), color.g(), color.b()));
    }
}

/// Samples the controller into a snapshot: left stick X/Y drive, right
/// stick Y is the auxiliary axis. Both sticks read positive forward and
/// positive right.
pub fn read_controller(controller: &Controller) -> ControllerSnapshot {
    let state = controller.state().unwrap_or_else(|e| {
        warn!("Controller State Error: {}", e);
        ControllerState::default()
    });
    let mut snapshot = ControllerSnapshot::new(
        state.left_stick.x(),
        state.left_stick.y(),
        state.right_stick.y(),
    );
    for button in ControllerButton::ALL {
        snapshot.set_button(button.number(), button_state(&state, button).is_pressed());
    }
    snapshot
}

fn button_state(state: &ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}

fn valve(adi: &mut PortBank<AdiPort, 8>, ports: ValvePorts) -> Result<DoubleSolenoid, WiringError> {
    Ok(DoubleSolenoid::new(AdiValve::new(
        AdiDigitalOut::new(adi.claim(ports.forward)?),
        AdiDigitalOut::new(adi.claim(ports.reverse)?),
    )))
}

/// The robot wired to a V5 Brain, ready for the competition switch.
pub struct Competition {
    robot:      Robot,
    controller: Controller,
}

impl Competition {
    /// Claims the devices named by the config's channel maps, builds the
    /// robot and runs its init.
    pub fn new(peripherals: Peripherals, config: RobotConfig) -> Result<Self, WiringError> {
        let controller = peripherals.primary_controller;
        let mut smart: PortBank<SmartPort, 21> = PortBank::new("smart", [
            peripherals.port_1,
            peripherals.port_2,
            peripherals.port_3,
            peripherals.port_4,
            peripherals.port_5,
            peripherals.port_6,
            peripherals.port_7,
            peripherals.port_8,
            peripherals.port_9,
            peripherals.port_10,
            peripherals.port_11,
            peripherals.port_12,
            peripherals.port_13,
            peripherals.port_14,
            peripherals.port_15,
            peripherals.port_16,
            peripherals.port_17,
            peripherals.port_18,
            peripherals.port_19,
            peripherals.port_20,
            peripherals.port_21,
        ]);
        let mut adi: PortBank<AdiPort, 8> = PortBank::new("ADI", [
            peripherals.adi_a,
            peripherals.adi_b,
            peripherals.adi_c,
            peripherals.adi_d,
            peripherals.adi_e,
            peripherals.adi_f,
            peripherals.adi_g,
            peripherals.adi_h,
        ]);

        let pwm = config.pwm;
        let mut motor = |port: u8, direction: Direction| -> Result<Motor, WiringError> {
            Ok(Motor::new(smart.claim(port)?, Gearset::Green, direction))
        };
        let drivetrain = Differential::new(
            [
                motor(pwm.front_left, Direction::Forward)?,
                motor(pwm.rear_left, Direction::Forward)?,
            ],
            [
                motor(pwm.front_right, Direction::Reverse)?,
                motor(pwm.rear_right, Direction::Reverse)?,
            ],
        );
        let conveyor = motor(pwm.conveyor, Direction::Forward)?;

        let solenoids = config.solenoids;
        let pneumatics = Pneumatics::new(
            valve(&mut adi, solenoids.clamp)?,
            valve(&mut adi, solenoids.raise)?,
            valve(&mut adi, solenoids.extend)?,
        );

        let ports = config.compressor;
        let expander = AdiExpander::new(smart.claim(ports.expander)?);
        let mut relay_bus: PortBank<AdiPort, 8> = PortBank::new("expander", [
            expander.adi_a,
            expander.adi_b,
            expander.adi_c,
            expander.adi_d,
            expander.adi_e,
            expander.adi_f,
            expander.adi_g,
            expander.adi_h,
        ]);
        let compressor = Compressor::new(AdiCompressor::new(
            AdiDigitalOut::new(relay_bus.claim(ports.relay)?),
            AdiDigitalIn::new(relay_bus.claim(ports.pressure_switch)?),
        ));

        let hardware = RobotHardware {
            drivetrain,
            conveyor: Box::new(conveyor),
            pneumatics,
            compressor,
            delay: Box::new(SpinDelay),
            camera: Box::new(BmpCamera::new("capture.bmp")),
            display: Box::new(LcdConsole::new(Screen::new(peripherals.display), 0)),
            artifacts: Box::new(ArtifactDir::new("vision")),
        };

        let mut robot = Robot::new(config, hardware);
        robot.init();
        Ok(Self {
            robot,
            controller,
        })
    }
}

impl Compete for Competition {
    async fn autonomous(&mut self) { self.robot.autonomous(); }

    async fn driver(&mut self) {
        loop {
            let input = read_controller(&self.controller);
            self.robot.teleop_tick(&input);
            sleep(TICK).await;
        }
    }
}
