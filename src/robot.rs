//! The robot control loop.
//!
//! [`Robot`] owns every device and every piece of per-button state. The
//! harness calls [`Robot::init`] once at startup, [`Robot::autonomous`] once
//! when the autonomous period begins, and [`Robot::teleop_tick`] at a fixed
//! rate (about 50 Hz) during driver control.
//!
//! # Tick order
//!
//! 1. arcade drive from the X/Y axes
//! 2. conveyor from the Z axis while the elevator button is held
//! 3. clamp and arm toggles
//! 4. autoscore
//! 5. release-air (all-stop)
//! 6. pressure-switch interlock
//! 7. image capture on a fresh press
//!
//! Later stages win over earlier ones within the same tick, so all-stop
//! overrides a toggle fired on the same tick.
//!
//! # Blocking
//!
//! Holding the autoscore button runs the scoring sequence inside the tick.
//! The tick then lasts as long as the sequence (4 s) and does nothing else
//! meanwhile; the operator asked for a scripted move and gets the whole of
//! it. It runs again on every tick the button is still held.

use log::{info, warn};

use crate::{
    auton::sequence::ActuationSequencer,
    config::RobotConfig,
    display::StatusDisplay,
    fs::artifact::ArtifactSink,
    opcontrol::{
        input::HeldAxis,
        toggle::{ToggleDebouncer, toggle_group},
    },
    peripherals::{
        Delay, SpeedController,
        compressor::{Compressor, StopReason},
        controller::ControllerSnapshot,
        drivetrain::Differential,
        pneumatics::Pneumatics,
    },
    vision::{VisionError, camera::CameraLink, image::BufferLedger, pipeline::VisionPipeline},
};

/// Shown once a frame has been fetched from the camera.
pub const CAPTURED: &str = "Image captured!";
/// Shown once the pipeline has exported every stage.
pub const PROCESSED: &str = "Filtered image produced!";

/// Every device the robot drives, already constructed.
pub struct RobotHardware {
    pub drivetrain: Differential,
    pub conveyor:   Box<dyn SpeedController>,
    pub pneumatics: Pneumatics,
    pub compressor: Compressor,
    pub delay:      Box<dyn Delay>,
    pub camera:     Box<dyn CameraLink>,
    pub display:    Box<dyn StatusDisplay>,
    pub artifacts:  Box<dyn ArtifactSink>,
}

/// Per-button edge detectors.
#[derive(Debug, Default, Clone, Copy)]
struct Buttons {
    clamp:   ToggleDebouncer,
    arm:     ToggleDebouncer,
    capture: ToggleDebouncer,
}

/// The robot.
pub struct Robot {
    config:        RobotConfig,
    drivetrain:    Differential,
    conveyor:      Box<dyn SpeedController>,
    conveyor_axis: HeldAxis,
    pneumatics:    Pneumatics,
    compressor:    Compressor,
    sequencer:     ActuationSequencer<Box<dyn Delay>>,
    camera:        Box<dyn CameraLink>,
    display:       Box<dyn StatusDisplay>,
    artifacts:     Box<dyn ArtifactSink>,
    vision:        VisionPipeline,
    ledger:        BufferLedger,
    buttons:       Buttons,
}

impl Robot {
    pub fn new(config: RobotConfig, hardware: RobotHardware) -> Self {
        let vision = VisionPipeline::new(config.threshold, config.artifacts.clone());
        Self {
            conveyor_axis: HeldAxis::new(config.conveyor_axis_scale),
            drivetrain:    hardware.drivetrain,
            conveyor:      hardware.conveyor,
            pneumatics:    hardware.pneumatics,
            compressor:    hardware.compressor,
            sequencer:     ActuationSequencer::new(hardware.delay),
            camera:        hardware.camera,
            display:       hardware.display,
            artifacts:     hardware.artifacts,
            vision,
            ledger:        BufferLedger::new(),
            buttons:       Buttons::default(),
            config,
        }
    }

    /// Starts the compressor and vents every piston.
    pub fn init(&mut self) {
        self.compressor.start();
        self.pneumatics.all_off();
        info!("Robot initialized (camera {})", self.config.camera_address);
    }

    /// Drives forward while feeding, then scores.
    pub fn autonomous(&mut self) {
        info!("Autonomous started");
        self.config
            .feed
            .run(&mut self.drivetrain, &mut self.conveyor, self.sequencer.delay_mut());
        self.sequencer.run(&mut self.pneumatics, &self.config.score);
        info!("Autonomous complete");
    }

    /// Runs one driver-control tick.
    pub fn teleop_tick(&mut self, input: &ControllerSnapshot) {
        let map = self.config.buttons;

        self.drivetrain
            .arcade(input.y, input.x, self.config.square_inputs);

        let conveyor = self.conveyor_axis.apply(input.button(map.elevator), input.z);
        self.conveyor.set_speed(conveyor);

        if self.buttons.arm.sample(input.button(map.extend_arm)) {
            let p = &mut self.pneumatics;
            let value = toggle_group([&mut p.raise, &mut p.extend]);
            info!("Arm toggled: raise and extend {:?}", value);
        }
        if self.buttons.clamp.sample(input.button(map.clamp)) {
            let value = toggle_group([&mut self.pneumatics.clamp]);
            info!("Clamp toggled: {:?}", value);
        }

        if input.button(map.autoscore) {
            self.sequencer.run(&mut self.pneumatics, &self.config.score);
        }

        if input.button(map.release_air) {
            self.pneumatics.all_off();
            self.compressor.stop(StopReason::AllStop);
        }

        self.compressor.regulate();

        let capture = self.buttons.capture.sample(input.button(map.capture_image));
        if capture && self.camera.fresh_image() {
            self.capture();
        }
    }

    fn capture(&mut self) {
        if let Err(e) = self.try_capture() {
            warn!("{}", e);
            self.display.show(&e.to_string());
        }
    }

    fn try_capture(&mut self) -> Result<(), VisionError> {
        let frame = self.camera.get_image(&self.ledger)?;
        self.display.show(CAPTURED);
        self.vision.process(frame, &mut *self.artifacts)?;
        self.display.show(PROCESSED);
        Ok(())
    }

    pub fn config(&self) -> &RobotConfig { &self.config }

    pub fn pneumatics(&self) -> &Pneumatics { &self.pneumatics }

    pub fn pneumatics_mut(&mut self) -> &mut Pneumatics { &mut self.pneumatics }

    pub fn compressor(&self) -> &Compressor { &self.compressor }

    /// Ledger for every image buffer the robot allocates.
    pub fn ledger(&self) -> &BufferLedger { &self.ledger }
}

impl core::fmt::Debug for Robot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Robot")
            .field("drivetrain", &self.drivetrain)
            .field("pneumatics", &self.pneumatics)
            .field("compressor", &self.compressor)
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}
