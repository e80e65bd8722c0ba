//! Recording stand-ins for the hardware traits.
//!
//! Each mock is a cheap handle to shared state: clone it, hand one clone to
//! the code under test and keep the other to inspect what happened.

use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use embedded_graphics::pixelcolor::Rgb888;

use crate::{
    display::StatusDisplay,
    fs::artifact::ArtifactSink,
    peripherals::{
        Delay, SpeedController,
        compressor::CompressorHardware,
        pneumatics::{Piston, PistonBank},
        solenoid::{SolenoidValue, ValveChannel, ValveChannels},
    },
    vision::{
        VisionError,
        camera::CameraLink,
        hsv::HsvThreshold,
        image::{BinaryMask, BufferLedger, ColorImage},
        ops::{SoftwareVision, VisionOps},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilEvent {
    pub channel: ValveChannel,
    pub on:      bool,
}

/// Records every coil write of one valve.
#[derive(Debug, Clone, Default)]
pub struct RecordingValve {
    events: Rc<RefCell<Vec<CoilEvent>>>,
}

impl RecordingValve {
    pub fn new() -> Self { Self::default() }

    pub fn events(&self) -> Vec<CoilEvent> { self.events.borrow().clone() }

    /// Current (forward, reverse) coil levels.
    pub fn coils(&self) -> (bool, bool) {
        let mut coils = (false, false);
        for event in self.events.borrow().iter() {
            match event.channel {
                ValveChannel::Forward => coils.0 = event.on,
                ValveChannel::Reverse => coils.1 = event.on,
            }
        }
        coils
    }
}

impl ValveChannels for RecordingValve {
    fn energize(&mut self, channel: ValveChannel, on: bool) {
        self.events.borrow_mut().push(CoilEvent { channel, on });
    }
}

/// Records every speed written to a motor.
#[derive(Debug, Clone, Default)]
pub struct RecordingMotor {
    speeds: Rc<RefCell<Vec<f64>>>,
}

impl RecordingMotor {
    pub fn new() -> Self { Self::default() }

    pub fn speeds(&self) -> Vec<f64> { self.speeds.borrow().clone() }

    pub fn last(&self) -> Option<f64> { self.speeds.borrow().last().copied() }
}

impl SpeedController for RecordingMotor {
    fn set_speed(&mut self, speed: f64) { self.speeds.borrow_mut().push(speed); }
}

#[derive(Debug, Default)]
struct CompressorState {
    relay_writes:    Vec<bool>,
    pressure_switch: bool,
}

/// A compressor relay with a settable pressure switch.
#[derive(Debug, Clone, Default)]
pub struct MockCompressor {
    state: Rc<RefCell<CompressorState>>,
}

impl MockCompressor {
    pub fn new() -> Self { Self::default() }

    pub fn relay(&self) -> bool { self.state.borrow().relay_writes.last().copied().unwrap_or(false) }

    pub fn relay_writes(&self) -> Vec<bool> { self.state.borrow().relay_writes.clone() }

    pub fn set_pressure_switch(&self, full: bool) { self.state.borrow_mut().pressure_switch = full; }
}

impl CompressorHardware for MockCompressor {
    fn set_relay(&mut self, on: bool) { self.state.borrow_mut().relay_writes.push(on); }

    fn pressure_switch(&self) -> bool { self.state.borrow().pressure_switch }
}

/// A delay that returns at once and remembers what it was asked to wait.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    waits: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self { Self::default() }

    pub fn waits(&self) -> Vec<Duration> { self.waits.borrow().clone() }

    /// Simulated time passed so far.
    pub fn total(&self) -> Duration { self.waits.borrow().iter().sum() }
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) { self.waits.borrow_mut().push(duration); }
}

/// A piston bank that logs commands, optionally stamped with the simulated
/// time of a [`RecordingDelay`].
#[derive(Debug, Default)]
pub struct RecordingBank {
    commands: Vec<(Piston, SolenoidValue, Duration)>,
    clock:    Option<RecordingDelay>,
}

impl RecordingBank {
    pub fn new() -> Self { Self::default() }

    pub fn with_clock(clock: RecordingDelay) -> Self {
        Self {
            commands: Vec::new(),
            clock:    Some(clock),
        }
    }

    pub fn commands(&self) -> Vec<(Piston, SolenoidValue)> {
        self.commands.iter().map(|&(piston, value, _)| (piston, value)).collect()
    }

    pub fn set_times(&self) -> Vec<Duration> { self.commands.iter().map(|&(_, _, at)| at).collect() }
}

impl PistonBank for RecordingBank {
    fn set_piston(&mut self, piston: Piston, value: SolenoidValue) {
        let at = self.clock.as_ref().map(RecordingDelay::total).unwrap_or_default();
        self.commands.push((piston, value, at));
    }

    fn piston(&self, piston: Piston) -> SolenoidValue {
        self.commands
            .iter()
            .rev()
            .find(|&&(p, _, _)| p == piston)
            .map(|&(_, value, _)| value)
            .unwrap_or_default()
    }
}

/// Collects status lines.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> Vec<String> { self.lines.borrow().clone() }

    pub fn last(&self) -> Option<String> { self.lines.borrow().last().cloned() }
}

impl StatusDisplay for RecordingDisplay {
    fn show(&mut self, text: &str) { self.lines.borrow_mut().push(text.to_owned()); }
}

enum Shot {
    Frame {
        width:  u32,
        height: u32,
        pixels: Vec<Rgb888>,
    },
    Fail(VisionError),
}

#[derive(Default)]
struct CameraState {
    queue:   VecDeque<Shot>,
    fetches: usize,
}

/// A camera that serves queued frames or failures, one per fetch. A frame
/// is fresh while anything is queued.
#[derive(Clone, Default)]
pub struct ScriptedCamera {
    state: Rc<RefCell<CameraState>>,
}

impl ScriptedCamera {
    pub fn new() -> Self { Self::default() }

    pub fn push_frame(&self, width: u32, height: u32, pixels: Vec<Rgb888>) {
        self.state.borrow_mut().queue.push_back(Shot::Frame {
            width,
            height,
            pixels,
        });
    }

    pub fn push_error(&self, error: VisionError) { self.state.borrow_mut().queue.push_back(Shot::Fail(error)); }

    pub fn fetches(&self) -> usize { self.state.borrow().fetches }
}

impl CameraLink for ScriptedCamera {
    fn fresh_image(&mut self) -> bool { !self.state.borrow().queue.is_empty() }

    fn get_image(&mut self, ledger: &BufferLedger) -> Result<ColorImage, VisionError> {
        let mut state = self.state.borrow_mut();
        state.fetches += 1;
        match state.queue.pop_front() {
            Some(Shot::Frame {
                width,
                height,
                pixels,
            }) => ColorImage::from_pixels(ledger, width, height, pixels),
            Some(Shot::Fail(error)) => Err(error),
            None => Err(VisionError::CameraLink("no frame queued".into())),
        }
    }
}

/// Keeps artifact names in memory. A failing sink rejects every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifacts {
    names: Rc<RefCell<Vec<String>>>,
    fail:  bool,
}

impl MemoryArtifacts {
    pub fn new() -> Self { Self::default() }

    pub fn failing() -> Self {
        Self {
            names: Rc::default(),
            fail:  true,
        }
    }

    pub fn names(&self) -> Vec<String> { self.names.borrow().clone() }

    fn record(&mut self, name: &str) -> Result<(), VisionError> {
        if self.fail {
            return Err(VisionError::Processing(format!("cannot write {}", name)));
        }
        self.names.borrow_mut().push(name.to_owned());
        Ok(())
    }
}

impl ArtifactSink for MemoryArtifacts {
    fn write_color(&mut self, name: &str, _image: &ColorImage) -> Result<(), VisionError> { self.record(name) }

    fn write_mask(&mut self, name: &str, _mask: &BinaryMask) -> Result<(), VisionError> { self.record(name) }
}

/// Pipeline stage at which [`FailingVision`] gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Equalize,
    Threshold,
    Hull,
}

/// [`SoftwareVision`] that fails at one chosen stage.
#[derive(Debug, Clone, Copy)]
pub struct FailingVision {
    at: FailAt,
}

impl FailingVision {
    pub fn new(at: FailAt) -> Self { Self { at } }

    fn check(&self, stage: FailAt) -> Result<(), VisionError> {
        if self.at == stage {
            Err(VisionError::Processing(format!("{:?} failed", stage)))
        } else {
            Ok(())
        }
    }
}

impl VisionOps for FailingVision {
    fn equalize(&mut self, image: &ColorImage) -> Result<ColorImage, VisionError> {
        self.check(FailAt::Equalize)?;
        SoftwareVision.equalize(image)
    }

    fn threshold_hsv(
        &mut self,
        image: &ColorImage,
        threshold: &HsvThreshold,
    ) -> Result<BinaryMask, VisionError> {
        self.check(FailAt::Threshold)?;
        SoftwareVision.threshold_hsv(image, threshold)
    }

    fn convex_hull(&mut self, mask: &BinaryMask) -> Result<BinaryMask, VisionError> {
        self.check(FailAt::Hull)?;
        SoftwareVision.convex_hull(mask)
    }
}
