//! Robot constants.
//!
//! Everything that depends on how the robot is wired or how the drive team
//! wants it to behave lives in [`RobotConfig`]. The default value is the
//! competition robot.

use crate::{
    auton::{
        feed::FeedLoop,
        sequence::{SCORE_GOAL, SequenceStep},
    },
    vision::{
        hsv::{ChannelRange, HsvThreshold},
        pipeline::ArtifactNames,
    },
};

/// HSV box for the orange game ball.
pub const TARGET_THRESHOLD: HsvThreshold = HsvThreshold::new(
    ChannelRange::new(10, 30),
    ChannelRange::new(128, 204),
    ChannelRange::new(204, 242),
);

/// Joystick button numbers, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    pub clamp:         u8,
    pub elevator:      u8,
    pub extend_arm:    u8,
    pub autoscore:     u8,
    pub release_air:   u8,
    pub capture_image: u8,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            clamp:         1,
            elevator:      2,
            extend_arm:    3,
            autoscore:     7,
            release_air:   10,
            capture_image: 11,
        }
    }
}

/// Motor output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmMap {
    pub front_left:  u8,
    pub rear_left:   u8,
    pub front_right: u8,
    pub rear_right:  u8,
    pub conveyor:    u8,
}

impl Default for PwmMap {
    fn default() -> Self {
        Self {
            front_left:  2,
            rear_left:   1,
            front_right: 4,
            rear_right:  3,
            conveyor:    5,
        }
    }
}

/// Forward and reverse channel of one valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValvePorts {
    pub forward: u8,
    pub reverse: u8,
}

impl ValvePorts {
    pub const fn new(forward: u8, reverse: u8) -> Self { Self { forward, reverse } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolenoidMap {
    pub clamp:  ValvePorts,
    pub raise:  ValvePorts,
    pub extend: ValvePorts,
}

impl Default for SolenoidMap {
    fn default() -> Self {
        Self {
            clamp:  ValvePorts::new(3, 4),
            raise:  ValvePorts::new(5, 6),
            extend: ValvePorts::new(1, 2),
        }
    }
}

/// Compressor channels. They sit on their own bus, separate from the valves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressorPorts {
    pub pressure_switch: u8,
    pub relay:           u8,
    /// Smart port of the ADI expander that carries this bus on a V5 Brain.
    pub expander:        u8,
}

impl Default for CompressorPorts {
    fn default() -> Self {
        Self {
            pressure_switch: 1,
            relay:           5,
            expander:        6,
        }
    }
}

/// The full robot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotConfig {
    pub buttons:             ButtonMap,
    pub pwm:                 PwmMap,
    pub solenoids:           SolenoidMap,
    pub compressor:          CompressorPorts,
    pub threshold:           HsvThreshold,
    /// Applied to the Z axis while the conveyor is running. Negative because
    /// the conveyor is mounted against the stick direction.
    pub conveyor_axis_scale: f64,
    /// Square the arcade inputs for finer control near center.
    pub square_inputs:       bool,
    pub feed:                FeedLoop,
    pub score:               Vec<SequenceStep>,
    /// Informational. The frame transport owns the connection.
    pub camera_address:      String,
    pub artifacts:           ArtifactNames,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            buttons:             ButtonMap::default(),
            pwm:                 PwmMap::default(),
            solenoids:           SolenoidMap::default(),
            compressor:          CompressorPorts::default(),
            threshold:           TARGET_THRESHOLD,
            conveyor_axis_scale: -1.0,
            square_inputs:       true,
            feed:                FeedLoop::default(),
            score:               SCORE_GOAL.to_vec(),
            camera_address:      "10.12.46.11".into(),
            artifacts:           ArtifactNames::default(),
        }
    }
}
