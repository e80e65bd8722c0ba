//! Timed piston sequences.
//!
//! A sequence is plain data: an ordered list of [`SequenceStep`]s, each
//! setting one piston and then waiting. [`ActuationSequencer`] runs any such
//! list from top to bottom, so the scoring routine and any future routine
//! share one executor and can be checked without real time passing.
//!
//! # Blocking
//!
//! [`ActuationSequencer::run`] holds the calling thread for the sum of the
//! step waits (4.0 s for [`SCORE_GOAL`]). Nothing else in the control loop
//! runs meanwhile, and a started sequence cannot be cancelled.
//!
//! # Example
//!
//! ```ignore
//! use briareus::auton::sequence::{ActuationSequencer, SCORE_GOAL};
//! use briareus::peripherals::ThreadDelay;
//!
//! let mut sequencer = ActuationSequencer::new(ThreadDelay);
//! sequencer.run(&mut pneumatics, &SCORE_GOAL);
//! ```

use std::time::Duration;

use log::{debug, info};

use crate::peripherals::{
    Delay,
    pneumatics::{Piston, PistonBank},
    solenoid::SolenoidValue,
};

/// One step of a sequence: set `piston` to `value`, then wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStep {
    pub piston: Piston,
    pub value:  SolenoidValue,
    pub wait:   Duration,
}

impl SequenceStep {
    pub const fn new(piston: Piston, value: SolenoidValue, wait: Duration) -> Self {
        Self { piston, value, wait }
    }
}

/// Clamps the ball, lifts and extends the arm, drops the ball into the goal
/// and returns the arm to its base position.
pub const SCORE_GOAL: [SequenceStep; 6] = [
    SequenceStep::new(Piston::Clamp, SolenoidValue::Forward, Duration::from_millis(500)),
    SequenceStep::new(Piston::Raise, SolenoidValue::Forward, Duration::from_millis(1000)),
    SequenceStep::new(Piston::Extend, SolenoidValue::Forward, Duration::from_millis(1000)),
    SequenceStep::new(Piston::Clamp, SolenoidValue::Reverse, Duration::from_millis(500)),
    SequenceStep::new(Piston::Extend, SolenoidValue::Reverse, Duration::from_millis(1000)),
    SequenceStep::new(Piston::Raise, SolenoidValue::Reverse, Duration::ZERO),
];

/// Total time spent waiting by `steps`.
pub fn total_wait(steps: &[SequenceStep]) -> Duration { steps.iter().map(|step| step.wait).sum() }

/// Runs piston sequences to completion.
#[derive(Debug)]
pub struct ActuationSequencer<D: Delay> {
    delay: D,
}

impl<D: Delay> ActuationSequencer<D> {
    pub fn new(delay: D) -> Self { Self { delay } }

    /// Executes every step in order: set the piston, then wait out the step.
    ///
    /// Steps are never skipped, reordered or retried. Zero waits return
    /// immediately without touching the delay.
    pub fn run<B: PistonBank + ?Sized>(&mut self, bank: &mut B, steps: &[SequenceStep]) {
        info!("Running actuation sequence ({} steps, {:?})", steps.len(), total_wait(steps));
        for (index, step) in steps.iter().enumerate() {
            debug!("Step {}: {:?} -> {:?}, wait {:?}", index + 1, step.piston, step.value, step.wait);
            bank.set_piston(step.piston, step.value);
            if !step.wait.is_zero() {
                self.delay.delay(step.wait);
            }
        }
        info!("Actuation sequence complete");
    }

    pub fn delay_mut(&mut self) -> &mut D { &mut self.delay }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingBank, RecordingDelay};

    #[test]
    fn score_goal_issues_six_commands_in_order() {
        let mut bank = RecordingBank::new();
        let mut sequencer = ActuationSequencer::new(RecordingDelay::new());
        sequencer.run(&mut bank, &SCORE_GOAL);

        let expected = vec![
            (Piston::Clamp, SolenoidValue::Forward),
            (Piston::Raise, SolenoidValue::Forward),
            (Piston::Extend, SolenoidValue::Forward),
            (Piston::Clamp, SolenoidValue::Reverse),
            (Piston::Extend, SolenoidValue::Reverse),
            (Piston::Raise, SolenoidValue::Reverse),
        ];
        assert_eq!(bank.commands(), expected);
    }

    #[test]
    fn waits_four_seconds_before_the_final_step() {
        let delay = RecordingDelay::new();
        let mut bank = RecordingBank::with_clock(delay.clone());
        let mut sequencer = ActuationSequencer::new(delay.clone());
        sequencer.run(&mut bank, &SCORE_GOAL);

        let times = bank.set_times();
        assert_eq!(times.first().copied(), Some(Duration::ZERO));
        assert!(times.last().copied() >= Some(Duration::from_secs(4)));
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(delay.total(), Duration::from_secs(4));
    }

    #[test]
    fn zero_waits_do_not_touch_the_delay() {
        let delay = RecordingDelay::new();
        let mut sequencer = ActuationSequencer::new(delay.clone());
        let steps = [
            SequenceStep::new(Piston::Clamp, SolenoidValue::Forward, Duration::ZERO),
            SequenceStep::new(Piston::Clamp, SolenoidValue::Reverse, Duration::ZERO),
        ];
        sequencer.run(&mut RecordingBank::new(), &steps);
        assert!(delay.waits().is_empty());
    }

    #[test]
    fn total_wait_of_score_goal() {
        assert_eq!(total_wait(&SCORE_GOAL), Duration::from_millis(4000));
    }
}
