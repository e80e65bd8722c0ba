//! Autonomous routines.
//!
//! The autonomous period has no operator input to service, so its routines
//! block the control thread while they run:
//!
//! 1. [`feed::FeedLoop`] drives forward with the conveyor feeding.
//! 2. [`sequence::SCORE_GOAL`] scores the ball with the pneumatic arm.

/// Drive-and-feed loop.
pub mod feed;

/// Data-driven piston sequences and their executor.
pub mod sequence;
