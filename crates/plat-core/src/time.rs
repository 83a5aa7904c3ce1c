//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Step` counter.  The mapping to
//! simulated seconds is held in `SimClock`:
//!
//!   sim_time = step * step_size
//!
//! Using an integer step as the canonical counter keeps step bookkeeping
//! exact; only the conversion to seconds touches floating point.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between step counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds advanced per step.
    pub step_size: f64,
    /// The current step, advanced by `SimClock::advance()` each iteration.
    pub current_step: Step,
}

impl SimClock {
    pub fn new(step_size: f64) -> Self {
        Self { step_size, current_step: Step::ZERO }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = Step(self.current_step.0 + 1);
    }

    /// Rewind to step zero (episode reset).
    #[inline]
    pub fn reset(&mut self) {
        self.current_step = Step::ZERO;
    }

    /// Elapsed simulated seconds since step 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_step.0 as f64 * self.step_size
    }

    /// How many steps span `secs` seconds? (rounds up)
    #[inline]
    pub fn steps_for_secs(&self, secs: f64) -> u64 {
        (secs / self.step_size).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={:.3}s)", self.current_step, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration for the simulation loop.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per step handed to every root platform's dynamics.
    pub step_size: f64,

    /// Total steps to simulate per episode.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an output snapshot every N steps.  0 disables snapshots.
    pub output_interval_steps: u64,
}

impl SimConfig {
    /// The step at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_size)
    }

    /// Reject non-positive or non-finite step sizes.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(CoreError::Config(format!(
                "step_size must be finite and positive, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}
