//! Simulation observer trait for progress reporting and data collection.

use plat_core::Step;

use crate::Cohort;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, cohort: &Cohort) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: t = {:.1}s", cohort.time_secs());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any platform computes.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after every platform has applied.  `step` is the cohort's
    /// step counter after the commit, consistent with
    /// [`Cohort::time_secs`].
    fn on_step_end(&mut self, _step: Step, _cohort: &Cohort) {}

    /// Called when the post-step counter is a multiple of
    /// `config.output_interval_steps`, after `on_step_end`.
    ///
    /// The cohort is read-only here, so writers can pull
    /// [`Cohort::info`] without the sim knowing any output format.
    fn on_snapshot(&mut self, _step: Step, _cohort: &Cohort) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
