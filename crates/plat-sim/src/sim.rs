//! The `Sim` struct and its step loop.

use tracing::info;

use plat_core::{SimClock, SimConfig, Step};

use crate::{ActionSource, Cohort, SimObserver, SimResult};

/// The main simulation runner.
///
/// Each step captures a [`SimState`][plat_core::SimState], asks the
/// [`ActionSource`] for one action per root, then runs the cohort's
/// compute and apply passes.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: ActionSource> {
    /// Global configuration (total steps, seed, step size, …).
    pub config: SimConfig,

    /// Tracks the current step and maps it to simulated seconds.
    pub clock: SimClock,

    /// Every platform in the run.
    pub cohort: Cohort,

    pub actions: A,
}

impl<A: ActionSource> Sim<A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current step to `config.end_step()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            platforms   = self.cohort.len(),
            total_steps = self.config.total_steps,
            step_size   = self.config.step_size,
            "simulation started"
        );
        loop {
            let now = self.clock.current_step;
            if now >= self.config.end_step() {
                break;
            }
            self.process_step(now, observer)?;
        }
        observer.on_sim_end(self.clock.current_step);
        info!(final_step = self.clock.current_step.0, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_step;
            self.process_step(now, observer)?;
        }
        Ok(())
    }

    /// Reset every platform and rewind the clock.
    pub fn reset(&mut self) -> SimResult<()> {
        self.cohort.reset_all()?;
        self.clock.reset();
        Ok(())
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: SimObserver>(&mut self, now: Step, observer: &mut O) -> SimResult<()> {
        observer.on_step_start(now);

        // Actions see the same pre-step view the filters will.
        let sim_state = self.cohort.snapshot();
        let mut actions = Vec::with_capacity(self.cohort.roots().len());
        for &id in self.cohort.roots() {
            let platform = self.cohort.get(id)?;
            actions.push(self.actions.action(id, platform, &sim_state));
        }

        self.cohort.step_all(self.clock.step_size, &actions)?;

        // Hooks see the committed state, so they get the post-step index
        // that matches `cohort.time_secs()`.
        let done = self.cohort.step();
        observer.on_step_end(done, &self.cohort);

        if self.config.output_interval_steps > 0
            && done.0.is_multiple_of(self.config.output_interval_steps)
        {
            observer.on_snapshot(done, &self.cohort);
        }

        self.clock.advance();
        Ok(())
    }
}
