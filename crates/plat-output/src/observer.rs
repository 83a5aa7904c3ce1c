//! Observer that streams cohort diagnostics into an [`OutputWriter`].

use tracing::warn;

use plat_core::Step;
use plat_sim::{Cohort, SimObserver};

use crate::row::{PlatformInfoRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes one [`StepSummaryRow`] per step and, at snapshot steps, one
/// [`PlatformInfoRow`] per platform.
///
/// Observer hooks cannot fail, so the first write error is kept for
/// [`take_error`][Self::take_error] and later ones are only counted.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    first_error:    Option<OutputError>,
    dropped_errors: usize,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, first_error: None, dropped_errors: 0 }
    }

    /// The first write error of the run, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Write errors seen after the first one.
    pub fn dropped_errors(&self) -> usize {
        self.dropped_errors
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, result: OutputResult<()>) {
        let Err(e) = result else { return };
        if self.first_error.is_none() {
            warn!(error = %e, "output write failed");
            self.first_error = Some(e);
        } else {
            self.dropped_errors += 1;
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, step: Step, cohort: &Cohort) {
        let summary = StepSummaryRow {
            step:      step.0,
            time_secs: cohort.time_secs(),
            platforms: cohort.len() as u64,
        };
        let result = self.writer.write_step_summary(&summary);
        self.record(result);
    }

    fn on_snapshot(&mut self, step: Step, cohort: &Cohort) {
        let time_secs = cohort.time_secs();
        let result = cohort
            .info()
            .iter()
            .map(|(&id, info)| PlatformInfoRow::from_info(step, time_secs, id, info))
            .collect::<OutputResult<Vec<_>>>()
            .and_then(|rows| {
                if rows.is_empty() { Ok(()) } else { self.writer.write_platform_rows(&rows) }
            });
        self.record(result);
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.record(result);
    }
}
