//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `platform_info.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PlatformInfoRow, StepSummaryRow};

pub const PLATFORM_INFO_FILE: &str = "platform_info.csv";
pub const STEP_SUMMARY_FILE: &str = "step_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    platforms: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut platforms = Writer::from_path(dir.join(PLATFORM_INFO_FILE))?;
        platforms.write_record([
            "step",
            "time_secs",
            "platform_id",
            "name",
            "x",
            "y",
            "z",
            "actuation",
            "control",
            "untrimmed_control",
            "rta",
        ])?;

        let mut summaries = Writer::from_path(dir.join(STEP_SUMMARY_FILE))?;
        summaries.write_record(["step", "time_secs", "platforms"])?;

        Ok(Self { platforms, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_platform_rows(&mut self, rows: &[PlatformInfoRow]) -> OutputResult<()> {
        for row in rows {
            self.platforms.write_record(&[
                row.step.to_string(),
                row.time_secs.to_string(),
                row.platform_id.to_string(),
                row.name.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.actuation.clone(),
                row.control.clone(),
                row.untrimmed_control.clone(),
                row.rta.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.time_secs.to_string(),
            row.platforms.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.platforms.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
