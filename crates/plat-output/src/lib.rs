//! `plat-output`: simulation output writers for the platform framework.
//!
//! | Backend | Files created                                    |
//! |---------|--------------------------------------------------|
//! | CSV     | `platform_info.csv`, `step_summaries.csv`        |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `plat_sim::SimObserver`.
//! Structured columns (actuation, control vectors, the RTA payload) are
//! embedded as JSON text.
//!
//! # Usage
//!
//! ```rust,ignore
//! use plat_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{PlatformInfoRow, StepSummaryRow};
pub use writer::OutputWriter;
