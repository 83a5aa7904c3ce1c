//! `plat-sim`: steps a cohort of platforms together.
//!
//! # Two-pass step
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Snapshot: capture one SimState of every committed platform.
//!   ② Compute:  for each root in any order, step_compute against that
//!                snapshot, then each of its dependents at their own cadence.
//!   ③ Apply:    once every node has computed, commit all of them.
//! ```
//!
//! Because nothing is committed until ③, the result does not depend on the
//! order roots are computed in.  Applying any node before every node has
//! computed, or computing after applying has started, is rejected as
//! [`SimError::InterleavedStep`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use plat_sim::{NoActions, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, NoActions)
//!     .platform(chief)
//!     .platform(deputy)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod actions;
pub mod builder;
pub mod cohort;
pub mod error;
pub mod object;
pub mod observer;
pub mod sim;


pub use actions::{ActionSource, FnActions, NoActions, RandomActions};
pub use builder::SimBuilder;
pub use cohort::{Cohort, CohortPhase};
pub use error::{SimError, SimResult};
pub use object::SimObject;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
