//! `plat-platform`: one simulated platform and its stepping protocol.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`state`]    | `StateLayout`, `VectorState<L>`, `StateReset<P>`                |
//! | [`rta`]      | `RtaFilter` seam, `RtaSlot`, `RtaSpec`, `RtaRegistry`           |
//! | [`platform`] | `Platform<L>`, `StepPhase`                                      |
//! | [`info`]     | `PlatformInfo`, `ControllerInfo` (serializable diagnostics)     |
//! | [`builder`]  | `PlatformBuilder<L>`                                            |
//! | [`error`]    | `PlatformError`, `StateError`, `RtaError`                       |
//!
//! # Stepping protocol
//!
//! ```text
//!            reset
//!              │
//!              ▼
//!   ┌──────▶ Idle ──step_compute──▶ Computed ──step_apply──▶ Applied ─┐
//!   │                                                                 │
//!   └───────────────────────────── step_compute ──────────────────────┘
//! ```
//!
//! `step_compute` runs controller → actuator set → safety filter → dynamics
//! and stages the result in `next_state`; the committed state is untouched
//! until `step_apply`.  Calling either phase out of order is an error.

pub mod builder;
pub mod error;
pub mod info;
pub mod platform;
pub mod rta;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::PlatformBuilder;
pub use error::{PlatformError, PlatformResult, RtaError, RtaResult, StateError, StateResult};
pub use info::{ControllerInfo, PlatformInfo};
pub use platform::{Platform, StepPhase};
pub use rta::{PlatformView, RtaFactory, RtaFilter, RtaRegistry, RtaSlot, RtaSpec};
pub use state::{StateLayout, StateReset, VectorState};
