//! `plat-core`: foundational types for the platform simulation framework.
//!
//! This crate is a dependency of every other `plat-*` crate.  It has no
//! `plat-*` dependencies and few external ones (`nalgebra`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PlatformId`, `ActuatorId`                            |
//! | [`time`]        | `Step`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `PlatformRng`, `platform_seed`                        |
//! | [`kinematics`]  | `KinematicView` capability trait                      |
//! | [`snapshot`]    | `SimState`, `PlatformSnapshot`                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kinematics;
pub mod rng;
pub mod snapshot;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActuatorId, PlatformId};
pub use kinematics::KinematicView;
pub use rng::{PlatformRng, platform_seed};
pub use snapshot::{PlatformSnapshot, SimState};
pub use time::{SimClock, SimConfig, Step};
