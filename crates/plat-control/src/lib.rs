//! `plat-control`: maps external actions onto named actuator commands.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`config`]     | `ControllerConfig`, `ActuatorConfig`, `ActionMapping`, JSON loader |
//! | [`controller`] | `Controller` (`PassThrough` / `Agent`), `Action`                |
//! | [`error`]      | `ConfigError`, `ControlError`                                   |
//!
//! # Configuration model
//!
//! Every actuator entry resolves once, at construction, into one variant of
//! the closed [`ActionMapping`] set:
//!
//! ```text
//! space = continuous (default)
//!   rescale = true (default)  → ContinuousRescale { zero_centered, post_activation }
//!   rescale = false           → ContinuousPassThrough
//! space = discrete, points=N  → ContinuousDiscretized { points: N }
//! ```
//!
//! Unknown keys, conflicting keys, and unsupported actuator kinds all fail
//! before the first step is ever taken.

pub mod config;
pub mod controller;
pub mod error;


pub use config::{ActionMapping, ActuatorConfig, ControllerConfig, RECOGNIZED_KEYS};
pub use controller::{Action, AgentController, Controller};
pub use error::{ConfigError, ConfigResult, ControlError, ControlResult};
