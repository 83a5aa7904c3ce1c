//! `plat-actuator`: control channels and the action → command boundary.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`actuator`]    | `Actuator`, `ControlSpace`, `Bounds`                       |
//! | [`set`]         | `ActuatorSet`, `Actuation` (named command map)             |
//! | [`preprocess`]  | `ActionPreprocessor`, `PostActivation`, `ActionValue`      |
//! | [`space`]       | `ActionSpace` (`Box` / `Discrete` / `Tuple`)               |
//! | [`error`]       | `ActuatorError`, `ActuatorResult<T>`                       |
//!
//! # Data flow
//!
//! ```text
//! raw action element ──ActionPreprocessor──▶ (actuator name, command)
//!                                                   │ collected into
//!                                                   ▼
//!                                              Actuation ──ActuatorSet::gen_control──▶ control vector
//! ```
//!
//! `gen_control` fills every channel without an actuation entry from the
//! actuator's default, so the control vector always has the full width.

pub mod actuator;
pub mod error;
pub mod preprocess;
pub mod set;
pub mod space;

#[cfg(test)]
mod tests;

pub use actuator::{Actuator, Bounds, ControlSpace};
pub use error::{ActuatorError, ActuatorResult};
pub use preprocess::{ActionPreprocessor, ActionValue, PostActivation, PreprocessKind};
pub use set::{Actuation, ActuatorSet};
pub use space::ActionSpace;
