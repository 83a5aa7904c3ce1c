//! `plat-dynamics`: advance a state vector over one step given a control.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`dynamics`] | `Dynamics` trait (the platform-facing seam)                   |
//! | [`method`]   | `IntegrationMethod` (`Euler` / `RK45`), `Rk45Tolerances`      |
//! | [`ode`]      | `OdeSystem` trait, `OdeDynamics<S>`, `FnSystem`               |
//! | [`rk45`]     | Adaptive Dormand–Prince 5(4) integrator                       |
//! | [`linear`]   | `LinearModel` trait, `LinearOde<M>` (`dx = A·x + B·u`)        |
//! | [`error`]    | `DynamicsError`, `DynamicsResult<T>`                          |
//!
//! Both integration methods share one call signature, so swapping `Euler`
//! for `RK45` is a configuration change only.

pub mod dynamics;
pub mod error;
pub mod linear;
pub mod method;
pub mod ode;
pub mod rk45;

#[cfg(test)]
mod tests;

pub use dynamics::Dynamics;
pub use error::{DynamicsError, DynamicsResult};
pub use linear::{LinearDynamics, LinearModel, LinearOde};
pub use method::{IntegrationMethod, Rk45Tolerances};
pub use ode::{FnSystem, OdeDynamics, OdeSystem};
