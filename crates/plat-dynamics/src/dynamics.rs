//! The `Dynamics` trait: the seam between a platform and its motion model.

use nalgebra::DVector;

use crate::DynamicsResult;

/// Advances a state vector by one step.
///
/// Implementations may keep internal caches (e.g. state-dependent
/// coefficient matrices), hence `&mut self`, but must not depend on any
/// platform other than through the arguments.
pub trait Dynamics {
    /// Return the state reached after `step_size` seconds under constant
    /// `control`.  `state` is never modified.
    fn step(
        &mut self,
        step_size: f64,
        state:     &DVector<f64>,
        control:   &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>>;
}

impl<D: Dynamics + ?Sized> Dynamics for Box<D> {
    fn step(
        &mut self,
        step_size: f64,
        state:     &DVector<f64>,
        control:   &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>> {
        (**self).step(step_size, state, control)
    }
}
