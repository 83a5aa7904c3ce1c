//! ODE-solver-backed dynamics.

use nalgebra::DVector;
use tracing::trace;

use crate::{rk45, Dynamics, DynamicsError, DynamicsResult, IntegrationMethod, Rk45Tolerances};

/// A continuous-time system `dx/dt = f(t, x, u)`.
pub trait OdeSystem {
    fn dx(
        &mut self,
        t:       f64,
        state:   &DVector<f64>,
        control: &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>>;
}

/// Adapts a closure into an [`OdeSystem`].
pub struct FnSystem<F>(pub F);

impl<F> OdeSystem for FnSystem<F>
where
    F: FnMut(f64, &DVector<f64>, &DVector<f64>) -> DVector<f64>,
{
    fn dx(
        &mut self,
        t:       f64,
        state:   &DVector<f64>,
        control: &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>> {
        Ok((self.0)(t, state, control))
    }
}

/// [`Dynamics`] that integrates an [`OdeSystem`] over `[0, step_size]`.
pub struct OdeDynamics<S: OdeSystem> {
    system:     S,
    method:     IntegrationMethod,
    tolerances: Rk45Tolerances,
}

impl<S: OdeSystem> OdeDynamics<S> {
    pub fn new(system: S, method: IntegrationMethod) -> Self {
        Self { system, method, tolerances: Rk45Tolerances::default() }
    }

    /// Parse the method name (`"Euler"` / `"RK45"`) first.
    pub fn with_method_name(system: S, method: &str) -> DynamicsResult<Self> {
        Ok(Self::new(system, method.parse()?))
    }

    pub fn with_tolerances(mut self, tolerances: Rk45Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    #[inline]
    pub fn method(&self) -> IntegrationMethod {
        self.method
    }

    #[inline]
    pub fn system(&self) -> &S {
        &self.system
    }

    #[inline]
    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }
}

impl<S: OdeSystem> Dynamics for OdeDynamics<S> {
    fn step(
        &mut self,
        step_size: f64,
        state:     &DVector<f64>,
        control:   &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>> {
        if !(step_size.is_finite() && step_size >= 0.0) {
            return Err(DynamicsError::InvalidStepSize(step_size));
        }

        let next = match self.method {
            IntegrationMethod::Euler => {
                let dx = self.system.dx(0.0, state, control)?;
                if dx.len() != state.len() {
                    return Err(DynamicsError::ShapeMismatch {
                        expected: state.len(),
                        got:      dx.len(),
                        what:     "state derivative",
                    });
                }
                state + dx * step_size
            }
            IntegrationMethod::Rk45 => {
                let system = &mut self.system;
                rk45::integrate(
                    |t, x| system.dx(t, x, control),
                    0.0,
                    step_size,
                    state,
                    &self.tolerances,
                )?
            }
        };

        if next.iter().any(|v| !v.is_finite()) {
            return Err(DynamicsError::NonFinite { t: step_size });
        }
        trace!(method = %self.method, step_size, "dynamics step");
        Ok(next)
    }
}
