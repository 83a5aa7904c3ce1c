//! Linear state-space systems `dx/dt = A·x + B·u`.

use nalgebra::{DMatrix, DVector};

use crate::{DynamicsError, DynamicsResult, OdeDynamics, OdeSystem};

/// Source of the `A` and `B` matrices.
///
/// Constant systems only implement [`gen_matrices`](Self::gen_matrices).
/// State-dependent systems also override
/// [`update_matrices`](Self::update_matrices), which runs before every
/// derivative evaluation.
pub trait LinearModel {
    /// Initial `(A, B)`.  `A` is `n × n`, `B` is `n × m`.
    fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>);

    fn update_matrices(&mut self, _state: &DVector<f64>, _a: &mut DMatrix<f64>, _b: &mut DMatrix<f64>) {}
}

pub struct LinearOde<M: LinearModel> {
    model: M,
    a:     DMatrix<f64>,
    b:     DMatrix<f64>,
}

impl<M: LinearModel> LinearOde<M> {
    pub fn new(model: M) -> DynamicsResult<Self> {
        let (a, b) = model.gen_matrices();
        if a.nrows() != a.ncols() {
            return Err(DynamicsError::ShapeMismatch {
                expected: a.nrows(),
                got:      a.ncols(),
                what:     "A matrix columns",
            });
        }
        if b.nrows() != a.nrows() {
            return Err(DynamicsError::ShapeMismatch {
                expected: a.nrows(),
                got:      b.nrows(),
                what:     "B matrix rows",
            });
        }
        Ok(Self { model, a, b })
    }

    #[inline] pub fn a(&self) -> &DMatrix<f64> { &self.a }
    #[inline] pub fn b(&self) -> &DMatrix<f64> { &self.b }
    #[inline] pub fn model(&self) -> &M { &self.model }

    #[inline]
    pub fn state_len(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    pub fn control_len(&self) -> usize {
        self.b.ncols()
    }
}

impl<M: LinearModel> OdeSystem for LinearOde<M> {
    fn dx(
        &mut self,
        _t:      f64,
        state:   &DVector<f64>,
        control: &DVector<f64>,
    ) -> DynamicsResult<DVector<f64>> {
        if state.len() != self.a.ncols() {
            return Err(DynamicsError::ShapeMismatch {
                expected: self.a.ncols(),
                got:      state.len(),
                what:     "state",
            });
        }
        if control.len() != self.b.ncols() {
            return Err(DynamicsError::ShapeMismatch {
                expected: self.b.ncols(),
                got:      control.len(),
                what:     "control",
            });
        }
        self.model.update_matrices(state, &mut self.a, &mut self.b);
        Ok(&self.a * state + &self.b * control)
    }
}

/// Linear system integrated with the configured method.
pub type LinearDynamics<M> = OdeDynamics<LinearOde<M>>;
