//! Vectorized platform state.
//!
//! A [`StateLayout`] fixes the vector length and the index slices that the
//! kinematic projections read.  [`VectorState`] owns one vector of that
//! layout by value: reads borrow it, writes take ownership of a
//! replacement, and the length is checked on every write.

use nalgebra::{DVector, UnitQuaternion, Vector3};

use plat_core::KinematicView;

use crate::{StateError, StateResult};

/// Fixed-shape layout of a concrete platform's state vector.
pub trait StateLayout {
    /// Parameters for building an initial vector, e.g. a start position.
    type Init: Default + Clone;

    fn vector_len(&self) -> usize;

    /// Build an initial vector from reset parameters.  Must be pure.
    fn build_vector(&self, init: &Self::Init) -> DVector<f64>;

    fn position(&self, vector: &DVector<f64>) -> Vector3<f64>;

    /// Attitude; layouts without one report the identity rotation.
    fn orientation(&self, _vector: &DVector<f64>) -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }

    fn velocity(&self, vector: &DVector<f64>) -> Vector3<f64>;
}

/// How to re-initialize a state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateReset<P> {
    /// Build through [`StateLayout::build_vector`].
    Build(P),
    /// Adopt this vector as-is (moved in, no copy) after a length check.
    Vector(DVector<f64>),
}

impl<P: Default> Default for StateReset<P> {
    fn default() -> Self {
        StateReset::Build(P::default())
    }
}

#[derive(Clone, Debug)]
pub struct VectorState<L: StateLayout> {
    layout: L,
    vector: DVector<f64>,
}

impl<L: StateLayout> VectorState<L> {
    pub fn new(layout: L, reset: StateReset<L::Init>) -> StateResult<Self> {
        let vector = Self::resolve(&layout, reset)?;
        Ok(Self { layout, vector })
    }

    pub fn reset(&mut self, reset: StateReset<L::Init>) -> StateResult<()> {
        self.vector = Self::resolve(&self.layout, reset)?;
        Ok(())
    }

    /// Copy `values` into a fresh vector and adopt it.
    pub fn reset_from_slice(&mut self, values: &[f64]) -> StateResult<()> {
        self.set_vector(DVector::from_column_slice(values))
    }

    #[inline]
    pub fn vector(&self) -> &DVector<f64> {
        &self.vector
    }

    /// Replace the vector.  On a length mismatch the old vector is kept.
    pub fn set_vector(&mut self, vector: DVector<f64>) -> StateResult<()> {
        check_len(&self.layout, &vector)?;
        self.vector = vector;
        Ok(())
    }

    pub fn into_vector(self) -> DVector<f64> {
        self.vector
    }

    #[inline]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    fn resolve(layout: &L, reset: StateReset<L::Init>) -> StateResult<DVector<f64>> {
        let vector = match reset {
            StateReset::Build(init) => layout.build_vector(&init),
            StateReset::Vector(v) => v,
        };
        check_len(layout, &vector)?;
        Ok(vector)
    }
}

fn check_len<L: StateLayout>(layout: &L, vector: &DVector<f64>) -> StateResult<()> {
    if vector.len() != layout.vector_len() {
        return Err(StateError::ShapeMismatch { expected: layout.vector_len(), got: vector.len() });
    }
    Ok(())
}

impl<L: StateLayout> KinematicView for VectorState<L> {
    fn position(&self) -> Vector3<f64> {
        self.layout.position(&self.vector)
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.layout.orientation(&self.vector)
    }

    fn velocity(&self) -> Vector3<f64> {
        self.layout.velocity(&self.vector)
    }
}
