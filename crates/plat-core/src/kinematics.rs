//! The `KinematicView` capability.
//!
//! Any concrete state type exposes its position, orientation, and velocity
//! as pure accessors over its own vector layout.  Nothing here mutates.

use nalgebra::{UnitQuaternion, Vector3};

/// Read-only kinematic projections of a platform state.
///
/// Only [`position`](Self::position), [`orientation`](Self::orientation) and
/// [`velocity`](Self::velocity) are required; the scalar accessors project
/// out of `position`.
pub trait KinematicView {
    fn position(&self) -> Vector3<f64>;

    fn orientation(&self) -> UnitQuaternion<f64>;

    fn velocity(&self) -> Vector3<f64>;

    #[inline]
    fn x(&self) -> f64 {
        self.position().x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.position().y
    }

    #[inline]
    fn z(&self) -> f64 {
        self.position().z
    }
}
