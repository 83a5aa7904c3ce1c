//! Clohessy–Wiltshire–Hill relative motion about a chief in circular orbit.

use nalgebra::{DMatrix, DVector, Vector3};

use plat_dynamics::LinearModel;
use plat_platform::StateLayout;

/// Mean motion of the chief's orbit, rad/s.
pub const MEAN_MOTION: f64 = 0.001027;

/// Deputy mass, kg.
pub const MASS: f64 = 12.0;

/// `[x, y, z, vx, vy, vz]` in the chief's Hill frame.
#[derive(Clone, Copy, Debug)]
pub struct Cwh3d;

#[derive(Clone, Copy, Debug, Default)]
pub struct CwhInit {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl StateLayout for Cwh3d {
    type Init = CwhInit;

    fn vector_len(&self) -> usize {
        6
    }

    fn build_vector(&self, init: &CwhInit) -> DVector<f64> {
        DVector::from_iterator(6, init.position.iter().chain(&init.velocity).copied())
    }

    fn position(&self, v: &DVector<f64>) -> Vector3<f64> {
        Vector3::new(v[0], v[1], v[2])
    }

    fn velocity(&self, v: &DVector<f64>) -> Vector3<f64> {
        Vector3::new(v[3], v[4], v[5])
    }
}

/// Linearized relative dynamics; `thrusters = false` gives a passive body
/// with an empty control vector.
pub struct CwhModel {
    pub thrusters: bool,
}

impl LinearModel for CwhModel {
    fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let n = MEAN_MOTION;
        #[rustfmt::skip]
        let a = DMatrix::from_row_slice(6, 6, &[
            0.0,         0.0, 0.0,      1.0,     0.0, 0.0,
            0.0,         0.0, 0.0,      0.0,     1.0, 0.0,
            0.0,         0.0, 0.0,      0.0,     0.0, 1.0,
            3.0 * n * n, 0.0, 0.0,      0.0, 2.0 * n, 0.0,
            0.0,         0.0, 0.0, -2.0 * n,     0.0, 0.0,
            0.0,         0.0, -n * n,   0.0,     0.0, 0.0,
        ]);

        let mut b = DMatrix::zeros(6, if self.thrusters { 3 } else { 0 });
        if self.thrusters {
            for i in 0..3 {
                b[(i + 3, i)] = 1.0 / MASS;
            }
        }
        (a, b)
    }
}
