use nalgebra::{DMatrix, DVector};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn decay() -> FnSystem<impl FnMut(f64, &DVector<f64>, &DVector<f64>) -> DVector<f64>> {
    FnSystem(|_t: f64, x: &DVector<f64>, _u: &DVector<f64>| -x)
}

struct DoubleIntegrator;

impl LinearModel for DoubleIntegrator {
    fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        let b = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        (a, b)
    }
}

/// `A = -k` where `k` tracks `|x|`; counts hook calls.
struct StateScaled {
    updates: usize,
}

impl LinearModel for StateScaled {
    fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        (DMatrix::from_element(1, 1, 0.0), DMatrix::from_element(1, 1, 0.0))
    }

    fn update_matrices(&mut self, state: &DVector<f64>, a: &mut DMatrix<f64>, _b: &mut DMatrix<f64>) {
        self.updates += 1;
        a[(0, 0)] = -state[0].abs();
    }
}

// ── Method ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod method {
    use super::*;

    #[test]
    fn parses_exact_names() {
        assert_eq!("Euler".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::Euler);
        assert_eq!("RK45".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::Rk45);
    }

    #[test]
    fn rejects_other_names() {
        for bad in ["euler", "rk45", "RK4", ""] {
            let err = bad.parse::<IntegrationMethod>().unwrap_err();
            assert!(matches!(err, DynamicsError::InvalidIntegrationMethod(ref s) if s == bad));
        }
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(IntegrationMethod::Rk45.to_string(), "RK45");
        assert_eq!(IntegrationMethod::default(), IntegrationMethod::Euler);
    }

    #[test]
    fn tolerance_defaults() {
        let t = Rk45Tolerances::default();
        assert_eq!((t.rtol, t.atol, t.max_steps), (1e-3, 1e-6, 10_000));
    }
}

// ── Ode ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ode {
    use super::*;

    #[test]
    fn euler_single_step() {
        let mut dyn_ = OdeDynamics::new(decay(), IntegrationMethod::Euler);
        let next = dyn_.step(0.1, &DVector::from_element(1, 1.0), &DVector::zeros(0)).unwrap();
        assert!((next[0] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn rk45_tracks_exponential() {
        let mut dyn_ = OdeDynamics::new(decay(), IntegrationMethod::Rk45);
        let x0 = DVector::from_vec(vec![1.0, 2.0]);
        let next = dyn_.step(1.0, &x0, &DVector::zeros(0)).unwrap();
        let e = (-1.0f64).exp();
        assert!((next[0] - e).abs() < 1e-3);
        assert!((next[1] - 2.0 * e).abs() < 2e-3);
    }

    #[test]
    fn rk45_tighter_tolerance_is_closer() {
        let tight = Rk45Tolerances { rtol: 1e-9, atol: 1e-12, ..Default::default() };
        let mut dyn_ = OdeDynamics::new(decay(), IntegrationMethod::Rk45).with_tolerances(tight);
        let next = dyn_.step(2.0, &DVector::from_element(1, 1.0), &DVector::zeros(0)).unwrap();
        assert!((next[0] - (-2.0f64).exp()).abs() < 1e-7);
    }

    #[test]
    fn zero_step_returns_input() {
        for method in [IntegrationMethod::Euler, IntegrationMethod::Rk45] {
            let mut dyn_ = OdeDynamics::new(decay(), method);
            let x0 = DVector::from_element(1, 3.0);
            assert_eq!(dyn_.step(0.0, &x0, &DVector::zeros(0)).unwrap(), x0);
        }
    }

    #[test]
    fn invalid_step_size_rejected() {
        let mut dyn_ = OdeDynamics::new(decay(), IntegrationMethod::Euler);
        let x0 = DVector::from_element(1, 1.0);
        for h in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                dyn_.step(h, &x0, &DVector::zeros(0)),
                Err(DynamicsError::InvalidStepSize(_))
            ));
        }
    }

    #[test]
    fn step_limit_reported() {
        let tol = Rk45Tolerances { max_steps: 1, rtol: 1e-12, atol: 1e-14 };
        let mut dyn_ = OdeDynamics::new(decay(), IntegrationMethod::Rk45).with_tolerances(tol);
        let err = dyn_.step(100.0, &DVector::from_element(1, 1.0), &DVector::zeros(0)).unwrap_err();
        assert!(matches!(err, DynamicsError::StepLimitExceeded { max_steps: 1, .. }));
    }

    #[test]
    fn method_by_name() {
        assert!(OdeDynamics::with_method_name(decay(), "RK45").is_ok());
        assert!(OdeDynamics::with_method_name(decay(), "Heun").is_err());
    }
}

// ── Linear ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod linear {
    use super::*;

    #[test]
    fn double_integrator_euler() {
        let ode = LinearOde::new(DoubleIntegrator).unwrap();
        let mut dyn_: LinearDynamics<_> = OdeDynamics::new(ode, IntegrationMethod::Euler);
        let x = DVector::from_vec(vec![0.0, 1.0]);
        let u = DVector::from_element(1, 2.0);
        let next = dyn_.step(0.5, &x, &u).unwrap();
        // pos += 0.5·1, vel += 0.5·2
        assert!((next[0] - 0.5).abs() < 1e-12);
        assert!((next[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn double_integrator_rk45_exact() {
        let ode = LinearOde::new(DoubleIntegrator).unwrap();
        let mut dyn_ = OdeDynamics::new(ode, IntegrationMethod::Rk45);
        let x = DVector::from_vec(vec![0.0, 0.0]);
        let u = DVector::from_element(1, 2.0);
        let next = dyn_.step(1.0, &x, &u).unwrap();
        // constant acceleration: pos = t², vel = 2t
        assert!((next[0] - 1.0).abs() < 1e-6);
        assert!((next[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn update_hook_runs_each_evaluation() {
        let ode = LinearOde::new(StateScaled { updates: 0 }).unwrap();
        let mut dyn_ = OdeDynamics::new(ode, IntegrationMethod::Euler);
        let next = dyn_.step(0.1, &DVector::from_element(1, 2.0), &DVector::zeros(1)).unwrap();
        // A = -2 → x' = 2 + 0.1·(-4)
        assert!((next[0] - 1.6).abs() < 1e-12);
        assert_eq!(dyn_.system().model().updates, 1);
        assert_eq!(dyn_.system().a()[(0, 0)], -2.0);
    }

    #[test]
    fn rejects_non_square_a() {
        struct Bad;
        impl LinearModel for Bad {
            fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
                (DMatrix::zeros(2, 3), DMatrix::zeros(2, 1))
            }
        }
        assert!(matches!(LinearOde::new(Bad), Err(DynamicsError::ShapeMismatch { .. })));
    }

    #[test]
    fn rejects_wrong_control_len() {
        let ode = LinearOde::new(DoubleIntegrator).unwrap();
        let mut dyn_ = OdeDynamics::new(ode, IntegrationMethod::Euler);
        let err = dyn_.step(0.1, &DVector::zeros(2), &DVector::zeros(3)).unwrap_err();
        assert!(matches!(err, DynamicsError::ShapeMismatch { what: "control", expected: 1, got: 3 }));
    }

    #[test]
    fn boxed_dynamics_dispatch() {
        let ode = LinearOde::new(DoubleIntegrator).unwrap();
        let mut boxed: Box<dyn Dynamics> = Box::new(OdeDynamics::new(ode, IntegrationMethod::Euler));
        let next = boxed.step(1.0, &DVector::from_vec(vec![1.0, 0.0]), &DVector::zeros(1)).unwrap();
        assert_eq!(next, DVector::from_vec(vec![1.0, 0.0]));
    }
}
