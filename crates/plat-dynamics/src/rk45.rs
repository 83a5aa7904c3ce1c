//! Adaptive Dormand–Prince 5(4) integrator.
//!
//! Error control and initial-step selection follow the conventional
//! explicit Runge–Kutta scheme: RMS error norm scaled by
//! `atol + rtol·max(|y|, |y_new|)`, step factor `0.9·err^(-1/5)` clamped to
//! `[0.2, 10]`, first-same-as-last derivative reuse.

use nalgebra::DVector;

use crate::{DynamicsError, DynamicsResult, Rk45Tolerances};

const C: [f64; 6] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

const A: [[f64; 5]; 6] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0, 0.0],
    [9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0],
];

/// Fifth-order weights.
const B: [f64; 6] = [35.0 / 384.0, 0.0, 500.0 / 1113.0, 125.0 / 192.0, -2187.0 / 6784.0, 11.0 / 84.0];

/// Fifth minus fourth-order weights; last entry multiplies the FSAL stage.
const E: [f64; 7] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

/// Integrate `dy/dt = f(t, y)` from `t0` to `t_end` and return `y(t_end)`.
///
/// # Errors
///
/// Propagates errors from `f`; `StepLimitExceeded` after
/// `tolerances.max_steps` attempts; `StepSizeUnderflow` when the step
/// collapses below floating-point resolution (typically divergence).
pub fn integrate<F>(
    mut f:      F,
    t0:         f64,
    t_end:      f64,
    y0:         &DVector<f64>,
    tolerances: &Rk45Tolerances,
) -> DynamicsResult<DVector<f64>>
where
    F: FnMut(f64, &DVector<f64>) -> DynamicsResult<DVector<f64>>,
{
    let span = t_end - t0;
    if span == 0.0 || y0.is_empty() {
        return Ok(y0.clone());
    }

    let mut t = t0;
    let mut y = y0.clone();
    let mut k1 = derivative(&mut f, t, &y)?;
    let mut h = initial_step(&mut f, t, &y, &k1, span, tolerances)?;

    let mut attempts = 0usize;
    while t < t_end {
        if attempts >= tolerances.max_steps {
            return Err(DynamicsError::StepLimitExceeded { max_steps: tolerances.max_steps, t });
        }
        attempts += 1;

        let min_step = 10.0 * f64::EPSILON * t.abs().max(f64::MIN_POSITIVE);
        if h < min_step {
            return Err(DynamicsError::StepSizeUnderflow { t });
        }
        let last = t + h >= t_end;
        if last {
            h = t_end - t;
        }

        let mut k: Vec<DVector<f64>> = Vec::with_capacity(7);
        k.push(k1.clone());
        for stage in 1..6 {
            let mut y_stage = y.clone();
            for (j, kj) in k.iter().enumerate().take(stage) {
                if A[stage][j] != 0.0 {
                    y_stage.axpy(h * A[stage][j], kj, 1.0);
                }
            }
            k.push(derivative(&mut f, t + C[stage] * h, &y_stage)?);
        }

        let mut y_new = y.clone();
        for (b, kj) in B.iter().zip(&k) {
            if *b != 0.0 {
                y_new.axpy(h * b, kj, 1.0);
            }
        }

        if y_new.iter().any(|v| !v.is_finite()) {
            h *= MIN_FACTOR;
            continue;
        }

        let k7 = derivative(&mut f, t + h, &y_new)?;
        k.push(k7);

        let mut err = DVector::zeros(y.len());
        for (e, kj) in E.iter().zip(&k) {
            if *e != 0.0 {
                err.axpy(h * e, kj, 1.0);
            }
        }
        let err_norm = rms_scaled(&err, &y, &y_new, tolerances);

        if err_norm <= 1.0 {
            t = if last { t_end } else { t + h };
            y = y_new;
            k1 = k.swap_remove(6);
            let factor = if err_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err_norm.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
            };
            h *= factor;
        } else {
            h *= (SAFETY * err_norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR);
        }
    }

    Ok(y)
}

fn derivative<F>(f: &mut F, t: f64, y: &DVector<f64>) -> DynamicsResult<DVector<f64>>
where
    F: FnMut(f64, &DVector<f64>) -> DynamicsResult<DVector<f64>>,
{
    let dy = f(t, y)?;
    if dy.len() != y.len() {
        return Err(DynamicsError::ShapeMismatch {
            expected: y.len(),
            got:      dy.len(),
            what:     "state derivative",
        });
    }
    Ok(dy)
}

fn rms_scaled(err: &DVector<f64>, y: &DVector<f64>, y_new: &DVector<f64>, tol: &Rk45Tolerances) -> f64 {
    let n = err.len() as f64;
    let sum: f64 = err
        .iter()
        .zip(y.iter().zip(y_new.iter()))
        .map(|(e, (a, b))| {
            let scale = tol.atol + a.abs().max(b.abs()) * tol.rtol;
            (e / scale).powi(2)
        })
        .sum();
    (sum / n).sqrt()
}

fn rms_over(v: &DVector<f64>, scale: &DVector<f64>) -> f64 {
    let n = v.len() as f64;
    (v.iter().zip(scale.iter()).map(|(x, s)| (x / s).powi(2)).sum::<f64>() / n).sqrt()
}

/// Empirical first-step guess for a fourth-order error estimator.
fn initial_step<F>(
    f:    &mut F,
    t0:   f64,
    y0:   &DVector<f64>,
    f0:   &DVector<f64>,
    span: f64,
    tol:  &Rk45Tolerances,
) -> DynamicsResult<f64>
where
    F: FnMut(f64, &DVector<f64>) -> DynamicsResult<DVector<f64>>,
{
    let scale = y0.map(|v| tol.atol + v.abs() * tol.rtol);
    let d0 = rms_over(y0, &scale);
    let d1 = rms_over(f0, &scale);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 }.min(span);

    let y1 = y0 + f0 * h0;
    let f1 = derivative(f, t0 + h0, &y1)?;
    let d2 = rms_over(&(f1 - f0), &scale) / h0;

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / 5.0)
    };

    Ok((100.0 * h0).min(h1).min(span))
}
