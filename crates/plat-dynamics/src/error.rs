use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynamicsError {
    #[error("invalid integration method {0:?}: expected \"Euler\" or \"RK45\"")]
    InvalidIntegrationMethod(String),

    #[error("{what} length {got} does not match expected length {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("step size {0} must be finite and non-negative")]
    InvalidStepSize(f64),

    #[error("integration produced a non-finite state at t = {t}")]
    NonFinite { t: f64 },

    #[error("RK45 exceeded {max_steps} internal steps at t = {t}")]
    StepLimitExceeded { max_steps: usize, t: f64 },

    #[error("RK45 step size underflow at t = {t}")]
    StepSizeUnderflow { t: f64 },
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;
