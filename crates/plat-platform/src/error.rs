use thiserror::Error;

use plat_actuator::ActuatorError;
use plat_control::{ConfigError, ControlError};
use plat_dynamics::DynamicsError;

use crate::StepPhase;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state vector length {got} does not match layout length {expected}")]
    ShapeMismatch { expected: usize, got: usize },
}

pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum RtaError {
    #[error("RTA setup failed: {0}")]
    Setup(String),

    #[error("RTA filter failed: {0}")]
    Filter(String),

    #[error("no RTA filter registered under {0:?}")]
    UnknownFilter(String),

    #[error("invalid config for RTA filter {filter:?}: {reason}")]
    InvalidConfig { filter: String, reason: String },
}

pub type RtaResult<T> = Result<T, RtaError>;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Actuator(#[from] ActuatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Dynamics(#[from] DynamicsError),

    #[error(transparent)]
    Rta(#[from] RtaError),

    #[error("platform {platform:?}: {operation} is not allowed in phase {phase}")]
    OutOfPhase {
        platform:  String,
        phase:     StepPhase,
        operation: &'static str,
    },

    #[error("platform {platform:?}: {what} length {got} does not match expected length {expected}")]
    ShapeMismatch {
        platform: String,
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("platform {platform:?} is missing its {component}")]
    MissingComponent {
        platform:  String,
        component: &'static str,
    },
}

pub type PlatformResult<T> = Result<T, PlatformError>;
