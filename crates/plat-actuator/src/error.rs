use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("actuator {0:?} is not part of this actuator set")]
    UnknownActuator(String),

    #[error("actuator name {0:?} is declared more than once")]
    DuplicateActuator(String),

    #[error("actuator {0:?} has an empty default command")]
    EmptyDefault(String),

    #[error("{what} length {got} does not match expected length {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("action index {index} out of range for actuator {actuator:?} with {len} values")]
    IndexOutOfRange {
        actuator: String,
        index:    usize,
        len:      usize,
    },

    #[error("actuator {actuator:?} expects a {expected} action value")]
    ActionKindMismatch {
        actuator: String,
        expected: &'static str,
    },

    #[error("invalid bounds [{min}, {max}]: min must not exceed max")]
    InvalidBounds { min: f64, max: f64 },

    #[error("bounds [{min}, {max}] of actuator {actuator:?} must include 0 to use zero_centered")]
    ZeroCenteredBounds {
        actuator: String,
        min:      f64,
        max:      f64,
    },

    #[error("invalid post_activation {0:?}: must be \"clip\" or \"tanh\"")]
    InvalidPostActivation(String),

    #[error("discretized actuator {0:?} needs at least one point")]
    NoPoints(String),
}

pub type ActuatorResult<T> = Result<T, ActuatorError>;
