use plat_actuator::ActuatorError;
use thiserror::Error;

/// Configuration failures.  All of these surface at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("actuator {0:?} not found in the platform's actuator set")]
    ActuatorNotFound(String),

    #[error("action config for actuator {actuator:?} has invalid entry {key:?}; must be one of {allowed:?}")]
    InvalidConfigKey {
        actuator: String,
        key:      String,
        allowed:  &'static [&'static str],
    },

    #[error("action config for actuator {actuator:?} is inconsistent: {reason}")]
    ConfigConflict {
        actuator: String,
        reason:   String,
    },

    #[error("action config for actuator {actuator:?} has invalid space {value:?}; should be \"continuous\" or \"discrete\"")]
    InvalidSpace {
        actuator: String,
        value:    String,
    },

    #[error("action config for actuator {actuator:?} has invalid post_activation {value:?}; should be \"clip\" or \"tanh\"")]
    InvalidPostActivation {
        actuator: String,
        value:    String,
    },

    #[error("actuator {actuator:?}: {what} is not implemented")]
    Unimplemented {
        actuator: String,
        what:     &'static str,
    },

    #[error("controller config parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Actuator(#[from] ActuatorError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-step failures while turning an action into an actuation.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{what} length {got} does not match expected length {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{controller} controller cannot consume {action} actions")]
    UnsupportedAction {
        controller: &'static str,
        action:     &'static str,
    },

    #[error(transparent)]
    Actuator(#[from] ActuatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ControlResult<T> = Result<T, ControlError>;
