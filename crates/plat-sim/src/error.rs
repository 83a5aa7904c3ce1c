use plat_core::{CoreError, PlatformId};
use plat_platform::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("platform {id}: {source}")]
    Platform {
        id:     PlatformId,
        #[source]
        source: PlatformError,
    },

    #[error("{0} is not in the cohort")]
    UnknownPlatform(PlatformId),

    #[error("a platform named {0:?} is already in the cohort")]
    DuplicatePlatform(String),

    #[error("{operation} is not allowed while the cohort is {phase}")]
    InterleavedStep {
        operation: &'static str,
        phase:     &'static str,
    },

    #[error("{got} actions supplied for {expected} root platforms")]
    ActionCountMismatch { expected: usize, got: usize },

    #[error("step size {0} must be finite and positive")]
    InvalidStepSize(f64),

    #[error("step size {got} differs from {expected} already used this step")]
    StepSizeMismatch { expected: f64, got: f64 },
}

pub type SimResult<T> = Result<T, SimError>;

pub(crate) trait PlatformContext<T> {
    fn for_platform(self, id: PlatformId) -> SimResult<T>;
}

impl<T> PlatformContext<T> for Result<T, PlatformError> {
    fn for_platform(self, id: PlatformId) -> SimResult<T> {
        self.map_err(|source| SimError::Platform { id, source })
    }
}
