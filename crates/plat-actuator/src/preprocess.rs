//! Action preprocessors: one raw action element → one actuator command.
//!
//! Three variants form a closed set:
//!
//! | Kind                 | Input                 | Output                                  |
//! |----------------------|-----------------------|-----------------------------------------|
//! | `PassThrough`        | continuous value      | the value, unmodified                   |
//! | `ContinuousRescale`  | continuous in [-1, 1] | post-activation, then rescale to bounds |
//! | `DiscreteMap`        | index                 | `values[index]` from an even grid       |

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use serde::Deserialize;

use crate::{ActionSpace, ActuatorError, ActuatorResult, Bounds};

// ── ActionValue ───────────────────────────────────────────────────────────────

/// One element of an external action vector.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ActionValue {
    Continuous(f64),
    /// Index into a discretized actuator's value table.
    Index(usize),
}

impl From<f64> for ActionValue {
    fn from(v: f64) -> Self {
        ActionValue::Continuous(v)
    }
}

impl From<usize> for ActionValue {
    fn from(i: usize) -> Self {
        ActionValue::Index(i)
    }
}

// ── PostActivation ────────────────────────────────────────────────────────────

/// Squashing applied to a raw continuous action before rescaling.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostActivation {
    /// Hard clip to [-1, 1].
    #[default]
    Clip,
    /// Hyperbolic tangent.
    Tanh,
}

impl PostActivation {
    #[inline]
    pub fn activate(self, x: f64) -> f64 {
        match self {
            PostActivation::Clip => x.clamp(-1.0, 1.0),
            PostActivation::Tanh => x.tanh(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostActivation::Clip => "clip",
            PostActivation::Tanh => "tanh",
        }
    }
}

impl FromStr for PostActivation {
    type Err = ActuatorError;
    fn from_str(s: &str) -> ActuatorResult<Self> {
        match s {
            "clip" => Ok(PostActivation::Clip),
            "tanh" => Ok(PostActivation::Tanh),
            other  => Err(ActuatorError::InvalidPostActivation(other.to_string())),
        }
    }
}

impl fmt::Display for PostActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ActionPreprocessor ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum PreprocessKind {
    /// `bounds` only shapes the advertised action space; values are not clipped.
    PassThrough { bounds: Option<Bounds> },
    ContinuousRescale {
        bounds:          Bounds,
        zero_centered:   bool,
        post_activation: PostActivation,
    },
    DiscreteMap { values: Vec<f64> },
}

/// Converts one raw action element into the command for a fixed actuator.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionPreprocessor {
    actuator: String,
    kind:     PreprocessKind,
}

impl ActionPreprocessor {
    pub fn pass_through(actuator: impl Into<String>, bounds: Option<Bounds>) -> Self {
        Self { actuator: actuator.into(), kind: PreprocessKind::PassThrough { bounds } }
    }

    /// # Errors
    ///
    /// `ZeroCenteredBounds` if `zero_centered` and the bounds do not include 0.
    pub fn continuous_rescale(
        actuator:        impl Into<String>,
        bounds:          Bounds,
        zero_centered:   bool,
        post_activation: PostActivation,
    ) -> ActuatorResult<Self> {
        let actuator = actuator.into();
        if zero_centered && !bounds.straddles_zero() {
            return Err(ActuatorError::ZeroCenteredBounds {
                actuator,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self {
            actuator,
            kind: PreprocessKind::ContinuousRescale { bounds, zero_centered, post_activation },
        })
    }

    /// Evenly spaced table of `points` values spanning `[bounds.min, bounds.max]`.
    ///
    /// Both endpoints are exact; a single point yields `[bounds.min]`.
    pub fn discrete_map(
        actuator: impl Into<String>,
        bounds:   Bounds,
        points:   usize,
    ) -> ActuatorResult<Self> {
        let actuator = actuator.into();
        if points == 0 {
            return Err(ActuatorError::NoPoints(actuator));
        }
        let values = if points == 1 {
            vec![bounds.min]
        } else {
            let span = bounds.max - bounds.min;
            let last = points - 1;
            (0..points)
                .map(|i| if i == last { bounds.max } else { bounds.min + span * i as f64 / last as f64 })
                .collect()
        };
        Ok(Self { actuator, kind: PreprocessKind::DiscreteMap { values } })
    }

    #[inline]
    pub fn actuator(&self) -> &str {
        &self.actuator
    }

    #[inline]
    pub fn kind(&self) -> &PreprocessKind {
        &self.kind
    }

    /// Sub-space of the action vector this preprocessor consumes.
    pub fn action_space(&self) -> ActionSpace {
        match &self.kind {
            PreprocessKind::PassThrough { bounds: Some(b) } => ActionSpace::Box { low: b.min, high: b.max },
            PreprocessKind::PassThrough { bounds: None } => {
                ActionSpace::Box { low: f64::NEG_INFINITY, high: f64::INFINITY }
            }
            PreprocessKind::ContinuousRescale { .. } => ActionSpace::Box { low: -1.0, high: 1.0 },
            PreprocessKind::DiscreteMap { values } => ActionSpace::Discrete(values.len()),
        }
    }

    /// Convert a raw action element into a physical command.
    pub fn preprocess(&self, action: ActionValue) -> ActuatorResult<f64> {
        match (&self.kind, action) {
            (PreprocessKind::PassThrough { .. }, ActionValue::Continuous(v)) => Ok(v),

            (
                PreprocessKind::ContinuousRescale { bounds, zero_centered, post_activation },
                ActionValue::Continuous(v),
            ) => {
                let a = post_activation.activate(v);
                let scaled = if *zero_centered {
                    // Each half scales independently so ±1 reach their own extreme.
                    if a < 0.0 { -bounds.min * a } else { bounds.max * a }
                } else {
                    bounds.min + (a + 1.0) * (bounds.max - bounds.min) / 2.0
                };
                Ok(scaled)
            }

            (PreprocessKind::DiscreteMap { values }, ActionValue::Index(i)) => {
                values.get(i).copied().ok_or_else(|| ActuatorError::IndexOutOfRange {
                    actuator: self.actuator.clone(),
                    index:    i,
                    len:      values.len(),
                })
            }

            (PreprocessKind::DiscreteMap { .. }, ActionValue::Continuous(_)) => {
                Err(ActuatorError::ActionKindMismatch {
                    actuator: self.actuator.clone(),
                    expected: "index",
                })
            }

            (_, ActionValue::Index(_)) => Err(ActuatorError::ActionKindMismatch {
                actuator: self.actuator.clone(),
                expected: "continuous",
            }),
        }
    }

    /// Preprocess and pair the command with this preprocessor's actuator.
    pub fn apply(&self, action: ActionValue) -> ActuatorResult<(&str, DVector<f64>)> {
        let command = self.preprocess(action)?;
        Ok((&self.actuator, DVector::from_element(1, command)))
    }
}
