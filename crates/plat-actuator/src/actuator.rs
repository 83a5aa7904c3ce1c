//! A single control channel.

use std::fmt;

use nalgebra::DVector;
use serde::Deserialize;

use crate::{ActuatorError, ActuatorResult};

/// The kind of values an actuator accepts.  A closed set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSpace {
    Continuous,
    Discrete,
}

impl ControlSpace {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlSpace::Continuous => "continuous",
            ControlSpace::Discrete   => "discrete",
        }
    }
}

impl fmt::Display for ControlSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval `[min, max]` of physical commands.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Fails if `min > max` or either end is NaN.
    pub fn new(min: f64, max: f64) -> ActuatorResult<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ActuatorError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// `true` when `min <= 0 <= max`.
    #[inline]
    pub fn straddles_zero(&self) -> bool {
        self.min <= 0.0 && self.max >= 0.0
    }
}

impl TryFrom<[f64; 2]> for Bounds {
    type Error = ActuatorError;
    fn try_from([min, max]: [f64; 2]) -> ActuatorResult<Self> {
        Bounds::new(min, max)
    }
}

/// A named control channel with a default command.
///
/// The default may be wider than one element; its length is the channel's
/// width in the control vector.  Only continuous actuators carry bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Actuator {
    name:    String,
    space:   ControlSpace,
    bounds:  Option<Bounds>,
    default: DVector<f64>,
}

impl Actuator {
    pub fn continuous(
        name:    impl Into<String>,
        bounds:  Bounds,
        default: &[f64],
    ) -> ActuatorResult<Self> {
        Self::build(name.into(), ControlSpace::Continuous, Some(bounds), default)
    }

    /// Discrete actuators are declared here but not yet accepted by the
    /// agent controller.
    pub fn discrete(name: impl Into<String>, default: &[f64]) -> ActuatorResult<Self> {
        Self::build(name.into(), ControlSpace::Discrete, None, default)
    }

    fn build(
        name:    String,
        space:   ControlSpace,
        bounds:  Option<Bounds>,
        default: &[f64],
    ) -> ActuatorResult<Self> {
        if default.is_empty() {
            return Err(ActuatorError::EmptyDefault(name));
        }
        Ok(Self {
            name,
            space,
            bounds,
            default: DVector::from_column_slice(default),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn space(&self) -> ControlSpace {
        self.space
    }

    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Replace the bounds of a continuous actuator.  Only the controller
    /// configuration does this, once, at construction.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if self.space == ControlSpace::Continuous {
            self.bounds = Some(bounds);
        }
    }

    /// The default command, used whenever no actuation entry is supplied.
    #[inline]
    pub fn default_value(&self) -> &DVector<f64> {
        &self.default
    }

    /// Number of control-vector slots this actuator occupies.
    #[inline]
    pub fn width(&self) -> usize {
        self.default.len()
    }
}
