//! Integration method selection.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::DynamicsError;

/// Closed set of integration methods.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Deserialize)]
pub enum IntegrationMethod {
    /// `x' = x + h·dx(0, x, u)`.  One derivative evaluation per step.
    #[default]
    Euler,
    /// Adaptive Dormand–Prince 5(4); the last sample at `t = h` is kept.
    #[serde(rename = "RK45")]
    Rk45,
}

impl IntegrationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            IntegrationMethod::Euler => "Euler",
            IntegrationMethod::Rk45  => "RK45",
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = DynamicsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Euler" => Ok(IntegrationMethod::Euler),
            "RK45"  => Ok(IntegrationMethod::Rk45),
            other   => Err(DynamicsError::InvalidIntegrationMethod(other.to_string())),
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error control for [`IntegrationMethod::Rk45`].
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rk45Tolerances {
    pub rtol:      f64,
    pub atol:      f64,
    /// Internal steps allowed per call before giving up.
    pub max_steps: usize,
}

impl Default for Rk45Tolerances {
    fn default() -> Self {
        Self { rtol: 1e-3, atol: 1e-6, max_steps: 10_000 }
    }
}
