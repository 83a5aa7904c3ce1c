//! Serializable per-platform diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use plat_actuator::Actuation;

/// Controller bookkeeping for the last computed step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ControllerInfo {
    /// Pre-filter actuation, keyed by actuator name.
    pub actuation:         BTreeMap<String, Vec<f64>>,
    /// Post-filter control vector.
    pub control:           Vec<f64>,
    pub untrimmed_control: Vec<f64>,
}

impl ControllerInfo {
    pub(crate) fn from_parts(actuation: &Actuation, control: &[f64], untrimmed: &[f64]) -> Self {
        Self {
            actuation:         actuation
                .iter()
                .map(|(name, command)| (name.to_string(), command.as_slice().to_vec()))
                .collect(),
            control:           control.to_vec(),
            untrimmed_control: untrimmed.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlatformInfo {
    pub name:       String,
    pub x:          f64,
    pub y:          f64,
    pub z:          f64,
    pub controller: ControllerInfo,
    /// Diagnostic payload of the attached safety filter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rta:        Option<Value>,
}

impl PlatformInfo {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
