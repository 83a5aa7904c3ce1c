//! Typed controller configuration and its JSON loader.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "actuators": [
//!     { "name": "thrust_x", "bounds": [-1.0, 1.0], "zero_centered": true },
//!     { "name": "thrust_y", "post_activation": "tanh" },
//!     { "name": "thrust_z", "space": "discrete", "points": 5 },
//!     { "name": "trim",     "rescale": false }
//!   ]
//! }
//! ```
//!
//! Omitted optional keys take their defaults: `rescale = true`,
//! `zero_centered = false`, `post_activation = "clip"`.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use plat_actuator::{ControlSpace, PostActivation};

use crate::{ConfigError, ConfigResult};

/// Every key an actuator config entry may carry.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "name",
    "space",
    "bounds",
    "points",
    "rescale",
    "zero_centered",
    "post_activation",
];

// ── Config structs ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// One entry per consumed action element, in action-vector order.
    pub actuators: Vec<ActuatorConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuatorConfig {
    pub name:            String,
    #[serde(default)]
    pub space:           Option<ControlSpace>,
    /// Replaces the actuator's own bounds when present.
    #[serde(default)]
    pub bounds:          Option<[f64; 2]>,
    #[serde(default)]
    pub points:          Option<usize>,
    #[serde(default)]
    pub rescale:         Option<bool>,
    #[serde(default)]
    pub zero_centered:   Option<bool>,
    #[serde(default)]
    pub post_activation: Option<PostActivation>,
}

/// How one action element reaches a continuous actuator.  A closed set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionMapping {
    ContinuousRescale {
        zero_centered:   bool,
        post_activation: PostActivation,
    },
    ContinuousPassThrough,
    ContinuousDiscretized { points: usize },
}

impl ActuatorConfig {
    /// Shorthand for a default (rescaled, clipped) entry.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Resolve the entry into exactly one [`ActionMapping`].
    ///
    /// # Errors
    ///
    /// `ConfigConflict` when keys that belong to different mappings are mixed.
    pub fn mapping(&self) -> ConfigResult<ActionMapping> {
        let conflict = |reason: &str| ConfigError::ConfigConflict {
            actuator: self.name.clone(),
            reason:   reason.to_string(),
        };

        match self.space.unwrap_or(ControlSpace::Continuous) {
            ControlSpace::Continuous => {
                if self.points.is_some() {
                    return Err(conflict("points requires space = \"discrete\""));
                }
                if self.rescale.unwrap_or(true) {
                    Ok(ActionMapping::ContinuousRescale {
                        zero_centered:   self.zero_centered.unwrap_or(false),
                        post_activation: self.post_activation.unwrap_or_default(),
                    })
                } else if self.zero_centered == Some(true) {
                    Err(conflict("zero_centered is not supported without rescale"))
                } else if self.post_activation.is_some() {
                    Err(conflict("post_activation is not supported without rescale"))
                } else {
                    Ok(ActionMapping::ContinuousPassThrough)
                }
            }
            ControlSpace::Discrete => {
                if self.rescale.is_some() || self.zero_centered.is_some() || self.post_activation.is_some() {
                    return Err(conflict(
                        "rescale, zero_centered and post_activation only apply to continuous spaces",
                    ));
                }
                match self.points {
                    None | Some(0) => Err(conflict("space = \"discrete\" requires points >= 1")),
                    Some(points) => Ok(ActionMapping::ContinuousDiscretized { points }),
                }
            }
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ControllerConfig {
    pub fn new(actuators: Vec<ActuatorConfig>) -> Self {
        Self { actuators }
    }

    /// Load a controller config from a JSON file.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Validate keys and enumerated values, then deserialize.
    ///
    /// The explicit pass turns what serde would report as a generic parse
    /// failure into `InvalidConfigKey` / `InvalidSpace` /
    /// `InvalidPostActivation` naming the offending actuator.
    pub fn from_json_value(value: Value) -> ConfigResult<Self> {
        validate_value(&value)?;
        serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn validate_value(value: &Value) -> ConfigResult<()> {
    let Some(root) = value.as_object() else {
        return Err(ConfigError::Parse("controller config must be a JSON object".into()));
    };
    if let Some(key) = root.keys().find(|k| k.as_str() != "actuators") {
        return Err(ConfigError::InvalidConfigKey {
            actuator: String::new(),
            key:      key.clone(),
            allowed:  &["actuators"],
        });
    }
    let Some(entries) = root.get("actuators").and_then(Value::as_array) else {
        return Err(ConfigError::Parse("\"actuators\" must be an array".into()));
    };

    for entry in entries {
        let Some(obj) = entry.as_object() else {
            return Err(ConfigError::Parse("actuator config entries must be objects".into()));
        };
        let actuator = obj.get("name").and_then(Value::as_str).unwrap_or_default().to_string();

        if let Some(key) = obj.keys().find(|k| !RECOGNIZED_KEYS.contains(&k.as_str())) {
            return Err(ConfigError::InvalidConfigKey {
                actuator,
                key:     key.clone(),
                allowed: RECOGNIZED_KEYS,
            });
        }
        if let Some(space) = obj.get("space").and_then(Value::as_str) {
            if !matches!(space, "continuous" | "discrete") {
                return Err(ConfigError::InvalidSpace { actuator, value: space.to_string() });
            }
        }
        if let Some(post) = obj.get("post_activation").and_then(Value::as_str) {
            if post.parse::<PostActivation>().is_err() {
                return Err(ConfigError::InvalidPostActivation { actuator, value: post.to_string() });
            }
        }
    }
    Ok(())
}
