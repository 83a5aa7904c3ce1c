//! Controllers: external action → named actuation.

use tracing::{debug, trace};

use plat_actuator::{
    ActionPreprocessor, ActionSpace, ActionValue, Actuation, ActuatorSet, Bounds, ControlSpace,
};

use crate::{ActionMapping, ConfigError, ConfigResult, ControlError, ControlResult, ControllerConfig};

// ── Action ────────────────────────────────────────────────────────────────────

/// An external action handed to a platform for one step.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// One element per configured actuator, in config order.  `None` means
    /// "no control" for that channel, so its default is used.
    Elements(Vec<Option<ActionValue>>),
    /// Ready-made actuation, consumed by the pass-through controller.
    Actuation(Actuation),
}

impl Action {
    /// All-continuous action vector with every element present.
    pub fn continuous(values: &[f64]) -> Self {
        Action::Elements(values.iter().map(|&v| Some(ActionValue::Continuous(v))).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Elements(_)  => "element-vector",
            Action::Actuation(_) => "actuation",
        }
    }
}

impl From<Vec<ActionValue>> for Action {
    fn from(values: Vec<ActionValue>) -> Self {
        Action::Elements(values.into_iter().map(Some).collect())
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Translates actions into actuation and advertises the accepted action space.
#[derive(Clone, Debug)]
pub enum Controller {
    /// Actions already are actuation; no action space is advertised.
    PassThrough,
    Agent(AgentController),
}

/// Ordered preprocessors, one per configured actuator, plus the composite
/// action space they consume.
#[derive(Clone, Debug)]
pub struct AgentController {
    preprocessors: Vec<ActionPreprocessor>,
    action_space:  ActionSpace,
}

impl Controller {
    pub fn pass_through() -> Self {
        Controller::PassThrough
    }

    /// Build an agent controller over `actuators`.
    ///
    /// Configured bounds replace the matching actuator's bounds in place,
    /// only once every entry has resolved.  On error the set is unchanged.
    ///
    /// # Errors
    ///
    /// - `ActuatorNotFound` for a config naming an actuator outside the set.
    /// - `ConfigConflict` for conflicting keys, a twice-configured actuator,
    ///   or an actuator wider than one channel.
    /// - `Unimplemented` for discrete-space actuators.
    /// - `Actuator(..)` for invalid bounds or zero-centering on one-sided bounds.
    pub fn agent(actuators: &mut ActuatorSet, config: &ControllerConfig) -> ConfigResult<Self> {
        let mut preprocessors: Vec<ActionPreprocessor> = Vec::with_capacity(config.actuators.len());
        let mut subspaces = Vec::with_capacity(config.actuators.len());
        let mut narrowed: Vec<(&str, Bounds)> = Vec::new();

        for entry in &config.actuators {
            let name = entry.name.as_str();
            if preprocessors.iter().any(|p| p.actuator() == name) {
                return Err(ConfigError::ConfigConflict {
                    actuator: name.to_string(),
                    reason:   "actuator is configured more than once".into(),
                });
            }

            let actuator = actuators
                .get(name)
                .ok_or_else(|| ConfigError::ActuatorNotFound(name.to_string()))?;

            if actuator.space() == ControlSpace::Discrete {
                return Err(ConfigError::Unimplemented {
                    actuator: name.to_string(),
                    what:     "discrete-space actuator control",
                });
            }
            // Preprocessors emit one command element per action element.
            if actuator.width() != 1 {
                return Err(ConfigError::ConfigConflict {
                    actuator: name.to_string(),
                    reason:   format!("agent control needs a 1-wide actuator, default has width {}", actuator.width()),
                });
            }

            let bounds = match entry.bounds {
                Some(b) => {
                    let b = Bounds::try_from(b)?;
                    narrowed.push((name, b));
                    b
                }
                None => actuator.bounds().ok_or_else(|| ConfigError::ConfigConflict {
                    actuator: name.to_string(),
                    reason:   "continuous actuator has no bounds".into(),
                })?,
            };

            let preprocessor = match entry.mapping()? {
                ActionMapping::ContinuousRescale { zero_centered, post_activation } => {
                    ActionPreprocessor::continuous_rescale(name, bounds, zero_centered, post_activation)?
                }
                ActionMapping::ContinuousPassThrough => ActionPreprocessor::pass_through(name, Some(bounds)),
                ActionMapping::ContinuousDiscretized { points } => {
                    ActionPreprocessor::discrete_map(name, bounds, points)?
                }
            };

            subspaces.push(preprocessor.action_space());
            preprocessors.push(preprocessor);
        }

        for (name, bounds) in narrowed {
            if let Some(actuator) = actuators.get_mut(name) {
                actuator.set_bounds(bounds);
            }
        }

        debug!(actuators = preprocessors.len(), "agent controller built");
        Ok(Controller::Agent(AgentController {
            preprocessors,
            action_space: ActionSpace::Tuple(subspaces),
        }))
    }

    /// Composite action space; `None` for the pass-through controller.
    pub fn action_space(&self) -> Option<&ActionSpace> {
        match self {
            Controller::PassThrough => None,
            Controller::Agent(agent) => Some(&agent.action_space),
        }
    }

    /// Preprocessors in action-consumption order (empty for pass-through).
    pub fn preprocessors(&self) -> &[ActionPreprocessor] {
        match self {
            Controller::PassThrough => &[],
            Controller::Agent(agent) => &agent.preprocessors,
        }
    }

    /// Produce the actuation for one step.  `None` yields an empty actuation.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` when the element count differs from the configured
    ///   actuator count.
    /// - `UnsupportedAction` when the action variant does not suit the
    ///   controller.
    /// - `Actuator(..)` for preprocessing failures such as an out-of-range
    ///   discrete index.
    pub fn gen_actuation(&self, action: Option<&Action>) -> ControlResult<Actuation> {
        let Some(action) = action else {
            return Ok(Actuation::new());
        };

        match (self, action) {
            (Controller::PassThrough, Action::Actuation(actuation)) => Ok(actuation.clone()),

            (Controller::Agent(agent), Action::Elements(elements)) => {
                if elements.len() != agent.preprocessors.len() {
                    return Err(ControlError::ShapeMismatch {
                        expected: agent.preprocessors.len(),
                        got:      elements.len(),
                        what:     "action vector",
                    });
                }
                let mut actuation = Actuation::new();
                for (preprocessor, element) in agent.preprocessors.iter().zip(elements) {
                    let Some(value) = element else { continue };
                    let (name, command) = preprocessor.apply(*value)?;
                    actuation.insert(name, command);
                }
                trace!(entries = actuation.len(), "actuation generated");
                Ok(actuation)
            }

            (Controller::PassThrough, other) => Err(ControlError::UnsupportedAction {
                controller: "pass-through",
                action:     other.kind(),
            }),
            (Controller::Agent(_), other) => Err(ControlError::UnsupportedAction {
                controller: "agent",
                action:     other.kind(),
            }),
        }
    }
}
