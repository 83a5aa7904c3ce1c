//! Fluent builder for constructing a [`Platform`].

use nalgebra::DVector;
use tracing::info;

use plat_actuator::{Actuation, Actuator, ActuatorSet};
use plat_control::{Controller, ControllerConfig};
use plat_dynamics::Dynamics;

use crate::{
    Platform, PlatformError, PlatformResult, PlatformView, RtaRegistry, RtaSlot, RtaSpec,
    StateLayout, StateReset, StepPhase, VectorState,
};

/// Fluent builder for [`Platform<L>`].
///
/// # Required inputs
///
/// - a name and a `L: StateLayout`
/// - a `Dynamics` implementation, via [`dynamics`](Self::dynamics)
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                  |
/// |------------------------|------------------------------------------|
/// | `.actuators(v)`        | No actuators (empty control vector)      |
/// | `.controller(cfg)`     | Pass-through controller                  |
/// | `.initial_state(r)`    | `StateReset::Build(L::Init::default())`  |
/// | `.rta(spec)`           | `RtaSpec::None`                          |
///
/// Everything is validated in [`build`](Self::build): controller config
/// errors, state shape errors and RTA setup errors all surface there.
///
/// # Example
///
/// ```rust,ignore
/// let platform = PlatformBuilder::new("deputy", Cwh3d)
///     .actuators(thrusters)
///     .controller(ControllerConfig::from_json_str(cfg)?)
///     .dynamics(LinearDynamics::new(LinearOde::new(cwh)?, IntegrationMethod::Rk45))
///     .rta(RtaSpec::named("speed_limit", json!({ "max_speed": 0.5 })))
///     .build_with(&registry)?;
/// ```
pub struct PlatformBuilder<L: StateLayout> {
    name:       String,
    layout:     L,
    actuators:  Vec<Actuator>,
    controller: Option<ControllerConfig>,
    dynamics:   Option<Box<dyn Dynamics>>,
    initial:    StateReset<L::Init>,
    rta:        RtaSpec,
}

impl<L: StateLayout> PlatformBuilder<L> {
    pub fn new(name: impl Into<String>, layout: L) -> Self {
        Self {
            name:       name.into(),
            layout,
            actuators:  Vec::new(),
            controller: None,
            dynamics:   None,
            initial:    StateReset::default(),
            rta:        RtaSpec::None,
        }
    }

    /// Declare the control channels, in control-vector order.
    pub fn actuators(mut self, actuators: Vec<Actuator>) -> Self {
        self.actuators = actuators;
        self
    }

    /// Use an agent controller built from `config`.
    pub fn controller(mut self, config: ControllerConfig) -> Self {
        self.controller = Some(config);
        self
    }

    pub fn dynamics(mut self, dynamics: impl Dynamics + 'static) -> Self {
        self.dynamics = Some(Box::new(dynamics));
        self
    }

    pub fn initial_state(mut self, initial: StateReset<L::Init>) -> Self {
        self.initial = initial;
        self
    }

    pub fn rta(mut self, rta: RtaSpec) -> Self {
        self.rta = rta;
        self
    }

    /// Build with no registry; `RtaSpec::Named` fails with `UnknownFilter`.
    pub fn build(self) -> PlatformResult<Platform<L>> {
        self.build_with(&RtaRegistry::new())
    }

    /// Validate every input and assemble the platform.  The filter's
    /// `setup` hook runs last, against the finished actuator set.
    pub fn build_with(self, registry: &RtaRegistry) -> PlatformResult<Platform<L>> {
        let dynamics = self.dynamics.ok_or_else(|| PlatformError::MissingComponent {
            platform:  self.name.clone(),
            component: "dynamics",
        })?;

        let mut actuators = ActuatorSet::new(self.actuators)?;
        let controller = match &self.controller {
            Some(config) => Controller::agent(&mut actuators, config)?,
            None => Controller::pass_through(),
        };

        let state = VectorState::new(self.layout, self.initial.clone())?;

        let mut rta = registry.resolve(self.rta)?;
        if let RtaSlot::Active(filter) = &mut rta {
            let view = PlatformView {
                name:      &self.name,
                actuators: &actuators,
                state_len: state.layout().vector_len(),
            };
            filter.setup(&view)?;
        }

        let default_control: DVector<f64> = actuators.default_control();
        info!(
            platform   = %self.name,
            actuators  = actuators.len(),
            state_len  = state.vector().len(),
            rta        = rta.is_active(),
            "platform built"
        );

        Ok(Platform {
            name:              self.name,
            next_state:        state.vector().clone(),
            state,
            initial:           self.initial,
            actuators,
            controller,
            dynamics,
            rta,
            phase:             StepPhase::Idle,
            current_actuation: Actuation::new(),
            untrimmed_control: default_control.clone(),
            current_control:   default_control,
        })
    }
}
