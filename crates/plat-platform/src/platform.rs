//! The platform: controller → actuators → RTA → dynamics, in two phases.

use std::fmt;

use nalgebra::{DVector, UnitQuaternion, Vector3};
use tracing::{debug, trace, warn};

use plat_actuator::{ActionSpace, Actuation, ActuatorSet};
use plat_control::{Action, Controller};
use plat_core::{KinematicView, PlatformId, PlatformSnapshot, SimState};
use plat_dynamics::Dynamics;

use crate::{
    ControllerInfo, PlatformError, PlatformInfo, PlatformResult, RtaSlot, StateLayout, StateReset,
    VectorState,
};

/// Where a platform is within one timestep.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum StepPhase {
    #[default]
    Idle,
    /// `next_state` is staged; `state` still holds the pre-step value.
    Computed,
    /// `state == next_state`.
    Applied,
}

impl StepPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            StepPhase::Idle     => "idle",
            StepPhase::Computed => "computed",
            StepPhase::Applied  => "applied",
        }
    }
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Platform<L: StateLayout> {
    pub(crate) name:       String,
    pub(crate) state:      VectorState<L>,
    pub(crate) initial:    StateReset<L::Init>,
    pub(crate) next_state: DVector<f64>,
    pub(crate) actuators:  ActuatorSet,
    pub(crate) controller: Controller,
    pub(crate) dynamics:   Box<dyn Dynamics>,
    pub(crate) rta:        RtaSlot,
    pub(crate) phase:      StepPhase,

    pub(crate) current_actuation: Actuation,
    pub(crate) current_control:   DVector<f64>,
    pub(crate) untrimmed_control: DVector<f64>,
}

impl<L: StateLayout> Platform<L> {
    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Re-initialize the state and clear step bookkeeping to actuator
    /// defaults.  Allowed in any phase; always ends in `Idle`.
    pub fn reset(&mut self, reset: StateReset<L::Init>) -> PlatformResult<()> {
        self.state.reset(reset)?;
        self.next_state = self.state.vector().clone();
        self.current_actuation = Actuation::new();
        self.current_control = self.actuators.default_control();
        self.untrimmed_control = self.current_control.clone();
        self.phase = StepPhase::Idle;
        debug!(platform = %self.name, "platform reset");
        Ok(())
    }

    /// Stage the next state without touching the committed one.
    ///
    /// Every platform of a cohort must compute against the same `sim_state`
    /// before any of them applies.  On error, the platform is unchanged.
    ///
    /// # Errors
    ///
    /// - `OutOfPhase` if a computed step has not been applied yet.
    /// - Controller, actuator, RTA or dynamics failures, propagated as-is.
    /// - `ShapeMismatch` if the filter changes the control length or the
    ///   dynamics return a state of the wrong length.
    pub fn step_compute(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        action:    Option<&Action>,
    ) -> PlatformResult<()> {
        if self.phase == StepPhase::Computed {
            return Err(self.out_of_phase("step_compute"));
        }

        let actuation = self.controller.gen_actuation(action)?;
        let control = self.actuators.gen_control(Some(&actuation))?;

        let filtered = match &mut self.rta {
            RtaSlot::Absent => control,
            RtaSlot::Active(filter) => {
                let filtered = filter.filter_control(sim_state, step_size, control.clone())?;
                if filtered.len() != control.len() {
                    return Err(PlatformError::ShapeMismatch {
                        platform: self.name.clone(),
                        expected: control.len(),
                        got:      filtered.len(),
                        what:     "filtered control",
                    });
                }
                if filtered != control {
                    warn!(platform = %self.name, step = sim_state.step.0, "RTA modified control");
                }
                filtered
            }
        };

        let next = self.dynamics.step(step_size, self.state.vector(), &filtered)?;
        let expected = self.state.layout().vector_len();
        if next.len() != expected {
            return Err(PlatformError::ShapeMismatch {
                platform: self.name.clone(),
                expected,
                got:      next.len(),
                what:     "next state",
            });
        }

        self.next_state = next;
        self.current_actuation = actuation;
        self.untrimmed_control = filtered.clone();
        self.current_control = filtered;
        self.phase = StepPhase::Computed;
        trace!(platform = %self.name, step_size, "step computed");
        Ok(())
    }

    /// Commit the staged state.  No recomputation happens here.
    pub fn step_apply(&mut self) -> PlatformResult<()> {
        if self.phase != StepPhase::Computed {
            return Err(self.out_of_phase("step_apply"));
        }
        self.state.set_vector(self.next_state.clone())?;
        self.phase = StepPhase::Applied;
        Ok(())
    }

    /// Compute then apply, for a platform stepping on its own.
    pub fn step(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        action:    Option<&Action>,
    ) -> PlatformResult<()> {
        self.step_compute(sim_state, step_size, action)?;
        self.step_apply()
    }

    /// [`reset`](Self::reset) with the parameters the platform was built with.
    pub fn reset_to_initial(&mut self) -> PlatformResult<()> {
        self.reset(self.initial.clone())
    }

    fn out_of_phase(&self, operation: &'static str) -> PlatformError {
        PlatformError::OutOfPhase { platform: self.name.clone(), phase: self.phase, operation }
    }

    // ── Reporting ─────────────────────────────────────────────────────────────

    pub fn generate_info(&self) -> PlatformInfo {
        let position = self.state.position();
        PlatformInfo {
            name:       self.name.clone(),
            x:          position.x,
            y:          position.y,
            z:          position.z,
            controller: ControllerInfo::from_parts(
                &self.current_actuation,
                self.current_control.as_slice(),
                self.untrimmed_control.as_slice(),
            ),
            rta:        match &self.rta {
                RtaSlot::Absent => None,
                RtaSlot::Active(filter) => Some(filter.generate_info()),
            },
        }
    }

    /// Committed state as seen by other platforms through a [`SimState`].
    pub fn snapshot(&self, id: PlatformId) -> PlatformSnapshot {
        PlatformSnapshot {
            id,
            name:     self.name.clone(),
            vector:   self.state.vector().clone(),
            position: self.state.position(),
            velocity: self.state.velocity(),
            control:  self.current_control.clone(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn phase(&self) -> StepPhase { self.phase }
    #[inline] pub fn state(&self) -> &VectorState<L> { &self.state }
    #[inline] pub fn next_state(&self) -> &DVector<f64> { &self.next_state }
    #[inline] pub fn actuators(&self) -> &ActuatorSet { &self.actuators }
    #[inline] pub fn controller(&self) -> &Controller { &self.controller }
    #[inline] pub fn rta(&self) -> &RtaSlot { &self.rta }

    #[inline] pub fn current_actuation(&self) -> &Actuation { &self.current_actuation }
    #[inline] pub fn current_control(&self) -> &DVector<f64> { &self.current_control }
    #[inline] pub fn untrimmed_control(&self) -> &DVector<f64> { &self.untrimmed_control }

    /// Accepted action space; `None` for a pass-through controller.
    pub fn action_space(&self) -> Option<&ActionSpace> {
        self.controller.action_space()
    }
}

impl<L: StateLayout> KinematicView for Platform<L> {
    fn position(&self) -> Vector3<f64> {
        self.state.position()
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.state.orientation()
    }

    fn velocity(&self) -> Vector3<f64> {
        self.state.velocity()
    }
}

impl<L: StateLayout> fmt::Debug for Platform<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .field("state", &self.state.vector().as_slice())
            .field("rta", &self.rta)
            .finish_non_exhaustive()
    }
}
