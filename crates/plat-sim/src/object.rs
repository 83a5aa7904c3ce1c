//! Object-safe view of a platform, so one cohort can hold platforms with
//! different state layouts.

use nalgebra::DVector;

use plat_actuator::ActionSpace;
use plat_control::Action;
use plat_core::{PlatformId, PlatformSnapshot, SimState};
use plat_platform::{Platform, PlatformInfo, PlatformResult, StateLayout, StateReset, StepPhase};

pub trait SimObject {
    fn name(&self) -> &str;

    fn phase(&self) -> StepPhase;

    fn action_space(&self) -> Option<&ActionSpace>;

    fn step_compute(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        action:    Option<&Action>,
    ) -> PlatformResult<()>;

    fn step_apply(&mut self) -> PlatformResult<()>;

    /// `None` restores the state the platform was built with.
    fn reset(&mut self, vector: Option<DVector<f64>>) -> PlatformResult<()>;

    fn generate_info(&self) -> PlatformInfo;

    fn snapshot(&self, id: PlatformId) -> PlatformSnapshot;
}

impl<L: StateLayout> SimObject for Platform<L> {
    fn name(&self) -> &str {
        Platform::name(self)
    }

    fn phase(&self) -> StepPhase {
        Platform::phase(self)
    }

    fn action_space(&self) -> Option<&ActionSpace> {
        Platform::action_space(self)
    }

    fn step_compute(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        action:    Option<&Action>,
    ) -> PlatformResult<()> {
        Platform::step_compute(self, sim_state, step_size, action)
    }

    fn step_apply(&mut self) -> PlatformResult<()> {
        Platform::step_apply(self)
    }

    fn reset(&mut self, vector: Option<DVector<f64>>) -> PlatformResult<()> {
        match vector {
            Some(v) => Platform::reset(self, StateReset::Vector(v)),
            None => Platform::reset_to_initial(self),
        }
    }

    fn generate_info(&self) -> PlatformInfo {
        Platform::generate_info(self)
    }

    fn snapshot(&self, id: PlatformId) -> PlatformSnapshot {
        Platform::snapshot(self, id)
    }
}

impl<T: SimObject + ?Sized> SimObject for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn phase(&self) -> StepPhase {
        (**self).phase()
    }

    fn action_space(&self) -> Option<&ActionSpace> {
        (**self).action_space()
    }

    fn step_compute(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        action:    Option<&Action>,
    ) -> PlatformResult<()> {
        (**self).step_compute(sim_state, step_size, action)
    }

    fn step_apply(&mut self) -> PlatformResult<()> {
        (**self).step_apply()
    }

    fn reset(&mut self, vector: Option<DVector<f64>>) -> PlatformResult<()> {
        (**self).reset(vector)
    }

    fn generate_info(&self) -> PlatformInfo {
        (**self).generate_info()
    }

    fn snapshot(&self, id: PlatformId) -> PlatformSnapshot {
        (**self).snapshot(id)
    }
}
