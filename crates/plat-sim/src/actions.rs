//! Where each root platform's per-step action comes from.

use std::collections::BTreeMap;

use plat_control::Action;
use plat_core::{PlatformId, PlatformRng, SimState};

use crate::SimObject;

/// Supplies one action per root platform per step.
pub trait ActionSource {
    fn action(&mut self, id: PlatformId, platform: &dyn SimObject, sim_state: &SimState) -> Option<Action>;
}

/// Every platform runs on actuator defaults.
pub struct NoActions;

impl ActionSource for NoActions {
    fn action(&mut self, _id: PlatformId, _platform: &dyn SimObject, _sim_state: &SimState) -> Option<Action> {
        None
    }
}

/// Uniform samples from each platform's action space, one deterministic
/// stream per platform.  Pass-through platforms get `None`.
pub struct RandomActions {
    seed: u64,
    rngs: BTreeMap<PlatformId, PlatformRng>,
}

impl RandomActions {
    pub fn new(seed: u64) -> Self {
        Self { seed, rngs: BTreeMap::new() }
    }
}

impl ActionSource for RandomActions {
    fn action(&mut self, id: PlatformId, platform: &dyn SimObject, _sim_state: &SimState) -> Option<Action> {
        let space = platform.action_space()?;
        let seed = self.seed;
        let rng = self.rngs.entry(id).or_insert_with(|| PlatformRng::new(seed, id));
        Some(Action::from(space.sample(rng.inner())))
    }
}

/// Adapts a closure into an [`ActionSource`].
pub struct FnActions<F>(pub F);

impl<F> ActionSource for FnActions<F>
where
    F: FnMut(PlatformId, &dyn SimObject, &SimState) -> Option<Action>,
{
    fn action(&mut self, id: PlatformId, platform: &dyn SimObject, sim_state: &SimState) -> Option<Action> {
        (self.0)(id, platform, sim_state)
    }
}
