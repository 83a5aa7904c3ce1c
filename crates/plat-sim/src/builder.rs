//! Fluent builder for constructing a [`Sim`].

use plat_core::{PlatformId, SimConfig};

use crate::{ActionSource, Cohort, Sim, SimError, SimObject, SimResult};

enum Pending {
    Root(Box<dyn SimObject>),
    Dependent {
        parent:  PlatformId,
        object:  Box<dyn SimObject>,
        cadence: f64,
    },
}

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step size, total steps, seed, …
/// - `A: ActionSource`: where root platforms' actions come from
///
/// Platforms receive [`PlatformId`]s in the order they are added, starting
/// at 0, so a dependent can name a parent added earlier.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, RandomActions::new(config.seed))
///     .platform(chief)                       // PlatformId(0)
///     .platform(deputy)                      // PlatformId(1)
///     .dependent(PlatformId(1), sensor, 0.5) // PlatformId(2)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: ActionSource> {
    config:    SimConfig,
    actions:   A,
    platforms: Vec<Pending>,
}

impl<A: ActionSource> SimBuilder<A> {
    pub fn new(config: SimConfig, actions: A) -> Self {
        Self { config, actions, platforms: Vec::new() }
    }

    /// Add a root platform, stepped at `config.step_size`.
    pub fn platform(mut self, object: impl SimObject + 'static) -> Self {
        self.platforms.push(Pending::Root(Box::new(object)));
        self
    }

    /// Add a dependent of `parent`, stepped at its own `cadence`.
    pub fn dependent(mut self, parent: PlatformId, object: impl SimObject + 'static, cadence: f64) -> Self {
        self.platforms.push(Pending::Dependent { parent, object: Box::new(object), cadence });
        self
    }

    /// Validate the configuration, assemble the cohort, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<A>> {
        self.config.validate()?;
        if self.platforms.is_empty() {
            return Err(SimError::Config("a simulation needs at least one platform".into()));
        }

        let mut cohort = Cohort::new();
        for pending in self.platforms {
            match pending {
                Pending::Root(object) => {
                    cohort.add_root(object)?;
                }
                Pending::Dependent { parent, object, cadence } => {
                    cohort.add_dependent(parent, object, cadence)?;
                }
            }
        }

        Ok(Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            cohort,
            actions: self.actions,
        })
    }
}
