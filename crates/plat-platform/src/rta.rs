//! Run-time assurance (RTA) filter seam.
//!
//! An RTA filter sits between the actuator set and the dynamics and may
//! replace the control vector, e.g. to enforce a keep-out zone or a speed
//! limit.  It sees the cohort-wide [`SimState`] snapshot, which is the only
//! way one platform's decision can depend on another platform.
//!
//! A platform's filter is chosen once, at construction, from an [`RtaSpec`]
//! and stored as an [`RtaSlot`]; nothing branches on the request afterwards.

use std::collections::HashMap;
use std::fmt;

use nalgebra::DVector;
use serde_json::Value;

use plat_actuator::ActuatorSet;
use plat_core::SimState;

use crate::{RtaError, RtaResult};

/// What a filter may inspect about its platform during setup.
#[derive(Clone, Copy, Debug)]
pub struct PlatformView<'a> {
    pub name:      &'a str,
    pub actuators: &'a ActuatorSet,
    pub state_len: usize,
}

impl PlatformView<'_> {
    #[inline]
    pub fn control_len(&self) -> usize {
        self.actuators.control_len()
    }
}

pub trait RtaFilter {
    /// Called once when the owning platform is built.
    fn setup(&mut self, _platform: &PlatformView<'_>) -> RtaResult<()> {
        Ok(())
    }

    /// Return the control to apply.  Must keep the input's length.
    fn filter_control(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        control:   DVector<f64>,
    ) -> RtaResult<DVector<f64>>;

    /// Diagnostic payload reported in the platform's info.
    fn generate_info(&self) -> Value {
        Value::Null
    }
}

/// A platform's resolved filter.
#[derive(Default)]
pub enum RtaSlot {
    #[default]
    Absent,
    Active(Box<dyn RtaFilter>),
}

impl RtaSlot {
    pub fn is_active(&self) -> bool {
        matches!(self, RtaSlot::Active(_))
    }
}

impl fmt::Debug for RtaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtaSlot::Absent    => f.write_str("Absent"),
            RtaSlot::Active(_) => f.write_str("Active(..)"),
        }
    }
}

/// How a platform's filter is requested.
#[derive(Default)]
pub enum RtaSpec {
    #[default]
    None,
    Instance(Box<dyn RtaFilter>),
    /// Looked up in an [`RtaRegistry`] and built from `config`.
    Named { name: String, config: Value },
}

impl RtaSpec {
    pub fn instance(filter: impl RtaFilter + 'static) -> Self {
        RtaSpec::Instance(Box::new(filter))
    }

    pub fn named(name: impl Into<String>, config: Value) -> Self {
        RtaSpec::Named { name: name.into(), config }
    }
}

pub type RtaFactory = Box<dyn Fn(&Value) -> RtaResult<Box<dyn RtaFilter>>>;

/// Name → factory table for filters configured by name.
#[derive(Default)]
pub struct RtaRegistry {
    factories: HashMap<String, RtaFactory>,
}

impl RtaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> RtaResult<Box<dyn RtaFilter>> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn resolve(&self, spec: RtaSpec) -> RtaResult<RtaSlot> {
        match spec {
            RtaSpec::None => Ok(RtaSlot::Absent),
            RtaSpec::Instance(filter) => Ok(RtaSlot::Active(filter)),
            RtaSpec::Named { name, config } => {
                let factory = self.factories.get(&name).ok_or(RtaError::UnknownFilter(name))?;
                Ok(RtaSlot::Active(factory(&config)?))
            }
        }
    }
}
