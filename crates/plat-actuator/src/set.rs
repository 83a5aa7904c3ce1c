//! `ActuatorSet`: ordered control channels and control-vector assembly.

use std::collections::{BTreeMap, HashMap};

use nalgebra::DVector;

use plat_core::ActuatorId;

use crate::{Actuator, ActuatorError, ActuatorResult};

// ── Actuation ─────────────────────────────────────────────────────────────────

/// Named, preprocessed commands keyed by actuator name.
///
/// Channels absent from the map fall back to the actuator default when the
/// control vector is assembled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Actuation(BTreeMap<String, DVector<f64>>);

impl Actuation {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or overwrite the command for `actuator`.
    pub fn insert(&mut self, actuator: impl Into<String>, command: DVector<f64>) {
        self.0.insert(actuator.into(), command);
    }

    /// Convenience for single-width channels.
    pub fn insert_scalar(&mut self, actuator: impl Into<String>, command: f64) {
        self.insert(actuator, DVector::from_element(1, command));
    }

    pub fn get(&self, actuator: &str) -> Option<&DVector<f64>> {
        self.0.get(actuator)
    }

    /// Entries in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DVector<f64>)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, DVector<f64>)> for Actuation {
    fn from_iter<I: IntoIterator<Item = (String, DVector<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── ActuatorSet ───────────────────────────────────────────────────────────────

/// Ordered sequence of actuators plus a name → index lookup.
///
/// Declaration order is the control-vector layout: actuator `i` occupies
/// `width(i)` consecutive slots after every actuator declared before it.
#[derive(Clone, Debug)]
pub struct ActuatorSet {
    actuators:  Vec<Actuator>,
    name_index: HashMap<String, ActuatorId>,
}

impl ActuatorSet {
    /// Fails on duplicate names.
    pub fn new(actuators: Vec<Actuator>) -> ActuatorResult<Self> {
        let mut name_index = HashMap::with_capacity(actuators.len());
        for (i, actuator) in actuators.iter().enumerate() {
            let id = ActuatorId::try_from(i).map_err(|_| ActuatorError::ShapeMismatch {
                expected: u16::MAX as usize,
                got:      actuators.len(),
                what:     "actuator count",
            })?;
            if name_index.insert(actuator.name().to_string(), id).is_some() {
                return Err(ActuatorError::DuplicateActuator(actuator.name().to_string()));
            }
        }
        Ok(Self { actuators, name_index })
    }

    /// An actuator set with no channels.  Its control vector is empty.
    pub fn empty() -> Self {
        Self { actuators: Vec::new(), name_index: HashMap::new() }
    }

    #[inline]
    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<ActuatorId> {
        self.name_index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Actuator> {
        self.index_of(name).map(|id| &self.actuators[id.index()])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Actuator> {
        self.index_of(name).map(|id| &mut self.actuators[id.index()])
    }

    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }

    /// Total control-vector length (sum of actuator widths).
    pub fn control_len(&self) -> usize {
        self.actuators.iter().map(Actuator::width).sum()
    }

    /// Control vector built purely from defaults.
    pub fn default_control(&self) -> DVector<f64> {
        let mut control = DVector::zeros(self.control_len());
        let mut offset = 0;
        for actuator in &self.actuators {
            let width = actuator.width();
            control.rows_mut(offset, width).copy_from(actuator.default_value());
            offset += width;
        }
        control
    }

    /// Assemble the full control vector.
    ///
    /// For each actuator in declaration order, use the actuation entry if one
    /// exists, else the actuator default.  `None` and an empty actuation are
    /// equivalent.
    ///
    /// # Errors
    ///
    /// - `UnknownActuator` if `actuation` names an actuator not in the set.
    /// - `ShapeMismatch` if a command's width differs from its actuator's.
    pub fn gen_control(&self, actuation: Option<&Actuation>) -> ActuatorResult<DVector<f64>> {
        let Some(actuation) = actuation else {
            return Ok(self.default_control());
        };

        if let Some((unknown, _)) = actuation.iter().find(|(name, _)| !self.name_index.contains_key(*name)) {
            return Err(ActuatorError::UnknownActuator(unknown.to_string()));
        }

        let mut control = DVector::zeros(self.control_len());
        let mut offset = 0;
        for actuator in &self.actuators {
            let width = actuator.width();
            match actuation.get(actuator.name()) {
                Some(command) => {
                    if command.len() != width {
                        return Err(ActuatorError::ShapeMismatch {
                            expected: width,
                            got:      command.len(),
                            what:     "actuation command",
                        });
                    }
                    control.rows_mut(offset, width).copy_from(command);
                }
                None => control.rows_mut(offset, width).copy_from(actuator.default_value()),
            }
            offset += width;
        }
        Ok(control)
    }
}
