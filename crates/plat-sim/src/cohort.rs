//! Arena of platform nodes and the two-pass compute/apply scheduler.

use std::collections::{BTreeMap, HashSet};

use nalgebra::DVector;
use tracing::{debug, trace};

use plat_control::Action;
use plat_core::{PlatformId, SimState, Step};
use plat_platform::PlatformInfo;

use crate::error::PlatformContext;
use crate::{SimError, SimObject, SimResult};

struct Node {
    object:   Box<dyn SimObject>,
    parent:   Option<PlatformId>,
    children: Vec<PlatformId>,
    /// Fixed step size of a dependent; `None` for roots.
    cadence:  Option<f64>,
}

/// Where the cohort is within one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CohortPhase {
    #[default]
    Idle,
    /// At least one root has computed against `snapshot`.
    Computing {
        snapshot:  SimState,
        step_size: f64,
        computed:  HashSet<PlatformId>,
    },
    /// Commits have started; no node may compute until all have applied.
    Applying {
        step_size: f64,
        applied:   HashSet<PlatformId>,
    },
}

impl CohortPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CohortPhase::Idle             => "idle",
            CohortPhase::Computing { .. } => "computing",
            CohortPhase::Applying { .. }  => "applying",
        }
    }
}

/// Platforms stepped together, indexed by [`PlatformId`] in insertion order.
///
/// Roots are stepped by the caller; dependents follow their parent through
/// every phase and reset.
#[derive(Default)]
pub struct Cohort {
    nodes:     Vec<Node>,
    roots:     Vec<PlatformId>,
    phase:     CohortPhase,
    step:      Step,
    time_secs: f64,
}

impl Cohort {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────────

    pub fn add_root(&mut self, object: impl SimObject + 'static) -> SimResult<PlatformId> {
        let id = self.insert(Box::new(object), None, None)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Attach `object` under `parent`.  It computes whenever its parent
    /// does, with `cadence` as its own step size.
    pub fn add_dependent(
        &mut self,
        parent:  PlatformId,
        object:  impl SimObject + 'static,
        cadence: f64,
    ) -> SimResult<PlatformId> {
        if !(cadence.is_finite() && cadence > 0.0) {
            return Err(SimError::Config(format!(
                "dependent cadence must be finite and positive, got {cadence}"
            )));
        }
        if parent.index() >= self.nodes.len() {
            return Err(SimError::UnknownPlatform(parent));
        }
        let id = self.insert(Box::new(object), Some(parent), Some(cadence))?;
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    fn insert(
        &mut self,
        object:  Box<dyn SimObject>,
        parent:  Option<PlatformId>,
        cadence: Option<f64>,
    ) -> SimResult<PlatformId> {
        self.require_idle("adding a platform")?;
        if self.nodes.iter().any(|n| n.object.name() == object.name()) {
            return Err(SimError::DuplicatePlatform(object.name().to_string()));
        }
        let id = PlatformId::try_from(self.nodes.len())
            .map_err(|_| SimError::Config("too many platforms".into()))?;
        debug!(%id, name = object.name(), ?parent, "platform added to cohort");
        self.nodes.push(Node { object, parent, children: Vec::new(), cadence });
        Ok(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline] pub fn len(&self) -> usize { self.nodes.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
    #[inline] pub fn roots(&self) -> &[PlatformId] { &self.roots }
    #[inline] pub fn phase(&self) -> &CohortPhase { &self.phase }
    #[inline] pub fn step(&self) -> Step { self.step }
    #[inline] pub fn time_secs(&self) -> f64 { self.time_secs }

    pub fn get(&self, id: PlatformId) -> SimResult<&dyn SimObject> {
        self.node(id).map(|n| n.object.as_ref())
    }

    pub fn parent(&self, id: PlatformId) -> SimResult<Option<PlatformId>> {
        self.node(id).map(|n| n.parent)
    }

    pub fn children(&self, id: PlatformId) -> SimResult<&[PlatformId]> {
        self.node(id).map(|n| n.children.as_slice())
    }

    pub fn id_of(&self, name: &str) -> Option<PlatformId> {
        self.nodes
            .iter()
            .position(|n| n.object.name() == name)
            .and_then(|i| PlatformId::try_from(i).ok())
    }

    /// Fresh snapshot of every node's committed state.
    pub fn snapshot(&self) -> SimState {
        let mut state = SimState::new(self.step, self.time_secs);
        for (i, node) in self.nodes.iter().enumerate() {
            state.insert(node.object.snapshot(PlatformId(i as u32)));
        }
        state
    }

    /// Diagnostics of every node, keyed by id.
    pub fn info(&self) -> BTreeMap<PlatformId, PlatformInfo> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (PlatformId(i as u32), n.object.generate_info()))
            .collect()
    }

    // ── Compute pass ──────────────────────────────────────────────────────────

    /// Compute root `id` and its dependents against the step's snapshot.
    ///
    /// The first compute of a step captures the snapshot; later computes in
    /// the same step reuse it.
    ///
    /// # Errors
    ///
    /// - `InterleavedStep` once applying has started.
    /// - `InvalidStepSize` for a non-finite or non-positive step size; the
    ///   phase is left as it was.
    /// - `Config` if `id` is a dependent.
    /// - `StepSizeMismatch` if `step_size` differs from the step's first.
    /// - `Platform { .. }` for any node failure, including computing a root
    ///   twice in one step.
    pub fn compute(&mut self, id: PlatformId, step_size: f64, action: Option<&Action>) -> SimResult<()> {
        if self.node(id)?.parent.is_some() {
            return Err(SimError::Config(format!("{id} is a dependent; compute its root instead")));
        }
        if let CohortPhase::Applying { .. } = self.phase {
            return Err(SimError::InterleavedStep { operation: "compute", phase: self.phase.as_str() });
        }
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(SimError::InvalidStepSize(step_size));
        }
        if self.phase == CohortPhase::Idle {
            let snapshot = self.snapshot();
            trace!(step = self.step.0, "cohort snapshot captured");
            self.phase = CohortPhase::Computing { snapshot, step_size, computed: HashSet::new() };
        }

        let CohortPhase::Computing { snapshot, step_size: phase_step, computed } = &mut self.phase else {
            return Err(SimError::InterleavedStep { operation: "compute", phase: "idle" });
        };
        if *phase_step != step_size {
            return Err(SimError::StepSizeMismatch { expected: *phase_step, got: step_size });
        }

        // Depth-first: a parent always computes before its dependents.
        let mut stack = vec![(id, step_size)];
        while let Some((node_id, h)) = stack.pop() {
            let node = &mut self.nodes[node_id.index()];
            node.object.step_compute(snapshot, h, action).for_platform(node_id)?;
            computed.insert(node_id);
            let children = node.children.clone();
            for child in children.into_iter().rev() {
                let cadence = self.nodes[child.index()].cadence.unwrap_or(h);
                stack.push((child, cadence));
            }
        }
        Ok(())
    }

    /// Compute every root; `actions[i]` goes to `roots()[i]`.
    pub fn compute_all(&mut self, step_size: f64, actions: &[Option<Action>]) -> SimResult<()> {
        if actions.len() != self.roots.len() {
            return Err(SimError::ActionCountMismatch { expected: self.roots.len(), got: actions.len() });
        }
        let roots = self.roots.clone();
        for (id, action) in roots.into_iter().zip(actions) {
            self.compute(id, step_size, action.as_ref())?;
        }
        Ok(())
    }

    // ── Apply pass ────────────────────────────────────────────────────────────

    /// Commit root `id` and its dependents.
    ///
    /// # Errors
    ///
    /// `InterleavedStep` unless every node of the cohort has computed this
    /// step.  Applying the last node returns the cohort to idle and
    /// advances its step counter.
    pub fn apply(&mut self, id: PlatformId) -> SimResult<()> {
        if self.node(id)?.parent.is_some() {
            return Err(SimError::Config(format!("{id} is a dependent; apply its root instead")));
        }
        let starting = match &self.phase {
            CohortPhase::Computing { computed, step_size, .. } if computed.len() == self.nodes.len() => {
                Some(*step_size)
            }
            CohortPhase::Applying { .. } => None,
            other => {
                return Err(SimError::InterleavedStep { operation: "apply", phase: other.as_str() });
            }
        };
        if let Some(step_size) = starting {
            self.phase = CohortPhase::Applying { step_size, applied: HashSet::new() };
        }

        let CohortPhase::Applying { applied, step_size } = &mut self.phase else {
            return Err(SimError::InterleavedStep { operation: "apply", phase: "idle" });
        };
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let node = &mut self.nodes[node_id.index()];
            node.object.step_apply().for_platform(node_id)?;
            applied.insert(node_id);
            stack.extend(node.children.iter().rev().copied());
        }

        if applied.len() == self.nodes.len() {
            let step_size = *step_size;
            self.time_secs += step_size;
            self.step = self.step + 1;
            self.phase = CohortPhase::Idle;
            trace!(step = self.step.0, "cohort step applied");
        }
        Ok(())
    }

    pub fn apply_all(&mut self) -> SimResult<()> {
        let roots = self.roots.clone();
        for id in roots {
            self.apply(id)?;
        }
        Ok(())
    }

    pub fn step_all(&mut self, step_size: f64, actions: &[Option<Action>]) -> SimResult<()> {
        self.compute_all(step_size, actions)?;
        self.apply_all()
    }

    // ── Reset ─────────────────────────────────────────────────────────────────

    /// Reset every node to its initial state and rewind the step counter.
    pub fn reset_all(&mut self) -> SimResult<()> {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.object.reset(None).for_platform(PlatformId(i as u32))?;
        }
        self.phase = CohortPhase::Idle;
        self.step = Step::ZERO;
        self.time_secs = 0.0;
        debug!(platforms = self.nodes.len(), "cohort reset");
        Ok(())
    }

    /// Reset one root, optionally adopting `vector`; its dependents return
    /// to their initial states.  Only allowed between steps.
    pub fn reset(&mut self, id: PlatformId, vector: Option<DVector<f64>>) -> SimResult<()> {
        self.require_idle("reset")?;
        let mut pending = vector;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let node = self.nodes.get_mut(node_id.index()).ok_or(SimError::UnknownPlatform(node_id))?;
            node.object.reset(pending.take()).for_platform(node_id)?;
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn node(&self, id: PlatformId) -> SimResult<&Node> {
        self.nodes.get(id.index()).ok_or(SimError::UnknownPlatform(id))
    }

    fn require_idle(&self, operation: &'static str) -> SimResult<()> {
        if self.phase != CohortPhase::Idle {
            return Err(SimError::InterleavedStep { operation, phase: self.phase.as_str() });
        }
        Ok(())
    }
}
