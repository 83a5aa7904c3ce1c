//! Immutable simulation snapshot shared by a cohort's compute phase.
//!
//! A `SimState` is captured once, before any platform in a cohort computes,
//! and handed to every platform's safety filter.  Because nobody writes to
//! it during the compute phase, each platform sees the same pre-step view
//! of every other platform regardless of stepping order.

use std::collections::BTreeMap;

use nalgebra::{DVector, Vector3};

use crate::{CoreError, CoreResult, PlatformId, Step};

/// Committed state of one platform at the moment the snapshot was taken.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformSnapshot {
    pub id:       PlatformId,
    pub name:     String,
    pub vector:   DVector<f64>,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    /// Control vector applied during the previous step (defaults after reset).
    pub control:  DVector<f64>,
}

/// Read-only snapshot of every platform in a cohort.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimState {
    pub step:      Step,
    pub time_secs: f64,
    platforms:     BTreeMap<PlatformId, PlatformSnapshot>,
}

impl SimState {
    pub fn new(step: Step, time_secs: f64) -> Self {
        Self { step, time_secs, platforms: BTreeMap::new() }
    }

    /// Snapshot with no platforms, for stepping a lone platform.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: PlatformSnapshot) {
        self.platforms.insert(snapshot.id, snapshot);
    }

    pub fn get(&self, id: PlatformId) -> CoreResult<&PlatformSnapshot> {
        self.platforms.get(&id).ok_or(CoreError::UnknownPlatform(id))
    }

    /// Linear scan by name; names are not guaranteed unique across a cohort.
    pub fn by_name(&self, name: &str) -> Option<&PlatformSnapshot> {
        self.platforms.values().find(|p| p.name == name)
    }

    /// Snapshots in ascending `PlatformId` order.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformSnapshot> + '_ {
        self.platforms.values()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
