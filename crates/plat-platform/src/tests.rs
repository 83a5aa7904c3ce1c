//! Unit tests for plat-platform.

use std::cell::Cell;
use std::rc::Rc;

use nalgebra::{DMatrix, DVector, Vector3};
use serde_json::{Value, json};

use plat_actuator::{Actuation, Actuator, Bounds};
use plat_control::{Action, ControlError, ControllerConfig};
use plat_core::{KinematicView, SimState};
use plat_dynamics::{IntegrationMethod, LinearDynamics, LinearModel, LinearOde, OdeDynamics};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `[x, y, z, vx, vy, vz]`.
#[derive(Clone, Debug)]
struct PointMass;

#[derive(Clone, Debug, Default)]
struct PointMassInit {
    position: [f64; 3],
    velocity: [f64; 3],
}

impl StateLayout for PointMass {
    type Init = PointMassInit;

    fn vector_len(&self) -> usize {
        6
    }

    fn build_vector(&self, init: &PointMassInit) -> DVector<f64> {
        DVector::from_iterator(6, init.position.iter().chain(&init.velocity).copied())
    }

    fn position(&self, v: &DVector<f64>) -> Vector3<f64> {
        Vector3::new(v[0], v[1], v[2])
    }

    fn velocity(&self, v: &DVector<f64>) -> Vector3<f64> {
        Vector3::new(v[3], v[4], v[5])
    }
}

struct DoubleIntegrator;

impl LinearModel for DoubleIntegrator {
    fn gen_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let mut a = DMatrix::zeros(6, 6);
        let mut b = DMatrix::zeros(6, 3);
        for i in 0..3 {
            a[(i, i + 3)] = 1.0;
            b[(i + 3, i)] = 1.0;
        }
        (a, b)
    }
}

fn dynamics() -> LinearDynamics<DoubleIntegrator> {
    OdeDynamics::new(LinearOde::new(DoubleIntegrator).unwrap(), IntegrationMethod::Euler)
}

fn thrusters() -> Vec<Actuator> {
    ["thrust_x", "thrust_y", "thrust_z"]
        .into_iter()
        .map(|n| Actuator::continuous(n, Bounds::new(-1.0, 1.0).unwrap(), &[0.0]).unwrap())
        .collect()
}

fn agent_config() -> ControllerConfig {
    ControllerConfig::from_json_str(
        r#"{ "actuators": [
              { "name": "thrust_x" },
              { "name": "thrust_y" },
              { "name": "thrust_z" } ] }"#,
    )
    .unwrap()
}

fn builder(name: &str) -> PlatformBuilder<PointMass> {
    PlatformBuilder::new(name, PointMass)
        .actuators(thrusters())
        .controller(agent_config())
        .dynamics(dynamics())
}

fn at(position: [f64; 3]) -> StateReset<PointMassInit> {
    StateReset::Build(PointMassInit { position, ..Default::default() })
}

/// Caps every command at `limit`; counts calls.
struct Clamp {
    limit:       f64,
    calls:       Rc<Cell<usize>>,
    control_len: Rc<Cell<usize>>,
}

impl Clamp {
    fn new(limit: f64) -> Self {
        Self { limit, calls: Rc::default(), control_len: Rc::default() }
    }
}

impl RtaFilter for Clamp {
    fn setup(&mut self, platform: &PlatformView<'_>) -> RtaResult<()> {
        self.control_len.set(platform.control_len());
        Ok(())
    }

    fn filter_control(&mut self, _s: &SimState, _h: f64, control: DVector<f64>) -> RtaResult<DVector<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(control.map(|c| c.min(self.limit)))
    }

    fn generate_info(&self) -> Value {
        json!({ "limit": self.limit, "calls": self.calls.get() })
    }
}

/// Returns a control vector one element too long.
struct Widen;

impl RtaFilter for Widen {
    fn filter_control(&mut self, _s: &SimState, _h: f64, control: DVector<f64>) -> RtaResult<DVector<f64>> {
        Ok(control.push(0.0))
    }
}

// ── VectorState ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn builds_from_init() {
        let s = VectorState::new(PointMass, at([1.0, 2.0, 3.0])).unwrap();
        assert_eq!(s.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(s.velocity(), Vector3::zeros());
        assert_eq!((s.x(), s.y(), s.z()), (1.0, 2.0, 3.0));
        assert_eq!(s.orientation(), nalgebra::UnitQuaternion::identity());
    }

    #[test]
    fn adopts_vector_of_right_length() {
        let v = DVector::from_vec(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        let s = VectorState::new(PointMass, StateReset::Vector(v.clone())).unwrap();
        assert_eq!(s.vector(), &v);
        assert_eq!(s.velocity(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(s.into_vector(), v);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = VectorState::new(PointMass, StateReset::Vector(DVector::zeros(4))).unwrap_err();
        assert!(matches!(err, StateError::ShapeMismatch { expected: 6, got: 4 }));
    }

    #[test]
    fn failed_write_keeps_old_vector() {
        let mut s = VectorState::new(PointMass, at([5.0, 0.0, 0.0])).unwrap();
        assert!(s.set_vector(DVector::zeros(7)).is_err());
        assert!(s.reset_from_slice(&[1.0]).is_err());
        assert_eq!(s.x(), 5.0);
    }

    #[test]
    fn slice_reset_copies() {
        let mut s = VectorState::new(PointMass, StateReset::default()).unwrap();
        let mut buf = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0];
        s.reset_from_slice(&buf).unwrap();
        buf[0] = 99.0;
        assert_eq!(s.x(), 1.0);
    }
}

// ── RtaRegistry ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    fn registry() -> RtaRegistry {
        let mut r = RtaRegistry::new();
        r.register("clamp", |cfg: &Value| {
            let limit = cfg.get("limit").and_then(Value::as_f64).ok_or_else(|| RtaError::InvalidConfig {
                filter: "clamp".into(),
                reason: "missing numeric \"limit\"".into(),
            })?;
            Ok(Box::new(Clamp::new(limit)) as Box<dyn RtaFilter>)
        });
        r
    }

    #[test]
    fn none_resolves_absent() {
        assert!(!registry().resolve(RtaSpec::None).unwrap().is_active());
    }

    #[test]
    fn instance_resolves_active() {
        assert!(registry().resolve(RtaSpec::instance(Clamp::new(1.0))).unwrap().is_active());
    }

    #[test]
    fn named_resolves_through_factory() {
        let slot = registry().resolve(RtaSpec::named("clamp", json!({ "limit": 0.5 }))).unwrap();
        assert!(slot.is_active());
    }

    #[test]
    fn unknown_name_fails() {
        let err = registry().resolve(RtaSpec::named("shield", Value::Null)).unwrap_err();
        assert!(matches!(err, RtaError::UnknownFilter(ref n) if n == "shield"));
    }

    #[test]
    fn factory_config_errors_propagate() {
        let err = registry().resolve(RtaSpec::named("clamp", json!({}))).unwrap_err();
        assert!(matches!(err, RtaError::InvalidConfig { .. }));
    }

    #[test]
    fn named_platform_rta_is_set_up_at_build() {
        let mut r = RtaRegistry::new();
        let seen = Rc::new(Cell::new(0));
        let seen_in = Rc::clone(&seen);
        r.register("clamp", move |_cfg: &Value| {
            let mut c = Clamp::new(1.0);
            c.control_len = Rc::clone(&seen_in);
            Ok(Box::new(c) as Box<dyn RtaFilter>)
        });
        let p = builder("p").rta(RtaSpec::named("clamp", Value::Null)).build_with(&r).unwrap();
        assert!(p.rta().is_active());
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn named_without_registry_fails_build() {
        let err = builder("p").rta(RtaSpec::named("clamp", Value::Null)).build().unwrap_err();
        assert!(matches!(err, PlatformError::Rta(RtaError::UnknownFilter(_))));
    }
}

// ── Build ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use super::*;

    #[test]
    fn missing_dynamics() {
        let err = PlatformBuilder::new("p", PointMass).build().unwrap_err();
        assert!(matches!(err, PlatformError::MissingComponent { component: "dynamics", .. }));
    }

    #[test]
    fn bad_controller_config_fails_at_build() {
        let cfg = ControllerConfig::from_json_str(r#"{ "actuators": [ { "name": "thrust_w" } ] }"#).unwrap();
        let err = builder("p").controller(cfg).build().unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }

    #[test]
    fn starts_idle_with_default_bookkeeping() {
        let p = builder("p").initial_state(at([1.0, 0.0, 0.0])).build().unwrap();
        assert_eq!(p.phase(), StepPhase::Idle);
        assert_eq!(p.next_state(), p.state().vector());
        assert_eq!(p.current_control(), &DVector::zeros(3));
        assert!(p.current_actuation().is_empty());
        assert_eq!(p.x(), 1.0);
    }

    #[test]
    fn exposes_action_space() {
        let agent = builder("a").build().unwrap();
        assert_eq!(agent.action_space().map(|s| s.len()), Some(3));

        let pass = PlatformBuilder::new("b", PointMass).actuators(thrusters()).dynamics(dynamics()).build().unwrap();
        assert!(pass.action_space().is_none());
    }
}

// ── Two-phase protocol ────────────────────────────────────────────────────────

#[cfg(test)]
mod protocol {
    use super::*;

    #[test]
    fn compute_stages_without_committing() {
        let mut p = builder("p").build().unwrap();
        let before = p.state().vector().clone();
        p.step_compute(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, 0.0, 0.0]))).unwrap();
        assert_eq!(p.phase(), StepPhase::Computed);
        assert_eq!(p.state().vector(), &before);
        // Euler: vx += 1·1
        assert_eq!(p.next_state()[3], 1.0);
    }

    #[test]
    fn apply_commits_next_state() {
        let mut p = builder("p").build().unwrap();
        p.step_compute(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, -1.0, 0.0]))).unwrap();
        p.step_apply().unwrap();
        assert_eq!(p.phase(), StepPhase::Applied);
        assert_eq!(p.state().vector(), p.next_state());
        assert_eq!(p.velocity(), Vector3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn double_compute_is_out_of_phase() {
        let mut p = builder("p").build().unwrap();
        p.step_compute(&SimState::empty(), 1.0, None).unwrap();
        let err = p.step_compute(&SimState::empty(), 1.0, None).unwrap_err();
        assert!(matches!(
            err,
            PlatformError::OutOfPhase { phase: StepPhase::Computed, operation: "step_compute", .. }
        ));
    }

    #[test]
    fn apply_without_compute_is_out_of_phase() {
        let mut p = builder("p").build().unwrap();
        assert!(matches!(p.step_apply(), Err(PlatformError::OutOfPhase { phase: StepPhase::Idle, .. })));
        p.step(&SimState::empty(), 1.0, None).unwrap();
        assert!(matches!(p.step_apply(), Err(PlatformError::OutOfPhase { phase: StepPhase::Applied, .. })));
    }

    #[test]
    fn step_runs_both_phases() {
        let mut p = builder("p").build().unwrap();
        for _ in 0..2 {
            p.step(&SimState::empty(), 1.0, Some(&Action::continuous(&[0.0, 0.0, 1.0]))).unwrap();
        }
        // v: 0 → 1 → 2; z: 0 → 0 → 1 (Euler uses the pre-step velocity)
        assert_eq!(p.velocity().z, 2.0);
        assert_eq!(p.z(), 1.0);
    }

    #[test]
    fn failed_compute_leaves_platform_untouched() {
        let mut p = builder("p").build().unwrap();
        let err = p.step_compute(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0]))).unwrap_err();
        assert!(matches!(err, PlatformError::Control(ControlError::ShapeMismatch { .. })));
        assert_eq!(p.phase(), StepPhase::Idle);
        assert_eq!(p.next_state(), p.state().vector());
    }

    #[test]
    fn pass_through_takes_actuation() {
        let mut p = PlatformBuilder::new("p", PointMass).actuators(thrusters()).dynamics(dynamics()).build().unwrap();
        let mut actuation = Actuation::new();
        actuation.insert_scalar("thrust_y", 3.0);
        p.step(&SimState::empty(), 0.5, Some(&Action::Actuation(actuation))).unwrap();
        assert_eq!(p.current_control(), &DVector::from_vec(vec![0.0, 3.0, 0.0]));
        assert_eq!(p.velocity().y, 1.5);
    }
}

// ── Safety filter bookkeeping ─────────────────────────────────────────────────

#[cfg(test)]
mod filtering {
    use super::*;

    #[test]
    fn records_pre_filter_actuation_and_post_filter_control() {
        let clamp = Clamp::new(0.25);
        let calls = Rc::clone(&clamp.calls);
        let mut p = builder("p").rta(RtaSpec::instance(clamp)).build().unwrap();

        p.step_compute(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, 0.0, -1.0]))).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(p.current_actuation().get("thrust_x").map(|c| c[0]), Some(1.0));
        let filtered = DVector::from_vec(vec![0.25, 0.0, -1.0]);
        assert_eq!(p.current_control(), &filtered);
        assert_eq!(p.untrimmed_control(), &filtered);
        assert_eq!(p.next_state()[3], 0.25);
    }

    #[test]
    fn filter_must_keep_control_length() {
        let mut p = builder("p").rta(RtaSpec::instance(Widen)).build().unwrap();
        let err = p.step_compute(&SimState::empty(), 1.0, None).unwrap_err();
        assert!(matches!(err, PlatformError::ShapeMismatch { what: "filtered control", expected: 3, got: 4, .. }));
        assert_eq!(p.phase(), StepPhase::Idle);
    }

    #[test]
    fn info_carries_filter_payload() {
        let mut p = builder("p").rta(RtaSpec::instance(Clamp::new(0.5))).build().unwrap();
        p.step(&SimState::empty(), 1.0, None).unwrap();
        let info = p.generate_info().to_json().unwrap();
        assert_eq!(info["rta"]["calls"], json!(1));
        assert_eq!(info["controller"]["control"], json!([0.0, 0.0, 0.0]));
    }

    #[test]
    fn info_omits_rta_when_absent() {
        let p = builder("p").build().unwrap();
        let info = p.generate_info().to_json().unwrap();
        assert!(info.get("rta").is_none());
        assert_eq!(info["name"], json!("p"));
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reset {
    use super::*;

    #[test]
    fn reset_then_info_reports_defaults() {
        let mut p = builder("p").build().unwrap();
        p.step(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, 1.0, 1.0]))).unwrap();
        assert!(!p.current_actuation().is_empty());

        p.reset(at([0.0, 0.0, 7.0])).unwrap();

        let info = p.generate_info();
        let defaults = p.actuators().default_control();
        assert!(info.controller.actuation.is_empty());
        assert_eq!(info.controller.control, defaults.as_slice().to_vec());
        assert_eq!(info.controller.untrimmed_control, defaults.as_slice().to_vec());
        assert_eq!(info.z, 7.0);
        assert_eq!(p.phase(), StepPhase::Idle);
    }

    #[test]
    fn reset_clears_staged_step() {
        let mut p = builder("p").build().unwrap();
        p.step_compute(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, 0.0, 0.0]))).unwrap();
        p.reset(StateReset::default()).unwrap();
        assert_eq!(p.next_state(), p.state().vector());
        assert!(p.step_apply().is_err());
    }

    #[test]
    fn reset_to_initial_restores_built_state() {
        let mut p = builder("p").initial_state(at([2.0, 0.0, 0.0])).build().unwrap();
        p.step(&SimState::empty(), 1.0, Some(&Action::continuous(&[1.0, 0.0, 0.0]))).unwrap();
        p.step(&SimState::empty(), 1.0, None).unwrap();
        assert_eq!(p.x(), 3.0);
        p.reset_to_initial().unwrap();
        assert_eq!(p.x(), 2.0);
        assert_eq!(p.velocity(), Vector3::zeros());
    }

    #[test]
    fn reset_with_vector_is_validated() {
        let mut p = builder("p").build().unwrap();
        let err = p.reset(StateReset::Vector(DVector::zeros(2))).unwrap_err();
        assert!(matches!(err, PlatformError::State(StateError::ShapeMismatch { .. })));
    }
}
