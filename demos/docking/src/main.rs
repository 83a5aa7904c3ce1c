//! docking: a deputy spacecraft approaching a chief under a speed limit.
//!
//! Both spacecraft follow Clohessy–Wiltshire–Hill relative dynamics.  The
//! deputy's thrust comes from a proportional-derivative policy through an
//! agent controller; a speed-limit safety filter overrides the policy
//! whenever the closing speed is too high for the current distance.
//!
//! Set `RUST_LOG=debug` to see every filter intervention.

mod cwh;
mod rta;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plat_actuator::{Actuator, Bounds};
use plat_control::{Action, ControllerConfig};
use plat_core::{PlatformId, SimConfig, SimState};
use plat_dynamics::{IntegrationMethod, LinearDynamics, LinearOde};
use plat_output::{CsvWriter, SimOutputObserver};
use plat_platform::{PlatformBuilder, RtaRegistry, RtaSpec, StateReset};
use plat_sim::{FnActions, SimBuilder, SimObject};

use cwh::{Cwh3d, CwhInit, CwhModel};
use rta::SpeedLimit;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 42;
const STEP_SIZE:        f64 = 1.0;
const TOTAL_STEPS:      u64 = 2_000;
const OUTPUT_INTERVAL:  u64 = 10;
const MAX_THRUST:       f64 = 1.0;
const OUTPUT_DIR:       &str = "output/docking";

// Action elements are consumed in this order; thrust_z is left on its
// default by the policy's `None`.
const CONTROLLER_JSON: &str = r#"{
  "actuators": [
    { "name": "thrust_x", "zero_centered": true },
    { "name": "thrust_y", "zero_centered": true },
    { "name": "thrust_z", "rescale": false }
  ]
}"#;

// ── Policy ────────────────────────────────────────────────────────────────────

/// PD policy toward the chief, in normalized `[-1, 1]` action units.
fn docking_policy(_id: PlatformId, platform: &dyn SimObject, sim_state: &SimState) -> Option<Action> {
    platform.action_space()?;
    let me = sim_state.by_name(platform.name())?;
    let chief = sim_state.by_name("chief")?;

    let rel_pos = me.position - chief.position;
    let rel_vel = me.velocity - chief.velocity;
    let command = -(rel_pos * 0.002 + rel_vel * 0.2);

    Some(Action::Elements(vec![
        Some(command.x.clamp(-1.0, 1.0).into()),
        Some(command.y.clamp(-1.0, 1.0).into()),
        None,
    ]))
}

fn thrusters() -> Result<Vec<Actuator>> {
    let bounds = Bounds::new(-MAX_THRUST, MAX_THRUST)?;
    Ok(vec![
        Actuator::continuous("thrust_x", bounds, &[0.0])?,
        Actuator::continuous("thrust_y", bounds, &[0.0])?,
        Actuator::continuous("thrust_z", bounds, &[0.0])?,
    ])
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Safety filters available by name.
    let mut registry = RtaRegistry::new();
    registry.register(SpeedLimit::NAME, SpeedLimit::from_config);

    // 2. Platforms.
    let chief = PlatformBuilder::new("chief", Cwh3d)
        .dynamics(LinearDynamics::new(LinearOde::new(CwhModel { thrusters: false })?, IntegrationMethod::Rk45))
        .build()?;

    let deputy = PlatformBuilder::new("deputy", Cwh3d)
        .actuators(thrusters()?)
        .controller(ControllerConfig::from_json_str(CONTROLLER_JSON)?)
        .dynamics(LinearDynamics::new(LinearOde::new(CwhModel { thrusters: true })?, IntegrationMethod::Rk45))
        .initial_state(StateReset::Build(CwhInit { position: [-800.0, 600.0, 0.0], velocity: [2.0, -1.0, 0.0] }))
        .rta(RtaSpec::named(SpeedLimit::NAME, json!({
            "chief":      "chief",
            "v0":         0.2,
            "max_thrust": MAX_THRUST,
        })))
        .build_with(&registry)?;

    // 3. Sim.
    let config = SimConfig {
        step_size:             STEP_SIZE,
        total_steps:           TOTAL_STEPS,
        seed:                  SEED,
        output_interval_steps: OUTPUT_INTERVAL,
    };
    info!(steps = config.total_steps, step_size = config.step_size, "docking scenario configured");

    let mut sim = SimBuilder::new(config, FnActions(docking_policy))
        .platform(chief)
        .platform(deputy)
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s ({} steps)", elapsed.as_secs_f64(), sim.cohort.step().0);
    println!();
    println!("{:<8} {:>10} {:>10} {:>10}  {}", "Name", "x", "y", "z", "RTA");
    println!("{}", "-".repeat(56));
    for info in sim.cohort.info().values() {
        println!(
            "{:<8} {:>10.2} {:>10.2} {:>10.2}  {}",
            info.name,
            info.x,
            info.y,
            info.z,
            info.rta.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
        );
    }

    Ok(())
}
