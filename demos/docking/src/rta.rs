//! Distance-dependent speed limit relative to the chief.
//!
//! Allowed closing speed is `v0 + 2·n·d`, loosest far from the chief and
//! tightest at docking.  While the deputy exceeds it the filter replaces the
//! commanded thrust with a braking thrust against the relative velocity.

use nalgebra::DVector;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use plat_core::SimState;
use plat_platform::{PlatformView, RtaError, RtaFilter, RtaResult};

use crate::cwh::{MASS, MEAN_MOTION};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeedLimitConfig {
    pub chief:       String,
    /// Speed allowed at zero distance, m/s.
    pub v0:          f64,
    /// Largest thrust per axis, N.
    pub max_thrust:  f64,
}

pub struct SpeedLimit {
    config:      SpeedLimitConfig,
    platform:    String,
    intervening: bool,
    limit:       f64,
    speed:       f64,
}

impl SpeedLimit {
    pub const NAME: &'static str = "speed_limit";

    pub fn from_config(config: &Value) -> RtaResult<Box<dyn RtaFilter>> {
        let config: SpeedLimitConfig = serde_json::from_value(config.clone()).map_err(|e| {
            RtaError::InvalidConfig { filter: Self::NAME.into(), reason: e.to_string() }
        })?;
        Ok(Box::new(SpeedLimit {
            config,
            platform:    String::new(),
            intervening: false,
            limit:       0.0,
            speed:       0.0,
        }))
    }
}

impl RtaFilter for SpeedLimit {
    fn setup(&mut self, platform: &PlatformView<'_>) -> RtaResult<()> {
        if platform.control_len() != 3 {
            return Err(RtaError::Setup(format!(
                "{} needs three thrust channels, {} has {}",
                Self::NAME,
                platform.name,
                platform.control_len()
            )));
        }
        self.platform = platform.name.to_string();
        Ok(())
    }

    fn filter_control(
        &mut self,
        sim_state: &SimState,
        step_size: f64,
        control:   DVector<f64>,
    ) -> RtaResult<DVector<f64>> {
        let (Some(me), Some(chief)) = (sim_state.by_name(&self.platform), sim_state.by_name(&self.config.chief))
        else {
            return Err(RtaError::Filter(format!(
                "{} or {} missing from the simulation state",
                self.platform, self.config.chief
            )));
        };

        let rel_pos = me.position - chief.position;
        let rel_vel = me.velocity - chief.velocity;
        self.limit = self.config.v0 + 2.0 * MEAN_MOTION * rel_pos.norm();
        self.speed = rel_vel.norm();
        self.intervening = self.speed > self.limit;

        if !self.intervening {
            return Ok(control);
        }

        // Shed the excess speed within one step if thrust allows.
        let excess = self.speed - self.limit;
        let wanted = MASS * excess / step_size.max(f64::EPSILON);
        let direction = -rel_vel / self.speed;
        let brake = direction * wanted.min(self.config.max_thrust * 3f64.sqrt());
        debug!(platform = %self.platform, speed = self.speed, limit = self.limit, "braking");
        Ok(DVector::from_iterator(
            3,
            brake.iter().map(|t| t.clamp(-self.config.max_thrust, self.config.max_thrust)),
        ))
    }

    fn generate_info(&self) -> Value {
        json!({
            "intervening": self.intervening,
            "speed":       self.speed,
            "limit":       self.limit,
        })
    }
}
