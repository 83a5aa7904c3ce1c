//! Plain data row types written by output backends.

use plat_core::{PlatformId, Step};
use plat_platform::PlatformInfo;

use crate::OutputResult;

/// One platform's info at a snapshot step.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformInfoRow {
    pub step:              u64,
    pub time_secs:         f64,
    pub platform_id:       u32,
    pub name:              String,
    pub x:                 f64,
    pub y:                 f64,
    pub z:                 f64,
    /// JSON object, actuator name → command.
    pub actuation:         String,
    /// JSON array.
    pub control:           String,
    pub untrimmed_control: String,
    /// JSON payload of the safety filter; empty when none is attached.
    pub rta:               String,
}

impl PlatformInfoRow {
    pub fn from_info(step: Step, time_secs: f64, id: PlatformId, info: &PlatformInfo) -> OutputResult<Self> {
        Ok(Self {
            step:              step.0,
            time_secs,
            platform_id:       id.0,
            name:              info.name.clone(),
            x:                 info.x,
            y:                 info.y,
            z:                 info.z,
            actuation:         serde_json::to_string(&info.controller.actuation)?,
            control:           serde_json::to_string(&info.controller.control)?,
            untrimmed_control: serde_json::to_string(&info.controller.untrimmed_control)?,
            rta:               match &info.rta {
                Some(payload) => serde_json::to_string(payload)?,
                None => String::new(),
            },
        })
    }
}

/// Summary of one completed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:      u64,
    pub time_secs: f64,
    pub platforms: u64,
}
