//! Vehicle-specific configuration.
//!
//! Thresholds and the lead filter model are fixed in [`crate::constants`].
//! Only the radar mounting offset varies between vehicles.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::RADAR_TO_CENTER;
use crate::state::{RadarState, VisionLead};
use crate::{Error, Result};

/// Radar lead configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RadarConfig {
    /// Distance from the radar to the center of the vehicle (m).
    pub radar_to_center: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            radar_to_center: RADAR_TO_CENTER,
        }
    }
}

impl RadarConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.radar_to_center.is_finite() || self.radar_to_center < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "radar_to_center must be finite and non-negative, got {}",
                self.radar_to_center
            )));
        }
        Ok(())
    }

    /// Vision fallback record using this vehicle's mounting offset.
    pub fn vision_state(&self, lead: &VisionLead, v_ego: f64) -> RadarState {
        RadarState::from_vision(lead, v_ego, self.radar_to_center)
    }
}
