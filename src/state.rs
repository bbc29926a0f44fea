//! Published lead state records.

use serde::{Deserialize, Serialize};

use crate::constants::LEAD_ACCEL_TAU;

/// Lead estimate handed to longitudinal control, one per object per cycle.
///
/// Serialized field names follow the radar state wire format
/// (`dRel`, `vLeadK`, `aLeadTau`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarState {
    /// Longitudinal distance (m).
    pub d_rel: f64,
    /// Lateral offset (m).
    pub y_rel: f64,
    /// Relative speed (m/s).
    pub v_rel: f64,
    /// Absolute lead speed (m/s).
    pub v_lead: f64,
    /// Filtered lead speed (m/s).
    pub v_lead_k: f64,
    /// Filtered lead acceleration (m/s^2).
    pub a_lead_k: f64,
    /// Acceleration persistence time-constant (s).
    pub a_lead_tau: f64,
    /// At least one contributing reflection was measured this cycle.
    pub measured: bool,
    pub status: bool,
    /// Forward collision warning candidate.
    pub fcw: bool,
    /// Model confidence that this object is the lead.
    pub model_prob: f64,
    /// Radar-derived (true) or vision-derived (false).
    pub radar: bool,
}

/// Vision lead estimate from the driving model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionLead {
    /// Distance from the vehicle center (m).
    pub dist: f64,
    /// Lateral offset (m).
    pub rel_y: f64,
    /// Relative speed (m/s).
    pub rel_vel: f64,
    /// Model confidence.
    pub prob: f64,
}

impl RadarState {
    /// Build a record straight from a vision lead, without any radar tracks.
    ///
    /// No filtering is applied, so `v_lead` and `v_lead_k` are identical and
    /// the acceleration is zero. Vision leads never raise FCW.
    ///
    /// # Arguments
    /// * `lead` - Vision lead estimate
    /// * `v_ego` - Ego speed
    /// * `radar_to_center` - Radar mounting offset from the vehicle center
    pub fn from_vision(lead: &VisionLead, v_ego: f64, radar_to_center: f64) -> Self {
        let v_lead = v_ego + lead.rel_vel;
        Self {
            d_rel: lead.dist - radar_to_center,
            y_rel: lead.rel_y,
            v_rel: lead.rel_vel,
            v_lead,
            v_lead_k: v_lead,
            a_lead_k: 0.0,
            a_lead_tau: LEAD_ACCEL_TAU,
            measured: false,
            status: true,
            fcw: false,
            model_prob: lead.prob,
            radar: false,
        }
    }

    /// Serialize to a JSON object string.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RADAR_TO_CENTER;
    use approx::assert_relative_eq;

    fn lead(dist: f64) -> VisionLead {
        VisionLead {
            dist,
            rel_y: -0.4,
            rel_vel: -3.0,
            prob: 0.97,
        }
    }

    #[test]
    fn test_from_vision_subtracts_mounting_offset() {
        let state = RadarState::from_vision(&lead(30.0), 15.0, RADAR_TO_CENTER);
        assert_relative_eq!(state.d_rel, 27.3, epsilon = 1e-12);
        assert_relative_eq!(state.y_rel, -0.4);
        assert_relative_eq!(state.v_rel, -3.0);
    }

    #[test]
    fn test_from_vision_unfiltered_speeds() {
        let state = RadarState::from_vision(&lead(30.0), 15.0, RADAR_TO_CENTER);
        assert_relative_eq!(state.v_lead, 12.0);
        assert_eq!(state.v_lead, state.v_lead_k);
        assert_eq!(state.a_lead_k, 0.0);
        assert_eq!(state.a_lead_tau, LEAD_ACCEL_TAU);
    }

    #[test]
    fn test_from_vision_flags() {
        // High confidence still never raises FCW from vision
        let state = RadarState::from_vision(&lead(30.0), 15.0, RADAR_TO_CENTER);
        assert!(!state.fcw);
        assert!(!state.radar);
        assert!(state.status);
        assert_relative_eq!(state.model_prob, 0.97);
    }

    #[test]
    fn test_json_field_names() {
        let state = RadarState::from_vision(&lead(30.0), 15.0, RADAR_TO_CENTER);
        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

        for key in [
            "dRel", "yRel", "vRel", "vLead", "vLeadK", "aLeadK", "aLeadTau", "measured",
            "status", "fcw", "modelProb", "radar",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["radar"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_vision_lead_from_json() {
        let lead: VisionLead =
            serde_json::from_str(r#"{"dist": 50.0, "relY": 0.5, "relVel": -1.0, "prob": 0.6}"#)
                .unwrap();
        assert_relative_eq!(lead.dist, 50.0);
        assert_relative_eq!(lead.rel_y, 0.5);
        assert_relative_eq!(lead.rel_vel, -1.0);
        assert_relative_eq!(lead.prob, 0.6);
    }
}
