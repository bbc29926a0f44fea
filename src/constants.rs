//! Fixed numeric constants for lead estimation.
//!
//! None of these are runtime-tunable. The mounting offset has a default here
//! but can be overridden per vehicle through [`crate::RadarConfig`].

/// Model/radar cycle period in seconds.
pub const DT_MDL: f64 = 0.05;

/// Default lead acceleration persistence time-constant (s).
///
/// The longer a lead decelerates, the more likely it keeps decelerating.
pub const LEAD_ACCEL_TAU: f64 = 1.5;

/// Below this filtered acceleration magnitude (m/s^2) the time-constant is reset.
pub const LEAD_ACCEL_RESET_THRESHOLD: f64 = 0.5;

/// Per-cycle decay factor of the time-constant while acceleration persists.
pub const LEAD_ACCEL_TAU_DECAY: f64 = 0.9;

/// No stationary object flag at or above this ego speed (m/s).
pub const V_EGO_STATIONARY: f64 = 4.0;

/// Low speed lead: maximum longitudinal distance (m).
pub const LOW_SPEED_LEAD_MAX_DIST: f64 = 25.0;

/// Low speed lead: maximum absolute lateral offset (m).
pub const LOW_SPEED_LEAD_MAX_LAT: f64 = 1.5;

/// Model probability above which a cluster qualifies for FCW.
pub const FCW_MODEL_PROB_THRESHOLD: f64 = 0.9;

/// Radar is ~2.7m ahead of the center of the car.
pub const RADAR_TO_CENTER: f64 = 2.7;

/// Lateral weight in the clustering key; radar is inaccurate laterally.
pub const CLUSTER_KEY_LAT_WEIGHT: f64 = 2.0;

/// Filter state index of speed.
pub const SPEED: usize = 0;

/// Filter state index of acceleration.
pub const ACCEL: usize = 1;

/// Precomputed steady-state gain of the lead speed/accel filter.
pub const VLEAD_K: [f64; 2] = [0.1988689, 0.28555364];
