//! Track: one radar reflection followed across cycles.

use std::fmt;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{
    CLUSTER_KEY_LAT_WEIGHT, LEAD_ACCEL_RESET_THRESHOLD, LEAD_ACCEL_TAU, LEAD_ACCEL_TAU_DECAY,
};
use crate::filter::{LeadFilter, LeadFilterConfig, LeadFilterFactory, SteadyStateKalman};

/// Opaque track handle assigned by the upstream association step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single radar reflection with its lead speed/acceleration filter.
///
/// Relative values are copied verbatim from the latest matched detection.
/// The filter lives as long as the track and is only re-initialized on the
/// first update or by [`Track::reset_a_lead`].
#[derive(Clone, Debug)]
pub struct Track {
    /// Longitudinal distance (m).
    pub d_rel: f64,

    /// Lateral distance (m).
    pub y_rel: f64,

    /// Relative speed (m/s).
    pub v_rel: f64,

    /// Whether the last update was a measurement rather than an estimate.
    pub measured: bool,

    /// Absolute lead speed, `v_rel` plus aligned ego speed (m/s).
    pub v_lead: f64,

    /// Filtered lead speed (m/s).
    pub v_lead_k: f64,

    /// Filtered lead acceleration (m/s^2).
    pub a_lead_k: f64,

    /// Acceleration persistence time-constant (s).
    pub a_lead_tau: f64,

    /// Number of updates since creation.
    cnt: u64,

    kf: SteadyStateKalman,
}

impl Track {
    /// Create a track that has not been updated yet.
    pub fn new(filter_config: LeadFilterConfig) -> Self {
        Self {
            d_rel: 0.0,
            y_rel: 0.0,
            v_rel: 0.0,
            measured: false,
            v_lead: 0.0,
            v_lead_k: 0.0,
            a_lead_k: 0.0,
            a_lead_tau: LEAD_ACCEL_TAU,
            cnt: 0,
            kf: filter_config.create_filter(Vector2::zeros()),
        }
    }

    /// Number of updates applied to this track.
    #[inline]
    pub fn cnt(&self) -> u64 {
        self.cnt
    }

    /// Filter state `[speed, accel]`.
    pub fn filter_state(&self) -> &Vector2<f64> {
        self.kf.state_vector()
    }

    /// Apply this cycle's matched detection.
    ///
    /// # Arguments
    /// * `d_rel` - Longitudinal distance
    /// * `y_rel` - Lateral distance
    /// * `v_rel` - Relative speed
    /// * `v_ego_t_aligned` - Ego speed at the detection timestamp
    /// * `measured` - False when the radar only extrapolated this point
    pub fn update(
        &mut self,
        d_rel: f64,
        y_rel: f64,
        v_rel: f64,
        v_ego_t_aligned: f64,
        measured: bool,
    ) {
        self.d_rel = d_rel;
        self.y_rel = y_rel;
        self.v_rel = v_rel;
        self.measured = measured;

        self.v_lead = self.v_rel + v_ego_t_aligned;

        if self.cnt == 0 {
            debug!(v_lead = self.v_lead, "initializing lead filter");
            self.kf.initialize(Vector2::new(self.v_lead, 0.0));
        } else {
            self.kf.step(self.v_lead);
        }

        self.cnt = self.cnt.saturating_add(1);

        self.v_lead_k = self.kf.speed();
        self.a_lead_k = self.kf.accel();

        // Learn if constant acceleration
        if self.a_lead_k.abs() < LEAD_ACCEL_RESET_THRESHOLD {
            self.a_lead_tau = LEAD_ACCEL_TAU;
        } else {
            self.a_lead_tau *= LEAD_ACCEL_TAU_DECAY;
        }

        trace!(
            cnt = self.cnt,
            v_lead_k = self.v_lead_k,
            a_lead_k = self.a_lead_k,
            a_lead_tau = self.a_lead_tau,
            "track updated"
        );
    }

    /// Clustering key `[d_rel, 2 * y_rel, v_rel]`.
    ///
    /// Lateral offset is weighted up since radar is inaccurate in that dimension.
    pub fn cluster_key(&self) -> Vector3<f64> {
        Vector3::new(self.d_rel, self.y_rel * CLUSTER_KEY_LAT_WEIGHT, self.v_rel)
    }

    /// Override the lead acceleration with an externally known value.
    ///
    /// Re-initializes the filter at `[v_lead, a_lead_k]`. The update counter is untouched.
    pub fn reset_a_lead(&mut self, a_lead_k: f64, a_lead_tau: f64) {
        debug!(a_lead_k, a_lead_tau, "resetting lead acceleration");
        self.kf.initialize(Vector2::new(self.v_lead, a_lead_k));
        self.a_lead_k = a_lead_k;
        self.a_lead_tau = a_lead_tau;
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(LeadFilterConfig::default())
    }
}
