//! Cluster: tracks grouped into one physical object for a single cycle.
//!
//! Clusters borrow their tracks and carry no state of their own; build one
//! per cycle from the upstream grouping, query it, then drop it.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::constants::{
    FCW_MODEL_PROB_THRESHOLD, LEAD_ACCEL_TAU, LOW_SPEED_LEAD_MAX_DIST, LOW_SPEED_LEAD_MAX_LAT,
    V_EGO_STATIONARY,
};
use crate::state::RadarState;
use crate::track::{Track, TrackId};
use crate::utils::mean;

/// Whether an external model confidence qualifies an object for FCW.
#[inline]
pub fn is_potential_fcw(model_prob: f64) -> bool {
    model_prob > FCW_MODEL_PROB_THRESHOLD
}

/// Non-owning group of tracks believed to be the same object.
///
/// Every attribute is a plain arithmetic mean over the members. Querying an
/// empty cluster panics.
#[derive(Clone, Debug, Default)]
pub struct Cluster<'a> {
    tracks: BTreeMap<TrackId, &'a Track>,
}

impl<'a> Cluster<'a> {
    /// Create an empty cluster.
    pub fn new() -> Self {
        Self {
            tracks: BTreeMap::new(),
        }
    }

    /// Add a member. Adding the same handle twice is a no-op.
    ///
    /// Returns true if the track was not already a member.
    pub fn add(&mut self, id: TrackId, track: &'a Track) -> bool {
        self.tracks.insert(id, track).is_none()
    }

    /// Number of member tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Member handles in ascending order.
    pub fn track_ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.keys().copied()
    }

    fn members(&self) -> impl Iterator<Item = &'a Track> + '_ {
        assert!(!self.tracks.is_empty(), "queried an empty cluster");
        self.tracks.values().copied()
    }

    /// Members updated more than once, which carry a meaningful filtered
    /// acceleration.
    fn settled(&self) -> impl Iterator<Item = &'a Track> + '_ {
        self.members().filter(|t| t.cnt() > 1)
    }

    pub fn d_rel(&self) -> f64 {
        mean(self.members().map(|t| t.d_rel))
    }

    pub fn y_rel(&self) -> f64 {
        mean(self.members().map(|t| t.y_rel))
    }

    pub fn v_rel(&self) -> f64 {
        mean(self.members().map(|t| t.v_rel))
    }

    pub fn v_lead(&self) -> f64 {
        mean(self.members().map(|t| t.v_lead))
    }

    pub fn v_lead_k(&self) -> f64 {
        mean(self.members().map(|t| t.v_lead_k))
    }

    /// Mean filtered acceleration over settled members, 0 if none are settled.
    pub fn a_lead_k(&self) -> f64 {
        if self.settled().next().is_some() {
            mean(self.settled().map(|t| t.a_lead_k))
        } else {
            0.0
        }
    }

    /// Mean time-constant over settled members, the default if none are settled.
    pub fn a_lead_tau(&self) -> f64 {
        if self.settled().next().is_some() {
            mean(self.settled().map(|t| t.a_lead_tau))
        } else {
            LEAD_ACCEL_TAU
        }
    }

    /// True if any member was measured (not extrapolated) this cycle.
    pub fn measured(&self) -> bool {
        self.members().any(|t| t.measured)
    }

    /// Whether an external model confidence qualifies this object for FCW.
    pub fn is_potential_fcw(&self, model_prob: f64) -> bool {
        is_potential_fcw(model_prob)
    }

    /// Stop for things close in front at low speed, even without model
    /// confirmation.
    pub fn potential_low_speed_lead(&self, v_ego: f64) -> bool {
        self.y_rel().abs() < LOW_SPEED_LEAD_MAX_LAT
            && v_ego < V_EGO_STATIONARY
            && self.d_rel() < LOW_SPEED_LEAD_MAX_DIST
    }

    /// Published record for this object.
    pub fn radar_state(&self, model_prob: f64) -> RadarState {
        let state = RadarState {
            d_rel: self.d_rel(),
            y_rel: self.y_rel(),
            v_rel: self.v_rel(),
            v_lead: self.v_lead(),
            v_lead_k: self.v_lead_k(),
            a_lead_k: self.a_lead_k(),
            a_lead_tau: self.a_lead_tau(),
            measured: self.measured(),
            status: true,
            fcw: self.is_potential_fcw(model_prob),
            model_prob,
            radar: true,
        };
        trace!(tracks = self.len(), d_rel = state.d_rel, fcw = state.fcw, "radar state");
        state
    }
}

impl fmt::Display for Cluster<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x: {:4.1}  y: {:4.1}  v: {:4.1}  a: {:4.1}",
            self.d_rel(),
            self.y_rel(),
            self.v_rel(),
            self.a_lead_k()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Track updated `n` times with constant relative values.
    fn track(n: usize, d_rel: f64, y_rel: f64, v_rel: f64, measured: bool) -> Track {
        let mut t = Track::default();
        for _ in 0..n {
            t.update(d_rel, y_rel, v_rel, 20.0, measured);
        }
        t
    }

    #[test]
    fn test_means() {
        let a = track(1, 30.0, 1.0, -2.0, true);
        let b = track(1, 32.0, -1.0, -1.0, true);
        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);
        cluster.add(TrackId(2), &b);

        assert_relative_eq!(cluster.d_rel(), 31.0);
        assert_relative_eq!(cluster.y_rel(), 0.0);
        assert_relative_eq!(cluster.v_rel(), -1.5);
        assert_relative_eq!(cluster.v_lead(), 18.5);
        assert_relative_eq!(cluster.v_lead_k(), 18.5);
    }

    #[test]
    fn test_add_is_idempotent() {
        let a = track(1, 30.0, 0.0, 0.0, true);
        let b = track(1, 40.0, 0.0, 0.0, true);
        let mut cluster = Cluster::new();

        assert!(cluster.add(TrackId(1), &a));
        assert!(!cluster.add(TrackId(1), &a));
        assert!(cluster.add(TrackId(2), &b));

        assert_eq!(cluster.len(), 2);
        assert_relative_eq!(cluster.d_rel(), 35.0);
        assert_eq!(cluster.track_ids().collect::<Vec<_>>(), vec![TrackId(1), TrackId(2)]);
    }

    #[test]
    fn test_accel_defaults_when_all_new() {
        let mut a = track(0, 0.0, 0.0, 0.0, true);
        a.update(30.0, 0.0, -1.0, 20.0, true);
        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);

        assert_eq!(a.cnt(), 1);
        assert_eq!(cluster.a_lead_k(), 0.0);
        assert_eq!(cluster.a_lead_tau(), LEAD_ACCEL_TAU);
    }

    #[test]
    fn test_accel_ignores_new_members() {
        let mut a = track(1, 30.0, 0.0, 0.0, true);
        a.update(30.0, 0.0, -2.0, 20.0, true);
        let mut b = track(1, 30.0, 0.0, 0.0, true);
        b.update(30.0, 0.0, -4.0, 20.0, true);
        let c = track(1, 30.0, 0.0, -9.0, true);

        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);
        cluster.add(TrackId(2), &b);
        cluster.add(TrackId(3), &c);

        assert_relative_eq!(cluster.a_lead_k(), (a.a_lead_k + b.a_lead_k) / 2.0);
        assert_relative_eq!(cluster.a_lead_tau(), (a.a_lead_tau + b.a_lead_tau) / 2.0);
        assert!(cluster.a_lead_k() < -0.5);

        // Settled members are picked regardless of insertion order
        let mut reordered = Cluster::new();
        reordered.add(TrackId(3), &c);
        reordered.add(TrackId(1), &a);
        assert_relative_eq!(reordered.a_lead_k(), a.a_lead_k);
        assert_relative_eq!(reordered.a_lead_tau(), a.a_lead_tau);
    }

    #[test]
    fn test_measured_is_any() {
        let a = track(1, 30.0, 0.0, 0.0, false);
        let b = track(1, 30.0, 0.0, 0.0, true);

        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);
        assert!(!cluster.measured());

        cluster.add(TrackId(2), &b);
        assert!(cluster.measured());
    }

    #[test]
    fn test_is_potential_fcw_boundary() {
        let a = track(1, 30.0, 0.0, 0.0, true);
        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);

        assert!(cluster.is_potential_fcw(0.91));
        assert!(!cluster.is_potential_fcw(0.90));

        // No cluster needed for the threshold alone
        assert!(is_potential_fcw(0.9 + 1e-9));
        assert!(!is_potential_fcw(FCW_MODEL_PROB_THRESHOLD));
        assert!(!is_potential_fcw(0.0));
    }

    #[test]
    fn test_potential_low_speed_lead() {
        let near = track(1, 20.0, 1.0, 0.0, true);
        let far = track(1, 26.0, 1.0, 0.0, true);
        let wide = track(1, 20.0, -1.6, 0.0, true);

        fn cluster(t: &Track) -> Cluster<'_> {
            let mut c = Cluster::new();
            c.add(TrackId(1), t);
            c
        }

        assert!(cluster(&near).potential_low_speed_lead(3.0));
        assert!(!cluster(&far).potential_low_speed_lead(3.0));
        assert!(!cluster(&near).potential_low_speed_lead(4.0));
        assert!(!cluster(&wide).potential_low_speed_lead(3.0));
    }

    #[test]
    fn test_radar_state() {
        let a = track(3, 30.0, 0.5, -1.0, true);
        let b = track(3, 31.0, 0.7, -1.0, false);
        let mut cluster = Cluster::new();
        cluster.add(TrackId(4), &a);
        cluster.add(TrackId(9), &b);

        let state = cluster.radar_state(0.95);
        assert_relative_eq!(state.d_rel, 30.5);
        assert_relative_eq!(state.y_rel, 0.6);
        assert_relative_eq!(state.v_lead, 19.0);
        assert_relative_eq!(state.v_lead_k, 19.0);
        assert_relative_eq!(state.a_lead_k, 0.0);
        assert_relative_eq!(state.a_lead_tau, LEAD_ACCEL_TAU);
        assert!(state.measured);
        assert!(state.status);
        assert!(state.fcw);
        assert!(state.radar);
        assert_relative_eq!(state.model_prob, 0.95);

        assert!(!cluster.radar_state(0.0).fcw);
    }

    #[test]
    fn test_display() {
        let a = track(1, 30.0, 0.5, -1.0, true);
        let mut cluster = Cluster::new();
        cluster.add(TrackId(1), &a);

        assert_eq!(cluster.to_string(), "x: 30.0  y:  0.5  v: -1.0  a:  0.0");
    }

    #[test]
    #[should_panic(expected = "queried an empty cluster")]
    fn test_empty_cluster_panics() {
        Cluster::new().d_rel();
    }

    #[test]
    #[should_panic(expected = "queried an empty cluster")]
    fn test_empty_cluster_accel_panics() {
        Cluster::new().a_lead_k();
    }
}
