//! Track registry.
//!
//! Owns every live [`Track`] keyed by its upstream handle. Clusters are built
//! from handles each cycle and only borrow from here.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Vector3;
use tracing::debug;

use crate::cluster::Cluster;
use crate::filter::LeadFilterConfig;
use crate::track::{Track, TrackId};
use crate::{Error, RadarConfig, Result};

/// Store of live tracks across radar cycles.
#[derive(Clone, Debug, Default)]
pub struct TrackRegistry {
    /// Live tracks by handle.
    tracks: BTreeMap<TrackId, Track>,

    /// Filter parameters given to newly created tracks.
    filter_config: LeadFilterConfig,
}

impl TrackRegistry {
    /// Create an empty registry.
    pub fn new(filter_config: LeadFilterConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            filter_config,
        }
    }

    /// Create an empty registry from a validated vehicle config.
    pub fn from_config(config: &RadarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(LeadFilterConfig::default()))
    }

    /// Apply a matched detection to track `id`, creating the track if this
    /// handle is new.
    pub fn update(
        &mut self,
        id: TrackId,
        d_rel: f64,
        y_rel: f64,
        v_rel: f64,
        v_ego_t_aligned: f64,
        measured: bool,
    ) -> &Track {
        let filter_config = self.filter_config;
        let track = self.tracks.entry(id).or_insert_with(|| {
            debug!(track = %id, "new track");
            Track::new(filter_config)
        });
        track.update(d_rel, y_rel, v_rel, v_ego_t_aligned, measured);
        track
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    /// Number of live tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Live handles in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.keys().copied()
    }

    /// Iterate over live tracks.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &Track)> + '_ {
        self.tracks.iter().map(|(id, track)| (*id, track))
    }

    /// Drop a track that is no longer matched.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let removed = self.tracks.remove(&id);
        if removed.is_some() {
            debug!(track = %id, "track dropped");
        }
        removed
    }

    /// Keep only the given handles, dropping every other track.
    ///
    /// Returns the number of dropped tracks.
    pub fn retain_ids(&mut self, ids: &[TrackId]) -> usize {
        let keep: BTreeSet<TrackId> = ids.iter().copied().collect();
        let before = self.tracks.len();
        self.tracks.retain(|id, _| {
            let kept = keep.contains(id);
            if !kept {
                debug!(track = %id, "track dropped");
            }
            kept
        });
        before - self.tracks.len()
    }

    /// Clustering keys of all live tracks for the upstream clustering step.
    pub fn cluster_keys(&self) -> Vec<(TrackId, Vector3<f64>)> {
        self.iter().map(|(id, track)| (id, track.cluster_key())).collect()
    }

    /// Group the given tracks into a cluster for this cycle.
    ///
    /// Repeated handles are only added once.
    ///
    /// # Errors
    /// `Error::UnknownTrack` if any handle is not live.
    pub fn cluster(&self, ids: &[TrackId]) -> Result<Cluster<'_>> {
        let mut cluster = Cluster::new();
        for &id in ids {
            let track = self.tracks.get(&id).ok_or(Error::UnknownTrack(id))?;
            cluster.add(id, track);
        }
        Ok(cluster)
    }
}
