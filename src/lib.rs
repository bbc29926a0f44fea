//! # radar-lead-rs - Lead Vehicle Estimation from Radar Tracks
//!
//! Estimates the kinematic state of the vehicle ahead from radar point
//! detections for a longitudinal control loop.
//!
//! ## Features
//!
//! - Per-track steady-state Kalman filtering of lead speed and acceleration
//! - Acceleration persistence time-constant heuristic
//! - Cluster aggregation of co-located tracks into one object estimate
//! - Published radar state records, including the vision fallback
//! - Forward collision warning and low speed lead qualification
//!
//! Association of detections to tracks and clustering of tracks are done
//! upstream; this crate consumes their output as [`TrackId`] handles.
//!
//! ## Example
//!
//! ```rust,ignore
//! use radar_lead_rs::{RadarConfig, TrackId, TrackRegistry};
//!
//! let config = RadarConfig::default();
//! let mut registry = TrackRegistry::from_config(&config).unwrap();
//!
//! // One radar cycle
//! registry.update(TrackId(7), 30.0, 0.4, -1.5, 20.0, true);
//! registry.update(TrackId(8), 30.5, 0.6, -1.4, 20.0, true);
//!
//! let cluster = registry.cluster(&[TrackId(7), TrackId(8)]).unwrap();
//! let state = cluster.radar_state(0.95);
//! assert!(state.fcw);
//! ```

// Public modules
pub mod constants;
pub mod filter;
pub mod track;
pub mod registry;
pub mod cluster;
pub mod state;
pub mod config;
pub mod utils;

// Optional modules
#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use track::{Track, TrackId};
pub use registry::TrackRegistry;
pub use cluster::Cluster;
pub use state::{RadarState, VisionLead};
pub use config::RadarConfig;
pub use filter::{LeadFilter, LeadFilterConfig, LeadFilterFactory, SteadyStateKalman};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    use crate::track::TrackId;

    /// Errors that can occur in the radar-lead library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Unknown track: {0}")]
        UnknownTrack(TrackId),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }

    /// Result type for radar-lead operations
    pub type Result<T> = std::result::Result<T, Error>;
}
