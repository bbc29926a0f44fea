//! Python wrapper for Cluster.
//!
//! Python holds the tracks, so the cluster keeps references to the Python
//! objects and borrows them into a short-lived Rust [`Cluster`] per query.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::radar_state_to_dict;
use super::track::PyTrack;
use crate::constants::RADAR_TO_CENTER;
use crate::cluster;
use crate::{Cluster, RadarState, TrackId, VisionLead};

/// Tracks grouped into one object.
#[pyclass(name = "Cluster")]
pub struct PyCluster {
    tracks: Vec<Py<PyTrack>>,
    radar_to_center: f64,
}

impl PyCluster {
    fn with_cluster<R>(&self, py: Python<'_>, f: impl FnOnce(&Cluster<'_>) -> R) -> PyResult<R> {
        if self.tracks.is_empty() {
            return Err(PyValueError::new_err("cluster has no tracks"));
        }
        let guards: Vec<PyRef<'_, PyTrack>> = self.tracks.iter().map(|t| t.borrow(py)).collect();
        let mut cluster = Cluster::new();
        for (i, guard) in guards.iter().enumerate() {
            cluster.add(TrackId(i as u64), &guard.inner);
        }
        Ok(f(&cluster))
    }
}

#[pymethods]
impl PyCluster {
    #[new]
    #[pyo3(signature = (radar_to_center=RADAR_TO_CENTER))]
    fn new(radar_to_center: f64) -> Self {
        Self {
            tracks: Vec::new(),
            radar_to_center,
        }
    }

    /// Add a track; adding the same track object twice has no effect.
    fn add(&mut self, track: Py<PyTrack>) {
        if !self.tracks.iter().any(|t| t.is(&track)) {
            self.tracks.push(track);
        }
    }

    fn __len__(&self) -> usize {
        self.tracks.len()
    }

    #[getter(dRel)]
    fn d_rel(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.d_rel())
    }

    #[getter(yRel)]
    fn y_rel(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.y_rel())
    }

    #[getter(vRel)]
    fn v_rel(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.v_rel())
    }

    #[getter(vLead)]
    fn v_lead(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.v_lead())
    }

    #[getter(vLeadK)]
    fn v_lead_k(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.v_lead_k())
    }

    #[getter(aLeadK)]
    fn a_lead_k(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.a_lead_k())
    }

    #[getter(aLeadTau)]
    fn a_lead_tau(&self, py: Python<'_>) -> PyResult<f64> {
        self.with_cluster(py, |c| c.a_lead_tau())
    }

    #[getter]
    fn measured(&self, py: Python<'_>) -> PyResult<bool> {
        self.with_cluster(py, |c| c.measured())
    }

    /// Radar state dict for this object.
    #[pyo3(name = "get_RadarState", signature = (model_prob=0.0))]
    fn get_radar_state<'py>(&self, py: Python<'py>, model_prob: f64) -> PyResult<Bound<'py, PyDict>> {
        let state = self.with_cluster(py, |c| c.radar_state(model_prob))?;
        radar_state_to_dict(py, &state)
    }

    /// Radar state dict built from a vision lead message.
    ///
    /// `lead_msg` needs `dist`, `relY`, `relVel` and `prob` attributes.
    #[pyo3(name = "get_RadarState_from_vision")]
    fn get_radar_state_from_vision<'py>(
        &self,
        py: Python<'py>,
        lead_msg: &Bound<'py, PyAny>,
        v_ego: f64,
    ) -> PyResult<Bound<'py, PyDict>> {
        let lead = VisionLead {
            dist: lead_msg.getattr("dist")?.extract()?,
            rel_y: lead_msg.getattr("relY")?.extract()?,
            rel_vel: lead_msg.getattr("relVel")?.extract()?,
            prob: lead_msg.getattr("prob")?.extract()?,
        };
        let state = RadarState::from_vision(&lead, v_ego, self.radar_to_center);
        radar_state_to_dict(py, &state)
    }

    fn potential_low_speed_lead(&self, py: Python<'_>, v_ego: f64) -> PyResult<bool> {
        self.with_cluster(py, |c| c.potential_low_speed_lead(v_ego))
    }

    fn is_potential_fcw(&self, model_prob: f64) -> bool {
        cluster::is_potential_fcw(model_prob)
    }

    fn __str__(&self, py: Python<'_>) -> PyResult<String> {
        self.with_cluster(py, |c| c.to_string())
    }
}
