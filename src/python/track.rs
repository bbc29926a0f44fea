//! Python wrapper for Track.

use pyo3::prelude::*;

use crate::Track;

/// A radar reflection followed across cycles.
#[pyclass(name = "Track")]
#[derive(Clone, Default)]
pub struct PyTrack {
    pub(crate) inner: Track,
}

#[pymethods]
impl PyTrack {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Apply this cycle's matched detection.
    fn update(&mut self, d_rel: f64, y_rel: f64, v_rel: f64, v_ego_t_aligned: f64, measured: bool) {
        self.inner.update(d_rel, y_rel, v_rel, v_ego_t_aligned, measured);
    }

    /// Clustering key [dRel, 2 * yRel, vRel].
    fn get_key_for_cluster(&self) -> Vec<f64> {
        self.inner.cluster_key().iter().copied().collect()
    }

    /// Override the lead acceleration and its time-constant.
    fn reset_a_lead(&mut self, a_lead_k: f64, a_lead_tau: f64) {
        self.inner.reset_a_lead(a_lead_k, a_lead_tau);
    }

    #[getter(dRel)]
    fn d_rel(&self) -> f64 {
        self.inner.d_rel
    }

    #[getter(yRel)]
    fn y_rel(&self) -> f64 {
        self.inner.y_rel
    }

    #[getter(vRel)]
    fn v_rel(&self) -> f64 {
        self.inner.v_rel
    }

    #[getter]
    fn measured(&self) -> bool {
        self.inner.measured
    }

    #[getter(vLead)]
    fn v_lead(&self) -> f64 {
        self.inner.v_lead
    }

    #[getter(vLeadK)]
    fn v_lead_k(&self) -> f64 {
        self.inner.v_lead_k
    }

    #[getter(aLeadK)]
    fn a_lead_k(&self) -> f64 {
        self.inner.a_lead_k
    }

    #[getter(aLeadTau)]
    fn a_lead_tau(&self) -> f64 {
        self.inner.a_lead_tau
    }

    #[getter]
    fn cnt(&self) -> u64 {
        self.inner.cnt()
    }

    fn __repr__(&self) -> String {
        format!(
            "Track(dRel={:.1}, yRel={:.1}, vRel={:.1}, cnt={})",
            self.inner.d_rel,
            self.inner.y_rel,
            self.inner.v_rel,
            self.inner.cnt()
        )
    }
}
