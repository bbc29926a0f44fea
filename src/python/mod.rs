//! Python bindings for radar-lead-rs using PyO3.
//!
//! The classes mirror the Python radar helpers API used by the control
//! stack: `Track`, `Cluster`, and radar state dicts keyed like the wire
//! format.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::constants::{LEAD_ACCEL_TAU, RADAR_TO_CENTER, V_EGO_STATIONARY};
use crate::RadarState;

mod cluster;
mod track;

pub use cluster::PyCluster;
pub use track::PyTrack;

/// Convert a record to a dict with wire-format keys.
pub(crate) fn radar_state_to_dict<'py>(
    py: Python<'py>,
    state: &RadarState,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("dRel", state.d_rel)?;
    dict.set_item("yRel", state.y_rel)?;
    dict.set_item("vRel", state.v_rel)?;
    dict.set_item("vLead", state.v_lead)?;
    dict.set_item("vLeadK", state.v_lead_k)?;
    dict.set_item("aLeadK", state.a_lead_k)?;
    dict.set_item("aLeadTau", state.a_lead_tau)?;
    dict.set_item("measured", state.measured)?;
    dict.set_item("status", state.status)?;
    dict.set_item("fcw", state.fcw)?;
    dict.set_item("modelProb", state.model_prob)?;
    dict.set_item("radar", state.radar)?;
    Ok(dict)
}

/// Python module for radar-lead-rs.
#[pymodule]
fn _radar_lead_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTrack>()?;
    m.add_class::<PyCluster>()?;

    m.add("LEAD_ACCEL_TAU", LEAD_ACCEL_TAU)?;
    m.add("RADAR_TO_CENTER", RADAR_TO_CENTER)?;
    m.add("v_ego_stationary", V_EGO_STATIONARY)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
