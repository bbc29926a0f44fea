//! Steady-state Kalman filter with a precomputed constant gain.
//!
//! The gain is supplied once through [`LeadFilterConfig`] and is never
//! recomputed, so the per-cycle step is a single affine map:
//! `x <- (A - K C) x + K z`.

use nalgebra::{Matrix2, RowVector2, Vector2};

use super::traits::{LeadFilter, LeadFilterFactory};
use crate::constants::{DT_MDL, VLEAD_K};

/// System and gain matrices of the lead filter.
///
/// This is a plain value object: build it once at startup and hand it to
/// every track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeadFilterConfig {
    /// State transition matrix.
    pub a: Matrix2<f64>,
    /// Observation row.
    pub c: RowVector2<f64>,
    /// Steady-state gain.
    pub k: Vector2<f64>,
}

impl LeadFilterConfig {
    /// Create a config from explicit matrices.
    pub fn new(a: Matrix2<f64>, c: RowVector2<f64>, k: Vector2<f64>) -> Self {
        Self { a, c, k }
    }

    /// `A - K C`, applied to the previous state every step.
    pub fn a_k(&self) -> Matrix2<f64> {
        self.a - self.k * self.c
    }
}

/// Constant-acceleration model at [`DT_MDL`] with speed observed directly and
/// the [`VLEAD_K`] gain precomputed for that cycle time.
impl Default for LeadFilterConfig {
    fn default() -> Self {
        Self::new(
            Matrix2::new(1.0, DT_MDL, 0.0, 1.0),
            RowVector2::new(1.0, 0.0),
            Vector2::new(VLEAD_K[0], VLEAD_K[1]),
        )
    }
}

impl LeadFilterFactory for LeadFilterConfig {
    type Filter = SteadyStateKalman;

    fn create_filter(&self, initial: Vector2<f64>) -> SteadyStateKalman {
        SteadyStateKalman::new(initial, self)
    }
}

/// Speed-measured, two-state Kalman filter with fixed gain.
#[derive(Clone, Debug)]
pub struct SteadyStateKalman {
    /// State vector [speed, accel]
    x: Vector2<f64>,
    /// Precomputed A - K C
    a_k: Matrix2<f64>,
    /// Steady-state gain
    k: Vector2<f64>,
}

impl SteadyStateKalman {
    /// Create a filter at state `x0`.
    pub fn new(x0: Vector2<f64>, config: &LeadFilterConfig) -> Self {
        Self {
            x: x0,
            a_k: config.a_k(),
            k: config.k,
        }
    }
}

impl LeadFilter for SteadyStateKalman {
    fn initialize(&mut self, x: Vector2<f64>) {
        self.x = x;
    }

    fn step(&mut self, measurement: f64) -> &Vector2<f64> {
        self.x = self.a_k * self.x + self.k * measurement;
        &self.x
    }

    fn state_vector(&self) -> &Vector2<f64> {
        &self.x
    }
}
