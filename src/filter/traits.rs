//! Filter traits for lead speed/acceleration estimation.

use nalgebra::Vector2;

use crate::constants::{ACCEL, SPEED};

/// Two-state (speed, acceleration) linear estimator.
///
/// Implementations keep their gain fixed; there is no covariance to update.
pub trait LeadFilter: Send + Sync {
    /// Overwrite the state vector `[speed, accel]`.
    fn initialize(&mut self, x: Vector2<f64>);

    /// Advance one cycle with a speed measurement and return the new state.
    fn step(&mut self, measurement: f64) -> &Vector2<f64>;

    /// Current state vector `[speed, accel]`.
    fn state_vector(&self) -> &Vector2<f64>;

    /// Filtered speed component.
    fn speed(&self) -> f64 {
        self.state_vector()[SPEED]
    }

    /// Filtered acceleration component.
    fn accel(&self) -> f64 {
        self.state_vector()[ACCEL]
    }
}

/// Factory for creating filter instances.
///
/// Tracks hold a factory so they can build their filter on the first update
/// without knowing the filter parameters themselves.
pub trait LeadFilterFactory: Send + Sync {
    /// Filter type produced by this factory.
    type Filter: LeadFilter;

    /// Create a new filter initialized with `[speed, accel]`.
    fn create_filter(&self, initial: Vector2<f64>) -> Self::Filter;
}
