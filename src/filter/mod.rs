//! Lead speed/acceleration filter.
//!
//! - `LeadFilter` / `LeadFilterFactory` - the estimator seam used by tracks
//! - `SteadyStateKalman` - fixed-gain implementation
//! - `LeadFilterConfig` - injected system and gain matrices

mod traits;
mod kf1d;

pub use traits::{LeadFilter, LeadFilterFactory};
pub use kf1d::{LeadFilterConfig, SteadyStateKalman};
