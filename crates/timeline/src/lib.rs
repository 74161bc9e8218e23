//! Goal timeline (Layer 2)
//!
//! Rate policy, timeframe estimation, input guards and before/after
//! statistics.

#![warn(missing_docs)]

pub mod policy;
pub mod estimator;
pub mod timeline;
pub mod stats;

pub use policy::{RateBand, RatePolicy};
pub use estimator::{estimate, EstimationModel, Projection, TimeframeEstimator};
pub use timeline::{Result, Timeline, TimelineError};
pub use stats::{bmi, format_signed, Change, ProgressStats, Trend};
