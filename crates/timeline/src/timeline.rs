//! Timeline planning from raw form input.

use kroppsresa_core::{BodyProfile, GoalProfile, ProfileError};
use crate::estimator::{Projection, TimeframeEstimator};
use crate::policy::RatePolicy;

/// Error type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Reasons no timeline can be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// Current or goal weight missing
    #[error("both current weight and goal weight are required")]
    MissingWeight,

    /// Height missing (needed for BMI)
    #[error("height is required")]
    MissingHeight,

    /// A measurement was out of range
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),

    /// Rate policy rejected
    #[error("invalid rate policy: {0}")]
    InvalidPolicy(String),
}

/// Guards the estimator against incomplete or malformed input.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    estimator: TimeframeEstimator,
}

impl Timeline {
    /// Create a timeline planner around an estimator.
    pub fn new(estimator: TimeframeEstimator) -> Self {
        Self { estimator }
    }

    /// Create a timeline planner with a custom policy.
    pub fn with_policy(policy: RatePolicy) -> Result<Self> {
        Ok(Self::new(TimeframeEstimator::new(policy)?))
    }

    /// The wrapped estimator.
    pub fn estimator(&self) -> &TimeframeEstimator {
        &self.estimator
    }

    /// Estimate time to goal, or explain why there is no estimate.
    pub fn plan(&self, user: &BodyProfile, goal: &GoalProfile) -> Result<Projection> {
        user.validate()?;
        goal.validate()?;

        if user.weight_kg <= 0.0 || goal.goal_weight_kg <= 0.0 {
            return Err(TimelineError::MissingWeight);
        }

        Ok(self.estimator.project(&user.snapshot(), &goal.snapshot()))
    }
}
