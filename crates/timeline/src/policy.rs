//! Rate policy - sustainable weekly rates of body change.
//!
//! The built-in values are common coaching heuristics. Every field can be
//! overridden from a JSON file; fields left out keep their defaults.

use kroppsresa_core::TimeframeEstimate;
use serde::{Deserialize, Serialize};
use crate::TimelineError;

/// Built-in rate constants, in kg per week.
pub mod defaults {
    /// Slowest sustainable fat loss
    pub const FAT_LOSS_MIN: f64 = 0.4;
    /// Fastest sustainable fat loss
    pub const FAT_LOSS_MAX: f64 = 0.8;

    /// Slowest expected muscle gain
    pub const MUSCLE_GAIN_MIN: f64 = 0.1;
    /// Fastest expected muscle gain
    pub const MUSCLE_GAIN_MAX: f64 = 0.25;

    /// Slowest weight loss considered
    pub const WEIGHT_LOSS_MIN: f64 = 0.5;
    /// Hard ceiling on weekly weight loss regardless of body size
    pub const WEIGHT_LOSS_CAP: f64 = 1.0;
    /// Weekly weight loss ceiling as a fraction of body weight (1%)
    pub const WEIGHT_LOSS_BODY_FRACTION: f64 = 0.01;

    /// Slowest weight gain
    pub const WEIGHT_GAIN_MIN: f64 = 0.2;
    /// Fastest weight gain
    pub const WEIGHT_GAIN_MAX: f64 = 0.4;

    /// Training-frequency multiplier applied to composition rates
    pub const FREQUENCY_FACTOR: f64 = 1.0;

    /// Window shown when weight is already at goal, in weeks
    pub const GOAL_MET_WEEKS: (u32, u32) = (4, 8);
}

/// A `[min, max]` weekly rate of change in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// Slowest rate
    pub min: f64,
    /// Fastest rate
    pub max: f64,
}

impl RateBand {
    /// Create a band.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both ends multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Weeks needed to move `change_kg` at this band: `(fastest, slowest)`.
    ///
    /// Non-positive changes take no time.
    pub fn weeks_for(&self, change_kg: f64) -> (f64, f64) {
        if change_kg <= 0.0 {
            return (0.0, 0.0);
        }
        (change_kg / self.max, change_kg / self.min)
    }

    fn validate(&self, name: &str) -> Result<(), TimelineError> {
        if !positive(self.min) || !positive(self.max) {
            return Err(TimelineError::InvalidPolicy(format!(
                "{} rates must be positive, got [{}, {}]",
                name, self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(TimelineError::InvalidPolicy(format!(
                "{} band is inverted: [{}, {}]",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Full set of rates the estimator works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatePolicy {
    /// Fat-loss band
    pub fat_loss: RateBand,

    /// Muscle-gain band
    pub muscle_gain: RateBand,

    /// Floor of the weight-loss band
    pub weight_loss_min_kg: f64,

    /// Absolute ceiling of the weight-loss band
    pub weight_loss_cap_kg: f64,

    /// Ceiling of the weight-loss band relative to body weight
    pub weight_loss_body_fraction: f64,

    /// Weight-gain band
    pub weight_gain: RateBand,

    /// Multiplier on composition rates. Kept at 1.0 until training
    /// frequency is collected.
    pub frequency_factor: f64,

    /// Estimate returned when weight is already at goal
    pub goal_met: TimeframeEstimate,
}

impl Default for RatePolicy {
    fn default() -> Self {
        use self::defaults::*;
        Self {
            fat_loss: RateBand::new(FAT_LOSS_MIN, FAT_LOSS_MAX),
            muscle_gain: RateBand::new(MUSCLE_GAIN_MIN, MUSCLE_GAIN_MAX),
            weight_loss_min_kg: WEIGHT_LOSS_MIN,
            weight_loss_cap_kg: WEIGHT_LOSS_CAP,
            weight_loss_body_fraction: WEIGHT_LOSS_BODY_FRACTION,
            weight_gain: RateBand::new(WEIGHT_GAIN_MIN, WEIGHT_GAIN_MAX),
            frequency_factor: FREQUENCY_FACTOR,
            goal_met: TimeframeEstimate::new(GOAL_MET_WEEKS.0, GOAL_MET_WEEKS.1),
        }
    }
}

impl RatePolicy {
    /// Override the frequency factor.
    pub fn with_frequency_factor(mut self, factor: f64) -> Self {
        self.frequency_factor = factor;
        self
    }

    /// Parse a (possibly partial) policy from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let policy: RatePolicy = serde_json::from_str(json)
            .map_err(|e| TimelineError::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Fat-loss band after the frequency adjustment.
    pub fn adjusted_fat_loss(&self) -> RateBand {
        self.fat_loss.scaled(self.frequency_factor)
    }

    /// Muscle-gain band after the frequency adjustment.
    pub fn adjusted_muscle_gain(&self) -> RateBand {
        self.muscle_gain.scaled(self.frequency_factor)
    }

    /// Weight-loss band for a given body weight.
    ///
    /// The ceiling is the smaller of the absolute cap and the body-weight
    /// fraction, so light bodies can end up with `max < min`.
    pub fn weight_loss_for(&self, weight_kg: f64) -> RateBand {
        RateBand::new(
            self.weight_loss_min_kg,
            self.weight_loss_cap_kg.min(weight_kg * self.weight_loss_body_fraction),
        )
    }

    /// Check every rate is usable as a divisor.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if !positive(self.frequency_factor) {
            return Err(TimelineError::InvalidPolicy(format!(
                "frequency_factor must be positive, got {}",
                self.frequency_factor
            )));
        }
        self.fat_loss.validate("fat_loss")?;
        self.muscle_gain.validate("muscle_gain")?;
        self.weight_gain.validate("weight_gain")?;

        for (name, value) in [
            ("weight_loss_min_kg", self.weight_loss_min_kg),
            ("weight_loss_cap_kg", self.weight_loss_cap_kg),
            ("weight_loss_body_fraction", self.weight_loss_body_fraction),
        ] {
            if !positive(value) {
                return Err(TimelineError::InvalidPolicy(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.goal_met.min_weeks > self.goal_met.max_weeks {
            return Err(TimelineError::InvalidPolicy(format!(
                "goal_met window is inverted: {} > {} weeks",
                self.goal_met.min_weeks, self.goal_met.max_weeks
            )));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
