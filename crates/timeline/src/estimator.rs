//! Goal timeline estimation.
//!
//! Turns the gap between a biometric snapshot and a goal into a range of
//! weeks. Composition goals (fat loss, muscle gain) take precedence over
//! plain weight goals; when both fat and muscle change, they are assumed to
//! progress concurrently, so the slower of the two bounds the estimate.

use kroppsresa_core::{BiometricSnapshot, GoalSnapshot, TimeframeEstimate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::policy::RatePolicy;
use crate::Result;

/// Which rate model produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimationModel {
    /// Fat loss and/or muscle gain
    Composition,
    /// Weight-only, losing
    WeightLoss,
    /// Weight-only, gaining
    WeightGain,
    /// Weight already at goal; fixed window
    GoalMet,
}

impl EstimationModel {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationModel::Composition => "composition",
            EstimationModel::WeightLoss => "weight-loss",
            EstimationModel::WeightGain => "weight-gain",
            EstimationModel::GoalMet => "goal-met",
        }
    }
}

/// An estimate together with the model that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Model used
    pub model: EstimationModel,
    /// Resulting range
    pub estimate: TimeframeEstimate,
}

/// Timeframe estimator.
///
/// Stateless apart from its rate policy; cheap to clone and safe to share
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct TimeframeEstimator {
    policy: RatePolicy,
}

impl TimeframeEstimator {
    /// Create an estimator with a custom policy.
    pub fn new(policy: RatePolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The active rate policy.
    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Estimate weeks to reach `goal` from `current`.
    ///
    /// Both weights must be positive; callers should go through
    /// [`crate::Timeline::plan`] when input is unchecked.
    pub fn estimate(&self, current: &BiometricSnapshot, goal: &GoalSnapshot) -> TimeframeEstimate {
        self.project(current, goal).estimate
    }

    /// Like [`estimate`](Self::estimate), also reporting which model was used.
    pub fn project(&self, current: &BiometricSnapshot, goal: &GoalSnapshot) -> Projection {
        let projection = match self.composition(current, goal) {
            Some(estimate) => Projection {
                model: EstimationModel::Composition,
                estimate,
            },
            None => self.weight_only(current, goal),
        };

        debug!(
            "Projected {}-{} weeks using {} model",
            projection.estimate.min_weeks,
            projection.estimate.max_weeks,
            projection.model.as_str()
        );
        projection
    }

    /// Rate-based composition model. `None` when there is no composition
    /// goal or the range rounds to zero.
    fn composition(&self, current: &BiometricSnapshot, goal: &GoalSnapshot) -> Option<TimeframeEstimate> {
        let fat_change = current.body_fat_kg - goal.goal_body_fat_kg;
        let muscle_change = goal.goal_muscle_mass_kg - current.muscle_mass_kg;

        if fat_change <= 0.0 && muscle_change <= 0.0 {
            return None;
        }

        let (fat_min, fat_max) = self.policy.adjusted_fat_loss().weeks_for(fat_change);
        let (muscle_min, muscle_max) = self.policy.adjusted_muscle_gain().weeks_for(muscle_change);

        let min_weeks = round_weeks(fat_min.max(muscle_min));
        let max_weeks = round_weeks(fat_max.max(muscle_max));

        if min_weeks == 0 && max_weeks == 0 {
            debug!(
                "Composition change too small (fat {:.2} kg, muscle {:.2} kg), using weight model",
                fat_change, muscle_change
            );
            return None;
        }
        Some(TimeframeEstimate::new(min_weeks, max_weeks))
    }

    fn weight_only(&self, current: &BiometricSnapshot, goal: &GoalSnapshot) -> Projection {
        let weight_change = current.weight_kg - goal.goal_weight_kg;

        let (model, band, change) = if weight_change > 0.0 {
            (
                EstimationModel::WeightLoss,
                self.policy.weight_loss_for(current.weight_kg),
                weight_change,
            )
        } else if weight_change < 0.0 {
            (EstimationModel::WeightGain, self.policy.weight_gain, -weight_change)
        } else {
            return Projection {
                model: EstimationModel::GoalMet,
                estimate: self.policy.goal_met,
            };
        };

        let (fastest, slowest) = band.weeks_for(change);
        Projection {
            model,
            estimate: TimeframeEstimate::new(round_weeks(fastest), round_weeks(slowest)),
        }
    }
}

/// Estimate with the built-in rate policy.
pub fn estimate(current: &BiometricSnapshot, goal: &GoalSnapshot) -> TimeframeEstimate {
    TimeframeEstimator::default().estimate(current, goal)
}

// Saturating: absurd deltas clamp at u32::MAX weeks.
fn round_weeks(weeks: f64) -> u32 {
    weeks.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RateBand;

    fn weight_only(current: f64, goal: f64) -> (BiometricSnapshot, GoalSnapshot) {
        (BiometricSnapshot::with_weight(current), GoalSnapshot::with_weight(goal))
    }

    #[test]
    fn test_weight_loss_only() {
        let (current, goal) = weight_only(100.0, 90.0);
        let projection = TimeframeEstimator::default().project(&current, &goal);

        assert_eq!(projection.model, EstimationModel::WeightLoss);
        assert_eq!(projection.estimate, TimeframeEstimate::new(10, 20));
        assert_eq!(projection.estimate.min_months(), 2);
        assert_eq!(projection.estimate.max_months(), 5);
        assert_eq!(projection.estimate.to_string(), "2–5 months");
    }

    #[test]
    fn test_weight_loss_rate_follows_body_weight() {
        // 1% of 70 kg = 0.7 kg/week ceiling
        let (current, goal) = weight_only(70.0, 63.0);
        let estimate = estimate(&current, &goal);
        assert_eq!(estimate.min_weeks, 10);
        assert_eq!(estimate.max_weeks, 14);
    }

    #[test]
    fn test_weight_loss_for_light_body_keeps_order() {
        // 1% of 40 kg = 0.4, below the 0.5 floor
        let (current, goal) = weight_only(40.0, 35.0);
        let estimate = estimate(&current, &goal);
        assert_eq!(estimate.min_weeks, 10);
        assert_eq!(estimate.max_weeks, 13);
    }

    #[test]
    fn test_weight_gain_only() {
        let (current, goal) = weight_only(70.0, 75.0);
        let projection = TimeframeEstimator::default().project(&current, &goal);

        assert_eq!(projection.model, EstimationModel::WeightGain);
        assert_eq!(projection.estimate, TimeframeEstimate::new(13, 25));
    }

    #[test]
    fn test_goal_already_met() {
        let (current, goal) = weight_only(80.0, 80.0);
        let projection = TimeframeEstimator::default().project(&current, &goal);

        assert_eq!(projection.model, EstimationModel::GoalMet);
        assert_eq!(projection.estimate, TimeframeEstimate::new(4, 8));
        assert_eq!(projection.estimate.min_months(), 1);
        assert_eq!(projection.estimate.max_months(), 2);
    }

    #[test]
    fn test_composition_takes_precedence() {
        let current = BiometricSnapshot::with_weight(80.0).body_fat(20.0).muscle_mass(30.0);
        let goal = GoalSnapshot::with_weight(75.0).body_fat(12.0).muscle_mass(32.0);

        let projection = TimeframeEstimator::default().project(&current, &goal);
        assert_eq!(projection.model, EstimationModel::Composition);
        assert_eq!(projection.estimate, TimeframeEstimate::new(10, 20));
    }

    #[test]
    fn test_composition_muscle_dominates() {
        let current = BiometricSnapshot::with_weight(80.0).body_fat(20.0).muscle_mass(30.0);
        let goal = GoalSnapshot::with_weight(80.0).body_fat(18.0).muscle_mass(35.0);

        // fat: 2.5-5 weeks, muscle: 20-50 weeks
        let estimate = estimate(&current, &goal);
        assert_eq!(estimate, TimeframeEstimate::new(20, 50));
    }

    #[test]
    fn test_current_fat_without_goal_fat_counts_as_full_loss() {
        // Zero goal fat is read as "not provided", which still makes the
        // whole current fat mass the change.
        let current = BiometricSnapshot::with_weight(80.0).body_fat(8.0);
        let goal = GoalSnapshot::with_weight(75.0);

        let projection = TimeframeEstimator::default().project(&current, &goal);
        assert_eq!(projection.model, EstimationModel::Composition);
        assert_eq!(projection.estimate, TimeframeEstimate::new(10, 20));
    }

    #[test]
    fn test_composition_already_better_falls_through() {
        let current = BiometricSnapshot::with_weight(100.0).body_fat(10.0).muscle_mass(40.0);
        let goal = GoalSnapshot::with_weight(90.0).body_fat(15.0).muscle_mass(35.0);

        let projection = TimeframeEstimator::default().project(&current, &goal);
        assert_eq!(projection.model, EstimationModel::WeightLoss);
        assert_eq!(projection.estimate, TimeframeEstimate::new(10, 20));
    }

    #[test]
    fn test_tiny_composition_change_falls_through() {
        // 0.1 kg fat: 0.125-0.25 weeks, rounds to zero
        let current = BiometricSnapshot::with_weight(80.0).body_fat(20.1);
        let goal = GoalSnapshot::with_weight(75.0).body_fat(20.0);

        let projection = TimeframeEstimator::default().project(&current, &goal);
        assert_eq!(projection.model, EstimationModel::WeightLoss);
        assert_eq!(projection.estimate, TimeframeEstimate::new(6, 10));
    }

    #[test]
    fn test_frequency_factor_shortens_composition() {
        let policy = RatePolicy::default().with_frequency_factor(2.0);
        let estimator = TimeframeEstimator::new(policy).unwrap();

        let current = BiometricSnapshot::with_weight(80.0).body_fat(20.0);
        let goal = GoalSnapshot::with_weight(75.0).body_fat(12.0);
        assert_eq!(estimator.estimate(&current, &goal), TimeframeEstimate::new(5, 10));
    }

    #[test]
    fn test_frequency_factor_leaves_weight_model_alone() {
        let policy = RatePolicy::default().with_frequency_factor(2.0);
        let estimator = TimeframeEstimator::new(policy).unwrap();

        let (current, goal) = weight_only(100.0, 90.0);
        assert_eq!(estimator.estimate(&current, &goal), TimeframeEstimate::new(10, 20));
    }

    #[test]
    fn test_policy_file_cap_and_goal_met_window_apply() {
        let policy = RatePolicy::from_json(
            r#"{"weight_loss_cap_kg": 0.8, "goal_met": {"min_weeks": 2, "max_weeks": 6}}"#,
        )
        .unwrap();
        let estimator = TimeframeEstimator::new(policy).unwrap();

        // 10 kg at [0.5, 0.8]: 12.5 rounds to 13
        let (current, goal) = weight_only(100.0, 90.0);
        assert_eq!(estimator.estimate(&current, &goal), TimeframeEstimate::new(13, 20));

        let (current, goal) = weight_only(80.0, 80.0);
        assert_eq!(estimator.estimate(&current, &goal), TimeframeEstimate::new(2, 6));
    }

    #[test]
    fn test_custom_policy_rejected_when_invalid() {
        let policy = RatePolicy {
            fat_loss: RateBand::new(0.0, 0.8),
            ..Default::default()
        };
        assert!(TimeframeEstimator::new(policy).is_err());
    }

    #[test]
    fn test_large_deltas_have_no_ceiling() {
        let (current, goal) = weight_only(300.0, 100.0);
        let estimate = estimate(&current, &goal);
        assert_eq!(estimate.min_weeks, 200);
        assert_eq!(estimate.max_weeks, 400);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let current = BiometricSnapshot::with_weight(92.3).body_fat(27.4).muscle_mass(31.2);
        let goal = GoalSnapshot::with_weight(84.0).body_fat(19.9).muscle_mass(33.0);
        let estimator = TimeframeEstimator::default();

        assert_eq!(estimator.estimate(&current, &goal), estimator.estimate(&current, &goal));
    }

    #[test]
    fn test_bounds_ordered_across_inputs() {
        let estimator = TimeframeEstimator::default();
        let weights = [35.0, 48.0, 60.0, 75.5, 90.0, 120.0, 180.0];
        let masses = [0.0, 5.0, 12.5, 20.0, 35.0];

        for &weight in &weights {
            for &goal_weight in &weights {
                for &fat in &masses {
                    for &goal_fat in &masses {
                        for &muscle in &masses {
                            for &goal_muscle in &masses {
                                let current = BiometricSnapshot::with_weight(weight)
                                    .body_fat(fat)
                                    .muscle_mass(muscle);
                                let goal = GoalSnapshot::with_weight(goal_weight)
                                    .body_fat(goal_fat)
                                    .muscle_mass(goal_muscle);
                                let estimate = estimator.estimate(&current, &goal);
                                assert!(estimate.max_weeks >= estimate.min_weeks);
                                assert!(estimate.max_months() >= estimate.min_months());
                                assert!(estimate.min_months() >= 1);
                            }
                        }
                    }
                }
            }
        }
    }
}
