//! Before/after statistics shown next to the timeline.

use kroppsresa_core::{is_provided, BodyProfile, GoalProfile};
use serde::{Deserialize, Serialize};
use crate::timeline::{Result, TimelineError};

/// Whether a change moves in the desired direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Desired direction
    Favorable,
    /// Undesired direction, or no change where a decrease is wanted
    Unfavorable,
}

/// A signed change between current and goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Goal minus current
    pub delta: f64,
    /// Direction assessment
    pub trend: Trend,
}

impl Change {
    /// Change where going down is the aim (weight, fat, BMI).
    fn decrease_wanted(delta: f64) -> Self {
        let trend = if delta >= 0.0 { Trend::Unfavorable } else { Trend::Favorable };
        Self { delta, trend }
    }

    /// Change where going up is the aim (muscle).
    fn increase_wanted(delta: f64) -> Self {
        let trend = if delta >= 0.0 { Trend::Favorable } else { Trend::Unfavorable };
        Self { delta, trend }
    }

    /// One decimal, with an explicit `+` for gains.
    pub fn signed(&self) -> String {
        format_signed(self.delta)
    }
}

/// Weight, composition and BMI deltas between a profile and its goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Weight change in kg
    pub weight: Change,

    /// Fat mass change in kg, when both values were given
    pub body_fat: Option<Change>,

    /// Muscle mass change in kg, when both values were given
    pub muscle_mass: Option<Change>,

    /// BMI now
    pub current_bmi: f64,

    /// BMI at goal weight
    pub goal_bmi: f64,

    /// BMI difference
    pub bmi: Change,
}

impl ProgressStats {
    /// Compute statistics. Needs weight, height and goal weight.
    pub fn compute(user: &BodyProfile, goal: &GoalProfile) -> Result<Self> {
        user.validate()?;
        goal.validate()?;

        if !is_provided(user.weight_kg) || !is_provided(goal.goal_weight_kg) {
            return Err(TimelineError::MissingWeight);
        }
        if !is_provided(user.height_cm) {
            return Err(TimelineError::MissingHeight);
        }

        let body_fat = (is_provided(user.body_fat_kg) && is_provided(goal.goal_body_fat_kg))
            .then(|| Change::decrease_wanted(goal.goal_body_fat_kg - user.body_fat_kg));
        let muscle_mass = (is_provided(user.muscle_mass_kg) && is_provided(goal.goal_muscle_mass_kg))
            .then(|| Change::increase_wanted(goal.goal_muscle_mass_kg - user.muscle_mass_kg));

        let current_bmi = bmi(user.weight_kg, user.height_cm);
        let goal_bmi = bmi(goal.goal_weight_kg, user.height_cm);

        Ok(Self {
            weight: Change::decrease_wanted(goal.goal_weight_kg - user.weight_kg),
            body_fat,
            muscle_mass,
            current_bmi,
            goal_bmi,
            bmi: Change::decrease_wanted(goal_bmi - current_bmi),
        })
    }
}

/// Body mass index from kg and cm. Zero when either input is zero.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg == 0.0 || height_cm == 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Format with one decimal and a leading `+` for positive values.
pub fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> (BodyProfile, GoalProfile) {
        let user = BodyProfile {
            height_cm: 180.0,
            weight_kg: 90.0,
            body_fat_kg: 25.0,
            muscle_mass_kg: 35.0,
            ..Default::default()
        };
        let goal = GoalProfile {
            goal_weight_kg: 81.0,
            goal_body_fat_kg: 15.0,
            goal_muscle_mass_kg: 37.0,
        };
        (user, goal)
    }

    #[test]
    fn test_bmi() {
        assert!((bmi(81.0, 180.0) - 25.0).abs() < 1e-9);
        assert_eq!(bmi(0.0, 180.0), 0.0);
        assert_eq!(bmi(80.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(2.0), "+2.0");
        assert_eq!(format_signed(-10.0), "-10.0");
        assert_eq!(format_signed(0.0), "0.0");
        assert_eq!(format_signed(1.26), "+1.3");
    }

    #[test]
    fn test_compute_full_profile() {
        let (user, goal) = profiles();
        let stats = ProgressStats::compute(&user, &goal).unwrap();

        assert_eq!(stats.weight.delta, -9.0);
        assert_eq!(stats.weight.trend, Trend::Favorable);
        assert_eq!(stats.weight.signed(), "-9.0");

        let fat = stats.body_fat.unwrap();
        assert_eq!(fat.delta, -10.0);
        assert_eq!(fat.trend, Trend::Favorable);

        let muscle = stats.muscle_mass.unwrap();
        assert_eq!(muscle.delta, 2.0);
        assert_eq!(muscle.trend, Trend::Favorable);
        assert_eq!(muscle.signed(), "+2.0");

        assert!((stats.goal_bmi - 25.0).abs() < 1e-9);
        assert!(stats.bmi.delta < 0.0);
        assert_eq!(stats.bmi.trend, Trend::Favorable);
    }

    #[test]
    fn test_composition_hidden_when_half_missing() {
        let (mut user, mut goal) = profiles();
        user.body_fat_kg = 0.0;
        goal.goal_muscle_mass_kg = 0.0;

        let stats = ProgressStats::compute(&user, &goal).unwrap();
        assert!(stats.body_fat.is_none());
        assert!(stats.muscle_mass.is_none());
    }

    #[test]
    fn test_gain_trends() {
        let (user, mut goal) = profiles();
        goal.goal_weight_kg = 95.0;
        goal.goal_muscle_mass_kg = 33.0;

        let stats = ProgressStats::compute(&user, &goal).unwrap();
        assert_eq!(stats.weight.trend, Trend::Unfavorable);
        assert_eq!(stats.bmi.trend, Trend::Unfavorable);
        assert_eq!(stats.muscle_mass.unwrap().trend, Trend::Unfavorable);
    }

    #[test]
    fn test_no_change_trends() {
        let (user, mut goal) = profiles();
        goal.goal_weight_kg = user.weight_kg;
        goal.goal_muscle_mass_kg = user.muscle_mass_kg;

        let stats = ProgressStats::compute(&user, &goal).unwrap();
        assert_eq!(stats.weight.trend, Trend::Unfavorable);
        assert_eq!(stats.muscle_mass.unwrap().trend, Trend::Favorable);
    }

    #[test]
    fn test_compute_requires_height_and_weights() {
        let (mut user, goal) = profiles();
        user.height_cm = 0.0;
        assert_eq!(ProgressStats::compute(&user, &goal), Err(TimelineError::MissingHeight));

        let (mut user, goal) = profiles();
        user.weight_kg = 0.0;
        assert_eq!(ProgressStats::compute(&user, &goal), Err(TimelineError::MissingWeight));
    }
}
