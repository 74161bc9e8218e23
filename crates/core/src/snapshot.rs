//! Biometric and goal snapshots - the estimator's inputs.
//!
//! Masses are absolute kilograms. Body fat and muscle mass are NOT
//! percentages. A value of exactly `0.0` in an optional field means
//! "not provided".

use serde::{Deserialize, Serialize};

/// The user's current measured body state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BiometricSnapshot {
    /// Body weight in kg
    pub weight_kg: f64,

    /// Fat mass in kg (0 = not provided)
    #[serde(default)]
    pub body_fat_kg: f64,

    /// Muscle mass in kg (0 = not provided)
    #[serde(default)]
    pub muscle_mass_kg: f64,
}

impl BiometricSnapshot {
    /// Snapshot with only weight known.
    pub fn with_weight(weight_kg: f64) -> Self {
        Self {
            weight_kg,
            ..Default::default()
        }
    }

    /// Set fat mass.
    pub fn body_fat(mut self, kg: f64) -> Self {
        self.body_fat_kg = kg;
        self
    }

    /// Set muscle mass.
    pub fn muscle_mass(mut self, kg: f64) -> Self {
        self.muscle_mass_kg = kg;
        self
    }
}

/// The user's target body state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Target weight in kg
    pub goal_weight_kg: f64,

    /// Target fat mass in kg (0 = not provided)
    #[serde(default)]
    pub goal_body_fat_kg: f64,

    /// Target muscle mass in kg (0 = not provided)
    #[serde(default)]
    pub goal_muscle_mass_kg: f64,
}

impl GoalSnapshot {
    /// Goal with only target weight known.
    pub fn with_weight(goal_weight_kg: f64) -> Self {
        Self {
            goal_weight_kg,
            ..Default::default()
        }
    }

    /// Set target fat mass.
    pub fn body_fat(mut self, kg: f64) -> Self {
        self.goal_body_fat_kg = kg;
        self
    }

    /// Set target muscle mass.
    pub fn muscle_mass(mut self, kg: f64) -> Self {
        self.goal_muscle_mass_kg = kg;
        self
    }
}

/// Whether an optional mass field was filled in.
pub fn is_provided(kg: f64) -> bool {
    kg > 0.0
}
