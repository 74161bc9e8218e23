//! Profile model - what the user fills in, and what gets stored.

use serde::{Deserialize, Serialize};
use crate::id::ProfileId;
use crate::snapshot::{BiometricSnapshot, GoalSnapshot};
use crate::Time;

/// Errors raised while building or validating a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// A measurement was negative, NaN or infinite
    #[error("invalid {field}: {value}")]
    InvalidMeasurement {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Gender string not recognized
    #[error("unknown gender: {0}")]
    UnknownGender(String),
}

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female
    Female,
    /// Male
    Male,
    /// Other or not stated
    #[default]
    Other,
}

impl Gender {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" | "f" | "kvinna" => Ok(Gender::Female),
            "male" | "m" | "man" => Ok(Gender::Male),
            "other" | "annat" => Ok(Gender::Other),
            _ => Err(ProfileError::UnknownGender(s.to_string())),
        }
    }
}

/// Everything the input form collects about the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Height in cm (0 = not provided)
    #[serde(default)]
    pub height_cm: f64,

    /// Weight in kg (0 = not provided)
    #[serde(default)]
    pub weight_kg: f64,

    /// Fat mass in kg (0 = not provided)
    #[serde(default)]
    pub body_fat_kg: f64,

    /// Muscle mass in kg (0 = not provided)
    #[serde(default)]
    pub muscle_mass_kg: f64,

    /// Gender
    #[serde(default)]
    pub gender: Gender,

    /// Age in years (0 = not provided)
    #[serde(default)]
    pub age_years: u32,
}

impl BodyProfile {
    /// The subset of the profile the estimator reads.
    pub fn snapshot(&self) -> BiometricSnapshot {
        BiometricSnapshot {
            weight_kg: self.weight_kg,
            body_fat_kg: self.body_fat_kg,
            muscle_mass_kg: self.muscle_mass_kg,
        }
    }

    /// Reject negative or non-finite measurements.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check("height_cm", self.height_cm)?;
        check("weight_kg", self.weight_kg)?;
        check("body_fat_kg", self.body_fat_kg)?;
        check("muscle_mass_kg", self.muscle_mass_kg)
    }
}

/// The user's targets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalProfile {
    /// Target weight in kg (0 = not provided)
    #[serde(default)]
    pub goal_weight_kg: f64,

    /// Target fat mass in kg (0 = not provided)
    #[serde(default)]
    pub goal_body_fat_kg: f64,

    /// Target muscle mass in kg (0 = not provided)
    #[serde(default)]
    pub goal_muscle_mass_kg: f64,
}

impl GoalProfile {
    /// The subset of the goal the estimator reads.
    pub fn snapshot(&self) -> GoalSnapshot {
        GoalSnapshot {
            goal_weight_kg: self.goal_weight_kg,
            goal_body_fat_kg: self.goal_body_fat_kg,
            goal_muscle_mass_kg: self.goal_muscle_mass_kg,
        }
    }

    /// Reject negative or non-finite targets.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check("goal_weight_kg", self.goal_weight_kg)?;
        check("goal_body_fat_kg", self.goal_body_fat_kg)?;
        check("goal_muscle_mass_kg", self.goal_muscle_mass_kg)
    }
}

fn check(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidMeasurement { field, value })
    }
}

/// A saved form state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Unique identifier
    pub id: ProfileId,

    /// Current body state
    pub user: BodyProfile,

    /// Targets
    pub goal: GoalProfile,

    /// Reference to the uploaded photo. Opaque; never interpreted here.
    #[serde(default)]
    pub original_image: Option<String>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl StoredProfile {
    /// Create a new profile.
    pub fn new(user: BodyProfile, goal: GoalProfile) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ProfileId::new(),
            user,
            goal,
            original_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a photo reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.original_image = Some(image.into());
        self
    }
}
