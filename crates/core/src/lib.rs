//! Kroppsresa core data models.
//!
//! This crate defines the value types shared by the timeline estimator,
//! the profile store and the command line front end.

#![warn(missing_docs)]

// Core identities
mod id;

// Estimator inputs and outputs
mod snapshot;
mod estimate;

// Form state
mod profile;

// Re-exports
pub use id::ProfileId;
pub use snapshot::{BiometricSnapshot, GoalSnapshot, is_provided};
pub use estimate::{TimeframeEstimate, WEEKS_PER_MONTH};
pub use profile::{BodyProfile, GoalProfile, Gender, StoredProfile, ProfileError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
