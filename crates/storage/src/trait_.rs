//! Profile store abstraction.

use async_trait::async_trait;
use kroppsresa_core::{ProfileId, StoredProfile};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage abstraction for saved form state.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Save a profile (create or update). Refreshes `updated_at`.
    async fn save_profile(&mut self, profile: &mut StoredProfile) -> Result<()>;

    /// Load a profile by ID.
    async fn load_profile(&self, id: ProfileId) -> Result<Option<StoredProfile>>;

    /// List all profiles, oldest first.
    async fn list_profiles(&self) -> Result<Vec<StoredProfile>>;

    /// Delete a profile. Fails with `NotFound` if it does not exist.
    async fn delete_profile(&mut self, id: ProfileId) -> Result<()>;
}
