//! JSON file storage implementation.
//!
//! Stores each profile as a pretty-printed JSON file under
//! `<root>/profiles/<id>.json`.

use std::path::{Path, PathBuf};
use kroppsresa_core::{ProfileId, StoredProfile};
use tokio::fs;
use tracing::{info, warn};
use super::{ProfileStore, StorageError, Result};

/// File-based JSON storage backend.
pub struct JsonProfileStore {
    root: PathBuf,
}

impl JsonProfileStore {
    /// Create storage, making the `profiles/` directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("profiles")).await?;
        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_path(&self, id: ProfileId) -> PathBuf {
        self.root.join("profiles").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl ProfileStore for JsonProfileStore {
    async fn save_profile(&mut self, profile: &mut StoredProfile) -> Result<()> {
        profile.updated_at = chrono::Utc::now();
        let path = self.profile_path(profile.id);
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json.as_bytes()).await?;

        info!("Saved profile {} to {}", profile.id, path.display());
        Ok(())
    }

    async fn load_profile(&self, id: ProfileId) -> Result<Option<StoredProfile>> {
        read_json(&self.profile_path(id)).await
    }

    async fn list_profiles(&self) -> Result<Vec<StoredProfile>> {
        let mut profiles: Vec<StoredProfile> = list_dir(&self.root.join("profiles")).await?;
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    async fn delete_profile(&mut self, id: ProfileId) -> Result<()> {
        match fs::remove_file(self.profile_path(id)).await {
            Ok(()) => {
                info!("Deleted profile {}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("profile {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable file {}: {}", path.display(), e),
        }
    }
    Ok(items)
}
