//! File-backed state store.

use std::collections::HashMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::traits::StateStore;

/// A [`StateStore`] backed by a single JSON object file.
///
/// The file is loaded lazily on first access. Writes go to a sibling
/// temp file first and are renamed into place, so a crash mid-write
/// cannot leave a truncated state file behind.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    /// `None` until the first access loads the file.
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl FileStateStore {
    /// Create a store over the given state file path. The file does not
    /// need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// Load the state file into the slot if it has not been loaded yet.
    async fn ensure_loaded(
        &self,
        entries: &mut Option<HashMap<String, String>>,
    ) -> AppResult<()> {
        if entries.is_some() {
            return Ok(());
        }

        let loaded = match fs::read_to_string(&self.path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(error) => {
                    // Corrupt files are replaced by the next write.
                    warn!(path = %self.path.display(), %error, "state file is corrupt; starting empty");
                    HashMap::new()
                }
            },
            Err(error) if error.kind() == IoErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                return Err(AppError::with_source(
                    atlas_core::error::ErrorKind::Storage,
                    format!("failed to read state file {}", self.path.display()),
                    error,
                ));
            }
        };

        *entries = Some(loaded);
        Ok(())
    }

    /// Serialize the entries and atomically replace the state file.
    async fn persist(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        let serialized = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let staging = self.path.with_extension("tmp");
        fs::write(&staging, serialized).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        self.ensure_loaded(&mut entries).await?;
        Ok(entries
            .as_ref()
            .and_then(|map| map.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        self.ensure_loaded(&mut entries).await?;
        if let Some(map) = entries.as_mut() {
            map.insert(key.to_string(), value.to_string());
            self.persist(map).await?;
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        self.ensure_loaded(&mut entries).await?;
        if let Some(map) = entries.as_mut() {
            if map.remove(key).is_some() {
                self.persist(map).await?;
            }
        }
        Ok(())
    }
}
