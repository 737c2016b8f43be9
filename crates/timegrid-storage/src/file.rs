//! JSON file-backed store implementation.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use timegrid_core::config::storage::StorageConfig;
use timegrid_core::error::{AppError, ErrorKind};
use timegrid_core::result::AppResult;
use timegrid_core::traits::PersistentStore;

/// Durable key-value store persisted as a single JSON document on disk.
///
/// The whole document is rewritten on every mutation; entries are tiny
/// (one token, one profile), so this stays cheap. Writes go through a
/// temp file followed by a rename, so a crash mid-write never leaves a
/// truncated document behind.
#[derive(Debug)]
pub struct FileStore {
    /// Path of the persisted document.
    path: PathBuf,
    /// Current entries, mirrored to disk on every mutation.
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store under the configured data directory.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let dir = PathBuf::from(&config.data_dir);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data directory: {}", dir.display()),
                e,
            )
        })?;

        let path = dir.join(&config.session_file);
        let entries = match fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    // A corrupt session document is not fatal; the user
                    // simply has to log in again.
                    warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read session file: {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Write the full document to disk via temp-file-and-rename.
    async fn flush(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, &json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write session file: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace session file: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), entries = entries.len(), "Persisted session document");
        Ok(())
    }
}

#[async_trait]
impl PersistentStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.flush(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        self.flush(&entries).await
    }
}
