//! Durable session storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for the on-disk session mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding client state files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the persisted session document inside `data_dir`.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_file: default_session_file(),
        }
    }
}

fn default_data_dir() -> String {
    ".timegrid".to_string()
}

fn default_session_file() -> String {
    "session.json".to_string()
}
