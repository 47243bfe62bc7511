use crate::config::{default_recordings_dir, default_root_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recording volume configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Mount point of the recording volume. Storage usage is probed here.
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,
    /// Subdirectory of `root_path` receiving session directories.
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            recordings_dir: default_recordings_dir(),
        }
    }
}
