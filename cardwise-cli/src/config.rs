//! CLI Configuration

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cardwise_core::{DedupeConfig, Storage};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory for storage.
    pub data_dir: PathBuf,
    /// Duplicate score threshold.
    pub threshold: u8,
}

impl CliConfig {
    /// Returns the storage path for Cardwise data.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("cardwise.db")
    }

    /// Returns the engine configuration.
    pub fn dedupe_config(&self) -> DedupeConfig {
        DedupeConfig::default().with_threshold(self.threshold)
    }

    /// Opens the contact database, creating the data directory if needed.
    pub fn open_storage(&self) -> Result<Storage> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory {}", self.data_dir.display())
        })?;
        let path = self.storage_path();
        debug!(path = %path.display(), "opening contact database");
        Storage::open(&path).with_context(|| format!("Failed to open {}", path.display()))
    }
}
