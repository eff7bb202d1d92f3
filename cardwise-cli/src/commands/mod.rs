//! CLI Commands

pub mod contacts;
pub mod dupes;
pub mod merge;

use anyhow::Result;
use cardwise_core::{DedupeEngine, Storage};

use crate::config::CliConfig;

/// Opens the engine over the configured database.
pub(crate) fn open_engine(config: &CliConfig) -> Result<DedupeEngine<Storage>> {
    let storage = config.open_storage()?;
    Ok(DedupeEngine::new(storage, config.dedupe_config())?)
}
