// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the engine facade.

use thiserror::Error;

use crate::config::ConfigError;
use crate::merge::MergeError;
use crate::storage::StorageError;

/// Unified error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The merge request was rejected.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// The engine configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
