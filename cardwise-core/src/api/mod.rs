// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cardwise API Layer
//!
//! High-level facade over detection, merge, and undo.
//!
//! # Example
//!
//! ```ignore
//! use cardwise_core::api::DedupeEngine;
//! use cardwise_core::{DedupeConfig, FieldChoices, MemoryStore};
//!
//! let mut engine = DedupeEngine::new(MemoryStore::with_contacts(contacts), DedupeConfig::default())?;
//! for group in engine.find_duplicate_groups()? {
//!     let (primary, secondary) = &group.best_pair;
//!     let choices = engine.suggest_field_choices(primary, secondary)?;
//!     engine.merge(primary, secondary, &choices)?;
//! }
//! engine.undo_last_merge()?;
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for the API layer
//! - [`events`] - Event system for callbacks
//! - [`engine`] - The engine facade

pub mod engine;
pub mod error;
pub mod events;

pub use engine::DedupeEngine;
pub use error::{EngineError, EngineResult};
pub use events::{CallbackHandler, EngineEvent, EventDispatcher, EventHandler};
