//! Cardwise Core Library
//!
//! Duplicate detection and reversible merging for a captured contact book.
//! Contacts are scored pairwise, grouped into connected components above a
//! threshold, and merged field by field with a snapshot history that lets the
//! latest merge be undone.

pub mod api;
pub mod config;
pub mod contact;
pub mod dedupe;
pub mod merge;
pub mod storage;

pub use api::{
    CallbackHandler, DedupeEngine, EngineError, EngineEvent, EngineResult, EventDispatcher,
    EventHandler,
};
pub use config::{ConfigError, DedupeConfig, DEFAULT_THRESHOLD, MAX_SCORE};
pub use contact::{
    Contact, OrgInfo, Reminder, ScalarField, Task, TimelineEvent, TimelineKind, UnknownFieldName,
};
pub use dedupe::{
    auto_resolve, find_duplicate_groups, find_matches_for, pick_best_value, resolve_field,
    score_pair, DuplicateGroup, FieldChoice, FieldChoices, MatchKind, MatchReason, Resolution,
    ScoreResult, Scorer, Side,
};
pub use merge::{merge_contacts, merge_contacts_at, MergeError, MergeHistoryEntry};
pub use storage::{ContactStore, MemoryStore, Storage, StorageError};
