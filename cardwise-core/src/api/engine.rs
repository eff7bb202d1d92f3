// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dedupe Engine
//!
//! Runs each operation as one fetch, compute, write step against a
//! [`ContactStore`], then tells registered handlers about committed changes.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ConfigError, DedupeConfig, MAX_SCORE};
use crate::contact::{now_secs, Contact, TimelineEvent};
use crate::dedupe::{auto_resolve, find_matches_for, group_with, DuplicateGroup, FieldChoices};
use crate::dedupe::{ScoreResult, Scorer};
use crate::merge::{merge_contacts_at, replace_in_collection, MergeError, MergeHistoryEntry};
use crate::storage::ContactStore;

use super::error::EngineResult;
use super::events::{EngineEvent, EventDispatcher, EventHandler};

/// Duplicate detection, merge, and undo over one contact store.
pub struct DedupeEngine<S: ContactStore> {
    store: S,
    config: DedupeConfig,
    scorer: Scorer,
    events: EventDispatcher,
}

impl<S: ContactStore> DedupeEngine<S> {
    /// Creates an engine over `store`, rejecting an invalid config.
    pub fn new(store: S, config: DedupeConfig) -> EngineResult<Self> {
        config.validate()?;
        let scorer = Scorer::new(&config);
        Ok(DedupeEngine {
            store,
            config,
            scorer,
            events: EventDispatcher::new(),
        })
    }

    /// Registers a handler for engine events.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn config(&self) -> &DedupeConfig {
        &self.config
    }

    /// Returns the current contact collection.
    pub fn contacts(&self) -> EngineResult<Vec<Contact>> {
        Ok(self.store.load_all_contacts()?)
    }

    // === Detection ===

    /// Groups the collection at the configured threshold.
    pub fn find_duplicate_groups(&self) -> EngineResult<Vec<DuplicateGroup>> {
        self.find_duplicate_groups_with_threshold(self.config.threshold)
    }

    /// Groups the collection at an explicit threshold.
    pub fn find_duplicate_groups_with_threshold(
        &self,
        threshold: u8,
    ) -> EngineResult<Vec<DuplicateGroup>> {
        if threshold > MAX_SCORE {
            return Err(ConfigError::ThresholdOutOfRange(threshold).into());
        }
        let contacts = self.store.load_all_contacts()?;
        Ok(group_with(&self.scorer, &contacts, threshold))
    }

    /// Lists the contacts that match `contact_id` at the configured threshold.
    pub fn find_matches_for(&self, contact_id: &str) -> EngineResult<Vec<(String, ScoreResult)>> {
        let contacts = self.store.load_all_contacts()?;
        lookup(&contacts, contact_id)?;
        Ok(find_matches_for(
            &self.scorer,
            &contacts,
            contact_id,
            self.config.threshold,
        ))
    }

    /// Scores two stored contacts against each other.
    pub fn score(&self, a_id: &str, b_id: &str) -> EngineResult<ScoreResult> {
        let contacts = self.store.load_all_contacts()?;
        let a = lookup(&contacts, a_id)?;
        let b = lookup(&contacts, b_id)?;
        Ok(self.scorer.score(a, b))
    }

    /// Returns the auto-resolved field choices for merging `secondary_id`
    /// into `primary_id`.
    pub fn suggest_field_choices(
        &self,
        primary_id: &str,
        secondary_id: &str,
    ) -> EngineResult<FieldChoices> {
        let contacts = self.store.load_all_contacts()?;
        let primary = lookup(&contacts, primary_id)?;
        let secondary = lookup(&contacts, secondary_id)?;
        Ok(auto_resolve(primary, secondary))
    }

    // === Merge / Undo ===

    /// Builds the merged contact without touching the store.
    pub fn preview_merge(
        &self,
        primary_id: &str,
        secondary_id: &str,
        choices: &FieldChoices,
    ) -> EngineResult<Contact> {
        let contacts = self.store.load_all_contacts()?;
        let (merged, _, _) =
            build_merge(&contacts, primary_id, secondary_id, choices, now_secs())?;
        Ok(merged)
    }

    /// Merges `secondary_id` into `primary_id` and records the merge.
    ///
    /// The collection and history change together or not at all. Returns the
    /// merged contact, which keeps `primary_id`.
    pub fn merge(
        &mut self,
        primary_id: &str,
        secondary_id: &str,
        choices: &FieldChoices,
    ) -> EngineResult<Contact> {
        let merged_at = now_secs();
        let mut contacts = self.store.load_all_contacts()?;
        let (merged, primary, secondary) =
            build_merge(&contacts, primary_id, secondary_id, choices, merged_at)?;

        let reassigned = replace_in_collection(&mut contacts, merged.clone(), secondary_id);
        let entry = MergeHistoryEntry::record(&primary, &secondary, reassigned, merged_at);
        self.store.commit_merge(&entry, &contacts)?;

        info!(
            primary_id,
            consumed_id = secondary_id,
            history_entry_id = entry.id(),
            reassigned = entry.reassigned_reports().len(),
            "contacts merged"
        );
        self.events.dispatch(EngineEvent::ContactsMerged {
            primary_id: primary_id.to_string(),
            consumed_id: secondary_id.to_string(),
            history_entry_id: entry.id().to_string(),
        });

        Ok(merged)
    }

    /// Reverses the most recent merge.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo_last_merge(&mut self) -> EngineResult<bool> {
        let history = self.store.load_merge_history()?;
        let Some(entry) = history.last() else {
            debug!("undo requested with empty merge history");
            return Ok(false);
        };

        let mut contacts = self.store.load_all_contacts()?;
        entry.restore_into(&mut contacts);
        self.store.commit_undo(entry.id(), &contacts)?;

        info!(
            primary_id = entry.primary_id(),
            restored_id = entry.consumed_id(),
            history_entry_id = entry.id(),
            "merge undone"
        );
        self.events.dispatch(EngineEvent::MergeUndone {
            primary_id: entry.primary_id().to_string(),
            restored_id: entry.consumed_id().to_string(),
            history_entry_id: entry.id().to_string(),
        });

        Ok(true)
    }

    /// Returns every recorded merge, oldest first.
    pub fn merge_history(&self) -> EngineResult<Vec<MergeHistoryEntry>> {
        Ok(self.store.load_merge_history()?)
    }

    // === Timeline ===

    /// Adds an event to one contact's timeline.
    pub fn append_timeline_event(
        &mut self,
        contact_id: &str,
        event: TimelineEvent,
    ) -> EngineResult<()> {
        self.store.append_timeline_event(contact_id, event)?;
        self.events.dispatch(EngineEvent::TimelineEventAppended {
            contact_id: contact_id.to_string(),
        });
        Ok(())
    }
}

fn lookup<'a>(contacts: &'a [Contact], id: &str) -> Result<&'a Contact, MergeError> {
    contacts
        .iter()
        .find(|c| c.id() == id)
        .ok_or_else(|| MergeError::ContactNotFound(id.to_string()))
}

/// Validates both ids and builds the merged contact.
///
/// Returns the merged contact followed by copies of both originals.
fn build_merge(
    contacts: &[Contact],
    primary_id: &str,
    secondary_id: &str,
    choices: &FieldChoices,
    merged_at: u64,
) -> Result<(Contact, Contact, Contact), MergeError> {
    if primary_id == secondary_id {
        return Err(MergeError::SameContact(primary_id.to_string()));
    }
    let primary = lookup(contacts, primary_id)?;
    let secondary = lookup(contacts, secondary_id)?;
    let merged = merge_contacts_at(primary, secondary, choices, merged_at)?;
    Ok((merged, primary.clone(), secondary.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EngineError;
    use crate::contact::{ScalarField, TimelineKind};
    use crate::storage::MemoryStore;

    fn engine() -> DedupeEngine<MemoryStore> {
        let store = MemoryStore::with_contacts(vec![
            Contact::with_id("a", "Jane Doe").with_field(ScalarField::Email, "jane@acme.com"),
            Contact::with_id("b", "J. Doe").with_field(ScalarField::Email, "jane@acme.com"),
            Contact::with_id("c", "Bob Stone").with_field(ScalarField::Email, "bob@stone.io"),
        ]);
        DedupeEngine::new(store, DedupeConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = DedupeEngine::new(MemoryStore::new(), DedupeConfig::default().with_threshold(101));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_find_groups_and_matches() {
        let engine = engine();
        let groups = engine.find_duplicate_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].contact_ids, vec!["a", "b"]);

        let matches = engine.find_matches_for("a").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "b");
    }

    #[test]
    fn test_unknown_contact_is_not_found() {
        let engine = engine();
        let err = engine.score("a", "zz").unwrap_err();
        assert!(matches!(err, EngineError::Merge(MergeError::ContactNotFound(id)) if id == "zz"));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let engine = engine();
        assert!(engine.find_duplicate_groups_with_threshold(150).is_err());
    }

    #[test]
    fn test_preview_does_not_write() {
        let engine = engine();
        let merged = engine.preview_merge("a", "b", &FieldChoices::new()).unwrap();
        assert_eq!(merged.id(), "a");
        assert_eq!(engine.contacts().unwrap().len(), 3);
        assert!(engine.merge_history().unwrap().is_empty());
    }

    #[test]
    fn test_merge_then_undo() {
        let mut engine = engine();
        let before = engine.contacts().unwrap();

        engine.merge("a", "b", &FieldChoices::new()).unwrap();
        assert_eq!(engine.contacts().unwrap().len(), 2);
        assert_eq!(engine.merge_history().unwrap().len(), 1);

        assert!(engine.undo_last_merge().unwrap());
        assert_eq!(engine.contacts().unwrap(), before);
        assert!(engine.merge_history().unwrap().is_empty());
        assert!(!engine.undo_last_merge().unwrap());
    }

    #[test]
    fn test_merge_missing_contact_leaves_store_untouched() {
        let mut engine = engine();
        let before = engine.contacts().unwrap();
        let err = engine.merge("a", "gone", &FieldChoices::new()).unwrap_err();
        assert!(matches!(err, EngineError::Merge(MergeError::ContactNotFound(_))));
        assert_eq!(engine.contacts().unwrap(), before);
    }

    #[test]
    fn test_append_timeline_event() {
        let mut engine = engine();
        engine
            .append_timeline_event("c", TimelineEvent::at(TimelineKind::Note, "Met at expo", 3))
            .unwrap();
        let contacts = engine.into_store().load_all_contacts().unwrap();
        assert_eq!(contacts[2].timeline().len(), 1);
    }
}
