// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory contact store.
//!
//! Holds the collection and history in plain vectors. Nothing survives the
//! process; used by tests and by hosts that persist the collection
//! themselves.

use super::{ContactStore, StorageError};
use crate::contact::Contact;
use crate::merge::MergeHistoryEntry;

/// A [`ContactStore`] backed by vectors.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    contacts: Vec<Contact>,
    history: Vec<MergeHistoryEntry>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given contacts.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        MemoryStore {
            contacts,
            history: Vec::new(),
        }
    }

    /// Returns the current collection without copying.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

impl ContactStore for MemoryStore {
    fn load_all_contacts(&self) -> Result<Vec<Contact>, StorageError> {
        Ok(self.contacts.clone())
    }

    fn save_all_contacts(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        self.contacts = contacts.to_vec();
        Ok(())
    }

    fn load_merge_history(&self) -> Result<Vec<MergeHistoryEntry>, StorageError> {
        Ok(self.history.clone())
    }

    fn append_merge_history_entry(
        &mut self,
        entry: &MergeHistoryEntry,
    ) -> Result<(), StorageError> {
        self.history.push(entry.clone());
        Ok(())
    }

    fn pop_merge_history_entry(&mut self) -> Result<Option<MergeHistoryEntry>, StorageError> {
        Ok(self.history.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{TimelineEvent, TimelineKind};

    #[test]
    fn test_append_timeline_event() {
        let mut store = MemoryStore::with_contacts(vec![Contact::with_id("a", "Jane Doe")]);
        store
            .append_timeline_event("a", TimelineEvent::at(TimelineKind::Call, "Intro call", 7))
            .unwrap();
        assert_eq!(store.contacts()[0].timeline().len(), 1);
    }

    #[test]
    fn test_append_timeline_event_unknown_contact() {
        let mut store = MemoryStore::new();
        let err = store
            .append_timeline_event("zz", TimelineEvent::at(TimelineKind::Note, "x", 1))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_commit_undo_rejects_stale_entry() {
        let a = Contact::with_id("a", "A");
        let b = Contact::with_id("b", "B");
        let mut store = MemoryStore::new();
        let older = MergeHistoryEntry::record(&a, &b, vec![], 1);
        let newer = MergeHistoryEntry::record(&a, &b, vec![], 2);
        store.append_merge_history_entry(&older).unwrap();
        store.append_merge_history_entry(&newer).unwrap();

        let err = store.commit_undo(older.id(), &[a, b]).unwrap_err();

        assert!(matches!(err, StorageError::HistoryConflict(_)));
        assert_eq!(store.load_merge_history().unwrap(), vec![older, newer]);
        assert!(store.contacts().is_empty());
    }
}
