// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! The engine reads and writes the contact collection and the merge history
//! through [`ContactStore`]. Two implementations are provided: an in-memory
//! store and a SQLite-backed [`Storage`].

mod contacts;
mod error;
mod history;
mod memory;
pub mod migration;

pub use error::StorageError;
pub use memory::MemoryStore;

use std::path::Path;

use rusqlite::Connection;
use tracing::warn;

use crate::contact::{Contact, TimelineEvent};
use crate::merge::MergeHistoryEntry;

/// Persistence collaborator for the contact collection and merge history.
///
/// `commit_merge` and `commit_undo` must either apply completely or leave
/// both the collection and the history untouched. The default
/// implementations compensate a failed collection write by undoing the
/// history change; stores with transactions should override them.
pub trait ContactStore {
    /// Loads the whole contact collection.
    fn load_all_contacts(&self) -> Result<Vec<Contact>, StorageError>;

    /// Replaces the whole contact collection.
    fn save_all_contacts(&mut self, contacts: &[Contact]) -> Result<(), StorageError>;

    /// Appends an event to one contact's timeline.
    fn append_timeline_event(
        &mut self,
        contact_id: &str,
        event: TimelineEvent,
    ) -> Result<(), StorageError> {
        let mut contacts = self.load_all_contacts()?;
        let contact = contacts
            .iter_mut()
            .find(|c| c.id() == contact_id)
            .ok_or_else(|| StorageError::NotFound(format!("contact {}", contact_id)))?;
        contact.push_timeline_event(event);
        self.save_all_contacts(&contacts)
    }

    /// Loads the merge history, oldest first.
    fn load_merge_history(&self) -> Result<Vec<MergeHistoryEntry>, StorageError>;

    /// Appends a merge history entry.
    fn append_merge_history_entry(&mut self, entry: &MergeHistoryEntry)
        -> Result<(), StorageError>;

    /// Removes and returns the most recent history entry.
    fn pop_merge_history_entry(&mut self) -> Result<Option<MergeHistoryEntry>, StorageError>;

    /// Records `entry` and then replaces the collection with `contacts`.
    fn commit_merge(
        &mut self,
        entry: &MergeHistoryEntry,
        contacts: &[Contact],
    ) -> Result<(), StorageError> {
        self.append_merge_history_entry(entry)?;
        if let Err(err) = self.save_all_contacts(contacts) {
            warn!(entry_id = entry.id(), error = %err, "contact write failed, dropping history entry");
            self.pop_merge_history_entry()?;
            return Err(err);
        }
        Ok(())
    }

    /// Removes history entry `entry_id` (which must be the latest) and then
    /// replaces the collection with `contacts`.
    fn commit_undo(&mut self, entry_id: &str, contacts: &[Contact]) -> Result<(), StorageError> {
        let popped = self
            .pop_merge_history_entry()?
            .ok_or_else(|| StorageError::HistoryConflict("merge history is empty".into()))?;

        if popped.id() != entry_id {
            self.append_merge_history_entry(&popped)?;
            return Err(StorageError::HistoryConflict(format!(
                "expected latest entry {}, found {}",
                entry_id,
                popped.id()
            )));
        }

        if let Err(err) = self.save_all_contacts(contacts) {
            warn!(entry_id, error = %err, "contact write failed, restoring history entry");
            self.append_merge_history_entry(&popped)?;
            return Err(err);
        }
        Ok(())
    }
}

/// SQLite-based storage implementation.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        migration::MigrationRunner::run(&self.conn, &migration::all_migrations())
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }
}

impl ContactStore for Storage {
    fn load_all_contacts(&self) -> Result<Vec<Contact>, StorageError> {
        contacts::read_all_contacts(&self.conn)
    }

    fn save_all_contacts(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        contacts::write_all_contacts(&tx, contacts)?;
        tx.commit()?;
        Ok(())
    }

    fn append_timeline_event(
        &mut self,
        contact_id: &str,
        event: TimelineEvent,
    ) -> Result<(), StorageError> {
        let mut contact = self
            .load_contact(contact_id)?
            .ok_or_else(|| StorageError::NotFound(format!("contact {}", contact_id)))?;
        contact.push_timeline_event(event);
        self.save_contact(&contact)
    }

    fn load_merge_history(&self) -> Result<Vec<MergeHistoryEntry>, StorageError> {
        history::read_history(&self.conn)
    }

    fn append_merge_history_entry(
        &mut self,
        entry: &MergeHistoryEntry,
    ) -> Result<(), StorageError> {
        history::insert_history_entry(&self.conn, entry)
    }

    fn pop_merge_history_entry(&mut self) -> Result<Option<MergeHistoryEntry>, StorageError> {
        let tx = self.conn.transaction()?;
        let entry = history::delete_last_history_entry(&tx)?;
        tx.commit()?;
        Ok(entry)
    }

    fn commit_merge(
        &mut self,
        entry: &MergeHistoryEntry,
        contacts: &[Contact],
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        history::insert_history_entry(&tx, entry)?;
        contacts::write_all_contacts(&tx, contacts)?;
        tx.commit()?;
        Ok(())
    }

    fn commit_undo(&mut self, entry_id: &str, contacts: &[Contact]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let popped = history::delete_last_history_entry(&tx)?
            .ok_or_else(|| StorageError::HistoryConflict("merge history is empty".into()))?;
        if popped.id() != entry_id {
            // Dropping the transaction rolls the delete back.
            return Err(StorageError::HistoryConflict(format!(
                "expected latest entry {}, found {}",
                entry_id,
                popped.id()
            )));
        }
        contacts::write_all_contacts(&tx, contacts)?;
        tx.commit()?;
        Ok(())
    }
}
