// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Fixtures
//!
//! Canned contacts and a store wrapper that can be told to fail writes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cardwise_core::contact::{Reminder, Task, TimelineEvent, TimelineKind};
use cardwise_core::storage::{ContactStore, MemoryStore, StorageError};
use cardwise_core::{Contact, MergeHistoryEntry, ScalarField};

/// Builds a contact with an explicit id and the given scalar fields.
pub fn contact(id: &str, name: &str, fields: &[(ScalarField, &str)]) -> Contact {
    fields
        .iter()
        .fold(Contact::with_id(id, name), |c, (field, value)| {
            c.with_field(*field, value)
        })
}

/// The two captures of Jane Doe from the same business card.
pub fn jane_pair() -> (Contact, Contact) {
    (
        contact("jane-1", "Jane Doe", &[(ScalarField::Email, "jane@acme.com")]),
        contact("jane-2", "J. Doe", &[(ScalarField::Email, "jane@acme.com")]),
    )
}

/// Jane Doe with tasks, a reminder, and timeline history on both captures.
pub fn jane_pair_with_records() -> (Contact, Contact) {
    let shared_task = task("task-shared", "Send proposal");
    let left = contact(
        "jane-1",
        "Jane Doe",
        &[
            (ScalarField::Email, "jane@acme.com"),
            (ScalarField::Company, "Acme Corp"),
        ],
    )
    .with_task(shared_task.clone())
    .with_task(task("task-left", "Book follow-up"))
    .with_timeline_event(event("ev-1", TimelineKind::Captured, 100));

    let right = contact(
        "jane-2",
        "J. Doe",
        &[
            (ScalarField::Email, "jane@acme.com"),
            (ScalarField::Title, "VP Sales"),
            (ScalarField::Phone, "+1 (555) 010-2030"),
        ],
    )
    .with_task(shared_task)
    .with_task(task("task-right", "Connect on LinkedIn"))
    .with_reminder(reminder("rem-1", "Call back", 500))
    .with_timeline_event(event("ev-2", TimelineKind::Meeting, 50))
    .with_timeline_event(event("ev-3", TimelineKind::Call, 200));

    (left, right)
}

/// A collection with one obvious duplicate group and unrelated contacts.
pub fn small_book() -> Vec<Contact> {
    let (jane_1, jane_2) = jane_pair();
    vec![
        jane_1,
        contact("bob", "Bob Stone", &[(ScalarField::Email, "bob@stone.io")]),
        jane_2,
        contact(
            "carol",
            "Carol White",
            &[(ScalarField::Phone, "+44 20 7946 0000")],
        ),
    ]
}

pub fn task(id: &str, title: &str) -> Task {
    let mut task = Task::new(title);
    task.id = id.to_string();
    task
}

pub fn reminder(id: &str, label: &str, remind_at: u64) -> Reminder {
    let mut reminder = Reminder::new(label, remind_at);
    reminder.id = id.to_string();
    reminder
}

pub fn event(id: &str, kind: TimelineKind, timestamp: u64) -> TimelineEvent {
    let mut event = TimelineEvent::at(kind, kind.as_str(), timestamp);
    event.id = id.to_string();
    event
}

/// A memory store whose collection writes fail while the flag is set.
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: Arc<AtomicBool>,
}

impl FailingStore {
    /// Returns the store and the switch controlling its failures.
    pub fn new(contacts: Vec<Contact>) -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        let store = FailingStore {
            inner: MemoryStore::with_contacts(contacts),
            fail_writes: Arc::clone(&flag),
        };
        (store, flag)
    }
}

impl ContactStore for FailingStore {
    fn load_all_contacts(&self) -> Result<Vec<Contact>, StorageError> {
        self.inner.load_all_contacts()
    }

    fn save_all_contacts(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Serialization("simulated write failure".into()));
        }
        self.inner.save_all_contacts(contacts)
    }

    fn load_merge_history(&self) -> Result<Vec<MergeHistoryEntry>, StorageError> {
        self.inner.load_merge_history()
    }

    fn append_merge_history_entry(
        &mut self,
        entry: &MergeHistoryEntry,
    ) -> Result<(), StorageError> {
        self.inner.append_merge_history_entry(entry)
    }

    fn pop_merge_history_entry(&mut self) -> Result<Option<MergeHistoryEntry>, StorageError> {
        self.inner.pop_merge_history_entry()
    }
}
