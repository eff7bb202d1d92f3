// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Contact generators drawing from small value pools, so random pairs share
//! emails, phones, and names often enough to exercise every signal.

use std::collections::BTreeSet;

use proptest::prelude::*;

use cardwise_core::{Contact, Reminder, ScalarField, Task, TimelineEvent, TimelineKind};

/// Strategy for display names, including initials and punctuation variants.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Jane Doe",
        "J. Doe",
        "jane  doe",
        "Jane Smith",
        "John Doe",
        "Bob Stone",
        "Ann-Marie Lee",
        "Li",
        "",
    ])
    .prop_map(str::to_string)
}

/// Strategy for email addresses on a few shared domains.
pub fn email_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["jane", "j.doe", "bob", "sales"]),
        prop::sample::select(vec!["acme.com", "stone.io", "gmail.com"]),
    )
        .prop_map(|(user, domain)| format!("{}@{}", user, domain))
}

/// Strategy for phone numbers, some differing only in formatting.
pub fn phone_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "+1 555 010 2030",
        "(555) 010-2030",
        "555-0199",
        "+44 20 7946 0000",
    ])
    .prop_map(str::to_string)
}

/// Strategy for company names with and without legal suffixes.
pub fn company_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Acme Corp", "Acme Pty Ltd", "Stone Inc.", "Globex"])
        .prop_map(str::to_string)
}

/// Strategy for a contact with a fresh id and random scalar fields.
pub fn contact_strategy() -> impl Strategy<Value = Contact> {
    (
        name_strategy(),
        proptest::option::of(email_strategy()),
        proptest::option::of(phone_strategy()),
        proptest::option::of(company_strategy()),
    )
        .prop_map(|(name, email, phone, company)| {
            let mut contact = Contact::new(&name);
            contact.set_field(ScalarField::Email, email);
            contact.set_field(ScalarField::Phone, phone);
            contact.set_field(ScalarField::Company, company);
            contact
        })
}

/// Strategy for a contact collection.
pub fn contact_book_strategy(max_len: usize) -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec(contact_strategy(), 0..max_len)
}

/// Ids of the tasks, reminders, and timeline events to attach to a contact.
#[derive(Debug, Clone)]
pub struct SubRecordIds {
    pub tasks: BTreeSet<u8>,
    pub reminders: BTreeSet<u8>,
    pub events: BTreeSet<u8>,
}

/// Strategy for a set of record ids drawn from a shared pool, so both sides
/// of a merge often carry the same id.
pub fn record_ids_strategy() -> impl Strategy<Value = BTreeSet<u8>> {
    prop::collection::btree_set(0u8..10, 0..6)
}

/// Strategy for the sub-record ids of one contact.
pub fn sub_record_ids_strategy() -> impl Strategy<Value = SubRecordIds> {
    (
        record_ids_strategy(),
        record_ids_strategy(),
        record_ids_strategy(),
    )
        .prop_map(|(tasks, reminders, events)| SubRecordIds {
            tasks,
            reminders,
            events,
        })
}

/// Attaches tasks `task-<n>`, reminders `rem-<n>`, and note events `ev-<n>`
/// (stamped at time `n`) to `contact`.
pub fn with_sub_records(contact: Contact, ids: &SubRecordIds) -> Contact {
    let contact = ids.tasks.iter().fold(contact, |c, n| {
        let mut task = Task::new(&format!("Task {}", n));
        task.id = format!("task-{}", n);
        c.with_task(task)
    });
    let contact = ids.reminders.iter().fold(contact, |c, n| {
        let mut reminder = Reminder::new(&format!("Reminder {}", n), u64::from(*n));
        reminder.id = format!("rem-{}", n);
        c.with_reminder(reminder)
    });
    ids.events.iter().fold(contact, |c, n| {
        let mut event = TimelineEvent::at(TimelineKind::Note, &format!("Note {}", n), u64::from(*n));
        event.id = format!("ev-{}", n);
        c.with_timeline_event(event)
    })
}
