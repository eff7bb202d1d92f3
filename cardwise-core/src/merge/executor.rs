// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge Execution
//!
//! Collapses two contacts into one. The primary (left) contact keeps its id;
//! scalar fields follow the caller's choices; tasks, reminders, and timeline
//! events from both sides are unioned by id so nothing that exists only on
//! the consumed contact is lost.

use std::collections::HashSet;

use super::MergeError;
use crate::contact::{now_secs, Contact, Keyed, ScalarField, TimelineEvent};
use crate::dedupe::{resolve_field, FieldChoice, FieldChoices, Side};

/// Merges `secondary` into `primary`, stamping the merge with the current time.
pub fn merge_contacts(
    primary: &Contact,
    secondary: &Contact,
    choices: &FieldChoices,
) -> Result<Contact, MergeError> {
    merge_contacts_at(primary, secondary, choices, now_secs())
}

/// Merges `secondary` into `primary` at the given Unix timestamp.
///
/// Fields without a choice are auto-resolved. Neither input is modified.
pub fn merge_contacts_at(
    primary: &Contact,
    secondary: &Contact,
    choices: &FieldChoices,
    merged_at: u64,
) -> Result<Contact, MergeError> {
    if primary.id() == secondary.id() {
        return Err(MergeError::SameContact(primary.id().to_string()));
    }

    let mut merged = primary.clone();

    for field in ScalarField::ALL {
        let left = primary.field(field);
        let right = secondary.field(field);

        let value = match choices.get(field) {
            None => resolve_field(field, left, right).value,
            Some(FieldChoice::Value(v)) => Some(v.trim().to_string()).filter(|v| !v.is_empty()),
            Some(choice) => {
                let side = if *choice == FieldChoice::Left {
                    Side::Left
                } else {
                    Side::Right
                };
                if left.is_none() && right.is_none() {
                    return Err(MergeError::MalformedFieldChoice { field, side });
                }
                match side {
                    Side::Left => left.map(str::to_string),
                    Side::Right => right.map(str::to_string),
                }
            }
        };
        merged.set_field(field, value);
    }

    union_by_key(merged.tasks_mut(), secondary.tasks(), |kept, other| {
        kept.done |= other.done;
    });
    union_by_key(merged.reminders_mut(), secondary.reminders(), |kept, other| {
        kept.done |= other.done;
    });
    union_by_key(merged.timeline_mut(), secondary.timeline(), |_, _| {});
    merged.timeline_mut().sort_by_key(|event| event.timestamp);

    // A manager link between the two inputs would now point at itself.
    let reports_to = merged.org().reports_to.clone();
    if reports_to.as_deref() == Some(primary.id()) || reports_to.as_deref() == Some(secondary.id())
    {
        merged.set_field(ScalarField::ReportsTo, None);
    }

    merged.push_timeline_event(TimelineEvent::contact_merged(
        secondary.id(),
        secondary.display_name(),
        merged_at,
    ));

    Ok(merged)
}

/// Appends the records of `incoming` whose id is not already in `target`.
///
/// Records present on both sides stay once, in their `target` position;
/// `reconcile` folds the incoming copy into the kept one.
fn union_by_key<T, F>(target: &mut Vec<T>, incoming: &[T], mut reconcile: F)
where
    T: Keyed + Clone,
    F: FnMut(&mut T, &T),
{
    let mut seen: HashSet<String> = target.iter().map(|r| r.key().to_string()).collect();
    for record in incoming {
        if seen.insert(record.key().to_string()) {
            target.push(record.clone());
        } else if let Some(kept) = target.iter_mut().find(|r| r.key() == record.key()) {
            reconcile(kept, record);
        }
    }
}

/// Swaps the two merged originals for the merged contact.
///
/// Both originals are removed (the merged contact reuses the primary's id,
/// so leaving either behind would duplicate it) and the merged contact takes
/// the primary's former position. Other contacts that reported to the
/// consumed contact are re-pointed at the primary; their ids are returned.
pub fn replace_in_collection(
    contacts: &mut Vec<Contact>,
    merged: Contact,
    consumed_id: &str,
) -> Vec<String> {
    let primary_id = merged.id().to_string();
    let is_original = |c: &Contact| c.id() == primary_id || c.id() == consumed_id;

    let position = contacts
        .iter()
        .position(|c| c.id() == primary_id)
        .or_else(|| contacts.iter().position(|c| c.id() == consumed_id))
        .unwrap_or(contacts.len());
    let removed_before = contacts[..position].iter().filter(|c| is_original(c)).count();

    contacts.retain(|c| !is_original(c));
    contacts.insert(position - removed_before, merged);

    let mut reassigned = Vec::new();
    for contact in contacts.iter_mut() {
        if contact.id() != primary_id && contact.org().reports_to.as_deref() == Some(consumed_id) {
            contact.set_field(ScalarField::ReportsTo, Some(primary_id.clone()));
            reassigned.push(contact.id().to_string());
        }
    }
    reassigned
}
