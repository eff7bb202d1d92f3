// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge History
//!
//! A merge deletes the consumed contact for good; the history entry written
//! alongside it holds owned copies of both inputs and is the only way back.
//! Entries have no mutators once recorded.

use serde::{Deserialize, Serialize};

use crate::contact::{Contact, ScalarField};

/// One recorded merge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeHistoryEntry {
    id: String,
    /// Unix timestamp of the merge
    merged_at: u64,
    /// Id of the surviving contact
    primary_id: String,
    /// The primary contact as it was before the merge
    primary_snapshot: Contact,
    /// The consumed contact as it was before the merge
    consumed_snapshot: Contact,
    /// Contacts whose manager link was moved from the consumed contact to the primary
    #[serde(default)]
    reassigned_reports: Vec<String>,
}

impl MergeHistoryEntry {
    /// Records a merge of `consumed` into `primary`.
    ///
    /// Both contacts are copied, so later edits to live contacts never reach
    /// the stored snapshots.
    pub fn record(
        primary: &Contact,
        consumed: &Contact,
        reassigned_reports: Vec<String>,
        merged_at: u64,
    ) -> Self {
        MergeHistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            merged_at,
            primary_id: primary.id().to_string(),
            primary_snapshot: primary.clone(),
            consumed_snapshot: consumed.clone(),
            reassigned_reports,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn merged_at(&self) -> u64 {
        self.merged_at
    }

    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    /// Id of the contact that was consumed.
    pub fn consumed_id(&self) -> &str {
        self.consumed_snapshot.id()
    }

    pub fn primary_snapshot(&self) -> &Contact {
        &self.primary_snapshot
    }

    pub fn consumed_snapshot(&self) -> &Contact {
        &self.consumed_snapshot
    }

    pub fn reassigned_reports(&self) -> &[String] {
        &self.reassigned_reports
    }

    /// Reverses the merge inside `contacts`.
    ///
    /// The primary is overwritten with its snapshot (any edit made after the
    /// merge is lost) and the consumed contact is re-inserted right after it.
    /// If the primary has since been deleted, both snapshots are appended.
    pub fn restore_into(&self, contacts: &mut Vec<Contact>) {
        let consumed_id = self.consumed_snapshot.id();
        contacts.retain(|c| c.id() != consumed_id);

        match contacts.iter().position(|c| c.id() == self.primary_id) {
            Some(pos) => {
                contacts[pos] = self.primary_snapshot.clone();
                contacts.insert(pos + 1, self.consumed_snapshot.clone());
            }
            None => {
                contacts.push(self.primary_snapshot.clone());
                contacts.push(self.consumed_snapshot.clone());
            }
        }

        for report_id in &self.reassigned_reports {
            if let Some(report) = contacts.iter_mut().find(|c| c.id() == report_id) {
                if report.org().reports_to.as_deref() == Some(self.primary_id.as_str()) {
                    report.set_field(ScalarField::ReportsTo, Some(consumed_id.to_string()));
                }
            }
        }
    }
}
