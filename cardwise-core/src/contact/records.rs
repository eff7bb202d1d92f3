// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! List-valued contact sub-records: tasks, reminders, and timeline events.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::now_secs;

/// Metadata key naming the contact consumed by a merge.
pub const MERGED_CONTACT_ID_KEY: &str = "merged_contact_id";
/// Metadata key carrying the consumed contact's display name.
pub const MERGED_CONTACT_NAME_KEY: &str = "merged_contact_name";

/// A sub-record with a stable identifier.
///
/// Identifiers survive merges unchanged so external references keep working.
pub trait Keyed {
    /// Returns the record's identifier.
    fn key(&self) -> &str;
}

/// A follow-up task attached to a contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Unix timestamp of the due date, if any.
    #[serde(default)]
    pub due_at: Option<u64>,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Creates an open task with a fresh id.
    pub fn new(title: &str) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            due_at: None,
            done: false,
        }
    }

    /// Sets the due date.
    pub fn due_at(mut self, timestamp: u64) -> Self {
        self.due_at = Some(timestamp);
        self
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A reminder attached to a contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub label: String,
    pub remind_at: u64,
    #[serde(default)]
    pub done: bool,
}

impl Reminder {
    /// Creates a pending reminder with a fresh id.
    pub fn new(label: &str, remind_at: u64) -> Self {
        Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.to_string(),
            remind_at,
            done: false,
        }
    }
}

impl Keyed for Reminder {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Kind of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// Contact was captured (scan, manual entry, import).
    Captured,
    Note,
    Meeting,
    Call,
    Email,
    /// Contact was exported to a CRM.
    Exported,
    /// Another contact was merged into this one.
    ContactMerged,
}

impl TimelineKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineKind::Captured => "captured",
            TimelineKind::Note => "note",
            TimelineKind::Meeting => "meeting",
            TimelineKind::Call => "call",
            TimelineKind::Email => "email",
            TimelineKind::Exported => "exported",
            TimelineKind::ContactMerged => "contact_merged",
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimelineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "captured" => Ok(TimelineKind::Captured),
            "note" => Ok(TimelineKind::Note),
            "meeting" => Ok(TimelineKind::Meeting),
            "call" => Ok(TimelineKind::Call),
            "email" => Ok(TimelineKind::Email),
            "exported" => Ok(TimelineKind::Exported),
            "contact_merged" => Ok(TimelineKind::ContactMerged),
            other => Err(format!("unknown timeline kind: {}", other)),
        }
    }
}

/// A typed, timestamped entry in a contact's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub kind: TimelineKind,
    pub description: String,
    pub timestamp: u64,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl TimelineEvent {
    /// Creates an event stamped with the current time.
    pub fn new(kind: TimelineKind, description: &str) -> Self {
        Self::at(kind, description, now_secs())
    }

    /// Creates an event with an explicit timestamp.
    pub fn at(kind: TimelineKind, description: &str, timestamp: u64) -> Self {
        TimelineEvent {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            description: description.to_string(),
            timestamp,
            metadata: BTreeMap::new(),
        }
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    /// Builds the entry recorded on a contact that absorbed another one.
    pub fn contact_merged(consumed_id: &str, consumed_name: &str, timestamp: u64) -> Self {
        let description = if consumed_name.is_empty() {
            format!("Merged duplicate contact {}", consumed_id)
        } else {
            format!("Merged duplicate contact {}", consumed_name)
        };
        Self::at(TimelineKind::ContactMerged, &description, timestamp)
            .with_metadata(MERGED_CONTACT_ID_KEY, consumed_id)
            .with_metadata(MERGED_CONTACT_NAME_KEY, consumed_name)
    }
}

impl Keyed for TimelineEvent {
    fn key(&self) -> &str {
        &self.id
    }
}
