// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! A contact is a captured person: scalar card fields, organizational
//! metadata, and the tasks, reminders, and timeline attached to them.

pub mod field;
pub mod records;

pub use field::{ScalarField, UnknownFieldName};
pub use records::{
    Keyed, Reminder, Task, TimelineEvent, TimelineKind, MERGED_CONTACT_ID_KEY,
    MERGED_CONTACT_NAME_KEY,
};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Current Unix time in seconds.
pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn new_contact_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Organizational metadata used by the org chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInfo {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub influence: Option<String>,
    /// Contact id of this person's manager.
    #[serde(default)]
    pub reports_to: Option<String>,
}

/// A person in the contact book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Opaque, stable identifier
    #[serde(default = "new_contact_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    /// Social-profile URL
    #[serde(default)]
    linkedin: Option<String>,
    #[serde(default)]
    org: OrgInfo,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    reminders: Vec<Reminder>,
    #[serde(default)]
    timeline: Vec<TimelineEvent>,
}

impl Contact {
    /// Creates a contact with a freshly generated id.
    pub fn new(name: &str) -> Self {
        Self::with_id(&new_contact_id(), name)
    }

    /// Creates a contact with a caller-supplied id (imports, tests).
    pub fn with_id(id: &str, name: &str) -> Self {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            title: None,
            company: None,
            email: None,
            phone: None,
            linkedin: None,
            org: OrgInfo::default(),
            tasks: Vec::new(),
            reminders: Vec::new(),
            timeline: Vec::new(),
        }
    }

    /// Sets a scalar field, builder style.
    pub fn with_field(mut self, field: ScalarField, value: &str) -> Self {
        self.set_field(field, Some(value.to_string()));
        self
    }

    /// Adds a task, builder style.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a reminder, builder style.
    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminders.push(reminder);
        self
    }

    /// Adds a timeline event, builder style.
    pub fn with_timeline_event(mut self, event: TimelineEvent) -> Self {
        self.timeline.push(event);
        self
    }

    /// Returns the contact's unique ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name (empty if unknown).
    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.field(ScalarField::Title)
    }

    pub fn company(&self) -> Option<&str> {
        self.field(ScalarField::Company)
    }

    pub fn email(&self) -> Option<&str> {
        self.field(ScalarField::Email)
    }

    pub fn phone(&self) -> Option<&str> {
        self.field(ScalarField::Phone)
    }

    /// Returns the organizational metadata.
    pub fn org(&self) -> &OrgInfo {
        &self.org
    }

    /// Returns the value of a scalar field, treating blank values as absent.
    pub fn field(&self, field: ScalarField) -> Option<&str> {
        let value = match field {
            ScalarField::Name => Some(self.name.as_str()),
            ScalarField::Title => self.title.as_deref(),
            ScalarField::Company => self.company.as_deref(),
            ScalarField::Email => self.email.as_deref(),
            ScalarField::Phone => self.phone.as_deref(),
            ScalarField::Linkedin => self.linkedin.as_deref(),
            ScalarField::Department => self.org.department.as_deref(),
            ScalarField::Role => self.org.role.as_deref(),
            ScalarField::Influence => self.org.influence.as_deref(),
            ScalarField::ReportsTo => self.org.reports_to.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Overwrites a scalar field. `None` clears it.
    pub fn set_field(&mut self, field: ScalarField, value: Option<String>) {
        match field {
            ScalarField::Name => self.name = value.unwrap_or_default(),
            ScalarField::Title => self.title = value,
            ScalarField::Company => self.company = value,
            ScalarField::Email => self.email = value,
            ScalarField::Phone => self.phone = value,
            ScalarField::Linkedin => self.linkedin = value,
            ScalarField::Department => self.org.department = value,
            ScalarField::Role => self.org.role = value,
            ScalarField::Influence => self.org.influence = value,
            ScalarField::ReportsTo => self.org.reports_to = value,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn timeline(&self) -> &[TimelineEvent] {
        &self.timeline
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub(crate) fn reminders_mut(&mut self) -> &mut Vec<Reminder> {
        &mut self.reminders
    }

    pub(crate) fn timeline_mut(&mut self) -> &mut Vec<TimelineEvent> {
        &mut self.timeline
    }

    /// Appends an event to the contact's timeline.
    pub fn push_timeline_event(&mut self, event: TimelineEvent) {
        self.timeline.push(event);
    }

    /// Returns true if the contact carries no scalar data beyond its id.
    pub fn is_blank(&self) -> bool {
        ScalarField::ALL.iter().all(|f| self.field(*f).is_none())
    }
}
