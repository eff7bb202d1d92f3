// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field Resolution
//!
//! Picks which of two conflicting scalar values survives a merge. The
//! choice is only a default: callers may override it per field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contact::{Contact, ScalarField};
use crate::merge::MergeError;

/// Words that mark a value as a job title rather than a bare word.
pub const TITLE_KEYWORDS: &[&str] = &[
    "chief",
    "ceo",
    "cto",
    "cfo",
    "coo",
    "cio",
    "president",
    "vp",
    "vice",
    "director",
    "head",
    "manager",
    "lead",
    "principal",
    "senior",
    "engineer",
    "founder",
    "partner",
    "officer",
    "owner",
    "architect",
    "consultant",
    "analyst",
    "specialist",
    "executive",
    "coordinator",
];

/// Which of the two contacts a value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The first-listed (primary) contact.
    Left,
    /// The second-listed (consumed) contact.
    Right,
}

/// The outcome of resolving one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub side: Side,
    pub value: Option<String>,
}

/// How a merge should fill one scalar field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldChoice {
    Left,
    Right,
    /// An explicit value typed by the user.
    Value(String),
}

impl From<Side> for FieldChoice {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => FieldChoice::Left,
            Side::Right => FieldChoice::Right,
        }
    }
}

/// Per-field choices for a merge.
///
/// Fields without an entry are auto-resolved when the merge runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChoices {
    choices: BTreeMap<ScalarField, FieldChoice>,
}

impl FieldChoices {
    /// Creates an empty choice map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the choice for a field.
    pub fn set(&mut self, field: ScalarField, choice: FieldChoice) -> &mut Self {
        self.choices.insert(field, choice);
        self
    }

    /// Sets the choice for a field given by name (as sent by a UI).
    pub fn set_named(&mut self, name: &str, choice: FieldChoice) -> Result<&mut Self, MergeError> {
        let field: ScalarField = name.parse()?;
        Ok(self.set(field, choice))
    }

    /// Sets a choice, builder style.
    pub fn with(mut self, field: ScalarField, choice: FieldChoice) -> Self {
        self.set(field, choice);
        self
    }

    /// Returns the choice for a field, if any.
    pub fn get(&self, field: ScalarField) -> Option<&FieldChoice> {
        self.choices.get(&field)
    }

    /// Iterates over choices in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&ScalarField, &FieldChoice)> {
        self.choices.iter()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn has_title_keyword(value: &str) -> bool {
    value
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| TITLE_KEYWORDS.contains(&word.to_lowercase().as_str()))
}

fn resolution(side: Side, value: Option<&str>) -> Resolution {
    Resolution {
        side,
        value: value.map(str::to_string),
    }
}

/// Picks the better of two values for a field with no special rules.
///
/// A non-empty value beats an empty one, then the longer value wins, then
/// the left value.
pub fn pick_best_value(left: Option<&str>, right: Option<&str>) -> Resolution {
    match (non_empty(left), non_empty(right)) {
        (None, None) => resolution(Side::Left, None),
        (Some(_), None) => resolution(Side::Left, left),
        (None, Some(_)) => resolution(Side::Right, right),
        (Some(l), Some(r)) => {
            if r.chars().count() > l.chars().count() {
                resolution(Side::Right, right)
            } else {
                resolution(Side::Left, left)
            }
        }
    }
}

/// Picks the better of two values for a specific field.
///
/// Job titles and roles prefer a value that reads like a title ("Sales
/// Director" over "Sales") before falling back to [`pick_best_value`].
pub fn resolve_field(field: ScalarField, left: Option<&str>, right: Option<&str>) -> Resolution {
    if matches!(field, ScalarField::Title | ScalarField::Role) {
        if let (Some(l), Some(r)) = (non_empty(left), non_empty(right)) {
            match (has_title_keyword(l), has_title_keyword(r)) {
                (true, false) => return resolution(Side::Left, left),
                (false, true) => return resolution(Side::Right, right),
                _ => {}
            }
        }
    }
    pick_best_value(left, right)
}

/// Builds the default choices for merging `right` into `left`.
///
/// Covers every field where at least one contact has a value.
pub fn auto_resolve(left: &Contact, right: &Contact) -> FieldChoices {
    let mut choices = FieldChoices::new();
    for field in ScalarField::ALL {
        let (l, r) = (left.field(field), right.field(field));
        if l.is_none() && r.is_none() {
            continue;
        }
        choices.set(field, resolve_field(field, l, r).side.into());
    }
    choices
}
