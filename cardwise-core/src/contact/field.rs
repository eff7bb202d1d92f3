// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scalar Contact Fields
//!
//! Every single-valued field of a contact that can be compared, resolved,
//! and overwritten during a merge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single-valued contact field.
///
/// List-valued sub-records (tasks, reminders, timeline) are never resolved
/// field-by-field; they are unioned by the merge executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    Title,
    Company,
    Email,
    Phone,
    /// Social-profile URL.
    Linkedin,
    Department,
    Role,
    Influence,
    /// Contact id of this person's manager.
    ReportsTo,
}

impl ScalarField {
    /// All scalar fields, in display order.
    pub const ALL: [ScalarField; 10] = [
        ScalarField::Name,
        ScalarField::Title,
        ScalarField::Company,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Linkedin,
        ScalarField::Department,
        ScalarField::Role,
        ScalarField::Influence,
        ScalarField::ReportsTo,
    ];

    /// Returns the snake_case name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::Name => "name",
            ScalarField::Title => "title",
            ScalarField::Company => "company",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Linkedin => "linkedin",
            ScalarField::Department => "department",
            ScalarField::Role => "role",
            ScalarField::Influence => "influence",
            ScalarField::ReportsTo => "reports_to",
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldName(pub String);

impl fmt::Display for UnknownFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown contact field: {}", self.0)
    }
}

impl std::error::Error for UnknownFieldName {}

impl FromStr for ScalarField {
    type Err = UnknownFieldName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase().replace('-', "_");
        ScalarField::ALL
            .into_iter()
            .find(|field| field.as_str() == lowered)
            .ok_or_else(|| UnknownFieldName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_field() {
        for field in ScalarField::ALL {
            assert_eq!(field.as_str().parse::<ScalarField>().unwrap(), field);
        }
    }

    #[test]
    fn test_parse_accepts_dashes_and_case() {
        assert_eq!(
            "Reports-To".parse::<ScalarField>().unwrap(),
            ScalarField::ReportsTo
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "nickname".parse::<ScalarField>().unwrap_err();
        assert_eq!(err, UnknownFieldName("nickname".into()));
    }
}
