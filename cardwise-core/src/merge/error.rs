// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge error types.

use thiserror::Error;

use crate::contact::{ScalarField, UnknownFieldName};
use crate::dedupe::Side;

/// Errors raised while preparing or executing a merge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A referenced contact is not in the collection (deleted or already merged).
    #[error("contact not found: {0}")]
    ContactNotFound(String),

    #[error("cannot merge contact {0} with itself")]
    SameContact(String),

    /// A field choice names something that is not a contact field.
    #[error("unknown contact field: {0}")]
    UnknownField(String),

    /// A side was picked for a field neither contact has.
    #[error("field choice {side:?} for '{field}' refers to a value neither contact has")]
    MalformedFieldChoice { field: ScalarField, side: Side },
}

impl From<UnknownFieldName> for MergeError {
    fn from(err: UnknownFieldName) -> Self {
        MergeError::UnknownField(err.0)
    }
}
