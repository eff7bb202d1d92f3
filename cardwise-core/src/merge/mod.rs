// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Merge and Undo
//!
//! Building the merged record, swapping it into the collection, and the
//! snapshot history that lets the latest merge be reversed.

mod error;
pub mod executor;
pub mod history;

pub use error::MergeError;
pub use executor::{merge_contacts, merge_contacts_at, replace_in_collection};
pub use history::MergeHistoryEntry;
