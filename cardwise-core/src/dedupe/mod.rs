// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Duplicate Detection
//!
//! Normalization, pairwise scoring, grouping of transitively similar
//! contacts, and per-field conflict resolution.

pub mod group;
pub mod normalize;
pub mod resolve;
pub mod score;

pub use group::{find_duplicate_groups, find_matches_for, group_with, DuplicateGroup};
pub use resolve::{
    auto_resolve, pick_best_value, resolve_field, FieldChoice, FieldChoices, Resolution, Side,
};
pub use score::{name_similarity, score_pair, MatchKind, MatchReason, ScoreResult, Scorer};
