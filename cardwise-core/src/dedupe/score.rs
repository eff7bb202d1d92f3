// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pairwise Similarity Scoring
//!
//! Scores are a weighted union of independent signals rather than an
//! average, so one strong signal (an identical email address) decides a
//! match on its own. Each signal records its contribution as a reason.

use std::collections::HashSet;

use serde::Serialize;

use super::normalize::{
    email_domain, name_tokens, normalize_company, normalize_email, phones_match,
};
use crate::config::{DedupeConfig, MAX_SCORE};
use crate::contact::{Contact, ScalarField};

/// Points for identical email addresses.
pub const EXACT_EMAIL_POINTS: u8 = 90;
/// Points for a shared, non-public email domain.
pub const EMAIL_DOMAIN_POINTS: u8 = 20;
/// Points for matching phone numbers.
pub const PHONE_POINTS: u8 = 60;
/// Points for identical multi-word names.
pub const EXACT_NAME_POINTS: u8 = 60;
/// Upper bound for partially overlapping names.
pub const PARTIAL_NAME_MAX_POINTS: u8 = 45;
/// Smallest token overlap that counts as a name signal.
pub const MIN_NAME_OVERLAP: f64 = 0.5;
/// Points for the same employer, only alongside a name or email signal.
pub const COMPANY_POINTS: u8 = 15;

/// The dimension a match reason refers to.
///
/// Variant order is the display order of reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Email,
    EmailDomain,
    Phone,
    Name,
    Company,
}

/// One signal that contributed to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReason {
    pub kind: MatchKind,
    /// Points this signal added to the score, after capping.
    pub contribution: u8,
    /// Human-readable explanation, e.g. "phone numbers match".
    pub description: String,
}

/// The outcome of comparing two contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    /// Score in `0..=100`.
    pub score: u8,
    /// Contributing reasons in display order; empty when the score is 0.
    pub reasons: Vec<MatchReason>,
}

impl ScoreResult {
    /// Returns true if this pair counts as a duplicate at `threshold`.
    pub fn is_match(&self, threshold: u8) -> bool {
        self.score > 0 && self.score >= threshold
    }
}

/// Scores contact pairs.
#[derive(Debug, Clone)]
pub struct Scorer {
    ignored_domains: HashSet<String>,
}

impl Default for Scorer {
    fn default() -> Self {
        Scorer::new(&DedupeConfig::default())
    }
}

impl Scorer {
    /// Creates a scorer honoring the config's ignored email domains.
    pub fn new(config: &DedupeConfig) -> Self {
        Scorer {
            ignored_domains: config
                .ignored_email_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .collect(),
        }
    }

    /// Computes the similarity score of two contacts.
    ///
    /// The result is the same regardless of argument order.
    pub fn score(&self, a: &Contact, b: &Contact) -> ScoreResult {
        let mut signals: Vec<(MatchKind, u8, String)> = Vec::new();

        let email_a = normalize_email(a.email());
        let email_b = normalize_email(b.email());
        let same_email = matches!((&email_a, &email_b), (Some(x), Some(y)) if x == y);

        if same_email {
            signals.push((
                MatchKind::Email,
                EXACT_EMAIL_POINTS,
                "email addresses match".to_string(),
            ));
        } else if let (Some(da), Some(db)) = (email_domain(a.email()), email_domain(b.email())) {
            if da == db && !self.ignored_domains.contains(&da) {
                signals.push((
                    MatchKind::EmailDomain,
                    EMAIL_DOMAIN_POINTS,
                    format!("same email domain ({})", da),
                ));
            }
        }

        if phones_match(a.phone(), b.phone()) {
            signals.push((
                MatchKind::Phone,
                PHONE_POINTS,
                "phone numbers match".to_string(),
            ));
        }

        if let Some((points, description)) = name_signal(a, b) {
            signals.push((MatchKind::Name, points, description));
        }

        let has_identity_signal = signals.iter().any(|(kind, _, _)| {
            matches!(kind, MatchKind::Email | MatchKind::EmailDomain | MatchKind::Name)
        });
        if has_identity_signal {
            let company_a = normalize_company(a.company());
            let company_b = normalize_company(b.company());
            if matches!((&company_a, &company_b), (Some(x), Some(y)) if x == y) {
                signals.push((MatchKind::Company, COMPANY_POINTS, "same company".to_string()));
            }
        }

        signals.sort_by_key(|(kind, _, _)| *kind);

        let mut score: u8 = 0;
        let mut reasons = Vec::with_capacity(signals.len());
        for (kind, points, description) in signals {
            let contribution = points.min(MAX_SCORE - score);
            score += contribution;
            reasons.push(MatchReason {
                kind,
                contribution,
                description,
            });
        }

        ScoreResult { score, reasons }
    }
}

/// Scores two contacts with the default configuration.
pub fn score_pair(a: &Contact, b: &Contact) -> ScoreResult {
    Scorer::default().score(a, b)
}

fn name_signal(a: &Contact, b: &Contact) -> Option<(u8, String)> {
    let tokens_a = name_tokens(a.field(ScalarField::Name));
    let tokens_b = name_tokens(b.field(ScalarField::Name));
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return None;
    }

    if tokens_a == tokens_b && tokens_a.len() >= 2 {
        return Some((EXACT_NAME_POINTS, "names match".to_string()));
    }

    let overlap = name_similarity(&tokens_a, &tokens_b);
    if overlap < MIN_NAME_OVERLAP {
        return None;
    }
    let points = (overlap * f64::from(PARTIAL_NAME_MAX_POINTS)).round() as u8;
    Some((points, "similar names".to_string()))
}

/// Token overlap ratio of two tokenized names, in `0.0..=1.0`.
///
/// Exact tokens are paired first; a single-letter token then pairs with a
/// remaining token sharing its initial ("j" ~ "jane"). The ratio is the
/// number of pairs over the longer name's token count.
pub fn name_similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Fixed argument order keeps the greedy pairing symmetric.
    let (short, long) = if (a.len(), a) <= (b.len(), b) {
        (a, b)
    } else {
        (b, a)
    };

    let mut used = vec![false; long.len()];
    let mut paired = vec![false; short.len()];
    let mut matched = 0usize;

    for (i, token) in short.iter().enumerate() {
        if let Some(j) = (0..long.len()).find(|&j| !used[j] && long[j] == *token) {
            used[j] = true;
            paired[i] = true;
            matched += 1;
        }
    }

    for (i, token) in short.iter().enumerate() {
        if paired[i] {
            continue;
        }
        if let Some(j) = (0..long.len()).find(|&j| !used[j] && initial_match(token, &long[j])) {
            used[j] = true;
            matched += 1;
        }
    }

    matched as f64 / long.len() as f64
}

fn initial_match(x: &str, y: &str) -> bool {
    let is_initial = |t: &str| t.chars().count() == 1;
    (is_initial(x) || is_initial(y)) && x.chars().next() == y.chars().next()
}
