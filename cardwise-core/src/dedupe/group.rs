// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Duplicate Grouping
//!
//! Builds the similarity graph over a contact collection and returns its
//! connected components as duplicate groups. Every pair is compared, so the
//! cost is quadratic in the collection size.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::score::{MatchReason, ScoreResult, Scorer};
use crate::contact::Contact;

/// A set of contacts that likely describe the same person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Member ids, in collection order.
    pub contact_ids: Vec<String>,
    /// Highest pairwise score within the group.
    pub score: u8,
    /// Reasons of `best_pair`, in display order. They add up to `score`.
    pub reasons: Vec<MatchReason>,
    /// The first pair reaching `score`; the natural first merge.
    pub best_pair: (String, String),
}

impl DuplicateGroup {
    /// Returns the number of contacts in the group.
    pub fn len(&self) -> usize {
        self.contact_ids.len()
    }

    /// Groups always hold at least two contacts.
    pub fn is_empty(&self) -> bool {
        self.contact_ids.is_empty()
    }

    /// Returns true if the group contains the contact.
    pub fn contains(&self, contact_id: &str) -> bool {
        self.contact_ids.iter().any(|id| id == contact_id)
    }
}

fn find(parent: &mut [usize], i: usize) -> usize {
    if parent[i] != i {
        parent[i] = find(parent, parent[i]);
    }
    parent[i]
}

fn union(parent: &mut [usize], i: usize, j: usize) {
    let pi = find(parent, i);
    let pj = find(parent, j);
    // Lowest index becomes the root so component order follows the input.
    if pi < pj {
        parent[pj] = pi;
    } else if pj < pi {
        parent[pi] = pj;
    }
}

/// Finds duplicate groups with the default scorer.
pub fn find_duplicate_groups(contacts: &[Contact], threshold: u8) -> Vec<DuplicateGroup> {
    group_with(&Scorer::default(), contacts, threshold)
}

/// Finds duplicate groups using the given scorer.
///
/// Pairs scoring at or above `threshold` (and above zero) are linked;
/// linked contacts end up in one group even when some of their pairs score
/// lower. Output order is by score, highest first, then by the position of
/// each group's first member. The same input always yields the same output.
pub fn group_with(scorer: &Scorer, contacts: &[Contact], threshold: u8) -> Vec<DuplicateGroup> {
    let n = contacts.len();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut edges: Vec<(usize, usize, ScoreResult)> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let result = scorer.score(&contacts[i], &contacts[j]);
            if result.is_match(threshold) {
                union(&mut parent, i, j);
                edges.push((i, j, result));
            }
        }
    }

    // Root index -> member indices, both ascending.
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        components.entry(root).or_default().push(i);
    }

    let mut groups: Vec<(usize, DuplicateGroup)> = Vec::new();
    for (root, members) in components {
        if members.len() < 2 {
            continue;
        }

        // Edges are generated in (i, j) order, so the first maximum is the
        // earliest pair in collection order.
        let component_edges: Vec<&(usize, usize, ScoreResult)> = edges
            .iter()
            .filter(|(i, _, _)| find(&mut parent, *i) == root)
            .collect();
        let Some(score) = component_edges.iter().map(|(_, _, r)| r.score).max() else {
            continue;
        };
        let Some((bi, bj, best)) = component_edges.iter().find(|(_, _, r)| r.score == score)
        else {
            continue;
        };

        groups.push((
            root,
            DuplicateGroup {
                contact_ids: members.iter().map(|&m| contacts[m].id().to_string()).collect(),
                score,
                reasons: best.reasons.clone(),
                best_pair: (
                    contacts[*bi].id().to_string(),
                    contacts[*bj].id().to_string(),
                ),
            },
        ));
    }

    groups.sort_by(|(root_a, a), (root_b, b)| b.score.cmp(&a.score).then(root_a.cmp(root_b)));

    debug!(
        contacts = n,
        links = edges.len(),
        groups = groups.len(),
        threshold,
        "duplicate scan complete"
    );

    groups.into_iter().map(|(_, group)| group).collect()
}

/// Scores one contact against every other contact in the collection.
///
/// Returns `(id, result)` for each match at `threshold`, best first, ties in
/// collection order. Returns nothing if the contact is not in the collection.
pub fn find_matches_for(
    scorer: &Scorer,
    contacts: &[Contact],
    contact_id: &str,
    threshold: u8,
) -> Vec<(String, ScoreResult)> {
    let Some(target) = contacts.iter().find(|c| c.id() == contact_id) else {
        return Vec::new();
    };

    let mut matches: Vec<(String, ScoreResult)> = contacts
        .iter()
        .filter(|c| c.id() != contact_id)
        .map(|c| (c.id().to_string(), scorer.score(target, c)))
        .filter(|(_, result)| result.is_match(threshold))
        .collect();

    // Stable sort keeps collection order among equal scores.
    matches.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ScalarField;
    use crate::dedupe::MatchKind;

    fn contact(id: &str, name: &str, email: &str) -> Contact {
        let c = Contact::with_id(id, name);
        if email.is_empty() {
            c
        } else {
            c.with_field(ScalarField::Email, email)
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(find_duplicate_groups(&[], 60).is_empty());
        assert!(find_duplicate_groups(&[contact("a", "Alice", "")], 60).is_empty());
    }

    #[test]
    fn test_email_pair_grouped() {
        let contacts = vec![
            contact("a", "Jane Doe", "jane@acme.com"),
            contact("b", "Bob Stone", "bob@other.org"),
            contact("c", "J. Doe", "jane@acme.com"),
        ];
        let groups = find_duplicate_groups(&contacts, 60);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].contact_ids, vec!["a", "c"]);
        assert_eq!(groups[0].best_pair, ("a".to_string(), "c".to_string()));
        assert_eq!(groups[0].reasons[0].kind, MatchKind::Email);
        assert!(groups[0].score >= 90);
    }

    #[test]
    fn test_group_reasons_come_from_best_pair() {
        let contacts = vec![
            contact("a", "Alice Smith", "pat@acme.com").with_field(ScalarField::Phone, "555-010-2030"),
            contact("b", "Jane Doe", "pat@acme.com").with_field(ScalarField::Phone, "5550102030"),
            contact("c", "Jane Doe", "").with_field(ScalarField::Phone, "(555) 010 2030"),
        ];
        let groups = find_duplicate_groups(&contacts, 60);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].score, 100);
        assert_eq!(groups[0].best_pair, ("a".to_string(), "b".to_string()));

        let kinds: Vec<MatchKind> = groups[0].reasons.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![MatchKind::Email, MatchKind::Phone]);
        let total: u32 = groups[0].reasons.iter().map(|r| u32::from(r.contribution)).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_groups_sorted_by_score() {
        let contacts = vec![
            contact("a", "Ann Lee", ""),
            contact("b", "Ann Lee", ""),
            contact("c", "Jane Doe", "jane@acme.com"),
            contact("d", "Jane Doe", "jane@acme.com"),
        ];
        let groups = find_duplicate_groups(&contacts, 60);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].contact_ids, vec!["c", "d"]);
        assert_eq!(groups[1].contact_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_zero_threshold_does_not_link_unrelated() {
        let contacts = vec![contact("a", "Alice", ""), contact("b", "Bob", "")];
        assert!(find_duplicate_groups(&contacts, 0).is_empty());
    }

    #[test]
    fn test_find_matches_for() {
        let contacts = vec![
            contact("a", "Jane Doe", "jane@acme.com"),
            contact("b", "Jane Doe", ""),
            contact("c", "J. Doe", "jane@acme.com"),
            contact("d", "Bob Stone", ""),
        ];
        let matches = find_matches_for(&Scorer::default(), &contacts, "a", 60);
        let ids: Vec<&str> = matches.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert!(find_matches_for(&Scorer::default(), &contacts, "zz", 60).is_empty());
    }
}
