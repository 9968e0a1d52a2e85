//! Tally reconciliation: recompute counters from vote rows and report drift.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{Review, ReviewId, Tally, UserId, Vote, VoteType};

/// A cached counter column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TallyField {
    /// `upvotes_count`.
    #[serde(rename = "upvotes_count")]
    Upvotes,
    /// `downvotes_count`.
    #[serde(rename = "downvotes_count")]
    Downvotes,
}

impl TallyField {
    /// Wire name of the counter column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvotes => "upvotes_count",
            Self::Downvotes => "downvotes_count",
        }
    }

    const fn vote_type(self) -> VoteType {
        match self {
            Self::Upvotes => VoteType::Up,
            Self::Downvotes => VoteType::Down,
        }
    }
}

/// One counter whose stored value disagrees with the vote rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyMismatch {
    /// Disagreeing column.
    pub field: TallyField,
    /// Cached value.
    pub stored: u32,
    /// Value recomputed from vote rows.
    pub recomputed: u32,
}

/// Outcome of reconciling one review. Mismatches are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// Reconciled review.
    pub review_id: ReviewId,
    /// Cached counters.
    pub stored: Tally,
    /// Counters recomputed from the vote rows.
    pub recomputed: Tally,
    /// Disagreeing columns, upvotes first.
    pub mismatches: Vec<TallyMismatch>,
    /// Voters with more than one row for this review.
    pub duplicate_voters: Vec<UserId>,
    /// Rows referencing a different review; not counted.
    pub ignored_votes: usize,
}

impl ReconciliationReport {
    /// Whether the cached counters match the vote rows.
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Recompute `review`'s tally from `votes` and compare with its counters.
///
/// Read-only and idempotent. Rows for other reviews are skipped and counted
/// in `ignored_votes`.
///
/// # Examples
/// ```
/// use wingrate::domain::{ReviewId, Tally, TallyField, reconcile_counts};
///
/// let report = reconcile_counts(ReviewId::new(1), Tally::new(2, 0), &[]);
/// assert_eq!(report.mismatches[0].field, TallyField::Upvotes);
/// ```
pub fn reconcile_tally(review: &Review, votes: &[Vote]) -> ReconciliationReport {
    reconcile_counts(review.id(), review.tally(), votes)
}

/// Reconcile raw stored counters for `review_id` against `votes`.
pub fn reconcile_counts(
    review_id: ReviewId,
    stored: Tally,
    votes: &[Vote],
) -> ReconciliationReport {
    let (own, foreign): (Vec<&Vote>, Vec<&Vote>) =
        votes.iter().partition(|vote| vote.review_id == review_id);

    let recomputed = Tally::from_votes(own.iter().copied());
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for vote in &own {
        if !seen.insert(&vote.user_id) {
            duplicates.insert(vote.user_id.clone());
        }
    }

    let mismatches = [TallyField::Upvotes, TallyField::Downvotes]
        .into_iter()
        .filter_map(|field| {
            let stored = stored.count(field.vote_type());
            let recomputed = recomputed.count(field.vote_type());
            (stored != recomputed).then_some(TallyMismatch {
                field,
                stored,
                recomputed,
            })
        })
        .collect();

    ReconciliationReport {
        review_id,
        stored,
        recomputed,
        mismatches,
        duplicate_voters: duplicates.into_iter().collect(),
        ignored_votes: foreign.len(),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for tally reconciliation.
    use super::*;
    use rstest::{fixture, rstest};

    const REVIEW: ReviewId = ReviewId::new(5);

    fn vote(voter: &str, vote_type: VoteType) -> Vote {
        Vote::new(REVIEW, UserId::new(voter).expect("valid id"), vote_type)
    }

    #[fixture]
    fn votes() -> Vec<Vote> {
        vec![
            vote("u1", VoteType::Up),
            vote("u2", VoteType::Up),
            vote("u3", VoteType::Down),
        ]
    }

    #[rstest]
    fn seeded_counters_are_consistent(votes: Vec<Vote>) {
        let report = reconcile_counts(REVIEW, Tally::new(2, 1), &votes);
        assert!(report.is_consistent());
        assert_eq!(report.recomputed, Tally::new(2, 1));
        assert!(report.duplicate_voters.is_empty());
    }

    #[rstest]
    #[case::upvotes(Tally::new(3, 1), vec![TallyField::Upvotes])]
    #[case::downvotes(Tally::new(2, 0), vec![TallyField::Downvotes])]
    #[case::both(Tally::new(0, 7), vec![TallyField::Upvotes, TallyField::Downvotes])]
    fn reports_exactly_the_perturbed_fields(
        votes: Vec<Vote>,
        #[case] stored: Tally,
        #[case] expected: Vec<TallyField>,
    ) {
        let report = reconcile_counts(REVIEW, stored, &votes);
        let fields: Vec<_> = report.mismatches.iter().map(|m| m.field).collect();
        assert_eq!(fields, expected);
    }

    #[rstest]
    fn reconciliation_is_idempotent(votes: Vec<Vote>) {
        let first = reconcile_counts(REVIEW, Tally::new(9, 9), &votes);
        let second = reconcile_counts(REVIEW, Tally::new(9, 9), &votes);
        assert_eq!(first, second);
    }

    #[rstest]
    fn flags_duplicates_and_skips_foreign_rows(mut votes: Vec<Vote>) {
        votes.push(vote("u1", VoteType::Down));
        votes.push(Vote::new(
            ReviewId::new(99),
            UserId::new("u4").expect("valid id"),
            VoteType::Up,
        ));

        let report = reconcile_counts(REVIEW, Tally::new(2, 2), &votes);
        assert!(report.is_consistent());
        assert_eq!(report.duplicate_voters, vec![UserId::new("u1").expect("id")]);
        assert_eq!(report.ignored_votes, 1);
    }

    #[rstest]
    fn mismatch_serialises_with_column_names() {
        let report = reconcile_counts(REVIEW, Tally::new(1, 0), &[]);
        let value = serde_json::to_value(&report.mismatches).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!([{"field": "upvotes_count", "stored": 1, "recomputed": 0}])
        );
    }
}
