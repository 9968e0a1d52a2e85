//! Tests for the tally audit service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockReviewRepository, MockStoreProbe, ReviewRepositoryError, StoreProbeError,
};
use crate::domain::{ErrorCode, Tally, TallyField, UserId, Vote, VoteType};
use crate::test_support::reviews::published_review;
use rstest::rstest;

fn vote(review: i64, voter: &str, vote_type: VoteType) -> Vote {
    Vote::new(
        ReviewId::new(review),
        UserId::new(voter).expect("valid id"),
        vote_type,
    )
}

fn make_service(
    reviews: MockReviewRepository,
    probe: MockStoreProbe,
) -> TallyAuditService<MockReviewRepository, MockStoreProbe> {
    TallyAuditService::new(Arc::new(reviews), Arc::new(probe))
}

#[rstest]
#[tokio::test]
async fn consistent_review_has_no_mismatches() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_fetch_review()
        .returning(|_| Ok(Some(published_review(1).with_tally(Tally::new(1, 1)))));
    reviews.expect_fetch_votes_for_review().returning(|_| {
        Ok(vec![
            vote(1, "u1", VoteType::Up),
            vote(1, "u2", VoteType::Down),
        ])
    });

    let report = make_service(reviews, MockStoreProbe::new())
        .audit_review(ReviewId::new(1))
        .await
        .expect("audit succeeds");
    assert!(report.is_consistent());
    assert_eq!(report.recomputed, Tally::new(1, 1));
}

#[rstest]
#[tokio::test]
async fn drifted_counter_is_reported_not_repaired() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_fetch_review()
        .returning(|_| Ok(Some(published_review(1).with_tally(Tally::new(3, 0)))));
    reviews
        .expect_fetch_votes_for_review()
        .returning(|_| Ok(vec![vote(1, "u1", VoteType::Up)]));
    reviews.expect_persist_tally_update().times(0);

    let report = make_service(reviews, MockStoreProbe::new())
        .audit_review(ReviewId::new(1))
        .await
        .expect("audit succeeds");
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].field, TallyField::Upvotes);
    assert_eq!(report.mismatches[0].stored, 3);
    assert_eq!(report.mismatches[0].recomputed, 1);
}

#[rstest]
#[tokio::test]
async fn unknown_review_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_fetch_review().returning(|_| Ok(None));

    let error = make_service(reviews, MockStoreProbe::new())
        .audit_review(ReviewId::new(8))
        .await
        .expect_err("review missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn audit_all_orders_reports_and_counts_mismatches() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_reviews().returning(|| {
        Ok(vec![
            published_review(2).with_tally(Tally::new(0, 2)),
            published_review(1).with_tally(Tally::new(1, 0)),
        ])
    });
    reviews
        .expect_fetch_votes_for_review()
        .returning(|review_id| match review_id.get() {
            1 => Ok(vec![vote(1, "u1", VoteType::Up)]),
            _ => Ok(vec![vote(2, "u1", VoteType::Down)]),
        });

    let summary = make_service(reviews, MockStoreProbe::new())
        .audit_all()
        .await
        .expect("audit succeeds");

    assert_eq!(summary.reviews_checked, 2);
    assert_eq!(summary.mismatched, 1);
    assert!(!summary.is_consistent());
    let ids: Vec<i64> = summary
        .reports
        .iter()
        .map(|report| report.review_id.get())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    let drifted: Vec<i64> = summary
        .mismatched_reports()
        .map(|report| report.review_id.get())
        .collect();
    assert_eq!(drifted, vec![2]);
}

#[rstest]
#[tokio::test]
async fn empty_store_is_consistent() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_reviews().returning(|| Ok(Vec::new()));

    let summary = make_service(reviews, MockStoreProbe::new())
        .audit_all()
        .await
        .expect("audit succeeds");
    assert_eq!(summary.reviews_checked, 0);
    assert!(summary.is_consistent());
}

#[rstest]
#[tokio::test]
async fn vote_lookup_failure_aborts_audit() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list_reviews()
        .returning(|| Ok(vec![published_review(1)]));
    reviews
        .expect_fetch_votes_for_review()
        .returning(|_| Err(ReviewRepositoryError::connection("reset")));

    let error = make_service(reviews, MockStoreProbe::new())
        .audit_all()
        .await
        .expect_err("lookup failure surfaces");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn probe_records_each_collection() {
    let mut probe = MockStoreProbe::new();
    probe
        .expect_probe()
        .times(3)
        .returning(|collection| match collection {
            StoreCollection::Votes => Err(StoreProbeError::access_denied("votes", "policy")),
            StoreCollection::Locations => Ok(4),
            StoreCollection::Reviews => Ok(9),
        });

    let report = make_service(MockReviewRepository::new(), probe)
        .probe_store()
        .await;

    assert!(!report.all_reachable());
    let rows: Vec<Option<u64>> = report.collections.iter().map(|entry| entry.rows).collect();
    assert_eq!(rows, vec![Some(4), Some(9), None]);
    let votes = &report.collections[2];
    assert_eq!(votes.collection, StoreCollection::Votes);
    assert_eq!(
        votes.error.as_ref().map(Error::code),
        Some(ErrorCode::InternalError)
    );
}
