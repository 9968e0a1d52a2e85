//! Tests for the vote service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockReviewRepository, ReviewRepositoryError};
use crate::domain::{ErrorCode, Tally, TallyDelta, UserId};
use crate::test_support::reviews::published_review;
use rstest::rstest;

const REVIEW: ReviewId = ReviewId::new(1);

fn vote(voter: &str, vote_type: VoteType) -> Vote {
    Vote::new(REVIEW, UserId::new(voter).expect("valid id"), vote_type)
}

fn repo_with(tally: Tally, votes: Vec<Vote>) -> MockReviewRepository {
    let mut repo = MockReviewRepository::new();
    repo.expect_fetch_review()
        .times(1)
        .returning(move |_| Ok(Some(published_review(1).with_tally(tally))));
    repo.expect_fetch_votes_for_review()
        .times(1)
        .returning(move |_| Ok(votes.clone()));
    repo.expect_persist_tally_update().times(0);
    repo
}

fn written(previous: Option<VoteType>, next: Option<VoteType>, tally: Tally) -> VoteWrite {
    VoteWrite {
        previous,
        delta: TallyDelta::between(previous, next),
        tally,
    }
}

#[rstest]
#[tokio::test]
async fn first_vote_is_written_once() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote()
        .withf(|vote| vote.vote_type == VoteType::Up && vote.user_id.as_ref() == "u1")
        .times(1)
        .returning(|_| Ok(written(None, Some(VoteType::Up), Tally::new(1, 0))));

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Up)
        .await
        .expect("vote succeeds");

    assert_eq!(outcome.change, VoteChange::Cast);
    assert_eq!(outcome.delta, TallyDelta::cast(VoteType::Up));
    assert_eq!(outcome.tally, Tally::new(1, 0));
}

#[rstest]
#[tokio::test]
async fn repeated_vote_writes_nothing() {
    let mut repo = repo_with(Tally::new(1, 0), vec![vote("u1", VoteType::Up)]);
    repo.expect_persist_vote().times(0);

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Up)
        .await
        .expect("vote succeeds");

    assert_eq!(outcome.change, VoteChange::Unchanged);
    assert_eq!(outcome.tally, Tally::new(1, 0));
}

#[rstest]
#[tokio::test]
async fn flipped_vote_is_a_single_write() {
    let mut repo = repo_with(Tally::new(1, 0), vec![vote("u1", VoteType::Up)]);
    repo.expect_persist_vote()
        .withf(|vote| vote.vote_type == VoteType::Down)
        .times(1)
        .returning(|_| {
            Ok(written(
                Some(VoteType::Up),
                Some(VoteType::Down),
                Tally::new(0, 1),
            ))
        });

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Down)
        .await
        .expect("vote succeeds");

    assert_eq!(
        outcome.change,
        VoteChange::Flipped {
            from: VoteType::Up
        }
    );
    assert_eq!(outcome.delta, TallyDelta::flip(VoteType::Up));
    assert_eq!(outcome.tally, Tally::new(0, 1));
}

#[rstest]
#[tokio::test]
async fn store_reported_row_overrides_stale_read() {
    // The read saw no vote, but a concurrent cast landed first.
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote()
        .times(1)
        .returning(|_| Ok(written(Some(VoteType::Up), Some(VoteType::Up), Tally::new(1, 0))));

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Up)
        .await
        .expect("vote succeeds");

    assert_eq!(outcome.change, VoteChange::Unchanged);
    assert!(outcome.delta.is_zero());
    assert_eq!(outcome.tally, Tally::new(1, 0));
}

#[rstest]
#[tokio::test]
async fn tally_reported_by_store_wins() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote()
        .returning(|_| Ok(written(None, Some(VoteType::Down), Tally::new(4, 2))));

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u2", VoteType::Down)
        .await
        .expect("vote succeeds");
    assert_eq!(outcome.tally, Tally::new(4, 2));
}

#[rstest]
#[tokio::test]
async fn missing_review_is_not_found() {
    let mut repo = MockReviewRepository::new();
    repo.expect_fetch_review().returning(|_| Ok(None));

    let error = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Up)
        .await
        .expect_err("review missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn blank_voter_is_rejected_without_writes() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote().times(0);

    let error = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, " ", VoteType::Up)
        .await
        .expect_err("voter required");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn padded_voter_is_written_verbatim() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote()
        .withf(|vote| vote.user_id.as_ref() == " u1")
        .times(1)
        .returning(|_| Ok(written(None, Some(VoteType::Up), Tally::new(1, 0))));

    let outcome = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, " u1", VoteType::Up)
        .await
        .expect("present voter accepted");
    assert_eq!(outcome.change, VoteChange::Cast);
}

#[rstest]
#[tokio::test]
async fn retraction_deletes_row_with_its_decrement() {
    let mut repo = repo_with(Tally::new(0, 1), vec![vote("u1", VoteType::Down)]);
    repo.expect_delete_vote()
        .withf(|review_id, user_id| *review_id == REVIEW && user_id.as_ref() == "u1")
        .times(1)
        .returning(|_, _| Ok(written(Some(VoteType::Down), None, Tally::new(0, 0))));

    let outcome = VoteService::new(Arc::new(repo))
        .retract_vote(REVIEW, "u1")
        .await
        .expect("retraction succeeds");
    assert_eq!(
        outcome.change,
        VoteChange::Retracted {
            from: VoteType::Down
        }
    );
    assert_eq!(outcome.vote, Some(vote("u1", VoteType::Down)));
    assert_eq!(outcome.tally, Tally::new(0, 0));
}

#[rstest]
#[tokio::test]
async fn retraction_already_applied_elsewhere_changes_nothing() {
    let mut repo = repo_with(Tally::new(0, 1), vec![vote("u1", VoteType::Down)]);
    repo.expect_delete_vote()
        .times(1)
        .returning(|_, _| Ok(written(None, None, Tally::new(0, 0))));

    let outcome = VoteService::new(Arc::new(repo))
        .retract_vote(REVIEW, "u1")
        .await
        .expect("retraction succeeds");
    assert_eq!(outcome.change, VoteChange::NoVote);
    assert!(outcome.vote.is_none());
    assert!(outcome.delta.is_zero());
}

#[rstest]
#[tokio::test]
async fn retraction_without_vote_writes_nothing() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_delete_vote().times(0);

    let outcome = VoteService::new(Arc::new(repo))
        .retract_vote(REVIEW, "u1")
        .await
        .expect("retraction succeeds");
    assert_eq!(outcome.change, VoteChange::NoVote);
}

#[rstest]
#[tokio::test]
async fn store_outage_during_write_is_unavailable() {
    let mut repo = repo_with(Tally::new(0, 0), Vec::new());
    repo.expect_persist_vote()
        .returning(|_| Err(ReviewRepositoryError::connection("reset")));

    let error = VoteService::new(Arc::new(repo))
        .cast_vote(REVIEW, "u1", VoteType::Up)
        .await
        .expect_err("outage surfaces");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
