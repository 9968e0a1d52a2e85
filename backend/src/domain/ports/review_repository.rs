//! Port for review and vote persistence.
//!
//! The [`ReviewRepository`] trait is the store contract the review model
//! leans on: reading reviews and their vote rows, upserting or deleting a
//! voter's row together with its tally delta, and applying bare deltas as
//! atomic increments.

use async_trait::async_trait;

use crate::domain::{NewReview, Review, ReviewId, Tally, TallyDelta, UserId, Vote, VoteWrite};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review repository query failed: {message}",
        /// A mutation referenced a review the store does not hold.
        MissingReview { review_id: i64 } =>
            "review {review_id} does not exist",
        /// A stored record could not be decoded.
        Corrupt { message: String } =>
            "stored review record is unreadable: {message}",
    }
}

/// Port for review, vote and tally storage.
///
/// # Tally semantics
///
/// Counters are never written as absolute values. Vote mutations produce a
/// [`TallyDelta`] and the store applies it as an increment, saturating at
/// zero.
///
/// [`ReviewRepository::persist_vote`] and [`ReviewRepository::delete_vote`]
/// derive the delta from the row they actually replace and apply row and
/// delta in one atomic step. Concurrent writes by the same voter therefore
/// never count twice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fetch a review by id, without votes or location.
    async fn fetch_review(&self, review_id: ReviewId)
    -> Result<Option<Review>, ReviewRepositoryError>;

    /// Fetch every vote row for a review.
    async fn fetch_votes_for_review(
        &self,
        review_id: ReviewId,
    ) -> Result<Vec<Vote>, ReviewRepositoryError>;

    /// Insert or replace the voter's row and apply the matching tally delta
    /// in the same atomic step.
    async fn persist_vote(&self, vote: &Vote) -> Result<VoteWrite, ReviewRepositoryError>;

    /// Delete the voter's row, if present, and apply the matching decrement
    /// in the same atomic step.
    async fn delete_vote(
        &self,
        review_id: ReviewId,
        user_id: &UserId,
    ) -> Result<VoteWrite, ReviewRepositoryError>;

    /// Atomically apply `delta` to the review's counters and return the
    /// resulting tally.
    async fn persist_tally_update(
        &self,
        review_id: ReviewId,
        delta: TallyDelta,
    ) -> Result<Tally, ReviewRepositoryError>;

    /// Store a newly published review, assigning its id and a zero tally.
    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;

    /// List every stored review, without votes or location.
    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewRepositoryError>;
}

/// Fixture implementation for testing without a store.
///
/// Lookups find nothing, writes are discarded and inserted reviews receive id
/// `1`. Vote writes report a first vote on an empty tally.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn fetch_review(
        &self,
        _review_id: ReviewId,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        Ok(None)
    }

    async fn fetch_votes_for_review(
        &self,
        _review_id: ReviewId,
    ) -> Result<Vec<Vote>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn persist_vote(&self, vote: &Vote) -> Result<VoteWrite, ReviewRepositoryError> {
        let delta = TallyDelta::cast(vote.vote_type);
        Ok(VoteWrite {
            previous: None,
            delta,
            tally: Tally::default().apply(delta),
        })
    }

    async fn delete_vote(
        &self,
        _review_id: ReviewId,
        _user_id: &UserId,
    ) -> Result<VoteWrite, ReviewRepositoryError> {
        Ok(VoteWrite {
            previous: None,
            delta: TallyDelta::ZERO,
            tally: Tally::default(),
        })
    }

    async fn persist_tally_update(
        &self,
        _review_id: ReviewId,
        delta: TallyDelta,
    ) -> Result<Tally, ReviewRepositoryError> {
        Ok(Tally::default().apply(delta))
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        Ok(Review::from_new(ReviewId::new(1), review))
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(Vec::new())
    }
}
