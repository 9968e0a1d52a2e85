//! Vote casting and retraction over the review store.
//!
//! The service loads the review with its vote rows and lets the model decide
//! whether anything needs writing. The write itself goes to the store as one
//! row-and-delta operation; the store reports which row it actually replaced,
//! and that report, not the earlier read, decides the outcome.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::ReviewRepository;
use crate::domain::service_support::map_review_error;
use crate::domain::{Error, Review, ReviewId, Vote, VoteChange, VoteOutcome, VoteType, VoteWrite};

/// Service recording votes on published reviews.
#[derive(Clone)]
pub struct VoteService<R> {
    review_repo: Arc<R>,
}

impl<R> VoteService<R> {
    /// Create a new vote service.
    pub fn new(review_repo: Arc<R>) -> Self {
        Self { review_repo }
    }
}

impl<R> VoteService<R>
where
    R: ReviewRepository,
{
    /// Record `voter_id`'s vote of `vote_type` on `review_id`.
    ///
    /// Repeating an existing vote writes nothing. The returned tally is the
    /// one the store reports after the write.
    pub async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter_id: &str,
        vote_type: VoteType,
    ) -> Result<VoteOutcome, Error> {
        let mut review = self.load_with_votes(review_id).await?;
        let outcome = review.record_vote(voter_id, vote_type)?;
        let vote = match outcome.vote {
            Some(vote) if !outcome.delta.is_zero() => vote,
            _ => {
                debug!(%review_id, %vote_type, "vote unchanged");
                return Ok(outcome);
            }
        };

        let write = self
            .review_repo
            .persist_vote(&vote)
            .await
            .map_err(map_review_error)?;
        Ok(Self::settled(write, Some(vote_type), Some(vote)))
    }

    /// Remove `voter_id`'s vote on `review_id`, if any.
    pub async fn retract_vote(
        &self,
        review_id: ReviewId,
        voter_id: &str,
    ) -> Result<VoteOutcome, Error> {
        let mut review = self.load_with_votes(review_id).await?;
        let outcome = review.retract_vote(voter_id)?;
        let Some(vote) = outcome.vote else {
            debug!(%review_id, "no vote to retract");
            return Ok(outcome);
        };

        let write = self
            .review_repo
            .delete_vote(review_id, &vote.user_id)
            .await
            .map_err(map_review_error)?;
        let removed = write
            .previous
            .map(|vote_type| Vote::new(review_id, vote.user_id, vote_type));
        Ok(Self::settled(write, None, removed))
    }

    async fn load_with_votes(&self, review_id: ReviewId) -> Result<Review, Error> {
        let review = self
            .review_repo
            .fetch_review(review_id)
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| Error::not_found(format!("review {review_id} does not exist")))?;
        let votes = self
            .review_repo
            .fetch_votes_for_review(review_id)
            .await
            .map_err(map_review_error)?;
        Ok(review.with_votes(votes))
    }

    fn settled(write: VoteWrite, next: Option<VoteType>, vote: Option<Vote>) -> VoteOutcome {
        let change = VoteChange::between(write.previous, next);
        debug!(
            upvotes = write.tally.upvotes(),
            downvotes = write.tally.downvotes(),
            ?change,
            "tally updated"
        );
        VoteOutcome {
            tally: write.tally,
            delta: write.delta,
            change,
            vote,
        }
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
