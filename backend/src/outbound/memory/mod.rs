//! In-process review store.
//!
//! [`InMemoryStore`] implements the review, location and probe ports over a
//! single mutex-guarded state, so every port call is atomic with respect to
//! the others. Tally deltas are applied under the same lock as the read of
//! the current counters.
//!
//! Vote rows are kept as a flat list. Rows loaded from a snapshot are kept
//! verbatim, duplicates included, so the audit sees exactly what was stored.
//! [`ReviewRepository::persist_vote`] and [`ReviewRepository::delete_vote`]
//! replace all of a voter's rows and adjust the counters for every row they
//! drop, inside one lock acquisition.

mod snapshot;

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    LocationRepository, LocationRepositoryError, ReviewRepository, ReviewRepositoryError,
    StoreCollection, StoreProbe, StoreProbeError,
};
use crate::domain::{
    Location, LocationId, NewLocation, NewReview, Review, ReviewId, Tally, TallyDelta, UserId,
    Vote, VoteWrite,
};

pub use snapshot::{SnapshotError, StoreSnapshot};

#[derive(Debug, Default)]
struct StoreState {
    locations: BTreeMap<LocationId, Location>,
    reviews: BTreeMap<ReviewId, Review>,
    votes: Vec<Vote>,
}

impl StoreState {
    fn next_location_id(&self) -> LocationId {
        LocationId::new(
            self.locations
                .keys()
                .next_back()
                .map_or(1, |id| id.get().saturating_add(1)),
        )
    }

    fn next_review_id(&self) -> ReviewId {
        ReviewId::new(
            self.reviews
                .keys()
                .next_back()
                .map_or(1, |id| id.get().saturating_add(1)),
        )
    }

    /// Replace the rows `user_id` holds on `review_id` with `next` and move
    /// the review's counters by the matching delta.
    fn write_vote(
        &mut self,
        review_id: ReviewId,
        user_id: &UserId,
        next: Option<&Vote>,
    ) -> Result<VoteWrite, ReviewRepositoryError> {
        let review = self
            .reviews
            .get_mut(&review_id)
            .ok_or_else(|| ReviewRepositoryError::missing_review(review_id.get()))?;

        let mut replaced = Vec::new();
        self.votes.retain(|vote| {
            let held = vote.review_id == review_id && vote.user_id == *user_id;
            if held {
                replaced.push(vote.vote_type);
            }
            !held
        });
        if let Some(vote) = next {
            self.votes.push(vote.clone());
        }

        // Snapshot rows may hold duplicates; each dropped row is uncounted.
        let delta = replaced.iter().fold(
            TallyDelta::between(None, next.map(|vote| vote.vote_type)),
            |delta, vote_type| delta + TallyDelta::retract(*vote_type),
        );
        let tally = review.apply_delta(delta);
        Ok(VoteWrite {
            previous: replaced.first().copied(),
            delta,
            tally,
        })
    }

    fn row_count(&self, collection: StoreCollection) -> usize {
        match collection {
            StoreCollection::Locations => self.locations.len(),
            StoreCollection::Reviews => self.reviews.len(),
            StoreCollection::Votes => self.votes.len(),
        }
    }
}

/// Review store held in memory.
///
/// # Examples
/// ```
/// use wingrate::domain::ports::{StoreCollection, StoreProbe};
/// use wingrate::outbound::memory::InMemoryStore;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryStore::new();
/// assert_eq!(store.probe(StoreCollection::Reviews).await.unwrap(), 0);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn fetch_review(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        Ok(self.state.lock().await.reviews.get(&review_id).cloned())
    }

    async fn fetch_votes_for_review(
        &self,
        review_id: ReviewId,
    ) -> Result<Vec<Vote>, ReviewRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .votes
            .iter()
            .filter(|vote| vote.review_id == review_id)
            .cloned()
            .collect())
    }

    async fn persist_vote(&self, vote: &Vote) -> Result<VoteWrite, ReviewRepositoryError> {
        let mut state = self.state.lock().await;
        let write = state.write_vote(vote.review_id, &vote.user_id, Some(vote))?;
        debug!(
            review_id = %vote.review_id,
            user_id = %vote.user_id,
            vote_type = %vote.vote_type,
            tally = %write.tally,
            "vote stored"
        );
        Ok(write)
    }

    async fn delete_vote(
        &self,
        review_id: ReviewId,
        user_id: &UserId,
    ) -> Result<VoteWrite, ReviewRepositoryError> {
        let mut state = self.state.lock().await;
        let write = state.write_vote(review_id, user_id, None)?;
        debug!(%review_id, %user_id, tally = %write.tally, "vote deleted");
        Ok(write)
    }

    async fn persist_tally_update(
        &self,
        review_id: ReviewId,
        delta: TallyDelta,
    ) -> Result<Tally, ReviewRepositoryError> {
        let mut state = self.state.lock().await;
        let review = state
            .reviews
            .get_mut(&review_id)
            .ok_or_else(|| ReviewRepositoryError::missing_review(review_id.get()))?;
        let tally = review.apply_delta(delta);
        debug!(%review_id, %tally, "tally delta applied");
        Ok(tally)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        let mut state = self.state.lock().await;
        let location_id = review.location_id();
        if !state.locations.contains_key(&location_id) {
            return Err(ReviewRepositoryError::query(format!(
                "location {location_id} does not exist"
            )));
        }
        let id = state.next_review_id();
        let stored = Review::from_new(id, review);
        state.reviews.insert(id, stored.clone());
        debug!(review_id = %id, %location_id, "review inserted");
        Ok(stored)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(self.state.lock().await.reviews.values().cloned().collect())
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn find_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(self.state.lock().await.locations.get(&location_id).cloned())
    }

    async fn find_by_name_and_address(
        &self,
        restaurant_name: &str,
        address: &str,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .locations
            .values()
            .find(|location| location.matches(restaurant_name, address))
            .cloned())
    }

    async fn insert_location(
        &self,
        location: NewLocation,
    ) -> Result<Location, LocationRepositoryError> {
        let mut state = self.state.lock().await;
        let id = state.next_location_id();
        let stored = Location::new(id, location);
        state.locations.insert(id, stored.clone());
        debug!(location_id = %id, "location inserted");
        Ok(stored)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        Ok(self.state.lock().await.locations.values().cloned().collect())
    }
}

#[async_trait]
impl StoreProbe for InMemoryStore {
    async fn probe(&self, collection: StoreCollection) -> Result<u64, StoreProbeError> {
        let rows = self.state.lock().await.row_count(collection);
        Ok(u64::try_from(rows).unwrap_or(u64::MAX))
    }
}
