//! Read-side queries: a single review with its context, and reviews near a
//! point.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{LocationRepository, ReviewRepository};
use crate::domain::service_support::{map_location_error, map_review_error};
use crate::domain::{Coordinates, Error, Location, LocationId, Review, ReviewId};

/// A review paired with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyReview {
    /// Review with its location embedded.
    pub review: Review,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
}

/// Service answering review lookups.
#[derive(Clone)]
pub struct ReviewQueryService<R, L> {
    review_repo: Arc<R>,
    location_repo: Arc<L>,
}

impl<R, L> ReviewQueryService<R, L> {
    /// Create a new query service.
    pub fn new(review_repo: Arc<R>, location_repo: Arc<L>) -> Self {
        Self {
            review_repo,
            location_repo,
        }
    }
}

impl<R, L> ReviewQueryService<R, L>
where
    R: ReviewRepository,
    L: LocationRepository,
{
    /// Load a review with its vote rows and location.
    ///
    /// A review whose location row is missing is still returned, without a
    /// location.
    pub async fn review(&self, review_id: ReviewId) -> Result<Review, Error> {
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
        let location = self
            .location_repo
            .find_location(review.location_id())
            .await
            .map_err(map_location_error)?;

        let review = review.with_votes(votes);
        Ok(match location {
            Some(location) => review.with_location(location),
            None => review,
        })
    }

    /// Reviews whose location lies within `radius_km` of `center`, nearest
    /// first, at most `limit` of them.
    ///
    /// Ties in distance are broken by review id.
    pub async fn reviews_near(
        &self,
        center: Coordinates,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<NearbyReview>, Error> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(Error::invalid_request(format!(
                "radius must be a non-negative distance, got {radius_km}"
            )));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let in_range: HashMap<LocationId, (Location, f64)> = self
            .location_repo
            .list_locations()
            .await
            .map_err(map_location_error)?
            .into_iter()
            .filter_map(|location| {
                let distance = center.distance_km(&location.coordinates());
                (distance <= radius_km).then(|| (location.id(), (location, distance)))
            })
            .collect();
        if in_range.is_empty() {
            debug!(radius_km, "no locations in range");
            return Ok(Vec::new());
        }

        let mut nearby: Vec<NearbyReview> = self
            .review_repo
            .list_reviews()
            .await
            .map_err(map_review_error)?
            .into_iter()
            .filter_map(|review| {
                let (location, distance_km) = in_range.get(&review.location_id())?;
                Some(NearbyReview {
                    review: review.with_location(location.clone()),
                    distance_km: *distance_km,
                })
            })
            .collect();
        nearby.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.review.id().cmp(&b.review.id()))
        });
        nearby.truncate(limit);
        debug!(radius_km, found = nearby.len(), "nearby reviews");
        Ok(nearby)
    }
}

#[cfg(test)]
#[path = "review_query_service_tests.rs"]
mod tests;
