//! Review submission: validate a form, resolve its location and publish.
//!
//! Every section is validated before anything is written, so a rejected
//! submission leaves the store untouched.

use std::sync::Arc;

use mockable::Clock;
use rating_descriptions::RatingDescriptions;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::{LocationRepository, ReviewRepository};
use crate::domain::service_support::{map_location_error, map_review_error};
use crate::domain::{
    BasicInfoInput, Error, ExperienceDetails, ExperienceDetailsInput, Location, NewLocation,
    RatingsInput, RequiredField, Review, ReviewDraft, SauceDetails, SauceDetailsInput, UserId,
    ValidationError, validate_basic_info_now, validate_ratings,
};

/// A complete review form as submitted by a reviewer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    /// Authenticated reviewer identity.
    pub author: String,
    /// Basic Info step.
    pub basic_info: BasicInfoInput,
    /// Free-text review body.
    #[serde(default)]
    pub review: String,
    /// Letter-grade rating category.
    #[serde(default)]
    pub rating: String,
    /// Ratings step, if the reviewer reached it.
    #[serde(default)]
    pub ratings: Option<RatingsInput>,
    /// Experience step, if answered.
    #[serde(default)]
    pub experience_details: Option<ExperienceDetailsInput>,
    /// Sauce step, if answered.
    #[serde(default)]
    pub sauce_details: Option<SauceDetailsInput>,
}

/// Service publishing review submissions.
#[derive(Clone)]
pub struct ReviewSubmissionService<R, L> {
    review_repo: Arc<R>,
    location_repo: Arc<L>,
    descriptions: Arc<RatingDescriptions>,
    clock: Arc<dyn Clock>,
}

impl<R, L> ReviewSubmissionService<R, L> {
    /// Create a new submission service.
    pub fn new(
        review_repo: Arc<R>,
        location_repo: Arc<L>,
        descriptions: Arc<RatingDescriptions>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            review_repo,
            location_repo,
            descriptions,
            clock,
        }
    }
}

impl<R, L> ReviewSubmissionService<R, L>
where
    R: ReviewRepository,
    L: LocationRepository,
{
    /// Validate and publish a submission.
    ///
    /// The visit date is checked against the clock's current UTC date. The
    /// restaurant's location is reused when one with the same name and
    /// address exists, and created otherwise. The returned review embeds its
    /// location.
    pub async fn submit(&self, submission: ReviewSubmission) -> Result<Review, Error> {
        let ReviewSubmission {
            author,
            basic_info,
            review,
            rating,
            ratings,
            experience_details,
            sauce_details,
        } = submission;

        if UserId::new(author.as_str()).is_err() {
            return Err(ValidationError::MissingField {
                field: RequiredField::Author,
            }
            .into());
        }

        let info = validate_basic_info_now(&basic_info, self.clock.as_ref())?;
        let mut draft = ReviewDraft::start(info);
        if let Some(input) = ratings {
            draft = draft.attach_ratings(validate_ratings(&input, &self.descriptions)?);
        }
        if let Some(input) = experience_details {
            draft = draft.attach_experience(ExperienceDetails::try_from_input(input)?);
        }
        if let Some(input) = sauce_details {
            draft = draft.attach_sauce(SauceDetails::try_from_input(input)?);
        }

        let location = self.resolve_location(draft.location_content()?).await?;
        let content = draft.publish(location.id(), &author, review, rating)?;
        let published = self
            .review_repo
            .insert_review(content)
            .await
            .map_err(map_review_error)?;

        info!(
            review_id = %published.id(),
            location_id = %location.id(),
            "review published"
        );
        Ok(published.with_location(location))
    }

    async fn resolve_location(&self, content: NewLocation) -> Result<Location, Error> {
        if let Some(existing) = self
            .location_repo
            .find_by_name_and_address(content.restaurant_name(), content.address())
            .await
            .map_err(map_location_error)?
        {
            debug!(location_id = %existing.id(), "reusing existing location");
            return Ok(existing);
        }

        let created = self
            .location_repo
            .insert_location(content)
            .await
            .map_err(map_location_error)?;
        debug!(location_id = %created.id(), "created location");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "review_submission_service_tests.rs"]
mod tests;
