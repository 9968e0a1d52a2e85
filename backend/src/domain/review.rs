//! The review aggregate and its Draft → Published lifecycle.
//!
//! A [`ReviewDraft`] holds validated Basic Info plus any detail sections
//! attached so far. Publishing yields a [`NewReview`]; the store assigns the
//! id and the result becomes a [`Review`]. A published review's content is
//! immutable; only its votes and tally change afterwards.

use chrono::NaiveDate;
use url::Url;

use super::{
    ExperienceDetails, Location, LocationId, NewLocation, Ratings, RequiredField, ReviewId,
    SauceDetails, Tally, TallyDelta, UserId, UserIdError, ValidatedBasicInfo, ValidationError,
    Vote, VoteChange, VoteError, VoteOutcome, VoteType,
};

/// Transient review state: Basic Info captured, sections optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    basic_info: ValidatedBasicInfo,
    experience_details: Option<ExperienceDetails>,
    sauce_details: Option<SauceDetails>,
    ratings: Option<Ratings>,
}

impl ReviewDraft {
    /// Start a draft from validated Basic Info.
    pub const fn start(basic_info: ValidatedBasicInfo) -> Self {
        Self {
            basic_info,
            experience_details: None,
            sauce_details: None,
            ratings: None,
        }
    }

    /// Basic Info captured for this draft.
    pub const fn basic_info(&self) -> &ValidatedBasicInfo {
        &self.basic_info
    }

    /// Attach a validated ratings section, replacing any earlier one.
    #[must_use]
    pub fn attach_ratings(mut self, ratings: Ratings) -> Self {
        self.ratings = Some(ratings);
        self
    }

    /// Attach a validated experience section.
    #[must_use]
    pub fn attach_experience(mut self, details: ExperienceDetails) -> Self {
        self.experience_details = Some(details);
        self
    }

    /// Attach a validated sauce section.
    #[must_use]
    pub fn attach_sauce(mut self, details: SauceDetails) -> Self {
        self.sauce_details = Some(details);
        self
    }

    /// Attached ratings section.
    pub const fn ratings(&self) -> Option<&Ratings> {
        self.ratings.as_ref()
    }

    /// Location content for this draft's restaurant.
    ///
    /// Fails with `MissingField(coordinates)` when geocoding did not resolve
    /// the address.
    pub fn location_content(&self) -> Result<NewLocation, ValidationError> {
        let coordinates = self
            .basic_info
            .coordinates()
            .ok_or(ValidationError::MissingField {
                field: RequiredField::Coordinates,
            })?;
        NewLocation::new(
            self.basic_info.restaurant_name(),
            self.basic_info.address(),
            coordinates,
        )
    }

    /// Publish the draft against an existing location.
    ///
    /// Publication requires resolved coordinates and an author identity.
    pub fn publish(
        self,
        location_id: LocationId,
        author: &str,
        review: impl Into<String>,
        rating: impl Into<String>,
    ) -> Result<NewReview, ValidationError> {
        if self.basic_info.coordinates().is_none() {
            return Err(ValidationError::MissingField {
                field: RequiredField::Coordinates,
            });
        }
        let user_id = UserId::new(author).map_err(|_| ValidationError::MissingField {
            field: RequiredField::Author,
        })?;
        Ok(NewReview {
            location_id,
            user_id,
            review: review.into(),
            rating: rating.into().trim().to_owned(),
            date_visited: self.basic_info.date_visited(),
            website_url: self.basic_info.website_url().cloned(),
            experience_details: self.experience_details,
            sauce_details: self.sauce_details,
            ratings: self.ratings,
        })
    }
}

/// Published review content awaiting a store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub(super) location_id: LocationId,
    pub(super) user_id: UserId,
    pub(super) review: String,
    pub(super) rating: String,
    pub(super) date_visited: NaiveDate,
    pub(super) website_url: Option<Url>,
    pub(super) experience_details: Option<ExperienceDetails>,
    pub(super) sauce_details: Option<SauceDetails>,
    pub(super) ratings: Option<Ratings>,
}

impl NewReview {
    /// Referenced location.
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// Author of the review.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// A published review.
///
/// ## Invariants
/// - Once vote mutations settle, the tally equals the vote rows partitioned
///   by type.
/// - Counters never go below zero.
/// - Content fields never change after publication.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: ReviewId,
    content: NewReview,
    tally: Tally,
    location: Option<Location>,
    votes: Option<Vec<Vote>>,
}

impl Review {
    /// Publish `content` under the store-assigned `id` with an empty tally.
    pub const fn from_new(id: ReviewId, content: NewReview) -> Self {
        Self {
            id,
            content,
            tally: Tally::new(0, 0),
            location: None,
            votes: None,
        }
    }

    /// Replace the cached tally, as read back from a store.
    #[must_use]
    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = tally;
        self
    }

    /// Embed a location snapshot.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the loaded vote rows.
    #[must_use]
    pub fn with_votes(mut self, votes: Vec<Vote>) -> Self {
        self.votes = Some(votes);
        self
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Referenced location.
    pub const fn location_id(&self) -> LocationId {
        self.content.location_id
    }

    /// Author.
    pub const fn user_id(&self) -> &UserId {
        &self.content.user_id
    }

    /// Free-text review body.
    pub fn review(&self) -> &str {
        self.content.review.as_str()
    }

    /// Letter-grade rating category.
    pub fn rating(&self) -> &str {
        self.content.rating.as_str()
    }

    /// Visit date.
    pub const fn date_visited(&self) -> NaiveDate {
        self.content.date_visited
    }

    /// Restaurant website.
    pub const fn website_url(&self) -> Option<&Url> {
        self.content.website_url.as_ref()
    }

    /// Cached vote counters.
    pub const fn tally(&self) -> Tally {
        self.tally
    }

    /// Experience section, if attached.
    pub const fn experience_details(&self) -> Option<&ExperienceDetails> {
        self.content.experience_details.as_ref()
    }

    /// Sauce section, if attached.
    pub const fn sauce_details(&self) -> Option<&SauceDetails> {
        self.content.sauce_details.as_ref()
    }

    /// Ratings section, if attached.
    pub const fn ratings(&self) -> Option<&Ratings> {
        self.content.ratings.as_ref()
    }

    /// Embedded location snapshot.
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Loaded vote rows; `None` when votes were not fetched.
    pub fn votes(&self) -> Option<&[Vote]> {
        self.votes.as_deref()
    }

    /// Current vote of `voter`, if any.
    pub fn vote_of(&self, voter: &UserId) -> Option<VoteType> {
        self.votes
            .as_deref()?
            .iter()
            .find(|vote| vote.user_id == *voter)
            .map(|vote| vote.vote_type)
    }

    /// Apply a counter delta directly, as a store does, and return the
    /// resulting tally.
    pub fn apply_delta(&mut self, delta: TallyDelta) -> Tally {
        self.tally = self.tally.apply(delta);
        self.tally
    }

    /// Detach the embedded location and vote rows.
    pub fn into_parts(mut self) -> (Self, Option<Location>, Option<Vec<Vote>>) {
        let location = self.location.take();
        let votes = self.votes.take();
        (self, location, votes)
    }

    /// Record a vote by `voter_id`.
    ///
    /// A first vote is appended and counted; repeating the same vote is a
    /// no-op; a vote of the other type flips the existing row and moves one
    /// count between columns in a single delta. Unloaded votes are treated as
    /// none.
    pub fn record_vote(
        &mut self,
        voter_id: &str,
        vote_type: VoteType,
    ) -> Result<VoteOutcome, VoteError> {
        let voter = voter_identity(voter_id)?;
        let review_id = self.id;
        let votes = self.votes.get_or_insert_with(Vec::new);

        let (previous, vote) = match votes.iter_mut().find(|vote| vote.user_id == voter) {
            Some(existing) => {
                let previous = existing.vote_type;
                existing.vote_type = vote_type;
                (Some(previous), existing.clone())
            }
            None => {
                let vote = Vote::new(review_id, voter, vote_type);
                votes.push(vote.clone());
                (None, vote)
            }
        };

        Ok(self.settle(previous, Some(vote_type), Some(vote)))
    }

    /// Remove `voter_id`'s vote. Without a prior vote this is a no-op.
    pub fn retract_vote(&mut self, voter_id: &str) -> Result<VoteOutcome, VoteError> {
        let voter = voter_identity(voter_id)?;
        let votes = self.votes.get_or_insert_with(Vec::new);
        let removed = votes
            .iter()
            .position(|vote| vote.user_id == voter)
            .map(|position| votes.remove(position));

        let previous = removed.as_ref().map(|vote| vote.vote_type);
        Ok(self.settle(previous, None, removed))
    }

    fn settle(
        &mut self,
        previous: Option<VoteType>,
        next: Option<VoteType>,
        vote: Option<Vote>,
    ) -> VoteOutcome {
        let delta = TallyDelta::between(previous, next);
        self.tally = self.tally.apply(delta);
        VoteOutcome {
            tally: self.tally,
            delta,
            change: VoteChange::between(previous, next),
            vote,
        }
    }
}

/// Parse a voter id. Only an absent (blank) identity is refused.
fn voter_identity(voter_id: &str) -> Result<UserId, VoteError> {
    UserId::new(voter_id).map_err(|error| match error {
        UserIdError::Empty => VoteError::UnknownVoter,
    })
}

#[cfg(test)]
mod tests;
