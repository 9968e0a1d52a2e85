//! Versioned JSON representation of reviews.
//!
//! The canonical record carries `schema_version` and always spells out every
//! optional part: an absent section is `null`, a present-but-empty section is
//! an object. Records written before versioning (no `schema_version`, or `1`)
//! are migrated by [`migrate_legacy`] before validation.

use chrono::NaiveDate;
use rating_descriptions::RatingDescriptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::basic_info::parse_website;
use super::{
    ExperienceDetails, ExperienceDetailsInput, Location, LocationId, NewReview, RatingsInput,
    Review, ReviewId, SauceDetails, SauceDetailsInput, Tally, UserId, ValidationError, Vote,
    VoteType, validate_ratings,
};

/// Current wire schema version.
pub const SCHEMA_VERSION: u64 = 2;

const LEGACY_SCHEMA_VERSION: u64 = 1;

/// Failures decoding a wire record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Bytes are not JSON or do not match the record shape.
    #[error("malformed review record: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },
    /// The record declares a schema version this build cannot read.
    #[error("unsupported review schema version {found}")]
    UnsupportedVersion {
        /// Declared version.
        found: u64,
    },
    /// A field is structurally valid JSON but semantically inconsistent.
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        /// Offending field.
        field: &'static str,
        /// The violated constraint.
        reason: String,
    },
    /// Section content fails domain validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<serde_json::Error> for ParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed {
            message: value.to_string(),
        }
    }
}

/// Canonical review record, schema version 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewRecord {
    /// Schema version; always [`SCHEMA_VERSION`] when written.
    pub schema_version: u64,
    /// Review id.
    pub id: ReviewId,
    /// Referenced location.
    pub location_id: LocationId,
    /// Author.
    pub user_id: UserId,
    /// Free-text review body.
    pub review: String,
    /// Letter-grade rating category.
    pub rating: String,
    /// Visit date, `YYYY-MM-DD`.
    pub date_visited: NaiveDate,
    /// Restaurant website.
    pub website_url: Option<String>,
    /// Cached upvote counter.
    pub upvotes_count: u32,
    /// Cached downvote counter.
    pub downvotes_count: u32,
    /// Experience section.
    pub experience_details: Option<ExperienceDetailsInput>,
    /// Sauce section.
    pub sauce_details: Option<SauceDetailsInput>,
    /// Ratings section.
    pub ratings: Option<RatingsInput>,
    /// Embedded location snapshot.
    #[serde(default)]
    pub location: Option<Location>,
    /// Loaded vote rows.
    #[serde(default)]
    pub votes: Option<Vec<Vote>>,
}

/// Vote row as written before versioning; the review is implied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyVote {
    /// Voter.
    pub user_id: UserId,
    /// Vote direction.
    pub vote_type: VoteType,
}

/// Review record written before versioning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyReviewRecord {
    /// Review id.
    pub id: ReviewId,
    /// Referenced location.
    pub location_id: LocationId,
    /// Author.
    pub user_id: UserId,
    /// Free-text review body.
    #[serde(default)]
    pub review: String,
    /// Letter-grade rating category.
    #[serde(default)]
    pub rating: String,
    /// Visit date.
    pub date_visited: NaiveDate,
    /// Cached upvote counter.
    #[serde(default)]
    pub upvotes_count: u32,
    /// Cached downvote counter.
    #[serde(default)]
    pub downvotes_count: u32,
    /// Embedded location snapshot.
    #[serde(default)]
    pub location: Option<Location>,
    /// Vote rows without review ids.
    #[serde(default)]
    pub votes: Option<Vec<LegacyVote>>,
}

/// Lift a legacy record to the current schema.
///
/// Sections and website did not exist and become absent; votes are stamped
/// with the review's id.
pub fn migrate_legacy(legacy: LegacyReviewRecord) -> ReviewRecord {
    let review_id = legacy.id;
    ReviewRecord {
        schema_version: SCHEMA_VERSION,
        id: legacy.id,
        location_id: legacy.location_id,
        user_id: legacy.user_id,
        review: legacy.review,
        rating: legacy.rating,
        date_visited: legacy.date_visited,
        website_url: None,
        upvotes_count: legacy.upvotes_count,
        downvotes_count: legacy.downvotes_count,
        experience_details: None,
        sauce_details: None,
        ratings: None,
        location: legacy.location,
        votes: legacy.votes.map(|votes| {
            votes
                .into_iter()
                .map(|vote| Vote::new(review_id, vote.user_id, vote.vote_type))
                .collect()
        }),
    }
}

impl From<&Review> for ReviewRecord {
    fn from(review: &Review) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id: review.id(),
            location_id: review.location_id(),
            user_id: review.user_id().clone(),
            review: review.review().to_owned(),
            rating: review.rating().to_owned(),
            date_visited: review.date_visited(),
            website_url: review.website_url().map(|url| url.as_str().to_owned()),
            upvotes_count: review.tally().upvotes(),
            downvotes_count: review.tally().downvotes(),
            experience_details: review.experience_details().cloned().map(Into::into),
            sauce_details: review.sauce_details().cloned().map(Into::into),
            ratings: review.ratings().cloned().map(Into::into),
            location: review.location().cloned(),
            votes: review.votes().map(<[Vote]>::to_vec),
        }
    }
}

impl ReviewRecord {
    /// Validate the record into a [`Review`].
    ///
    /// Ratings are checked against `descriptions`; visit dates are not
    /// re-checked against the current date.
    pub fn into_review(self, descriptions: &RatingDescriptions) -> Result<Review, ParseError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ParseError::UnsupportedVersion {
                found: self.schema_version,
            });
        }
        if let Some(location) = self
            .location
            .as_ref()
            .filter(|location| location.id() != self.location_id)
        {
            return Err(ParseError::InvalidField {
                field: "location",
                reason: format!(
                    "embedded location {} does not match location_id {}",
                    location.id(),
                    self.location_id
                ),
            });
        }
        if let Some(stray) = self
            .votes
            .iter()
            .flatten()
            .find(|vote| vote.review_id != self.id)
        {
            return Err(ParseError::InvalidField {
                field: "votes",
                reason: format!(
                    "vote by {} references review {} instead of {}",
                    stray.user_id, stray.review_id, self.id
                ),
            });
        }

        let website_url = self
            .website_url
            .as_deref()
            .map(parse_website)
            .transpose()?;
        let experience_details = self
            .experience_details
            .map(ExperienceDetails::try_from_input)
            .transpose()?;
        let sauce_details = self
            .sauce_details
            .map(SauceDetails::try_from_input)
            .transpose()?;
        let ratings = self
            .ratings
            .map(|input| validate_ratings(&input, descriptions))
            .transpose()?;

        let content = NewReview {
            location_id: self.location_id,
            user_id: self.user_id,
            review: self.review,
            rating: self.rating,
            date_visited: self.date_visited,
            website_url,
            experience_details,
            sauce_details,
            ratings,
        };
        let mut review = Review::from_new(self.id, content)
            .with_tally(Tally::new(self.upvotes_count, self.downvotes_count));
        if let Some(location) = self.location {
            review = review.with_location(location);
        }
        if let Some(votes) = self.votes {
            review = review.with_votes(votes);
        }
        Ok(review)
    }
}

/// Encode a review as a canonical JSON record.
pub fn serialize_review(review: &Review) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&ReviewRecord::from(review))
}

/// Decode and validate a review record of any supported version.
pub fn deserialize_review(
    bytes: &[u8],
    descriptions: &RatingDescriptions,
) -> Result<Review, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;
    deserialize_review_value(value, descriptions)
}

/// Decode and validate an already parsed JSON record.
pub fn deserialize_review_value(
    value: Value,
    descriptions: &RatingDescriptions,
) -> Result<Review, ParseError> {
    upgrade_record(value)?.into_review(descriptions)
}

/// Read any supported record version into the canonical shape.
pub fn upgrade_record(value: Value) -> Result<ReviewRecord, ParseError> {
    let version = match value.get("schema_version") {
        None | Some(Value::Null) => LEGACY_SCHEMA_VERSION,
        Some(raw) => raw.as_u64().ok_or_else(|| ParseError::Malformed {
            message: format!("schema_version must be a non-negative integer, got {raw}"),
        })?,
    };

    match version {
        SCHEMA_VERSION => Ok(serde_json::from_value(value)?),
        LEGACY_SCHEMA_VERSION => {
            let mut value = value;
            if let Value::Object(map) = &mut value {
                map.remove("schema_version");
            }
            let legacy: LegacyReviewRecord = serde_json::from_value(value)?;
            Ok(migrate_legacy(legacy))
        }
        found => Err(ParseError::UnsupportedVersion { found }),
    }
}
