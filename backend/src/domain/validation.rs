//! Validation failures raised at the review submission boundary.
//!
//! Every variant carries the offending field and the violated constraint so
//! callers can re-prompt the reviewer precisely. Nothing is clamped or
//! retried.

use std::fmt;

use chrono::NaiveDate;
use rating_descriptions::RatingField;
use thiserror::Error;

/// Fields that must be present before a review can be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Name of the restaurant.
    RestaurantName,
    /// Postal address of the restaurant.
    Address,
    /// Calendar date of the visit.
    DateVisited,
    /// Geocoded latitude/longitude pair.
    Coordinates,
    /// Identity of the reviewer.
    Author,
}

impl RequiredField {
    /// Stable wire name used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestaurantName => "restaurant_name",
            Self::Address => "address",
            Self::DateVisited => "date_visited",
            Self::Coordinates => "coordinates",
            Self::Author => "user_id",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a visit date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateProblem {
    /// Not a `YYYY-MM-DD` calendar date.
    Malformed,
    /// Later than the reviewer's current date.
    InFuture {
        /// The date the check ran against.
        today: NaiveDate,
    },
}

impl fmt::Display for DateProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("expected a YYYY-MM-DD calendar date"),
            Self::InFuture { today } => write!(f, "must not be later than {today}"),
        }
    }
}

/// Typed validation failure for review input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is empty or absent.
    #[error("{field} must not be empty")]
    MissingField {
        /// The missing field.
        field: RequiredField,
    },
    /// The visit date is malformed or in the future.
    #[error("visit date '{value}' is invalid: {problem}")]
    InvalidDate {
        /// Raw date input.
        value: String,
        /// The violated constraint.
        problem: DateProblem,
    },
    /// Coordinates fall outside latitude [-90, 90] or longitude [-180, 180].
    #[error("coordinates ({latitude}, {longitude}) are outside the valid range")]
    InvalidCoordinates {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
    /// The website URL is not an absolute http(s) URL.
    #[error("website URL '{value}' is not a valid http(s) URL")]
    InvalidUrl {
        /// Raw URL input.
        value: String,
    },
    /// A rating is not one of its field's declared scale points.
    #[error("{field} score {value} is outside the allowed scale {allowed:?}")]
    OutOfRange {
        /// The rated field.
        field: RatingField,
        /// The rejected score.
        value: i64,
        /// Declared scale points for the field.
        allowed: Vec<u8>,
    },
    /// Blue cheese is marked not applicable yet carries a score.
    #[error("blue cheese quality cannot be scored when blue cheese is marked not applicable")]
    ConflictingBlueCheeseState,
    /// An experience or sauce detail violates its constraint.
    #[error("{field} is invalid: {reason}")]
    InvalidDetail {
        /// Wire name of the detail field.
        field: &'static str,
        /// The violated constraint.
        reason: String,
    },
}

impl ValidationError {
    /// Wire name of the field the failure concerns.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field.as_str(),
            Self::InvalidDate { .. } => RequiredField::DateVisited.as_str(),
            Self::InvalidCoordinates { .. } => RequiredField::Coordinates.as_str(),
            Self::InvalidUrl { .. } => "website_url",
            Self::OutOfRange { field, .. } => field.as_str(),
            Self::ConflictingBlueCheeseState => "blueCheeseNA",
            Self::InvalidDetail { field, .. } => field,
        }
    }

    pub(crate) fn invalid_detail(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDetail {
            field,
            reason: reason.into(),
        }
    }
}
