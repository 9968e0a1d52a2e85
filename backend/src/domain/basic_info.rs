//! Basic Info: the minimal fields needed to publish a review.

use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Coordinates, DateProblem, RequiredField, ValidationError};

/// Raw latitude/longitude pair as produced by the geocoding collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCoordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Unvalidated Basic Info as captured by the review form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoInput {
    /// Restaurant name.
    pub restaurant_name: String,
    /// Postal address.
    pub address: String,
    /// Visit date as `YYYY-MM-DD`.
    pub date_visited: String,
    /// Optional restaurant website; blank counts as absent.
    #[serde(default)]
    pub website_url: Option<String>,
    /// Coordinates resolved from the address, if geocoding succeeded.
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

/// Normalised Basic Info.
///
/// Text fields are trimmed; coordinates are either a validated pair or
/// explicitly absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBasicInfo {
    restaurant_name: String,
    address: String,
    date_visited: NaiveDate,
    website_url: Option<Url>,
    coordinates: Option<Coordinates>,
}

impl ValidatedBasicInfo {
    /// Trimmed restaurant name.
    pub fn restaurant_name(&self) -> &str {
        self.restaurant_name.as_str()
    }

    /// Trimmed postal address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Visit date.
    pub const fn date_visited(&self) -> NaiveDate {
        self.date_visited
    }

    /// Parsed website URL.
    pub fn website_url(&self) -> Option<&Url> {
        self.website_url.as_ref()
    }

    /// Resolved coordinates, when geocoding succeeded.
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Validate Basic Info against `today`.
///
/// Checks run in order: required fields, visit date, coordinates, website.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wingrate::domain::{BasicInfoInput, RawCoordinates, validate_basic_info};
///
/// let input = BasicInfoInput {
///     restaurant_name: "Wing Shack".into(),
///     address: "123 Main St".into(),
///     date_visited: "2024-01-01".into(),
///     website_url: None,
///     coordinates: Some(RawCoordinates { latitude: 40.0, longitude: -75.0 }),
/// };
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
/// let info = validate_basic_info(&input, today).expect("valid basic info");
/// assert_eq!(info.restaurant_name(), "Wing Shack");
/// ```
pub fn validate_basic_info(
    input: &BasicInfoInput,
    today: NaiveDate,
) -> Result<ValidatedBasicInfo, ValidationError> {
    let restaurant_name = required(&input.restaurant_name, RequiredField::RestaurantName)?;
    let address = required(&input.address, RequiredField::Address)?;
    let raw_date = required(&input.date_visited, RequiredField::DateVisited)?;

    let date_visited = parse_visit_date(&raw_date, today)?;
    let coordinates = input
        .coordinates
        .map(|raw| Coordinates::new(raw.latitude, raw.longitude))
        .transpose()?;
    let website_url = input
        .website_url
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(parse_website)
        .transpose()?;

    Ok(ValidatedBasicInfo {
        restaurant_name,
        address,
        date_visited,
        website_url,
        coordinates,
    })
}

/// Validate Basic Info against the clock's current UTC date.
pub fn validate_basic_info_now(
    input: &BasicInfoInput,
    clock: &dyn Clock,
) -> Result<ValidatedBasicInfo, ValidationError> {
    validate_basic_info(input, clock.utc().date_naive())
}

fn required(value: &str, field: RequiredField) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

fn parse_visit_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            value: raw.to_owned(),
            problem: DateProblem::Malformed,
        }
    })?;
    if date > today {
        return Err(ValidationError::InvalidDate {
            value: raw.to_owned(),
            problem: DateProblem::InFuture { today },
        });
    }
    Ok(date)
}

pub(crate) fn parse_website(raw: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        value: raw.to_owned(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

#[cfg(test)]
mod tests;
