//! Rating descriptions registry types and JSON parsing.
//!
//! The registry maps every [`RatingField`] to its discrete scale, and every
//! scale point to a label. It is loaded once, then shared read-only.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::field::RatingField;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

const BUILTIN_JSON: &str = include_str!("../data/rating_descriptions.json");

static BUILTIN: OnceLock<RatingDescriptions> = OnceLock::new();

/// The discrete scale declared for one rated field.
///
/// Points are kept in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    points: BTreeMap<u8, String>,
}

impl Scale {
    /// Returns `true` when `point` is declared on this scale.
    #[must_use]
    pub fn contains(&self, point: u8) -> bool {
        self.points.contains_key(&point)
    }

    /// Returns the label for `point`, if declared.
    #[must_use]
    pub fn label(&self, point: u8) -> Option<&str> {
        self.points.get(&point).map(String::as_str)
    }

    /// Returns the declared points in ascending order.
    #[must_use]
    pub fn points(&self) -> Vec<u8> {
        self.points.keys().copied().collect()
    }

    /// Iterates over `(point, label)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.points
            .iter()
            .map(|(point, label)| (*point, label.as_str()))
    }
}

/// Read-only lookup of rating scales and labels.
///
/// # Example
///
/// ```
/// use rating_descriptions::{RatingDescriptions, RatingField};
///
/// let json = r#"{
///     "version": 1,
///     "fields": {
///         "appearance": {"1": "Bad", "2": "Good"},
///         "aroma": {"1": "Bad", "2": "Good"},
///         "sauceQuantity": {"1": "Bad", "2": "Good"},
///         "sauceConsistency": {"1": "Bad", "2": "Good"},
///         "sauceHeat": {"1": "Bad", "2": "Good"},
///         "skinConsistency": {"1": "Bad", "2": "Good"},
///         "meatQuality": {"1": "Bad", "2": "Good"},
///         "greasiness": {"1": "Bad", "2": "Good"},
///         "blueCheeseQuality": {"1": "Bad", "2": "Good"},
///         "wingTemperature": {"1": "Bad", "2": "Good"},
///         "overallSatisfaction": {"1": "Bad", "2": "Good"},
///         "recommendationScore": {"1": "Bad", "2": "Good"}
///     }
/// }"#;
///
/// let descriptions = RatingDescriptions::from_json(json).expect("valid registry");
/// assert_eq!(descriptions.label(RatingField::Aroma, 2), Some("Good"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDescriptions {
    version: u32,
    scales: HashMap<RatingField, Scale>,
}

impl RatingDescriptions {
    /// Returns the registry embedded in this crate.
    ///
    /// The embedded JSON is parsed on first use and shared afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the embedded registry fails validation, which the crate's
    /// own tests rule out.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_JSON)
                .unwrap_or_else(|error| panic!("built-in rating descriptions are invalid: {error}"))
        })
    }

    /// Parses a registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - The version is unsupported
    /// - A field key is unknown or a rated field is missing
    /// - A scale is empty, has a non-numeric point, or a blank label
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawRatingDescriptions =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawRatingDescriptions) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut scales = HashMap::with_capacity(RatingField::ALL.len());
        for (name, raw_points) in raw.fields {
            let field = name
                .parse::<RatingField>()
                .map_err(|_| RegistryError::UnknownField { name })?;
            scales.insert(field, parse_scale(field, raw_points)?);
        }

        if let Some(field) = RatingField::ALL
            .into_iter()
            .find(|field| !scales.contains_key(field))
        {
            return Err(RegistryError::MissingField { field });
        }

        Ok(Self {
            version: raw.version,
            scales,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the scale declared for `field`.
    ///
    /// Every field has a scale once the registry has loaded.
    #[must_use]
    pub fn scale(&self, field: RatingField) -> Option<&Scale> {
        self.scales.get(&field)
    }

    /// Returns `true` when `point` is a declared scale point for `field`.
    #[must_use]
    pub fn contains(&self, field: RatingField, point: u8) -> bool {
        self.scale(field).is_some_and(|scale| scale.contains(point))
    }

    /// Returns the label for `point` on `field`'s scale.
    #[must_use]
    pub fn label(&self, field: RatingField, point: u8) -> Option<&str> {
        self.scale(field).and_then(|scale| scale.label(point))
    }
}

fn parse_scale(
    field: RatingField,
    raw_points: BTreeMap<String, String>,
) -> Result<Scale, RegistryError> {
    if raw_points.is_empty() {
        return Err(RegistryError::EmptyScale { field });
    }

    let mut points = BTreeMap::new();
    for (key, label) in raw_points {
        let point = key
            .trim()
            .parse::<u8>()
            .map_err(|_| RegistryError::InvalidScalePoint {
                field,
                value: key.clone(),
            })?;
        if label.trim().is_empty() {
            return Err(RegistryError::EmptyLabel { field, point });
        }
        points.insert(point, label);
    }

    Ok(Scale { points })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRatingDescriptions {
    version: u32,
    fields: BTreeMap<String, BTreeMap<String, String>>,
}
