//! Error types for the rating-descriptions crate.
//!
//! Registry loading is the only fallible surface; lookups return `Option`.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::RatingField;

/// Errors that can occur when loading a rating descriptions registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read rating descriptions at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required keys.
    #[error("invalid rating descriptions JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported rating descriptions version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry names a field that is not rated.
    #[error("unknown rating field '{name}'")]
    UnknownField {
        /// The unrecognised field key.
        name: String,
    },

    /// A rated field has no scale in the registry.
    #[error("rating field '{field}' has no scale")]
    MissingField {
        /// The field without a scale.
        field: RatingField,
    },

    /// A rated field declares a scale without any points.
    #[error("rating field '{field}' declares an empty scale")]
    EmptyScale {
        /// The field with the empty scale.
        field: RatingField,
    },

    /// A scale point key is not a small non-negative integer.
    #[error("rating field '{field}' has an invalid scale point '{value}'")]
    InvalidScalePoint {
        /// The field owning the point.
        field: RatingField,
        /// The raw key found in the registry.
        value: String,
    },

    /// A scale point has a blank label.
    #[error("rating field '{field}' has a blank label for point {point}")]
    EmptyLabel {
        /// The field owning the point.
        field: RatingField,
        /// The point with the blank label.
        point: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_formats_correctly() {
        let err = RegistryError::UnsupportedVersion {
            expected: 1,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported rating descriptions version: expected 1, found 3"
        );
    }

    #[test]
    fn invalid_scale_point_names_field_in_wire_form() {
        let err = RegistryError::InvalidScalePoint {
            field: RatingField::SauceHeat,
            value: "hot".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "rating field 'sauceHeat' has an invalid scale point 'hot'"
        );
    }

    #[test]
    fn empty_label_formats_correctly() {
        let err = RegistryError::EmptyLabel {
            field: RatingField::Appearance,
            point: 2,
        };
        assert_eq!(
            err.to_string(),
            "rating field 'appearance' has a blank label for point 2"
        );
    }
}
