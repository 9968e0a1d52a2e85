//! Discrete rating scales and human-readable labels for wing review
//! sub-scores.
//!
//! This crate owns the reference data that decides which integer scores are
//! valid for each rated field and how each score is presented. It is kept
//! independent of backend domain types so both the review model and any
//! presentation layer can depend on it.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading a versioned registry from JSON strings or files
//! - A built-in registry embedded at compile time and parsed once
//! - Scale lookups per [`RatingField`] for validation
//! - Label lookups per scale point for presentation
//!
//! # Example
//!
//! ```
//! use rating_descriptions::{RatingDescriptions, RatingField};
//!
//! let descriptions = RatingDescriptions::builtin();
//! assert!(descriptions.contains(RatingField::SauceHeat, 3));
//! assert!(!descriptions.contains(RatingField::SauceHeat, 6));
//! assert_eq!(descriptions.label(RatingField::SauceHeat, 5), Some("Scorching"));
//! ```

mod error;
mod field;
mod registry;

pub use error::RegistryError;
pub use field::{ParseRatingFieldError, RatingField};
pub use registry::{RatingDescriptions, Scale};
