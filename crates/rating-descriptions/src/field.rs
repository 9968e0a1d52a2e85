//! The set of rated review fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A rated sub-score on the extended review form.
///
/// The wire form is the camelCase key used by the registry and by review
/// payloads.
///
/// # Examples
///
/// ```
/// use rating_descriptions::RatingField;
///
/// assert_eq!(RatingField::SauceHeat.as_str(), "sauceHeat");
/// assert_eq!("meatQuality".parse(), Ok(RatingField::MeatQuality));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RatingField {
    /// How the wings look on the plate.
    Appearance,
    /// How the wings smell.
    Aroma,
    /// Amount of sauce on the wings.
    SauceQuantity,
    /// Texture of the sauce.
    SauceConsistency,
    /// Spiciness of the sauce.
    SauceHeat,
    /// Crispness of the skin.
    SkinConsistency,
    /// Quality of the meat.
    MeatQuality,
    /// How greasy the wings are.
    Greasiness,
    /// Quality of the blue cheese dip.
    BlueCheeseQuality,
    /// Serving temperature of the wings.
    WingTemperature,
    /// Overall satisfaction with the visit.
    OverallSatisfaction,
    /// Likelihood of recommending the place.
    RecommendationScore,
}

impl RatingField {
    /// Every rated field, in form order.
    pub const ALL: [Self; 12] = [
        Self::Appearance,
        Self::Aroma,
        Self::SauceQuantity,
        Self::SauceConsistency,
        Self::SauceHeat,
        Self::SkinConsistency,
        Self::MeatQuality,
        Self::Greasiness,
        Self::BlueCheeseQuality,
        Self::WingTemperature,
        Self::OverallSatisfaction,
        Self::RecommendationScore,
    ];

    /// Returns the camelCase wire key for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appearance => "appearance",
            Self::Aroma => "aroma",
            Self::SauceQuantity => "sauceQuantity",
            Self::SauceConsistency => "sauceConsistency",
            Self::SauceHeat => "sauceHeat",
            Self::SkinConsistency => "skinConsistency",
            Self::MeatQuality => "meatQuality",
            Self::Greasiness => "greasiness",
            Self::BlueCheeseQuality => "blueCheeseQuality",
            Self::WingTemperature => "wingTemperature",
            Self::OverallSatisfaction => "overallSatisfaction",
            Self::RecommendationScore => "recommendationScore",
        }
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rating field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRatingFieldError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseRatingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rating field: {}", self.input)
    }
}

impl std::error::Error for ParseRatingFieldError {}

impl FromStr for RatingField {
    type Err = ParseRatingFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseRatingFieldError {
                input: s.to_owned(),
            })
    }
}
