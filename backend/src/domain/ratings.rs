//! Rating sub-scores and their validation against the rating scales.

use std::collections::BTreeMap;

use rating_descriptions::{RatingDescriptions, RatingField, Scale};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Unvalidated ratings section of the review form.
///
/// Every score is optional; an absent score means "not answered". Scores are
/// captured as wide integers so out-of-range input is reported, not
/// truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsInput {
    /// Appearance score.
    #[serde(default)]
    pub appearance: Option<i64>,
    /// Aroma score.
    #[serde(default)]
    pub aroma: Option<i64>,
    /// Sauce quantity score.
    #[serde(default)]
    pub sauce_quantity: Option<i64>,
    /// Sauce consistency score.
    #[serde(default)]
    pub sauce_consistency: Option<i64>,
    /// Sauce heat score.
    #[serde(default)]
    pub sauce_heat: Option<i64>,
    /// Skin consistency score.
    #[serde(default)]
    pub skin_consistency: Option<i64>,
    /// Meat quality score.
    #[serde(default)]
    pub meat_quality: Option<i64>,
    /// Greasiness score.
    #[serde(default)]
    pub greasiness: Option<i64>,
    /// Blue cheese quality score.
    #[serde(default)]
    pub blue_cheese_quality: Option<i64>,
    /// Wing temperature score.
    #[serde(default)]
    pub wing_temperature: Option<i64>,
    /// Overall satisfaction score.
    #[serde(default)]
    pub overall_satisfaction: Option<i64>,
    /// Recommendation score.
    #[serde(default)]
    pub recommendation_score: Option<i64>,
    /// Blue cheese was not served, so its score does not apply.
    #[serde(rename = "blueCheeseNA", default)]
    pub blue_cheese_na: bool,
}

impl RatingsInput {
    /// Score captured for `field`.
    pub const fn score(&self, field: RatingField) -> Option<i64> {
        match field {
            RatingField::Appearance => self.appearance,
            RatingField::Aroma => self.aroma,
            RatingField::SauceQuantity => self.sauce_quantity,
            RatingField::SauceConsistency => self.sauce_consistency,
            RatingField::SauceHeat => self.sauce_heat,
            RatingField::SkinConsistency => self.skin_consistency,
            RatingField::MeatQuality => self.meat_quality,
            RatingField::Greasiness => self.greasiness,
            RatingField::BlueCheeseQuality => self.blue_cheese_quality,
            RatingField::WingTemperature => self.wing_temperature,
            RatingField::OverallSatisfaction => self.overall_satisfaction,
            RatingField::RecommendationScore => self.recommendation_score,
        }
    }

    /// Set (or clear) the score for `field`.
    pub fn set_score(&mut self, field: RatingField, value: Option<i64>) {
        let slot = match field {
            RatingField::Appearance => &mut self.appearance,
            RatingField::Aroma => &mut self.aroma,
            RatingField::SauceQuantity => &mut self.sauce_quantity,
            RatingField::SauceConsistency => &mut self.sauce_consistency,
            RatingField::SauceHeat => &mut self.sauce_heat,
            RatingField::SkinConsistency => &mut self.skin_consistency,
            RatingField::MeatQuality => &mut self.meat_quality,
            RatingField::Greasiness => &mut self.greasiness,
            RatingField::BlueCheeseQuality => &mut self.blue_cheese_quality,
            RatingField::WingTemperature => &mut self.wing_temperature,
            RatingField::OverallSatisfaction => &mut self.overall_satisfaction,
            RatingField::RecommendationScore => &mut self.recommendation_score,
        };
        *slot = value;
    }

    /// Builder-style variant of [`RatingsInput::set_score`].
    pub fn with_score(mut self, field: RatingField, value: i64) -> Self {
        self.set_score(field, Some(value));
        self
    }
}

/// Validated ratings section.
///
/// ## Invariants
/// - Every present score is a declared scale point for its field.
/// - A blue cheese score is never present while `blue_cheese_na` is set.
///
/// Serialises to the same camelCase shape as [`RatingsInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "RatingsInput")]
pub struct Ratings {
    scores: BTreeMap<RatingField, u8>,
    blue_cheese_na: bool,
}

impl Ratings {
    /// Validated score for `field`, if answered.
    pub fn score(&self, field: RatingField) -> Option<u8> {
        self.scores.get(&field).copied()
    }

    /// Whether blue cheese was marked not applicable.
    pub const fn blue_cheese_na(&self) -> bool {
        self.blue_cheese_na
    }

    /// Answered fields with their scores, in form order.
    pub fn answered(&self) -> impl Iterator<Item = (RatingField, u8)> + '_ {
        self.scores.iter().map(|(field, score)| (*field, *score))
    }

    /// Human-readable label for the answered score of `field`.
    pub fn label<'d>(
        &self,
        field: RatingField,
        descriptions: &'d RatingDescriptions,
    ) -> Option<&'d str> {
        self.score(field)
            .and_then(|score| descriptions.label(field, score))
    }
}

impl From<Ratings> for RatingsInput {
    fn from(value: Ratings) -> Self {
        let mut input = Self {
            blue_cheese_na: value.blue_cheese_na,
            ..Self::default()
        };
        for (field, score) in value.scores {
            input.set_score(field, Some(i64::from(score)));
        }
        input
    }
}

/// Validate a ratings section against the rating scales.
///
/// The blue cheese conflict is checked first so it is always the reported
/// failure when present. Absent scores pass through as absent.
///
/// # Examples
/// ```
/// use rating_descriptions::{RatingDescriptions, RatingField};
/// use wingrate::domain::{RatingsInput, ValidationError, validate_ratings};
///
/// let descriptions = RatingDescriptions::builtin();
/// let input = RatingsInput::default().with_score(RatingField::SauceHeat, 4);
/// let ratings = validate_ratings(&input, descriptions).expect("valid ratings");
/// assert_eq!(ratings.score(RatingField::SauceHeat), Some(4));
///
/// let too_hot = RatingsInput::default().with_score(RatingField::SauceHeat, 11);
/// assert!(matches!(
///     validate_ratings(&too_hot, descriptions),
///     Err(ValidationError::OutOfRange { .. })
/// ));
/// ```
pub fn validate_ratings(
    input: &RatingsInput,
    descriptions: &RatingDescriptions,
) -> Result<Ratings, ValidationError> {
    if input.blue_cheese_na && input.blue_cheese_quality.is_some() {
        return Err(ValidationError::ConflictingBlueCheeseState);
    }

    let mut scores = BTreeMap::new();
    for field in RatingField::ALL {
        let Some(value) = input.score(field) else {
            continue;
        };
        let point = u8::try_from(value)
            .ok()
            .filter(|point| descriptions.contains(field, *point))
            .ok_or_else(|| ValidationError::OutOfRange {
                field,
                value,
                allowed: descriptions
                    .scale(field)
                    .map(Scale::points)
                    .unwrap_or_default(),
            })?;
        scores.insert(field, point);
    }

    Ok(Ratings {
        scores,
        blue_cheese_na: input.blue_cheese_na,
    })
}
