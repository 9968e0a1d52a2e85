//! Optional experience and sauce sections of the extended review form.

use serde::{Deserialize, Serialize};

use super::ValidationError;

const MOOD_COMPARISON_SCALE: std::ops::RangeInclusive<i64> = 1..=5;

/// Unvalidated experience section. Every field may be left unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDetailsInput {
    /// How the wings compared with the reviewer's mood, 1 to 5.
    #[serde(default)]
    pub mood_comparison: Option<i64>,
    /// Whether beer influenced the verdict.
    #[serde(default)]
    pub beer_influenced: Option<bool>,
    /// Whether the order was takeout.
    #[serde(default)]
    pub takeout: Option<bool>,
    /// Wings in one order.
    #[serde(default)]
    pub wings_per_order: Option<i64>,
    /// Wing size category.
    #[serde(default)]
    pub wing_size: Option<String>,
    /// Wing format category (flats, drums, boneless, mixed...).
    #[serde(default)]
    pub wing_format: Option<String>,
    /// Takeout container category.
    #[serde(default)]
    pub takeout_container: Option<String>,
    /// Minutes spent waiting for takeout.
    #[serde(default)]
    pub takeout_wait_minutes: Option<i64>,
}

/// Validated experience section.
///
/// ## Invariants
/// - `mood_comparison` lies on 1–5; `wings_per_order` is positive.
/// - Category strings are trimmed and never blank.
/// - Takeout-only answers are absent when `takeout` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "ExperienceDetailsInput")]
pub struct ExperienceDetails {
    mood_comparison: Option<u8>,
    beer_influenced: Option<bool>,
    takeout: Option<bool>,
    wings_per_order: Option<u16>,
    wing_size: Option<String>,
    wing_format: Option<String>,
    takeout_container: Option<String>,
    takeout_wait_minutes: Option<u16>,
}

impl ExperienceDetails {
    /// Validate an experience section.
    pub fn try_from_input(input: ExperienceDetailsInput) -> Result<Self, ValidationError> {
        let mood_comparison = input
            .mood_comparison
            .map(|value| {
                MOOD_COMPARISON_SCALE
                    .contains(&value)
                    .then(|| u8::try_from(value).ok())
                    .flatten()
                    .ok_or_else(|| {
                        ValidationError::invalid_detail(
                            "moodComparison",
                            format!("{value} is outside 1-5"),
                        )
                    })
            })
            .transpose()?;
        let wings_per_order = input
            .wings_per_order
            .map(|value| {
                u16::try_from(value)
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or_else(|| {
                        ValidationError::invalid_detail(
                            "wingsPerOrder",
                            format!("{value} is not a positive count"),
                        )
                    })
            })
            .transpose()?;
        let takeout_wait_minutes = input
            .takeout_wait_minutes
            .map(|value| {
                u16::try_from(value).map_err(|_| {
                    ValidationError::invalid_detail(
                        "takeoutWaitMinutes",
                        format!("{value} is not a valid number of minutes"),
                    )
                })
            })
            .transpose()?;
        let takeout_container = normalise_category(input.takeout_container);

        if input.takeout == Some(false) {
            if takeout_container.is_some() {
                return Err(ValidationError::invalid_detail(
                    "takeoutContainer",
                    "answered although the order was not takeout",
                ));
            }
            if takeout_wait_minutes.is_some() {
                return Err(ValidationError::invalid_detail(
                    "takeoutWaitMinutes",
                    "answered although the order was not takeout",
                ));
            }
        }

        Ok(Self {
            mood_comparison,
            beer_influenced: input.beer_influenced,
            takeout: input.takeout,
            wings_per_order,
            wing_size: normalise_category(input.wing_size),
            wing_format: normalise_category(input.wing_format),
            takeout_container,
            takeout_wait_minutes,
        })
    }

    /// Mood comparison score.
    pub const fn mood_comparison(&self) -> Option<u8> {
        self.mood_comparison
    }

    /// Whether beer influenced the verdict.
    pub const fn beer_influenced(&self) -> Option<bool> {
        self.beer_influenced
    }

    /// Whether the order was takeout.
    pub const fn takeout(&self) -> Option<bool> {
        self.takeout
    }

    /// Wings in one order.
    pub const fn wings_per_order(&self) -> Option<u16> {
        self.wings_per_order
    }

    /// Wing size category.
    pub fn wing_size(&self) -> Option<&str> {
        self.wing_size.as_deref()
    }

    /// Wing format category.
    pub fn wing_format(&self) -> Option<&str> {
        self.wing_format.as_deref()
    }

    /// Takeout container category.
    pub fn takeout_container(&self) -> Option<&str> {
        self.takeout_container.as_deref()
    }

    /// Minutes spent waiting for takeout.
    pub const fn takeout_wait_minutes(&self) -> Option<u16> {
        self.takeout_wait_minutes
    }
}

impl From<ExperienceDetails> for ExperienceDetailsInput {
    fn from(value: ExperienceDetails) -> Self {
        Self {
            mood_comparison: value.mood_comparison.map(i64::from),
            beer_influenced: value.beer_influenced,
            takeout: value.takeout,
            wings_per_order: value.wings_per_order.map(i64::from),
            wing_size: value.wing_size,
            wing_format: value.wing_format,
            takeout_container: value.takeout_container,
            takeout_wait_minutes: value.takeout_wait_minutes.map(i64::from),
        }
    }
}

/// Unvalidated sauce section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SauceDetailsInput {
    /// Whether the restaurant offered sauces.
    #[serde(default)]
    pub has_sauce: Option<bool>,
    /// Sauces selected, in the order they were picked.
    #[serde(default)]
    pub selected_sauces: Vec<String>,
}

/// Validated sauce section.
///
/// ## Invariants
/// - Sauce names are trimmed, non-blank and unique (case-insensitive); the
///   first selection order is kept.
/// - No sauces are selected when `has_sauce` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "SauceDetailsInput")]
pub struct SauceDetails {
    has_sauce: Option<bool>,
    selected_sauces: Vec<String>,
}

impl SauceDetails {
    /// Validate a sauce section.
    pub fn try_from_input(input: SauceDetailsInput) -> Result<Self, ValidationError> {
        let mut selected_sauces: Vec<String> = Vec::with_capacity(input.selected_sauces.len());
        for name in input.selected_sauces {
            let name = name.trim();
            if name.is_empty()
                || selected_sauces
                    .iter()
                    .any(|existing| existing.eq_ignore_ascii_case(name))
            {
                continue;
            }
            selected_sauces.push(name.to_owned());
        }

        if input.has_sauce == Some(false) && !selected_sauces.is_empty() {
            return Err(ValidationError::invalid_detail(
                "selectedSauces",
                "sauces selected although no sauce was available",
            ));
        }

        Ok(Self {
            has_sauce: input.has_sauce,
            selected_sauces,
        })
    }

    /// Whether the restaurant offered sauces.
    pub const fn has_sauce(&self) -> Option<bool> {
        self.has_sauce
    }

    /// Selected sauces in selection order.
    pub fn selected_sauces(&self) -> &[String] {
        &self.selected_sauces
    }
}

impl From<SauceDetails> for SauceDetailsInput {
    fn from(value: SauceDetails) -> Self {
        Self {
            has_sauce: value.has_sauce,
            selected_sauces: value.selected_sauces,
        }
    }
}

fn normalise_category(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
