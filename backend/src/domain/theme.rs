//! Display theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Light or dark display theme. Light when nothing is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored theme value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised theme '{value}'")]
pub struct ParseThemeError {
    /// Raw stored value.
    pub value: String,
}

impl FromStr for ThemeMode {
    type Err = ParseThemeError;

    /// Accepts `light`/`dark` and the legacy dark-mode flag `true`/`false`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "false" => Ok(Self::Light),
            "dark" | "true" => Ok(Self::Dark),
            _ => Err(ParseThemeError {
                value: s.to_owned(),
            }),
        }
    }
}
