//! Identifier newtypes shared by reviews, locations and votes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReviewId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned location identifier. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// The identifier is empty once trimmed.
    #[error("user id must not be empty")]
    Empty,
}

/// Opaque, externally issued user identifier.
///
/// The identity provider owns the format, so ids are kept byte for byte;
/// only blank ids are rejected.
///
/// # Examples
/// ```
/// use wingrate::domain::UserId;
///
/// let id = UserId::new("auth0|42").expect("valid id");
/// assert_eq!(id.as_ref(), "auth0|42");
/// assert!(UserId::new("   ").is_err());
/// assert_eq!(UserId::new(" u1").expect("valid id").as_ref(), " u1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        Self::from_owned(id.into())
    }

    fn from_owned(id: String) -> Result<Self, UserIdError> {
        if id.trim().is_empty() {
            return Err(UserIdError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
