//! Port for checking that each store collection is reachable.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use super::define_port_error;

/// Collections the review store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreCollection {
    /// Restaurant locations.
    Locations,
    /// Published reviews.
    Reviews,
    /// Vote rows.
    Votes,
}

impl StoreCollection {
    /// Every collection, in dependency order.
    pub const ALL: [Self; 3] = [Self::Locations, Self::Reviews, Self::Votes];

    /// Collection name as the store knows it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Reviews => "reviews",
            Self::Votes => "votes",
        }
    }
}

impl fmt::Display for StoreCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised while probing a collection.
    pub enum StoreProbeError {
        /// The store could not be reached.
        Unreachable { collection: String, message: String } =>
            "{collection} is unreachable: {message}",
        /// The store refused access to the collection.
        AccessDenied { collection: String, message: String } =>
            "access to {collection} denied: {message}",
    }
}

/// Port reporting whether a collection can be read and how many rows it holds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Count the rows of `collection`.
    async fn probe(&self, collection: StoreCollection) -> Result<u64, StoreProbeError>;
}

/// Fixture probe reporting every collection as reachable and empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreProbe;

#[async_trait]
impl StoreProbe for FixtureStoreProbe {
    async fn probe(&self, _collection: StoreCollection) -> Result<u64, StoreProbeError> {
        Ok(0)
    }
}
