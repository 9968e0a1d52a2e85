//! JSON snapshot files for [`InMemoryStore`].
//!
//! A snapshot lists locations, review records and vote rows:
//!
//! ```json
//! {
//!   "locations": [{"id": 1, "restaurant_name": "Wing Shack", ...}],
//!   "reviews": [{"schema_version": 2, "id": 7, ...}],
//!   "votes": [{"review_id": 7, "user_id": "u1", "vote_type": "up"}]
//! }
//! ```
//!
//! Review records may use any supported schema version and are validated on
//! load. Locations or votes embedded in a review record are merged into the
//! top-level collections. Saved snapshots always use the current schema and
//! keep votes top-level.

use std::collections::btree_map::Entry;
use std::io;
use std::path::{Path, PathBuf};

use rating_descriptions::RatingDescriptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::{InMemoryStore, StoreState};
use crate::domain::ports::StoreCollection;
use crate::domain::{Location, ParseError, ReviewRecord, Vote, deserialize_review_value};
use crate::outbound::cap_io;

/// Errors raised while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read store snapshot at {path}: {source}")]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The snapshot file could not be written.
    #[error("failed to write store snapshot at {path}: {source}")]
    Write {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The snapshot is not JSON of the expected shape.
    #[error("store snapshot is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// A review record failed to decode or validate.
    #[error("review record #{index} is invalid: {source}")]
    Review {
        /// Position of the record in `reviews`.
        index: usize,
        /// Decoding failure.
        #[source]
        source: ParseError,
    },
    /// Two rows of one collection share an id.
    #[error("{collection} id {id} appears more than once")]
    DuplicateId {
        /// Collection holding the clash.
        collection: StoreCollection,
        /// Repeated id.
        id: i64,
    },
}

/// Serialised store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSnapshot {
    /// Location rows.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Review records of any supported schema version.
    #[serde(default)]
    pub reviews: Vec<Value>,
    /// Vote rows.
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl StoreSnapshot {
    /// Parse a snapshot document.
    pub fn from_json(contents: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(contents)?)
    }
}

impl InMemoryStore {
    /// Build a store from snapshot contents, validating every review record
    /// against `descriptions`.
    pub fn from_snapshot(
        snapshot: StoreSnapshot,
        descriptions: &RatingDescriptions,
    ) -> Result<Self, SnapshotError> {
        let StoreSnapshot {
            locations,
            reviews,
            votes,
        } = snapshot;
        let mut state = StoreState::default();

        for location in locations {
            let id = location.id();
            if state.locations.insert(id, location).is_some() {
                return Err(SnapshotError::DuplicateId {
                    collection: StoreCollection::Locations,
                    id: id.get(),
                });
            }
        }

        for (index, value) in reviews.into_iter().enumerate() {
            let review = deserialize_review_value(value, descriptions)
                .map_err(|source| SnapshotError::Review { index, source })?;
            let (review, location, embedded_votes) = review.into_parts();
            if let Some(location) = location {
                state.locations.entry(location.id()).or_insert(location);
            }
            state.votes.extend(embedded_votes.unwrap_or_default());
            match state.reviews.entry(review.id()) {
                Entry::Occupied(entry) => {
                    return Err(SnapshotError::DuplicateId {
                        collection: StoreCollection::Reviews,
                        id: entry.key().get(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(review);
                }
            }
        }
        state.votes.extend(votes);

        info!(
            locations = state.locations.len(),
            reviews = state.reviews.len(),
            votes = state.votes.len(),
            "store snapshot loaded"
        );
        Ok(Self {
            state: tokio::sync::Mutex::new(state),
        })
    }

    /// Load a snapshot file.
    pub fn load(path: &Path, descriptions: &RatingDescriptions) -> Result<Self, SnapshotError> {
        let contents = cap_io::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_snapshot(StoreSnapshot::from_json(&contents)?, descriptions)
    }

    /// Current contents as a snapshot in the current schema.
    pub async fn snapshot(&self) -> Result<StoreSnapshot, SnapshotError> {
        let state = self.state.lock().await;
        let reviews = state
            .reviews
            .values()
            .map(|review| serde_json::to_value(ReviewRecord::from(review)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StoreSnapshot {
            locations: state.locations.values().cloned().collect(),
            reviews,
            votes: state.votes.clone(),
        })
    }

    /// Write the current contents to `path` as pretty-printed JSON.
    pub async fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let payload = serde_json::to_vec_pretty(&self.snapshot().await?)?;
        cap_io::write(path, &payload).map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
