//! Port for restaurant location persistence.

use async_trait::async_trait;

use crate::domain::{Location, LocationId, NewLocation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location repository adapters.
    pub enum LocationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "location repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "location repository query failed: {message}",
    }
}

/// Port for location lookup and creation.
///
/// Locations are immutable once created; there is no update operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Fetch a location by id.
    async fn find_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError>;

    /// Find the location for a restaurant name and address.
    ///
    /// Matching ignores case and surrounding whitespace.
    async fn find_by_name_and_address(
        &self,
        restaurant_name: &str,
        address: &str,
    ) -> Result<Option<Location>, LocationRepositoryError>;

    /// Store a new location and return it with its assigned id.
    async fn insert_location(
        &self,
        location: NewLocation,
    ) -> Result<Location, LocationRepositoryError>;

    /// List every stored location.
    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError>;
}

/// Fixture implementation that stores nothing; inserts receive id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationRepository;

#[async_trait]
impl LocationRepository for FixtureLocationRepository {
    async fn find_location(
        &self,
        _location_id: LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(None)
    }

    async fn find_by_name_and_address(
        &self,
        _restaurant_name: &str,
        _address: &str,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(None)
    }

    async fn insert_location(
        &self,
        location: NewLocation,
    ) -> Result<Location, LocationRepositoryError> {
        Ok(Location::new(LocationId::new(1), location))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        Ok(Vec::new())
    }
}
