//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod location_repository;
mod review_repository;
mod store_probe;
mod theme_preference_store;

#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{
    FixtureLocationRepository, LocationRepository, LocationRepositoryError,
};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{FixtureReviewRepository, ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use store_probe::MockStoreProbe;
pub use store_probe::{FixtureStoreProbe, StoreCollection, StoreProbe, StoreProbeError};
#[cfg(test)]
pub use theme_preference_store::MockThemePreferenceStore;
pub use theme_preference_store::{
    FixtureThemePreferenceStore, ThemePreferenceStore, ThemePreferenceStoreError,
};
