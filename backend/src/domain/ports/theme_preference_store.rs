//! Port for persisting the display theme.

use async_trait::async_trait;

use crate::domain::ThemeMode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by theme preference stores.
    pub enum ThemePreferenceStoreError {
        /// Reading the stored preference failed.
        Read { message: String } => "theme preference could not be read: {message}",
        /// Writing the preference failed.
        Write { message: String } => "theme preference could not be written: {message}",
    }
}

/// Port for the reviewer's display theme.
///
/// `load` returns the raw stored value so callers can interpret legacy
/// encodings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThemePreferenceStore: Send + Sync {
    /// Raw stored value, or `None` when nothing was saved.
    async fn load(&self) -> Result<Option<String>, ThemePreferenceStoreError>;

    /// Persist `theme`.
    async fn save(&self, theme: ThemeMode) -> Result<(), ThemePreferenceStoreError>;
}

/// Fixture store that never holds a preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureThemePreferenceStore;

#[async_trait]
impl ThemePreferenceStore for FixtureThemePreferenceStore {
    async fn load(&self) -> Result<Option<String>, ThemePreferenceStoreError> {
        Ok(None)
    }

    async fn save(&self, _theme: ThemeMode) -> Result<(), ThemePreferenceStoreError> {
        Ok(())
    }
}
