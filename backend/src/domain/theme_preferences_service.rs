//! The reviewer's display theme, persisted through a preference store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::ThemePreferenceStore;
use crate::domain::service_support::map_theme_store_error;
use crate::domain::{Error, ThemeMode};

/// Service reading and switching the display theme.
#[derive(Clone)]
pub struct ThemePreferences<S> {
    store: Arc<S>,
}

impl<S> ThemePreferences<S> {
    /// Create a new theme service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> ThemePreferences<S>
where
    S: ThemePreferenceStore,
{
    /// The stored theme, or light when nothing usable is stored.
    ///
    /// Legacy `"true"`/`"false"` values read as dark/light.
    pub async fn current(&self) -> Result<ThemeMode, Error> {
        let Some(raw) = self.store.load().await.map_err(map_theme_store_error)? else {
            return Ok(ThemeMode::default());
        };
        Ok(raw.parse().unwrap_or_else(|error| {
            warn!(%error, "ignoring stored theme");
            ThemeMode::default()
        }))
    }

    /// Persist `theme`.
    pub async fn set(&self, theme: ThemeMode) -> Result<(), Error> {
        self.store.save(theme).await.map_err(map_theme_store_error)?;
        debug!(%theme, "theme saved");
        Ok(())
    }

    /// Switch to the other theme and return it.
    pub async fn toggle(&self) -> Result<ThemeMode, Error> {
        let next = self.current().await?.toggled();
        self.set(next).await?;
        Ok(next)
    }
}
