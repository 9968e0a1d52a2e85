//! Display theme stored as a one-line text file.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ThemeMode;
use crate::domain::ports::{ThemePreferenceStore, ThemePreferenceStoreError};
use crate::outbound::cap_io;

/// Theme preference kept in a file holding `light` or `dark`.
///
/// A missing file means no preference has been saved. Files written by older
/// builds may hold `true`/`false`; they are returned as-is for the service to
/// interpret.
#[derive(Debug, Clone)]
pub struct FileThemePreferenceStore {
    path: PathBuf,
}

impl FileThemePreferenceStore {
    /// Store the preference at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ThemePreferenceStore for FileThemePreferenceStore {
    async fn load(&self) -> Result<Option<String>, ThemePreferenceStoreError> {
        let contents = cap_io::read_optional(&self.path)
            .map_err(|error| ThemePreferenceStoreError::read(error.to_string()))?;
        Ok(contents
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty()))
    }

    async fn save(&self, theme: ThemeMode) -> Result<(), ThemePreferenceStoreError> {
        cap_io::write(&self.path, format!("{theme}\n").as_bytes())
            .map_err(|error| ThemePreferenceStoreError::write(error.to_string()))?;
        debug!(path = %self.path.display(), %theme, "theme preference written");
        Ok(())
    }
}
