//! Theme preference use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::PreferenceError;
use crate::domain::ports::PreferenceStorePort;
use crate::domain::{THEME_PREFERENCE_KEY, ThemeMode};

/// Reads and writes the persisted light/dark choice.
#[derive(Clone)]
pub struct ThemePreferenceUseCase {
    store: Arc<dyn PreferenceStorePort>,
}

impl ThemePreferenceUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self { store }
    }

    /// Stored theme, or `fallback` when nothing usable is stored.
    ///
    /// Read failures and unknown values are logged and never fatal.
    pub async fn load(&self, fallback: ThemeMode) -> ThemeMode {
        match self.store.get(THEME_PREFERENCE_KEY).await {
            Ok(Some(value)) => match value.parse::<ThemeMode>() {
                Ok(mode) => {
                    debug!(theme = %mode, "Loaded stored theme");
                    mode
                }
                Err(e) => {
                    warn!(value = %value, error = %e, "Ignoring stored theme");
                    fallback
                }
            },
            Ok(None) => {
                debug!(theme = %fallback, "No stored theme, using default");
                fallback
            }
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                fallback
            }
        }
    }

    /// Persists `mode`.
    ///
    /// # Errors
    /// Returns error if the store rejects the write.
    pub async fn store(&self, mode: ThemeMode) -> Result<(), PreferenceError> {
        self.store
            .set(THEME_PREFERENCE_KEY, mode.as_str())
            .await
            .map_err(|e| {
                warn!(theme = %mode, error = %e, "Failed to persist theme");
                e
            })?;

        info!(theme = %mode, "Theme preference saved");
        Ok(())
    }
}
