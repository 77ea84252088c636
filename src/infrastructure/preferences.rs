//! File-backed preference store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::config::storage::{read_preferences, write_atomic};
use crate::domain::errors::PreferenceError;
use crate::domain::ports::PreferenceStorePort;

/// Keeps preferences as a flat TOML table, rewritten atomically on change.
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl PreferenceStorePort for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let path = self.path.clone();
        let prefs = tokio::task::spawn_blocking(move || read_preferences(&path))
            .await
            .map_err(|e| PreferenceError::NotAvailable(e.to_string()))?
            .map_err(|e| PreferenceError::ReadFailed(e.to_string()))?;

        Ok(prefs.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().await;

        let path = self.path.clone();
        let key = key.to_string();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || {
            let mut prefs = read_preferences(&path).unwrap_or_default();
            prefs.insert(key, value);
            write_atomic(&path, &prefs)
        })
        .await
        .map_err(|e| PreferenceError::NotAvailable(e.to_string()))?
        .map_err(|e| PreferenceError::WriteFailed(e.to_string()))?;

        debug!(path = %self.path.display(), "Preferences written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences.toml"));

        assert_eq!(store.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_survives_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        FilePreferenceStore::new(path.clone())
            .set("theme", "dark")
            .await
            .unwrap();

        let reopened = FilePreferenceStore::new(path);
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_set_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences.toml"));

        store.set("font", "mono").await.unwrap();
        store.set("theme", "light").await.unwrap();
        store.set("theme", "dark").await.unwrap();

        assert_eq!(store.get("font").await.unwrap().as_deref(), Some("mono"));
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "theme = [").unwrap();

        let store = FilePreferenceStore::new(path);
        assert!(matches!(
            store.get("theme").await,
            Err(PreferenceError::ReadFailed(_))
        ));

        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }
}
