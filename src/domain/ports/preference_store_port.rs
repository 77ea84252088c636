use async_trait::async_trait;

use crate::domain::errors::PreferenceError;

/// Port for the name/value preference store.
#[async_trait]
pub trait PreferenceStorePort: Send + Sync {
    /// Reads a stored value.
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Stores a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory preference store for tests.
    #[derive(Default)]
    pub struct MockPreferenceStore {
        values: Mutex<HashMap<String, String>>,
        fail: AtomicBool,
    }

    impl MockPreferenceStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_value(key: &str, value: &str) -> Self {
            let store = Self::new();
            store
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            store
        }

        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub fn value(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl PreferenceStorePort for MockPreferenceStore {
        async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PreferenceError::ReadFailed("mock failure".to_string()));
            }
            Ok(self.value(key))
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PreferenceError::WriteFailed("mock failure".to_string()));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
