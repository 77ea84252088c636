//! Launches external links in the system browser.

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
#[error("failed to open {url}: {message}")]
pub struct BrowserError {
    pub url: String,
    pub message: String,
}

/// Opens URLs in a separate browser process with no handle back to the
/// reader.
#[derive(Clone, Default)]
pub struct BrowserLauncher {}

impl BrowserLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// # Errors
    /// Returns error if no browser could be launched.
    pub async fn open(&self, url: impl Into<String>) -> Result<(), BrowserError> {
        let url = url.into();
        let target = url.clone();

        let result = tokio::task::spawn_blocking(move || opener::open_browser(&target))
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));

        match result {
            Ok(()) => {
                info!(url = %url, "Opened external link");
                Ok(())
            }
            Err(message) => {
                warn!(url = %url, error = %message, "Failed to open external link");
                Err(BrowserError { url, message })
            }
        }
    }
}
