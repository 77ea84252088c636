use arboard::Clipboard;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("failed to set clipboard text: {0}")]
    SetFailed(String),
}

/// System clipboard access on a blocking worker.
#[derive(Clone, Default)]
pub struct ClipboardService {}

impl ClipboardService {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Places `text` on the clipboard.
    ///
    /// # Errors
    /// Returns error if the clipboard cannot be opened or written.
    pub async fn copy_text(&self, text: impl Into<String>) -> Result<(), ClipboardError> {
        let text = text.into();
        let len = text.len();

        tokio::task::spawn_blocking(move || {
            let mut cb = Clipboard::new().map_err(|e| {
                warn!("Failed to initialize clipboard for copy: {}", e);
                ClipboardError::Unavailable(e.to_string())
            })?;
            cb.set_text(text)
                .map_err(|e| ClipboardError::SetFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))??;

        debug!(bytes = len, "Copied to clipboard");
        Ok(())
    }
}
