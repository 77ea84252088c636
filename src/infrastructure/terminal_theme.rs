//! Terminal background detection.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::ThemeMode;

const DETECTION_TIMEOUT: Duration = Duration::from_millis(100);

/// Guesses light or dark from the terminal background color.
///
/// Must run before the terminal enters raw mode. Returns `None` when the
/// terminal does not answer.
#[must_use]
pub fn detect_terminal_theme() -> Option<ThemeMode> {
    match termbg::theme(DETECTION_TIMEOUT) {
        Ok(termbg::Theme::Light) => {
            debug!("Terminal background is light");
            Some(ThemeMode::Light)
        }
        Ok(termbg::Theme::Dark) => {
            debug!("Terminal background is dark");
            Some(ThemeMode::Dark)
        }
        Err(e) => {
            warn!(error = %e, "Could not detect terminal background");
            None
        }
    }
}
