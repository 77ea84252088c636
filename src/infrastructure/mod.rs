//! Infrastructure layer with external service adapters.

/// External link launcher.
pub mod browser;
pub mod clipboard;
/// Application configuration.
pub mod config;
/// Topic sources (HTTP and local directory).
pub mod content;
/// Preference persistence.
pub mod preferences;
/// Terminal background detection.
pub mod terminal_theme;

pub use browser::BrowserLauncher;
pub use clipboard::ClipboardService;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use content::{FileContentSource, HttpContentSource, content_source_from};
pub use preferences::FilePreferenceStore;
pub use terminal_theme::detect_terminal_theme;
