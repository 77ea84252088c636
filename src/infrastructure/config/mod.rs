//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, ContentConfig, DefaultTheme, GuideConfig, GuideTopic, LogLevel, ThemeConfig,
    UiConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, Preferences, StorageManager};
