//! Application configuration.

use crate::domain::errors::CatalogError;
use crate::domain::keybinding::Action;
use crate::domain::{ThemeMode, TopicCatalog};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

pub(super) const APP_NAME: &str = "studyguide";
pub(super) const APP_QUALIFIER: &str = "org";
pub(super) const APP_ORGANIZATION: &str = "studyguide";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and merged with CLI
/// arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Startup location, e.g. `#1-OOP.md`.
    #[serde(skip)]
    pub location: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    /// Where topics are read from.
    #[serde(default)]
    pub content: ContentConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Custom topic sequence replacing the built-in guide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<GuideConfig>,
}

/// Content source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base URL (`http://`, `https://`) or directory holding the topic files.
    #[serde(default = "default_source")]
    pub source: String,

    /// Optional request timeout in seconds. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,
}

impl ContentConfig {
    #[must_use]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch_timeout_secs: None,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminals narrower than this collapse the sidebar after a selection.
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,

    /// Sidebar width in columns.
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,

    /// Milliseconds before the loading placeholder appears.
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,

    /// Estimated rendered height above which a table of contents is added.
    #[serde(default = "default_toc_min_rows")]
    pub toc_min_rows: usize,

    /// Minimum number of headings for a table of contents.
    #[serde(default = "default_toc_min_headings")]
    pub toc_min_headings: usize,

    /// Animate scrolling to headings.
    #[serde(default = "default_true")]
    pub smooth_scroll: bool,
}

impl UiConfig {
    #[must_use]
    pub const fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            narrow_width: default_narrow_width(),
            sidebar_width: default_sidebar_width(),
            loading_delay_ms: default_loading_delay_ms(),
            toc_min_rows: default_toc_min_rows(),
            toc_min_headings: default_toc_min_headings(),
            smooth_scroll: true,
        }
    }
}

/// Theme used when no preference is stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultTheme {
    Light,
    Dark,
    /// Follow the terminal background.
    #[default]
    Auto,
}

impl DefaultTheme {
    /// Fixed mode, or `None` when it must be detected.
    #[must_use]
    pub const fn fixed(self) -> Option<ThemeMode> {
        match self {
            Self::Light => Some(ThemeMode::Light),
            Self::Dark => Some(ThemeMode::Dark),
            Self::Auto => None,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    #[serde(default)]
    pub default_mode: DefaultTheme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            default_mode: DefaultTheme::default(),
        }
    }
}

/// One `[[guide.topics]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideTopic {
    pub file: String,
    pub label: String,
}

/// Custom topic sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Number of leading topics forming the main curriculum.
    pub main_count: usize,

    pub topics: Vec<GuideTopic>,

    /// Old file name to current file name.
    #[serde(default)]
    pub legacy: HashMap<String, String>,
}

fn default_source() -> String {
    ".".to_string()
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

const fn default_narrow_width() -> u16 {
    100
}

const fn default_sidebar_width() -> u16 {
    30
}

const fn default_loading_delay_ms() -> u64 {
    150
}

const fn default_toc_min_rows() -> usize {
    42
}

const fn default_toc_min_headings() -> usize {
    3
}

const fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(source) = args.source {
            self.content.source = source;
        }
        if let Some(timeout) = args.fetch_timeout {
            self.content.fetch_timeout_secs = Some(timeout);
        }
        if let Some(theme) = args.theme {
            self.theme.default_mode = theme;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if let Some(narrow_width) = args.narrow_width {
            self.ui.narrow_width = narrow_width;
        }
        if let Some(location) = args.location {
            self.location = Some(location);
        }
    }

    /// Builds the topic catalog: the `[guide]` section when present, the
    /// built-in study guide otherwise.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the configured guide is inconsistent.
    pub fn catalog(&self) -> Result<TopicCatalog, CatalogError> {
        let Some(guide) = &self.guide else {
            return Ok(TopicCatalog::builtin());
        };

        // Built-in aliases stay valid for files the guide keeps; its own
        // `legacy` table wins on conflicts.
        let files: HashSet<&str> = guide.topics.iter().map(|t| t.file.as_str()).collect();
        let mut legacy: HashMap<String, String> = TopicCatalog::builtin_legacy()
            .into_iter()
            .filter(|(old, current)| {
                files.contains(current.as_str()) && !files.contains(old.as_str())
            })
            .collect();
        legacy.extend(guide.legacy.clone());

        TopicCatalog::new(
            guide
                .topics
                .iter()
                .map(|t| (t.file.clone(), t.label.clone())),
            guide.main_count,
            legacy,
        )
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("studyguide.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            location: None,
            log_level: LogLevel::Info,
            mouse: true,
            keybindings: HashMap::new(),
            content: ContentConfig::default(),
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
            guide: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            mouse = false

            [content]
            source = "https://guide.example.org/docs"
            fetch_timeout_secs = 20

            [ui]
            narrow_width = 90

            [theme]
            default_mode = "dark"

            [keybindings]
            "Ctrl+q" = "Quit"
            "t" = "ToggleTheme"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert!(!config.mouse);
        assert_eq!(config.content.source, "https://guide.example.org/docs");
        assert_eq!(config.content.fetch_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.ui.narrow_width, 90);
        assert_eq!(config.ui.loading_delay_ms, 150);
        assert_eq!(config.theme.default_mode, DefaultTheme::Dark);
        assert_eq!(config.keybindings.get("Ctrl+q"), Some(&Action::Quit));
        assert_eq!(config.keybindings.get("t"), Some(&Action::ToggleTheme));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.keybindings.is_empty());
        assert!(config.mouse);
        assert_eq!(config.content.fetch_timeout(), None);
        assert_eq!(config.ui.narrow_width, 100);
        assert_eq!(config.ui.toc_min_rows, 42);
        assert_eq!(config.ui.loading_delay(), Duration::from_millis(150));
        assert_eq!(config.theme.default_mode, DefaultTheme::Auto);
        assert_eq!(config.catalog().unwrap().len(), 10);
    }

    #[test]
    fn test_guide_section_replaces_catalog() {
        let toml_content = r#"
            [guide]
            main_count = 2

            [[guide.topics]]
            file = "intro.md"
            label = "Intro"

            [[guide.topics]]
            file = "basics.md"
            label = "Basics"

            [[guide.topics]]
            file = "faq.md"
            label = "FAQ"

            [guide.legacy]
            "old-intro.md" = "intro.md"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let catalog = config.catalog().unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.main_count(), 2);
        assert_eq!(catalog.resolve("old-intro.md").map(|t| t.index()), Some(0));
    }

    #[test]
    fn test_guide_keeping_default_files_keeps_their_aliases() {
        let toml_content = r#"
            [guide]
            main_count = 2

            [[guide.topics]]
            file = "1-OOP.md"
            label = "Classes"

            [[guide.topics]]
            file = "2-Inheritance.md"
            label = "Inheritance"

            [guide.legacy]
            "Inheritance.md" = "1-OOP.md"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let catalog = config.catalog().unwrap();

        assert_eq!(catalog.resolve("01-OOP.md").map(|t| t.index()), Some(0));
        assert_eq!(catalog.resolve("02-Inheritance.md").map(|t| t.index()), Some(1));
        assert_eq!(catalog.resolve("Inheritance.md").map(|t| t.index()), Some(0));
        assert!(catalog.resolve("Templates.md").is_none());
    }

    #[test]
    fn test_inconsistent_guide_is_rejected() {
        let toml_content = r#"
            [guide]
            main_count = 5

            [[guide.topics]]
            file = "intro.md"
            label = "Intro"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert!(matches!(
            config.catalog(),
            Err(CatalogError::InvalidMainCount { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "studyguide",
            "--source",
            "/srv/guide",
            "--theme",
            "light",
            "#3-Polymorphism.md",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.content.source, "/srv/guide");
        assert_eq!(config.theme.default_mode, DefaultTheme::Light);
        assert_eq!(config.location.as_deref(), Some("#3-Polymorphism.md"));
    }

    #[test]
    fn test_fixed_default_theme() {
        assert_eq!(DefaultTheme::Dark.fixed(), Some(ThemeMode::Dark));
        assert_eq!(DefaultTheme::Auto.fixed(), None);
    }
}
