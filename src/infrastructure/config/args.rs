use super::app_config::{DefaultTheme, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "studyguide",
    version,
    about = "A terminal reader for Markdown study guides",
    long_about = None
)]
pub struct CliArgs {
    /// Topic to open, e.g. `#1-OOP.md`, `1-OOP.md` or a URL with a fragment.
    #[arg(value_name = "LOCATION")]
    pub location: Option<String>,

    /// Base URL or directory holding the topic files.
    #[arg(short, long, env = "STUDYGUIDE_SOURCE", value_name = "URL|DIR")]
    pub source: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Theme used until one is saved.
    #[arg(long, value_enum)]
    pub theme: Option<DefaultTheme>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Width below which the sidebar collapses after a selection.
    #[arg(long, value_name = "COLUMNS")]
    pub narrow_width: Option<u16>,

    /// Request timeout in seconds for remote sources.
    #[arg(long, value_name = "SECS")]
    pub fetch_timeout: Option<u64>,
}
