use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use studyguide::application::services::{BlockMarkdownRenderer, ContentProcessor, TocPolicy};
use studyguide::application::{
    ControllerSettings, LoadTopicUseCase, NavigationController, ThemePreferenceUseCase,
};
use studyguide::domain::entities::Location;
use studyguide::domain::TopicCatalog;
use studyguide::infrastructure::{
    AppConfig, CliArgs, FilePreferenceStore, StorageManager, content_source_from,
    detect_terminal_theme,
};
use studyguide::presentation::App;
use studyguide::presentation::commands::CommandRegistry;
use studyguide::presentation::services::{DocumentLayout, SyntectHighlighter};
use studyguide::presentation::theme::Theme;
use studyguide::presentation::ui::{ReaderOptions, ReaderScreenState};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, StorageManager)> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;

    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok((config, storage))
}

fn create_app(config: &AppConfig, storage: &StorageManager) -> Result<App> {
    let catalog = Arc::new(config.catalog().unwrap_or_else(|e| {
        warn!(error = %e, "Invalid guide in configuration, using the built-in one");
        TopicCatalog::builtin()
    }));

    let source = content_source_from(&config.content.source, config.content.fetch_timeout())?;
    info!(source = %source.describe(), topics = catalog.len(), "Content source ready");

    let toc = TocPolicy {
        min_rows: config.ui.toc_min_rows,
        min_headings: config.ui.toc_min_headings,
    };
    let processor = ContentProcessor::new(catalog.clone(), source.host(), toc);
    let load_topic = LoadTopicUseCase::new(
        source,
        Arc::new(BlockMarkdownRenderer::new()),
        Arc::new(processor),
    );

    let preferences = FilePreferenceStore::new(storage.preferences_path());
    let theme_preference = ThemePreferenceUseCase::new(Arc::new(preferences));

    // Detection talks to the terminal, so it must happen before raw mode.
    let theme_fallback = config
        .theme
        .default_mode
        .fixed()
        .or_else(detect_terminal_theme)
        .unwrap_or_default();

    let controller = NavigationController::new(
        catalog,
        ControllerSettings {
            narrow_width: config.ui.narrow_width,
            loading_delay: config.ui.loading_delay(),
        },
    );
    let screen = ReaderScreenState::new(
        controller,
        CommandRegistry::with_overrides(&config.keybindings),
        Theme::new(&config.theme.accent_color, theme_fallback),
        DocumentLayout::new(Arc::new(SyntectHighlighter::new())),
        ReaderOptions {
            sidebar_width: config.ui.sidebar_width,
            smooth_scroll: config.ui.smooth_scroll,
        },
    );

    let location = config
        .location
        .as_deref()
        .map(Location::parse)
        .unwrap_or_default();

    Ok(App::new(
        screen,
        load_topic,
        theme_preference,
        location,
        theme_fallback,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, storage) = load_config()?;
    init_logging(&config)?;

    info!(version = studyguide::VERSION, "Starting Studyguide");

    let app = create_app(&config, &storage)?;

    let mut terminal = ratatui::init();
    if config.mouse {
        crossterm::execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if config.mouse {
        let _ = crossterm::execute!(stdout(), DisableMouseCapture);
    }
    ratatui::restore();

    result
}
