//! Main application orchestrator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::{Effect, LoadTopicUseCase, RequestId, ThemePreferenceUseCase};
use crate::domain::entities::Location;
use crate::domain::errors::ContentError;
use crate::domain::{RenderedDocument, ThemeMode, TopicId};
use crate::infrastructure::{BrowserLauncher, ClipboardService};
use crate::presentation::events::{EventResult, MouseIntent, is_key_press};
use crate::presentation::ui::{ReaderKeyResult, ReaderScreen, ReaderScreenState};
use crate::presentation::widgets::StatusMessage;

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
enum Action {
    TopicLoaded {
        request: RequestId,
        result: Result<RenderedDocument, ContentError>,
    },
    Status(StatusMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

pub struct App {
    state: AppState,
    screen: ReaderScreenState,
    location: Location,
    theme_fallback: ThemeMode,
    load_topic: Arc<LoadTopicUseCase>,
    theme_preference: Arc<ThemePreferenceUseCase>,
    clipboard: ClipboardService,
    browser: BrowserLauncher,
    theme_writer: Option<mpsc::UnboundedSender<ThemeMode>>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// `location` is the startup reference; `theme_fallback` applies when
    /// no theme has been saved yet.
    #[must_use]
    pub fn new(
        screen: ReaderScreenState,
        load_topic: LoadTopicUseCase,
        theme_preference: ThemePreferenceUseCase,
        location: Location,
        theme_fallback: ThemeMode,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::Running,
            screen,
            location,
            theme_fallback,
            load_topic: Arc::new(load_topic),
            theme_preference: Arc::new(theme_preference),
            clipboard: ClipboardService::new(),
            browser: BrowserLauncher::new(),
            theme_writer: None,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        // Sizes the viewport before the first fetch is issued.
        terminal.draw(|frame| self.render(frame))?;

        self.start().await;
        self.run_event_loop(terminal).await?;

        info!(
            location = %self.screen.controller().location(),
            "Application exiting normally"
        );
        Ok(())
    }

    async fn start(&mut self) {
        let theme = self.theme_preference.load(self.theme_fallback).await;
        let effects = self
            .screen
            .controller_mut()
            .initialize(&self.location, theme);
        self.apply_effects(effects);
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = animation_interval.tick() => {
                    if self.screen.tick(Instant::now()) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(ReaderScreen::new(), frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        let result = match event {
            Event::Key(key) if is_key_press(&key) => self.screen.handle_key(key),
            Event::Mouse(mouse) => match MouseIntent::from_event(&mouse) {
                Some(intent) => self.screen.handle_mouse(intent),
                None => return EventResult::Continue,
            },
            _ => return EventResult::Continue,
        };
        self.handle_reader_result(result)
    }

    fn handle_reader_result(&mut self, result: ReaderKeyResult) -> EventResult {
        match result {
            ReaderKeyResult::Quit => EventResult::Exit,
            ReaderKeyResult::Ignored => EventResult::Continue,
            ReaderKeyResult::Consumed => EventResult::Consumed,
            ReaderKeyResult::Effects(effects) => {
                self.apply_effects(effects);
                EventResult::Consumed
            }
            ReaderKeyResult::CopyCode { number, code } => {
                self.copy_code(number, code);
                EventResult::Consumed
            }
            ReaderKeyResult::OpenExternal(url) => {
                self.open_external(url);
                EventResult::Consumed
            }
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { request, topic } => self.spawn_fetch(request, topic),
                Effect::ScrollToTop => self.screen.scroll_content_to_top(),
                Effect::ApplyTheme(mode) => self.screen.set_theme(mode),
                Effect::PersistTheme(mode) => self.persist_theme(mode),
            }
        }
    }

    fn spawn_fetch(&self, request: RequestId, topic: TopicId) {
        let use_case = self.load_topic.clone();
        let tx = self.action_tx.clone();
        let width = self.screen.content().viewport_width();

        tokio::spawn(async move {
            let result = use_case.execute(&topic, width).await;
            let _ = tx.send(Action::TopicLoaded { request, result });
        });
    }

    /// Saves go through one writer task so they land in toggle order.
    fn persist_theme(&mut self, mode: ThemeMode) {
        let writer = self.theme_writer.get_or_insert_with(|| {
            spawn_theme_writer(self.theme_preference.clone(), self.action_tx.clone())
        });

        if writer.send(mode).is_err() {
            warn!(theme = %mode, "Theme writer stopped, preference not saved");
        }
    }

    fn copy_code(&self, number: usize, code: String) {
        let clipboard = self.clipboard.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let status = match clipboard.copy_text(code).await {
                Ok(()) => StatusMessage::success(format!("Copied code block {number}")),
                Err(e) => {
                    warn!(error = %e, number, "Copy failed");
                    StatusMessage::error(format!("Copy failed: {e}"))
                }
            };
            let _ = tx.send(Action::Status(status));
        });
    }

    fn open_external(&self, url: String) {
        let browser = self.browser.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let status = match browser.open(url.clone()).await {
                Ok(()) => StatusMessage::info(format!("Opened {url}")),
                Err(e) => StatusMessage::error(e.to_string()),
            };
            let _ = tx.send(Action::Status(status));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::TopicLoaded { request, result } => {
                if !self.screen.controller_mut().complete_fetch(request, result) {
                    debug!(request, "Stale topic load ignored");
                }
            }
            Action::Status(status) => self.screen.set_status(status),
        }
    }
}

fn spawn_theme_writer(
    use_case: Arc<ThemePreferenceUseCase>,
    tx: mpsc::UnboundedSender<Action>,
) -> mpsc::UnboundedSender<ThemeMode> {
    let (theme_tx, mut theme_rx) = mpsc::unbounded_channel::<ThemeMode>();

    tokio::spawn(async move {
        while let Some(mode) = theme_rx.recv().await {
            let status = match use_case.store(mode).await {
                Ok(()) => StatusMessage::success(format!("Theme saved: {mode}")),
                Err(e) => StatusMessage::warning(format!("Theme not saved: {e}")),
            };
            if tx.send(Action::Status(status)).is_err() {
                break;
            }
        }
        debug!("Theme writer finished");
    });

    theme_tx
}
