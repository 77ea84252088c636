//! Content navigation controller.
//!
//! Keeps the displayed document, the active sidebar entry, the progress
//! indicator and the location fragment consistent. Every command is a
//! synchronous state transition returning the [`Effect`]s the caller must
//! carry out; fetching, scrolling and persisting happen outside.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::entities::{History, Location, RenderedDocument, Topic, TopicId};
use crate::domain::errors::ContentError;
use crate::domain::{NavigationState, Progress, StepButton, ThemeMode, TopicCatalog};

/// Identifies one issued fetch.
pub type RequestId = u64;

/// Side effect requested by a controller command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load `topic` and report back with `request`.
    Fetch { request: RequestId, topic: TopicId },
    /// Reset the content viewport to the top.
    ScrollToTop,
    /// Switch the palette.
    ApplyTheme(ThemeMode),
    /// Save the theme under the preference key.
    PersistTheme(ThemeMode),
}

/// What the content area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Loading {
        topic: TopicId,
        since: Instant,
    },
    Ready {
        topic: TopicId,
        document: Arc<RenderedDocument>,
    },
    Failed {
        topic: TopicId,
        error: ContentError,
    },
}

impl ContentView {
    #[must_use]
    pub const fn topic(&self) -> &TopicId {
        match self {
            Self::Loading { topic, .. } | Self::Ready { topic, .. } | Self::Failed { topic, .. } => {
                topic
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// One row of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarEntry<'a> {
    pub topic: &'a Topic,
    pub active: bool,
    /// Part of the main curriculum rather than reference material.
    pub main: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Viewports narrower than this collapse the sidebar after a selection.
    pub narrow_width: u16,
    /// Delay before the loading placeholder shows.
    pub loading_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            narrow_width: 100,
            loading_delay: Duration::from_millis(150),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    Keep,
}

pub struct NavigationController {
    catalog: Arc<TopicCatalog>,
    settings: ControllerSettings,
    state: NavigationState,
    location: Location,
    history: History,
    view: ContentView,
    revision: u64,
    next_request: RequestId,
    awaiting: Option<RequestId>,
    viewport_width: u16,
}

impl NavigationController {
    #[must_use]
    pub fn new(catalog: Arc<TopicCatalog>, settings: ControllerSettings) -> Self {
        let first = catalog.first().id().clone();
        Self {
            catalog,
            settings,
            state: NavigationState::default(),
            location: Location::default(),
            history: History::new(),
            view: ContentView::Loading {
                topic: first,
                since: Instant::now(),
            },
            revision: 0,
            next_request: 1,
            awaiting: None,
            viewport_width: u16::MAX,
        }
    }

    /// Applies the stored theme and opens the topic named by `location`.
    ///
    /// Unknown or missing fragments fall back to the first topic. No history
    /// entry is pushed; the opened topic becomes the first entry.
    pub fn initialize(&mut self, location: &Location, theme: ThemeMode) -> Vec<Effect> {
        self.state.theme = theme;

        let index = match location.fragment() {
            Some(fragment) => match self.catalog.resolve(fragment) {
                Some(topic) => topic.index(),
                None => {
                    debug!(fragment, "Unknown fragment, opening first topic");
                    0
                }
            },
            None => 0,
        };

        info!(
            topic = %self.topic_id(index),
            theme = %theme,
            "Initializing navigation"
        );

        let mut effects = vec![Effect::ApplyTheme(theme)];
        effects.extend(self.select(index, HistoryMode::Replace));
        effects
    }

    /// Opens the topic identified by `id`.
    ///
    /// Legacy file names resolve to their current topic. Unknown ids are
    /// ignored.
    pub fn navigate_to(&mut self, id: &str) -> Vec<Effect> {
        let Some(index) = self.catalog.resolve(id).map(Topic::index) else {
            debug!(id, "Ignoring navigation to unknown topic");
            return Vec::new();
        };

        info!(topic = %self.topic_id(index), "Navigating");
        self.select(index, HistoryMode::Push)
    }

    pub fn step_previous(&mut self) -> Vec<Effect> {
        match self.state.current.checked_sub(1) {
            Some(index) => self.navigate_index(index),
            None => Vec::new(),
        }
    }

    pub fn step_next(&mut self) -> Vec<Effect> {
        let index = self.state.current + 1;
        if index >= self.catalog.len() {
            return Vec::new();
        }
        self.navigate_index(index)
    }

    fn navigate_index(&mut self, index: usize) -> Vec<Effect> {
        let id = self.topic_id(index).as_str().to_string();
        self.navigate_to(&id)
    }

    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        self.state.theme = self.state.theme.toggled();
        debug!(theme = %self.state.theme, "Theme toggled");
        vec![
            Effect::ApplyTheme(self.state.theme),
            Effect::PersistTheme(self.state.theme),
        ]
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.sidebar_collapsed = !self.state.sidebar_collapsed;
        debug!(collapsed = self.state.sidebar_collapsed, "Sidebar toggled");
    }

    /// Re-issues the fetch of a topic whose load failed.
    pub fn retry(&mut self) -> Vec<Effect> {
        let ContentView::Failed { topic, .. } = &self.view else {
            return Vec::new();
        };
        let topic = topic.clone();

        info!(topic = %topic, "Retrying topic load");
        vec![self.issue_fetch(topic)]
    }

    pub fn history_back(&mut self) -> Vec<Effect> {
        let Some(index) = self.history.back().and_then(|id| self.catalog.find(id.as_str())) else {
            return Vec::new();
        };
        let index = index.index();
        self.select(index, HistoryMode::Keep)
    }

    pub fn history_forward(&mut self) -> Vec<Effect> {
        let Some(index) = self
            .history
            .forward()
            .and_then(|id| self.catalog.find(id.as_str()))
        else {
            return Vec::new();
        };
        let index = index.index();
        self.select(index, HistoryMode::Keep)
    }

    /// Delivers the outcome of a fetch.
    ///
    /// Returns `false` when `request` is not the fetch currently awaited;
    /// such results are discarded so an abandoned topic never replaces
    /// newer content.
    pub fn complete_fetch(
        &mut self,
        request: RequestId,
        result: Result<RenderedDocument, ContentError>,
    ) -> bool {
        if self.awaiting != Some(request) {
            warn!(request, awaiting = ?self.awaiting, "Discarding stale topic load");
            return false;
        }
        self.awaiting = None;

        let topic = self.view.topic().clone();
        self.view = match result {
            Ok(document) => {
                debug!(topic = %topic, request, "Topic ready");
                ContentView::Ready {
                    topic,
                    document: Arc::new(document),
                }
            }
            Err(error) => {
                warn!(topic = %topic, request, error = %error, "Topic failed to load");
                ContentView::Failed { topic, error }
            }
        };
        self.revision += 1;
        true
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
    }

    #[must_use]
    pub const fn is_narrow(&self) -> bool {
        self.viewport_width < self.settings.narrow_width
    }

    fn select(&mut self, index: usize, mode: HistoryMode) -> Vec<Effect> {
        let id = self.topic_id(index).clone();

        self.state.current = index;
        self.location = Location::for_topic(&id);
        match mode {
            HistoryMode::Push => self.history.push(id.clone()),
            HistoryMode::Replace => self.history.replace(id.clone()),
            HistoryMode::Keep => {}
        }

        if self.is_narrow() {
            self.state.sidebar_collapsed = true;
        }

        vec![self.issue_fetch(id), Effect::ScrollToTop]
    }

    fn issue_fetch(&mut self, topic: TopicId) -> Effect {
        let request = self.next_request;
        self.next_request += 1;
        self.awaiting = Some(request);

        self.view = ContentView::Loading {
            topic: topic.clone(),
            since: Instant::now(),
        };
        self.revision += 1;

        debug!(topic = %topic, request, "Fetch issued");
        Effect::Fetch { request, topic }
    }

    fn topic_id(&self, index: usize) -> &TopicId {
        self.catalog.get(index).map_or_else(|| self.catalog.first().id(), Topic::id)
    }

    /// Whether the loading placeholder should be drawn at `now`.
    #[must_use]
    pub fn placeholder_visible(&self, now: Instant) -> bool {
        match &self.view {
            ContentView::Loading { since, .. } => {
                now.saturating_duration_since(*since) >= self.settings.loading_delay
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn sidebar_entries(&self) -> Vec<SidebarEntry<'_>> {
        self.catalog
            .topics()
            .iter()
            .map(|topic| SidebarEntry {
                topic,
                active: topic.index() == self.state.current,
                main: self.catalog.is_main(topic.index()),
            })
            .collect()
    }

    #[must_use]
    pub const fn sidebar_visible(&self) -> bool {
        !self.state.sidebar_collapsed
    }

    #[must_use]
    pub fn current_topic(&self) -> &Topic {
        self.catalog
            .get(self.state.current)
            .unwrap_or_else(|| self.catalog.first())
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::at(&self.catalog, self.state.current)
    }

    #[must_use]
    pub fn previous_button(&self) -> StepButton {
        StepButton::previous(&self.catalog, self.state.current)
    }

    #[must_use]
    pub fn next_button(&self) -> StepButton {
        StepButton::next(&self.catalog, self.state.current)
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.state.theme
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn view(&self) -> &ContentView {
        &self.view
    }

    /// Bumped every time [`Self::view`] changes.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }
}
