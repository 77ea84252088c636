//! The reader: sidebar, content pane, progress and footer around one
//! [`NavigationController`].

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};
use tracing::debug;

use crate::application::{ContentView, Effect, NavigationController};
use crate::domain::ThemeMode;
use crate::domain::entities::LinkTarget;
use crate::domain::keybinding::{Action, Keybind};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::events::MouseIntent;
use crate::presentation::services::DocumentLayout;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ContentPane, ContentPaneState, ContentPaneStyle, FocusContext, FooterBar, FooterBarStyle,
    HeaderBar, HeaderBarStyle, ProgressBar, ProgressBarStyle, SidebarState, StatusBar,
    StatusMessage, TopicSidebar, TopicSidebarStyle,
};
use crate::{NAME, VERSION};

const WHEEL_LINES: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderFocus {
    Sidebar,
    Content,
}

impl ReaderFocus {
    const fn next(self, sidebar_visible: bool) -> Self {
        match self {
            Self::Sidebar => Self::Content,
            Self::Content if sidebar_visible => Self::Sidebar,
            Self::Content => Self::Content,
        }
    }

    const fn previous(self, sidebar_visible: bool) -> Self {
        // Two panes: cycling backwards visits the same order.
        self.next(sidebar_visible)
    }

    #[must_use]
    pub const fn to_focus_context(self) -> FocusContext {
        match self {
            Self::Sidebar => FocusContext::Sidebar,
            Self::Content => FocusContext::Content,
        }
    }
}

/// What the app must do after a key or mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderKeyResult {
    Consumed,
    Ignored,
    Quit,
    /// Controller effects to carry out.
    Effects(Vec<Effect>),
    CopyCode { number: usize, code: String },
    OpenExternal(String),
}

impl From<Vec<Effect>> for ReaderKeyResult {
    fn from(effects: Vec<Effect>) -> Self {
        if effects.is_empty() {
            Self::Consumed
        } else {
            Self::Effects(effects)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub sidebar_width: u16,
    pub smooth_scroll: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            sidebar_width: 28,
            smooth_scroll: true,
        }
    }
}

pub struct ReaderScreenState {
    controller: NavigationController,
    commands: CommandRegistry,
    theme: Theme,
    layout: DocumentLayout,
    options: ReaderOptions,
    focus: ReaderFocus,
    sidebar: SidebarState,
    content: ContentPaneState,
    status: Option<StatusMessage>,
    pending_anchor: Option<String>,
    active_topic: Option<usize>,
    previous_button: Rect,
    next_button: Rect,
    frame: usize,
}

impl ReaderScreenState {
    #[must_use]
    pub fn new(
        controller: NavigationController,
        commands: CommandRegistry,
        theme: Theme,
        layout: DocumentLayout,
        options: ReaderOptions,
    ) -> Self {
        let mut state = Self {
            controller,
            commands,
            theme,
            layout,
            options,
            focus: ReaderFocus::Content,
            sidebar: SidebarState::new(),
            content: ContentPaneState::new(options.smooth_scroll),
            status: None,
            pending_anchor: None,
            active_topic: None,
            previous_button: Rect::default(),
            next_button: Rect::default(),
            frame: 0,
        };
        state.set_focus(ReaderFocus::Content);
        state
    }

    #[must_use]
    pub const fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.controller
    }

    #[must_use]
    pub const fn focus(&self) -> ReaderFocus {
        self.focus
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn content(&self) -> &ContentPaneState {
        &self.content
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        if self.theme.mode != mode {
            self.theme = self.theme.with_mode(mode);
        }
    }

    pub fn scroll_content_to_top(&mut self) {
        self.content.scroll_to_top();
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next(self.controller.sidebar_visible()));
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous(self.controller.sidebar_visible()));
    }

    fn set_focus(&mut self, focus: ReaderFocus) {
        self.focus = focus;
        self.sidebar.set_focused(focus == ReaderFocus::Sidebar);
        self.content.set_focused(focus == ReaderFocus::Content);
    }

    fn toggle_sidebar(&mut self) {
        self.controller.toggle_sidebar();
        if self.controller.sidebar_visible() {
            self.sidebar.sync_to(self.controller.state().current);
            self.set_focus(ReaderFocus::Sidebar);
        } else if self.focus == ReaderFocus::Sidebar {
            self.set_focus(ReaderFocus::Content);
        }
    }

    /// Moves focus off a sidebar that a selection just collapsed.
    fn sync_focus(&mut self) {
        if !self.controller.sidebar_visible() && self.focus == ReaderFocus::Sidebar {
            self.set_focus(ReaderFocus::Content);
        }
    }

    fn navigate(&mut self, effects: Vec<Effect>) -> ReaderKeyResult {
        self.pending_anchor = None;
        let result = ReaderKeyResult::from(effects);
        self.sync_focus();
        result
    }

    /// Advances animations and expires the status message. Returns
    /// whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = self.content.tick();

        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
            dirty = true;
        }
        if self.controller.view().is_loading() {
            self.frame = self.frame.wrapping_add(1);
            dirty |= self.controller.placeholder_visible(now);
        }
        dirty
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ReaderKeyResult {
        let Some(action) = self.commands.find_action(key) else {
            return ReaderKeyResult::Ignored;
        };

        match action {
            Action::Quit => ReaderKeyResult::Quit,
            Action::ToggleSidebar => {
                self.toggle_sidebar();
                ReaderKeyResult::Consumed
            }
            Action::ToggleTheme => self.controller.toggle_theme().into(),
            Action::FocusNext => {
                self.focus_next();
                ReaderKeyResult::Consumed
            }
            Action::FocusPrevious => {
                self.focus_previous();
                ReaderKeyResult::Consumed
            }
            Action::PreviousTopic => {
                let effects = self.controller.step_previous();
                self.navigate(effects)
            }
            Action::NextTopic => {
                let effects = self.controller.step_next();
                self.navigate(effects)
            }
            Action::HistoryBack => {
                let effects = self.controller.history_back();
                self.navigate(effects)
            }
            Action::HistoryForward => {
                let effects = self.controller.history_forward();
                self.navigate(effects)
            }
            Action::Retry => self.controller.retry().into(),
            Action::Cancel => {
                if self.focus == ReaderFocus::Sidebar {
                    self.set_focus(ReaderFocus::Content);
                } else {
                    self.content.clear_link_focus();
                }
                ReaderKeyResult::Consumed
            }
            _ => match self.focus {
                ReaderFocus::Sidebar => self.handle_sidebar_action(action),
                ReaderFocus::Content => self.handle_content_action(action),
            },
        }
    }

    fn handle_sidebar_action(&mut self, action: Action) -> ReaderKeyResult {
        let len = self.controller.catalog().len();
        match action {
            Action::NavigateUp => self.sidebar.select_previous(),
            Action::NavigateDown => self.sidebar.select_next(len),
            Action::SelectFirst => self.sidebar.select_first(),
            Action::SelectLast => self.sidebar.select_last(len),
            Action::Select => return self.open_topic_at(self.sidebar.cursor()),
            _ => return ReaderKeyResult::Ignored,
        }
        ReaderKeyResult::Consumed
    }

    fn handle_content_action(&mut self, action: Action) -> ReaderKeyResult {
        match action {
            Action::NavigateUp | Action::ScrollUp => self.content.scroll_lines(-1),
            Action::NavigateDown | Action::ScrollDown => self.content.scroll_lines(1),
            Action::PageDown => self.content.page_down(),
            Action::PageUp => self.content.page_up(),
            Action::SelectFirst | Action::ScrollToTop => self.content.jump_to(0),
            Action::SelectLast | Action::ScrollToBottom => self.content.scroll_to_bottom(),
            Action::ScrollLeft => self.content.scroll_left(),
            Action::ScrollRight => self.content.scroll_right(),
            Action::NextLink => {
                self.content.focus_next_link();
            }
            Action::PreviousLink => {
                self.content.focus_previous_link();
            }
            Action::Select => return self.activate_link(),
            Action::CopyCode => return self.copy_visible_code(),
            _ => return ReaderKeyResult::Ignored,
        }
        ReaderKeyResult::Consumed
    }

    fn open_topic_at(&mut self, index: usize) -> ReaderKeyResult {
        let Some(id) = self.controller.catalog().get(index).map(|t| t.id().to_string()) else {
            return ReaderKeyResult::Consumed;
        };
        if index == self.controller.state().current {
            self.set_focus(ReaderFocus::Content);
            return ReaderKeyResult::Consumed;
        }
        let effects = self.controller.navigate_to(&id);
        self.navigate(effects)
    }

    fn copy_visible_code(&mut self) -> ReaderKeyResult {
        match self.content.visible_code_block() {
            Some(block) => ReaderKeyResult::CopyCode {
                number: block.number,
                code: block.code.clone(),
            },
            None => {
                self.set_status(StatusMessage::info("No code block in view"));
                ReaderKeyResult::Consumed
            }
        }
    }

    fn activate_link(&mut self) -> ReaderKeyResult {
        let Some(target) = self.content.focused_target().map(|t| t.target.clone()) else {
            return ReaderKeyResult::Consumed;
        };
        debug!(?target, "Activating link");

        match target {
            LinkTarget::Anchor(anchor) => {
                if !self.content.scroll_to_anchor(&anchor) {
                    self.set_status(StatusMessage::warning(format!("No section #{anchor}")));
                }
                ReaderKeyResult::Consumed
            }
            LinkTarget::Topic { id, anchor } => {
                if self.controller.current_topic().id() == &id {
                    match anchor {
                        Some(anchor) => {
                            self.content.scroll_to_anchor(&anchor);
                        }
                        None => self.content.jump_to(0),
                    }
                    return ReaderKeyResult::Consumed;
                }
                let effects = self.controller.navigate_to(id.as_str());
                let result = self.navigate(effects);
                self.pending_anchor = anchor;
                result
            }
            LinkTarget::External(url) => ReaderKeyResult::OpenExternal(url),
            LinkTarget::SameSite(url) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    ReaderKeyResult::OpenExternal(url)
                } else {
                    self.set_status(StatusMessage::warning(format!("Cannot open {url}")));
                    ReaderKeyResult::Consumed
                }
            }
            LinkTarget::Unresolved => ReaderKeyResult::Consumed,
        }
    }

    pub fn handle_mouse(&mut self, intent: MouseIntent) -> ReaderKeyResult {
        let (column, row) = intent.position();
        let sidebar_hit = self.controller.sidebar_visible() && self.sidebar.contains(column, row);

        match intent {
            MouseIntent::ScrollUp { .. } | MouseIntent::ScrollDown { .. } => {
                let down = matches!(intent, MouseIntent::ScrollDown { .. });
                if sidebar_hit {
                    self.sidebar.scroll(down, self.controller.catalog().len());
                } else if self.content.contains(column, row) {
                    self.content
                        .scroll_lines(if down { WHEEL_LINES } else { -WHEEL_LINES });
                } else {
                    return ReaderKeyResult::Ignored;
                }
                ReaderKeyResult::Consumed
            }
            MouseIntent::Click { .. } => {
                if sidebar_hit {
                    self.set_focus(ReaderFocus::Sidebar);
                    if let Some(index) = self.sidebar.topic_at(column, row) {
                        self.sidebar.sync_to(index);
                        return self.open_topic_at(index);
                    }
                    ReaderKeyResult::Consumed
                } else if contains(self.previous_button, column, row) {
                    let effects = self.controller.step_previous();
                    self.navigate(effects)
                } else if contains(self.next_button, column, row) {
                    let effects = self.controller.step_next();
                    self.navigate(effects)
                } else if self.content.contains(column, row) {
                    self.set_focus(ReaderFocus::Content);
                    ReaderKeyResult::Consumed
                } else {
                    ReaderKeyResult::Ignored
                }
            }
        }
    }

    fn sync_active_topic(&mut self) {
        let current = self.controller.state().current;
        if self.active_topic != Some(current) {
            self.active_topic = Some(current);
            self.sidebar.sync_to(current);
        }
    }

    fn update_layout(&mut self, width: u16) {
        let revision = self.controller.revision();
        let mode = self.theme.mode;

        match self.controller.view() {
            ContentView::Ready { document, .. } => {
                if self.content.needs_layout(revision, width, mode) {
                    let view = self.layout.layout(document, width, &self.theme);
                    debug!(revision, width, lines = view.len(), "Laid out document");
                    self.content.set_document(view, revision, width, mode);
                }
                if let Some(anchor) = self.pending_anchor.take() {
                    self.content.scroll_to_anchor(&anchor);
                }
            }
            ContentView::Failed { .. } => {
                self.pending_anchor = None;
                self.content.clear_document();
            }
            ContentView::Loading { .. } => self.content.clear_document(),
        }
    }

    fn keybinds(&self) -> Vec<Keybind> {
        self.get_commands(&self.commands)
    }
}

impl HasCommands for ReaderScreenState {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        let mut hints: Vec<(Action, &'static str)> = match self.focus {
            ReaderFocus::Sidebar => vec![(Action::NavigateDown, "Down"), (Action::Select, "Open")],
            ReaderFocus::Content => vec![(Action::NextLink, "Link"), (Action::CopyCode, "Copy")],
        };
        if matches!(self.controller.view(), ContentView::Failed { .. }) {
            hints.push((Action::Retry, "Retry"));
        }
        hints.extend([
            (Action::PreviousTopic, "Prev"),
            (Action::NextTopic, "Next"),
            (Action::ToggleSidebar, "Topics"),
            (Action::ToggleTheme, "Theme"),
            (Action::Quit, "Quit"),
        ]);

        hints
            .into_iter()
            .filter_map(|(action, label)| {
                registry
                    .get(action)
                    .map(|key| Keybind::new(key, action, label))
            })
            .collect()
    }
}

const fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

pub struct ReaderScreen;

impl ReaderScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ReaderScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for ReaderScreen {
    type State = ReaderScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, state.theme.base_style);
        state.controller.set_viewport_width(area.width);
        state.sync_active_topic();

        let [header_area, body_area, progress_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header(state, header_area, buf);
        render_body(state, body_area, buf);
        render_progress(state, progress_area, buf);
        render_footer(state, footer_area, buf);
    }
}

fn render_header(state: &ReaderScreenState, area: Rect, buf: &mut Buffer) {
    let location = state.controller.location().to_string();
    HeaderBar::new(NAME, VERSION)
        .topic(state.controller.current_topic().label())
        .location(location)
        .mode(state.theme.mode)
        .style(HeaderBarStyle::from_theme(&state.theme))
        .render(area, buf);
}

fn render_body(state: &mut ReaderScreenState, area: Rect, buf: &mut Buffer) {
    let content_area = if state.controller.sidebar_visible() {
        let width = state.options.sidebar_width.min(area.width / 2);
        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(area);

        let entries = state.controller.sidebar_entries();
        TopicSidebar::new(&entries)
            .style(TopicSidebarStyle::from_theme(&state.theme))
            .render(sidebar_area, buf, &mut state.sidebar);
        content_area
    } else {
        area
    };

    state.update_layout(ContentPane::text_area(content_area).width);

    let placeholder = state.controller.placeholder_visible(Instant::now());
    let retry_key = state
        .commands
        .get(Action::Retry)
        .map_or_else(|| "r".to_string(), |key| FooterBar::format_key(&key));

    ContentPane::new(state.controller.view(), state.controller.current_topic().label())
        .placeholder(placeholder)
        .retry_key(retry_key)
        .frame(state.frame)
        .style(ContentPaneStyle::from_theme(&state.theme))
        .render(content_area, buf, &mut state.content);
}

fn render_progress(state: &mut ReaderScreenState, area: Rect, buf: &mut Buffer) {
    let previous = state.controller.previous_button();
    let next = state.controller.next_button();

    let [previous_area, _, next_area] = ProgressBar::areas(area);
    state.previous_button = previous_area;
    state.next_button = next_area;

    ProgressBar::new(state.controller.progress(), &previous, &next)
        .style(ProgressBarStyle::from_theme(&state.theme))
        .render(area, buf);
}

fn render_footer(state: &ReaderScreenState, area: Rect, buf: &mut Buffer) {
    let keybinds = state.keybinds();
    let location = state.controller.location().to_string();

    FooterBar::new(&keybinds)
        .focus_context(state.focus.to_focus_context())
        .right_info(state.status.is_none().then_some(location.as_str()))
        .style(FooterBarStyle::from_theme(&state.theme))
        .render(area, buf);

    if let Some(status) = &state.status {
        let width = status.width().min(area.width);
        let status_area = Rect::new(area.right() - width, area.y, width, area.height);
        StatusBar::new(status)
            .background(state.theme.chrome_style)
            .render(status_area, buf);
    }
}
