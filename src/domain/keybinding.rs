use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,
    ToggleSidebar,
    ToggleTheme,

    // Focus
    FocusNext,
    FocusPrevious,

    // Topics
    PreviousTopic,
    NextTopic,
    HistoryBack,
    HistoryForward,
    Retry,

    // Sidebar
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,
    Select,

    // Content
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollToTop,
    ScrollToBottom,
    ScrollLeft,
    ScrollRight,
    NextLink,
    PreviousLink,
    CopyCode,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }
}
