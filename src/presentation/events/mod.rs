//! Event handling.

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// What a mouse event asks for, in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseIntent {
    ScrollUp { column: u16, row: u16 },
    ScrollDown { column: u16, row: u16 },
    Click { column: u16, row: u16 },
}

impl MouseIntent {
    /// Interprets `event`; drags, moves and releases are ignored.
    #[must_use]
    pub const fn from_event(event: &MouseEvent) -> Option<Self> {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp => Some(Self::ScrollUp { column, row }),
            MouseEventKind::ScrollDown => Some(Self::ScrollDown { column, row }),
            MouseEventKind::Down(MouseButton::Left) => Some(Self::Click { column, row }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn position(self) -> (u16, u16) {
        match self {
            Self::ScrollUp { column, row }
            | Self::ScrollDown { column, row }
            | Self::Click { column, row } => (column, row),
        }
    }
}

/// Key repeats count as presses; releases do not.
#[must_use]
pub fn is_key_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}
