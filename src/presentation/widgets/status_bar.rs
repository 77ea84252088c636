//! Transient status messages shown at the right of the footer.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const STATUS_LIFETIME: Duration = Duration::from_secs(3);

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// A message that disappears after a few seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    level: StatusLevel,
    expires_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: Instant::now() + STATUS_LIFETIME,
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, text)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, text)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Columns the rendered message occupies.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        (self.text.width() + 2).min(usize::from(u16::MAX)) as u16
    }
}

/// Renders one [`StatusMessage`].
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    message: &'a StatusMessage,
    background: Style,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub fn new(message: &'a StatusMessage) -> Self {
        Self {
            message,
            background: Style::default(),
        }
    }

    #[must_use]
    pub const fn background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self
            .background
            .fg(self.message.level.color())
            .add_modifier(Modifier::BOLD);

        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.message.text),
            style,
        )))
        .style(self.background)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let message = StatusMessage::success("Copied code block 2");
        let now = Instant::now();

        assert!(!message.is_expired(now));
        assert!(message.is_expired(now + STATUS_LIFETIME + Duration::from_millis(1)));
    }

    #[test]
    fn test_renders_text_in_level_color() {
        let message = StatusMessage::error("Clipboard unavailable");
        let area = Rect::new(0, 0, message.width(), 1);
        let mut buf = Buffer::empty(area);

        StatusBar::new(&message).render(area, &mut buf);

        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert_eq!(text, " Clipboard unavailable ");
        assert_eq!(buf[(1, 0)].fg, Color::Red);
    }
}
