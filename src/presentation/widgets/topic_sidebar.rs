//! Topic list shown beside the content.

use crate::application::SidebarEntry;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

const SEPARATOR_LABEL: &str = " Reference ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Topic(usize),
    Separator,
}

/// Cursor, scroll offset and the hit map of the last render.
#[derive(Debug, Default)]
pub struct SidebarState {
    cursor: usize,
    offset: usize,
    focused: bool,
    area: Rect,
    rows: Vec<(u16, usize)>,
}

impl SidebarState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor onto the active topic.
    pub const fn sync_to(&mut self, index: usize) {
        self.cursor = index;
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub const fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub const fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub const fn select_last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Whether `(column, row)` lies inside the last rendered sidebar.
    #[must_use]
    pub const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Topic drawn at `(column, row)` in the last render.
    #[must_use]
    pub fn topic_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.contains(column, row) {
            return None;
        }
        self.rows
            .iter()
            .find(|(y, _)| *y == row)
            .map(|(_, index)| *index)
    }

    pub fn scroll(&mut self, down: bool, len: usize) {
        if down {
            self.select_next(len);
        } else {
            self.select_previous();
        }
    }
}

pub struct TopicSidebarStyle {
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub base: Style,
    pub reference: Style,
    pub active: Style,
    pub cursor: Style,
    pub separator: Style,
}

impl TopicSidebarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border: theme.base_style.patch(theme.dimmed_style),
            border_focused: theme.base_style.fg(theme.accent),
            title: theme.base_style.patch(theme.heading_style),
            base: theme.base_style,
            reference: theme.base_style.patch(theme.dimmed_style),
            active: theme.base_style.fg(theme.accent).add_modifier(Modifier::BOLD),
            cursor: theme.selection_style,
            separator: theme.base_style.patch(theme.dimmed_style),
        }
    }
}

impl Default for TopicSidebarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct TopicSidebar<'a> {
    entries: &'a [SidebarEntry<'a>],
    style: TopicSidebarStyle,
}

impl<'a> TopicSidebar<'a> {
    #[must_use]
    pub fn new(entries: &'a [SidebarEntry<'a>]) -> Self {
        Self {
            entries,
            style: TopicSidebarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: TopicSidebarStyle) -> Self {
        self.style = style;
        self
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        let mut previous_main = true;
        for (i, entry) in self.entries.iter().enumerate() {
            if previous_main && !entry.main && i > 0 {
                rows.push(Row::Separator);
            }
            previous_main = entry.main;
            rows.push(Row::Topic(i));
        }
        rows
    }

    fn topic_line(
        &self,
        entry: &SidebarEntry<'_>,
        under_cursor: bool,
        width: usize,
    ) -> Line<'static> {
        let (marker, mut style) = if entry.active {
            ("▶ ", self.style.active)
        } else if entry.main {
            ("  ", self.style.base)
        } else {
            ("  ", self.style.reference)
        };
        if under_cursor {
            style = style.patch(self.style.cursor);
        }

        let label = entry.topic.label();
        let text = format!("{marker}{label}");
        let pad = width.saturating_sub(text.width());
        Line::from(vec![
            Span::styled(text, style),
            Span::styled(" ".repeat(pad), style),
        ])
    }
}

impl StatefulWidget for TopicSidebar<'_> {
    type State = SidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border = if state.focused {
            self.style.border_focused
        } else {
            self.style.border
        };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(border)
            .style(self.style.base)
            .title(Span::styled(" TOPICS ", self.style.title));
        let inner = block.inner(area);
        block.render(area, buf);

        state.area = inner;
        state.rows.clear();
        if inner.height == 0 || self.entries.is_empty() {
            return;
        }

        state.cursor = state.cursor.min(self.entries.len() - 1);
        let rows = self.rows();
        let height = usize::from(inner.height);
        let cursor_row = rows
            .iter()
            .position(|r| *r == Row::Topic(state.cursor))
            .unwrap_or(0);
        if cursor_row < state.offset {
            state.offset = cursor_row;
        } else if cursor_row >= state.offset + height {
            state.offset = cursor_row + 1 - height;
        }

        let width = usize::from(inner.width);
        let mut lines = Vec::with_capacity(height);
        for (screen_row, row) in rows.iter().skip(state.offset).take(height).enumerate() {
            match *row {
                Row::Separator => {
                    let fill = width.saturating_sub(SEPARATOR_LABEL.len() + 2);
                    lines.push(Line::from(Span::styled(
                        format!("──{SEPARATOR_LABEL}{}", "─".repeat(fill)),
                        self.style.separator,
                    )));
                }
                Row::Topic(index) => {
                    let under_cursor = state.focused && index == state.cursor;
                    lines.push(self.topic_line(&self.entries[index], under_cursor, width));
                    #[allow(clippy::cast_possible_truncation)]
                    state.rows.push((inner.y + screen_row as u16, index));
                }
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopicCatalog;
    use crate::domain::entities::Topic;

    fn entries(catalog: &TopicCatalog, active: usize) -> Vec<SidebarEntry<'_>> {
        catalog
            .topics()
            .iter()
            .map(|topic: &Topic| SidebarEntry {
                topic,
                active: topic.index() == active,
                main: catalog.is_main(topic.index()),
            })
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut state = SidebarState::new();
        state.select_previous();
        assert_eq!(state.cursor(), 0);

        state.select_last(10);
        state.select_next(10);
        assert_eq!(state.cursor(), 9);

        state.select_first();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_renders_active_marker_and_separator() {
        let catalog = TopicCatalog::builtin();
        let entries = entries(&catalog, 2);
        let area = Rect::new(0, 0, 30, 14);
        let mut buf = Buffer::empty(area);
        let mut state = SidebarState::new();

        TopicSidebar::new(&entries).render(area, &mut buf, &mut state);

        let text: Vec<String> = (0..area.height).map(|y| row(&buf, y)).collect();
        // The title takes the first row.
        assert!(text[3].contains("▶"));
        assert!(text.iter().any(|r| r.contains("Reference")));
        assert_eq!(text.iter().filter(|r| r.contains("▶")).count(), 1);
    }

    #[test]
    fn test_click_maps_to_topic() {
        let catalog = TopicCatalog::builtin();
        let entries = entries(&catalog, 0);
        let area = Rect::new(0, 1, 30, 14);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 15));
        let mut state = SidebarState::new();

        TopicSidebar::new(&entries).render(area, &mut buf, &mut state);

        assert_eq!(state.topic_at(3, 1), None);
        assert_eq!(state.topic_at(3, 2), Some(0));
        assert_eq!(state.topic_at(3, 5), Some(3));
        // Separator between curriculum and reference material.
        assert_eq!(state.topic_at(3, 10), None);
        assert_eq!(state.topic_at(3, 11), Some(8));
        assert_eq!(state.topic_at(40, 2), None);
    }
}
