//! Display region for the active topic.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Widget, Wrap,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::application::ContentView;
use crate::domain::ThemeMode;
use crate::domain::errors::ContentError;
use crate::presentation::services::{CodeRegion, DocumentView, FocusTarget};
use crate::presentation::theme::Theme;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const ERROR_PANEL_WIDTH: u16 = 64;
const HORIZONTAL_STEP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    width: u16,
    mode: ThemeMode,
}

/// Laid out document plus scroll and link focus.
#[derive(Debug, Default)]
pub struct ContentPaneState {
    document: Option<DocumentView>,
    key: Option<LayoutKey>,
    scroll: usize,
    target: usize,
    h_offset: usize,
    focused_link: Option<usize>,
    focused: bool,
    smooth: bool,
    viewport: Rect,
}

impl ContentPaneState {
    #[must_use]
    pub fn new(smooth: bool) -> Self {
        Self {
            smooth,
            ..Self::default()
        }
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn document(&self) -> Option<&DocumentView> {
        self.document.as_ref()
    }

    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub const fn horizontal_offset(&self) -> usize {
        self.h_offset
    }

    /// Text columns of the last render.
    #[must_use]
    pub const fn viewport_width(&self) -> u16 {
        self.viewport.width
    }

    #[must_use]
    pub fn viewport_height(&self) -> usize {
        usize::from(self.viewport.height.max(1))
    }

    /// Whether the document must be laid out again.
    #[must_use]
    pub fn needs_layout(&self, revision: u64, width: u16, mode: ThemeMode) -> bool {
        self.key != Some(LayoutKey {
            revision,
            width,
            mode,
        })
    }

    /// Installs a new layout. Link focus and horizontal scroll survive
    /// only a relayout of the same document.
    pub fn set_document(&mut self, document: DocumentView, revision: u64, width: u16, mode: ThemeMode) {
        let same_document = self.key.is_some_and(|k| k.revision == revision);
        if !same_document {
            self.focused_link = None;
            self.h_offset = 0;
        }
        self.document = Some(document);
        self.key = Some(LayoutKey {
            revision,
            width,
            mode,
        });
        self.clamp();
    }

    pub fn clear_document(&mut self) {
        self.document = None;
        self.key = None;
        self.focused_link = None;
    }

    fn max_scroll(&self) -> usize {
        self.document
            .as_ref()
            .map_or(0, |d| d.len().saturating_sub(self.viewport_height()))
    }

    fn clamp(&mut self) {
        let max = self.max_scroll();
        self.scroll = self.scroll.min(max);
        self.target = self.target.min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.target = 0;
        self.h_offset = 0;
        self.focused_link = None;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.jump_to(self.max_scroll());
    }

    /// Scrolls by whole lines, immediately.
    pub fn scroll_lines(&mut self, delta: isize) {
        let line = self.target.saturating_add_signed(delta).min(self.max_scroll());
        self.scroll = line;
        self.target = line;
    }

    pub fn page_down(&mut self) {
        let step = self.viewport_height().saturating_sub(2).max(1);
        self.jump_to(self.target.saturating_add(step));
    }

    pub fn page_up(&mut self) {
        let step = self.viewport_height().saturating_sub(2).max(1);
        self.jump_to(self.target.saturating_sub(step));
    }

    /// Scrolls so `line` is at the top, animated when smooth scrolling is on.
    pub fn jump_to(&mut self, line: usize) {
        self.target = line.min(self.max_scroll());
        if !self.smooth {
            self.scroll = self.target;
        }
    }

    /// Scrolls to the heading carrying `anchor`.
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let Some(line) = self.document.as_ref().and_then(|d| d.anchor_line(anchor)) else {
            return false;
        };
        self.jump_to(line);
        true
    }

    /// Advances a smooth scroll. Returns whether anything moved.
    pub fn tick(&mut self) -> bool {
        if self.scroll == self.target {
            return false;
        }
        let distance = self.scroll.abs_diff(self.target);
        let step = distance.div_ceil(3).max(1);
        if self.scroll < self.target {
            self.scroll += step;
        } else {
            self.scroll -= step;
        }
        true
    }

    pub fn scroll_left(&mut self) {
        self.h_offset = self.h_offset.saturating_sub(HORIZONTAL_STEP);
    }

    pub fn scroll_right(&mut self) {
        let max = self.document.as_ref().map_or(0, |d| {
            d.max_width()
                .saturating_sub(usize::from(self.viewport.width))
        });
        self.h_offset = (self.h_offset + HORIZONTAL_STEP).min(max);
    }

    pub fn focus_next_link(&mut self) -> Option<&FocusTarget> {
        let next = self
            .document
            .as_ref()?
            .next_target(self.focused_link, self.target);
        self.focus_link(next)
    }

    pub fn focus_previous_link(&mut self) -> Option<&FocusTarget> {
        let bottom = self.target + self.viewport_height();
        let previous = self
            .document
            .as_ref()?
            .previous_target(self.focused_link, bottom);
        self.focus_link(previous)
    }

    fn focus_link(&mut self, index: Option<usize>) -> Option<&FocusTarget> {
        self.focused_link = index;
        let line = self.focused_target()?.line();

        let height = self.viewport_height();
        if line < self.target || line >= self.target + height {
            self.jump_to(line.saturating_sub(height / 3));
        }
        self.focused_target()
    }

    pub const fn clear_link_focus(&mut self) {
        self.focused_link = None;
    }

    #[must_use]
    pub fn focused_target(&self) -> Option<&FocusTarget> {
        let index = self.focused_link?;
        self.document.as_ref()?.targets.get(index)
    }

    /// Copyable code block in view, topmost first.
    #[must_use]
    pub fn visible_code_block(&self) -> Option<&CodeRegion> {
        self.document
            .as_ref()?
            .code_block_in(self.scroll, self.viewport_height())
    }

    #[must_use]
    pub const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.viewport.x
            && column <= self.viewport.x + self.viewport.width
            && row >= self.viewport.y
            && row < self.viewport.y + self.viewport.height
    }
}

pub struct ContentPaneStyle {
    pub base: Style,
    pub dimmed: Style,
    pub focused_link: Style,
    pub error: Style,
    pub scrollbar: Style,
}

impl ContentPaneStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            base: theme.base_style,
            dimmed: theme.base_style.patch(theme.dimmed_style),
            focused_link: theme.focused_link_style,
            error: theme.base_style.patch(theme.error_style),
            scrollbar: theme.base_style.fg(theme.accent),
        }
    }
}

impl Default for ContentPaneStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct ContentPane<'a> {
    view: &'a ContentView,
    topic_label: &'a str,
    placeholder: bool,
    retry_key: String,
    frame: usize,
    style: ContentPaneStyle,
}

impl<'a> ContentPane<'a> {
    #[must_use]
    pub fn new(view: &'a ContentView, topic_label: &'a str) -> Self {
        Self {
            view,
            topic_label,
            placeholder: false,
            retry_key: "r".to_string(),
            frame: 0,
            style: ContentPaneStyle::default(),
        }
    }

    /// Whether the loading placeholder is due.
    #[must_use]
    pub const fn placeholder(mut self, visible: bool) -> Self {
        self.placeholder = visible;
        self
    }

    #[must_use]
    pub fn retry_key(mut self, key: impl Into<String>) -> Self {
        self.retry_key = key.into();
        self
    }

    /// Animation frame for the spinner.
    #[must_use]
    pub const fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: ContentPaneStyle) -> Self {
        self.style = style;
        self
    }

    fn block() -> Block<'static> {
        Block::default().padding(Padding::left(1))
    }

    /// Area the document text occupies inside `area`; the last column
    /// holds the scrollbar.
    #[must_use]
    pub fn text_area(area: Rect) -> Rect {
        let inner = Self::block().inner(area);
        Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        }
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let spinner = SPINNER[self.frame % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(format!("{spinner} "), self.style.scrollbar),
            Span::styled(format!("Loading {}…", self.topic_label), self.style.dimmed),
        ]);
        let y = area.y + area.height / 3;
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, y, area.width, 1), buf);
    }

    fn render_error(&self, error: &ContentError, area: Rect, buf: &mut Buffer) {
        let width = ERROR_PANEL_WIDTH.min(area.width);
        let height = 8.min(area.height);
        if width < 4 || height < 3 {
            return;
        }
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 3;
        let panel = Rect::new(x, y, width, height);

        let lines = vec![
            Line::from(Span::styled(
                format!("Could not load {}", error.file()),
                self.style.error,
            )),
            Line::raw(""),
            Line::from(Span::styled(error.detail(), self.style.base)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Press ", self.style.dimmed),
                Span::styled(self.retry_key.clone(), self.style.scrollbar),
                Span::styled(" to retry", self.style.dimmed),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.error)
            .title(Span::styled(" Load failed ", self.style.error))
            .padding(Padding::horizontal(1))
            .style(self.style.base);

        Clear.render(panel, buf);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(panel, buf);
    }

    fn render_document(&self, inner: Rect, text: Rect, buf: &mut Buffer, state: &mut ContentPaneState) {
        state.clamp();
        let Some(document) = &state.document else {
            return;
        };

        let height = usize::from(text.height);
        let focused: &[(usize, usize)] = state
            .focused_link
            .and_then(|i| document.targets.get(i))
            .map_or(&[], |t| t.segments.as_slice());

        let lines: Vec<Line<'static>> = document
            .lines
            .iter()
            .enumerate()
            .skip(state.scroll)
            .take(height)
            .map(|(index, line)| {
                let mut line = line.clone();
                for (_, span) in focused.iter().filter(|(l, _)| *l == index) {
                    if let Some(span) = line.spans.get_mut(*span) {
                        span.style = span.style.patch(self.style.focused_link);
                    }
                }
                if state.h_offset > 0 && document.is_scrollable(index) {
                    line = shift_line(line, state.h_offset);
                }
                line
            })
            .collect();

        Paragraph::new(lines)
            .style(self.style.base)
            .render(text, buf);

        if document.len() > height {
            let mut scrollbar = ScrollbarState::new(document.len().saturating_sub(height))
                .position(state.scroll)
                .viewport_content_length(height);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(self.style.scrollbar)
                .render(inner, buf, &mut scrollbar);
        }
    }
}

impl StatefulWidget for ContentPane<'_> {
    type State = ContentPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Self::block().style(self.style.base);
        let inner = block.inner(area);
        block.render(area, buf);

        let text = Self::text_area(area);
        state.viewport = text;

        match self.view {
            ContentView::Loading { .. } => {
                if self.placeholder {
                    self.render_placeholder(text, buf);
                }
            }
            ContentView::Failed { error, .. } => self.render_error(error, text, buf),
            ContentView::Ready { .. } => self.render_document(inner, text, buf, state),
        }
    }
}

/// Drops the first `offset` columns of `line`.
fn shift_line(line: Line<'static>, offset: usize) -> Line<'static> {
    let mut skip = offset;
    let mut spans = Vec::with_capacity(line.spans.len());

    for span in line.spans {
        if skip == 0 {
            spans.push(span);
            continue;
        }
        let width = span.width();
        if width <= skip {
            skip -= width;
            continue;
        }

        let mut cut = 0;
        let mut start = span.content.len();
        for (i, c) in span.content.char_indices() {
            if cut >= skip {
                start = i;
                break;
            }
            cut += c.width().unwrap_or(0);
        }
        spans.push(Span::styled(span.content[start..].to_string(), span.style));
        skip = 0;
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RenderedDocument;
    use crate::domain::entities::{Block as DocBlock, Inline, TopicId};
    use crate::presentation::services::{DocumentLayout, SyntaxHighlighter};
    use std::sync::Arc;
    use std::time::Instant;

    struct PlainHighlighter;

    impl SyntaxHighlighter for PlainHighlighter {
        fn highlight(&self, code: &str, _: Option<&str>, _: ThemeMode) -> Vec<Span<'static>> {
            vec![Span::raw(code.to_string())]
        }
    }

    fn document(paragraphs: usize) -> DocumentView {
        let blocks = (0..paragraphs)
            .map(|i| DocBlock::Paragraph(vec![Inline::Text(format!("paragraph {i}"))]))
            .collect();
        DocumentLayout::new(Arc::new(PlainHighlighter)).layout(
            &RenderedDocument::new(blocks),
            40,
            &Theme::default(),
        )
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn ready() -> ContentView {
        ContentView::Ready {
            topic: TopicId::new("1-OOP.md"),
            document: Arc::new(RenderedDocument::default()),
        }
    }

    fn render(view: &ContentView, state: &mut ContentPaneState, placeholder: bool) -> Buffer {
        let area = Rect::new(0, 0, 42, 10);
        let mut buf = Buffer::empty(area);
        ContentPane::new(view, "OOP")
            .placeholder(placeholder)
            .render(area, &mut buf, state);
        buf
    }

    #[test]
    fn test_layout_key_tracks_revision_width_and_mode() {
        let mut state = ContentPaneState::new(false);
        assert!(state.needs_layout(1, 40, ThemeMode::Light));

        state.set_document(document(3), 1, 40, ThemeMode::Light);
        assert!(!state.needs_layout(1, 40, ThemeMode::Light));
        assert!(state.needs_layout(2, 40, ThemeMode::Light));
        assert!(state.needs_layout(1, 41, ThemeMode::Light));
        assert!(state.needs_layout(1, 40, ThemeMode::Dark));
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut state = ContentPaneState::new(false);
        state.set_document(document(20), 1, 40, ThemeMode::Light);
        render(&ready(), &mut state, false);

        state.scroll_lines(-5);
        assert_eq!(state.scroll(), 0);

        state.scroll_to_bottom();
        let bottom = state.scroll();
        assert_eq!(bottom, document(20).len() - state.viewport_height());

        state.page_down();
        assert_eq!(state.scroll(), bottom);

        state.scroll_to_top();
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_smooth_scroll_converges() {
        let mut state = ContentPaneState::new(true);
        state.set_document(document(20), 1, 40, ThemeMode::Light);
        render(&ready(), &mut state, false);

        state.jump_to(12);
        assert_eq!(state.scroll(), 0);

        let mut ticks = 0;
        while state.tick() {
            ticks += 1;
            assert!(ticks < 50);
        }
        assert_eq!(state.scroll(), 12);
    }

    #[test]
    fn test_placeholder_only_when_due() {
        let view = ContentView::Loading {
            topic: TopicId::new("1-OOP.md"),
            since: Instant::now(),
        };
        let mut state = ContentPaneState::new(false);

        let hidden = render(&view, &mut state, false);
        assert!((0..10).all(|y| !row(&hidden, y).contains("Loading")));

        let shown = render(&view, &mut state, true);
        assert!((0..10).any(|y| row(&shown, y).contains("Loading OOP")));
    }

    #[test]
    fn test_error_panel_names_file_and_retry() {
        let view = ContentView::Failed {
            topic: TopicId::new("4-Templates.md"),
            error: ContentError::status("4-Templates.md", 404),
        };
        let mut state = ContentPaneState::new(false);
        let buf = render(&view, &mut state, false);

        let text: String = (0..10).map(|y| row(&buf, y)).collect();
        assert!(text.contains("Could not load 4-Templates.md"));
        assert!(text.contains("HTTP 404"));
        assert!(text.contains("to retry"));
    }

    #[test]
    fn test_shift_line_drops_columns() {
        let line = Line::from(vec![Span::raw("│ Name "), Span::raw("│ Size │")]);
        let shifted = shift_line(line, 3);
        let text: String = shifted.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "ame │ Size │");
    }
}
