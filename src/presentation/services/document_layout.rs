//! Lays a rendered document out as terminal lines.
//!
//! Text is wrapped to the pane width. Tables and code blocks keep their
//! natural width and scroll horizontally instead. Alongside the lines the
//! layout records where headings landed, which spans belong to which link,
//! and which lines each copyable code block occupies.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::syntax_highlighting::SyntaxHighlighter;
use crate::domain::entities::{
    Alignment, Block, CodeBlock, Heading, Inline, LinkTarget, ListMarker, Table, TocEntry,
    plain_text, slugify,
};
use crate::domain::RenderedDocument;
use crate::presentation::theme::Theme;

const QUOTE_PREFIX: &str = "┃ ";
const EXTERNAL_MARKER: &str = " ↗";

/// A link or contents entry the reader can focus and activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget {
    pub target: LinkTarget,
    pub label: String,
    /// `(line, span)` positions drawn for this target.
    pub segments: Vec<(usize, usize)>,
}

impl FocusTarget {
    /// First line the target appears on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.segments.first().map_or(0, |(line, _)| *line)
    }
}

/// Lines occupied by a copyable code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegion {
    pub number: usize,
    pub code: String,
    pub lines: Range<usize>,
}

/// A document laid out for one width and palette.
#[derive(Debug, Clone, Default)]
pub struct DocumentView {
    pub lines: Vec<Line<'static>>,
    pub targets: Vec<FocusTarget>,
    pub code_blocks: Vec<CodeRegion>,
    scrollable: Vec<bool>,
    anchors: HashMap<String, usize>,
    max_width: usize,
}

impl DocumentView {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line of the heading carrying `anchor`.
    #[must_use]
    pub fn anchor_line(&self, anchor: &str) -> Option<usize> {
        self.anchors.get(anchor).copied()
    }

    /// Whether `line` belongs to a table or code block.
    #[must_use]
    pub fn is_scrollable(&self, line: usize) -> bool {
        self.scrollable.get(line).copied().unwrap_or(false)
    }

    /// Widest line, for clamping horizontal scroll.
    #[must_use]
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// First code block intersecting the `height` lines from `top`.
    #[must_use]
    pub fn code_block_in(&self, top: usize, height: usize) -> Option<&CodeRegion> {
        let bottom = top.saturating_add(height);
        self.code_blocks
            .iter()
            .find(|region| region.lines.start < bottom && region.lines.end > top)
    }

    /// Target following `current`, or the first one at or below `top`.
    #[must_use]
    pub fn next_target(&self, current: Option<usize>, top: usize) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match current {
            Some(i) => Some((i + 1) % self.targets.len()),
            None => Some(
                self.targets
                    .iter()
                    .position(|t| t.line() >= top)
                    .unwrap_or(0),
            ),
        }
    }

    /// Target preceding `current`, or the last one above the viewport end.
    #[must_use]
    pub fn previous_target(&self, current: Option<usize>, bottom: usize) -> Option<usize> {
        if self.targets.is_empty() {
            return None;
        }
        match current {
            Some(0) => Some(self.targets.len() - 1),
            Some(i) => Some(i - 1),
            None => Some(
                self.targets
                    .iter()
                    .rposition(|t| t.line() < bottom)
                    .unwrap_or(self.targets.len() - 1),
            ),
        }
    }
}

pub struct DocumentLayout {
    highlighter: Arc<dyn SyntaxHighlighter>,
}

impl DocumentLayout {
    #[must_use]
    pub fn new(highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        Self { highlighter }
    }

    #[must_use]
    pub fn layout(&self, document: &RenderedDocument, width: u16, theme: &Theme) -> DocumentView {
        let mut builder = Builder {
            theme,
            highlighter: self.highlighter.as_ref(),
            width: usize::from(width.max(1)),
            quote_depth: 0,
            pending_blank: None,
            view: DocumentView::default(),
        };
        builder.blocks(&document.blocks);
        builder.view
    }
}

struct Fragment {
    text: String,
    style: Style,
    target: Option<usize>,
}

struct Builder<'a> {
    theme: &'a Theme,
    highlighter: &'a dyn SyntaxHighlighter,
    width: usize,
    quote_depth: usize,
    /// Quote depth at which a separating blank line was requested.
    pending_blank: Option<usize>,
    view: DocumentView,
}

impl Builder<'_> {
    fn available(&self) -> usize {
        self.width
            .saturating_sub(QUOTE_PREFIX.width() * self.quote_depth)
            .max(1)
    }

    fn blank(&mut self) {
        if !self.view.lines.is_empty() {
            let depth = self.pending_blank.map_or(self.quote_depth, |d| d.min(self.quote_depth));
            self.pending_blank = Some(depth);
        }
    }

    fn push_line(&mut self, spans: Vec<Span<'static>>, links: &[(usize, usize)], scrollable: bool) {
        if let Some(depth) = self.pending_blank.take() {
            let depth = depth.min(self.quote_depth);
            self.emit(depth, Vec::new(), &[], false);
        }
        self.emit(self.quote_depth, spans, links, scrollable);
    }

    fn emit(
        &mut self,
        depth: usize,
        spans: Vec<Span<'static>>,
        links: &[(usize, usize)],
        scrollable: bool,
    ) {
        let mut full = Vec::with_capacity(depth + spans.len());
        full.extend((0..depth).map(|_| Span::styled(QUOTE_PREFIX, self.theme.quote_style)));
        full.extend(spans);

        let index = self.view.lines.len();
        for (span, target) in links {
            if let Some(t) = self.view.targets.get_mut(*target) {
                t.segments.push((index, span + depth));
            }
        }

        let line = Line::from(full);
        self.view.max_width = self.view.max_width.max(line.width());
        self.view.lines.push(line);
        self.view.scrollable.push(scrollable);
    }

    fn register_target(&mut self, target: LinkTarget, label: String) -> usize {
        self.view.targets.push(FocusTarget {
            target,
            label,
            segments: Vec::new(),
        });
        self.view.targets.len() - 1
    }

    fn blocks(&mut self, blocks: &[Block]) {
        let mut iter = blocks.iter().peekable();
        while let Some(block) = iter.next() {
            match block {
                Block::Heading(heading) => self.heading(heading),
                Block::Paragraph(inlines) => {
                    let fragments = self.fragments(inlines, Style::default());
                    self.wrap(fragments, Vec::new(), Vec::new());
                    self.blank();
                }
                Block::ListItem {
                    depth,
                    marker,
                    content,
                } => {
                    self.list_item(*depth, *marker, content);
                    if !matches!(iter.peek(), Some(Block::ListItem { .. })) {
                        self.blank();
                    }
                }
                Block::Quote(inner) => {
                    self.blank();
                    self.quote_depth += 1;
                    self.blocks(inner);
                    self.quote_depth -= 1;
                    self.blank();
                }
                Block::Code(code) => self.code(code),
                Block::Table(table) => self.table(table),
                Block::Rule => {
                    let rule = "─".repeat(self.available());
                    self.push_line(vec![Span::styled(rule, self.theme.dimmed_style)], &[], false);
                    self.blank();
                }
                Block::Toc(entries) => self.toc(entries),
            }
        }
    }

    fn heading(&mut self, heading: &Heading) {
        self.blank();
        // Explicit ids first, then the text slug so plain `#section` links resolve.
        let line = self.view.lines.len() + usize::from(self.pending_blank.is_some());
        let slug = Some(slugify(&heading.text())).filter(|s| !s.is_empty());
        for anchor in heading.id.iter().cloned().chain(slug) {
            self.view.anchors.entry(anchor).or_insert(line);
        }

        let style = if heading.level == 1 {
            self.theme.heading_style.add_modifier(Modifier::UNDERLINED)
        } else {
            self.theme.heading_style
        };
        let marker = format!("{} ", "#".repeat(usize::from(heading.level)));
        let indent = " ".repeat(marker.width());

        let fragments = self.fragments(&heading.content, style);
        self.wrap(
            fragments,
            vec![Span::styled(marker, self.theme.dimmed_style)],
            vec![Span::raw(indent)],
        );
        self.blank();
    }

    fn list_item(&mut self, depth: u8, marker: ListMarker, content: &[Inline]) {
        let indent = "  ".repeat(usize::from(depth));
        let marker = match marker {
            ListMarker::Bullet => "• ".to_string(),
            ListMarker::Ordered(n) => format!("{n}. "),
        };
        let continuation = " ".repeat(indent.width() + marker.width());
        let marker_style = Style::default().fg(self.theme.accent);

        let fragments = self.fragments(content, Style::default());
        self.wrap(
            fragments,
            vec![Span::raw(indent), Span::styled(marker, marker_style)],
            vec![Span::raw(continuation)],
        );
    }

    fn code(&mut self, code: &CodeBlock) {
        let code_style = self.theme.code_style;
        let available = self.available();

        let label = format!(" {} ", code.lang.as_deref().unwrap_or("code"));
        let copy = code
            .copy
            .map(|c| format!(" [y] copy #{} ", c.number))
            .unwrap_or_default();
        let fill = available.saturating_sub(label.width() + copy.width()).max(1);
        self.push_line(
            vec![
                Span::styled(label, code_style.add_modifier(Modifier::BOLD)),
                Span::styled("─".repeat(fill), self.theme.dimmed_style),
                Span::styled(copy, self.theme.dimmed_style),
            ],
            &[],
            false,
        );

        let highlighted = self
            .highlighter
            .highlight(&code.code, code.lang.as_deref(), self.theme.mode);

        let mut code_lines: Vec<Vec<Span<'static>>> = Vec::new();
        let mut current = Vec::new();
        for span in highlighted {
            let style = code_style.patch(span.style);
            for part in span.content.split_inclusive('\n') {
                if let Some(text) = part.strip_suffix('\n') {
                    let text = text.trim_end_matches('\r');
                    if !text.is_empty() {
                        current.push(Span::styled(text.to_string(), style));
                    }
                    code_lines.push(std::mem::take(&mut current));
                } else if !part.is_empty() {
                    current.push(Span::styled(part.to_string(), style));
                }
            }
        }
        if !current.is_empty() || code_lines.is_empty() {
            code_lines.push(current);
        }

        let widest = code_lines
            .iter()
            .map(|spans| spans.iter().map(Span::width).sum::<usize>())
            .max()
            .unwrap_or(0);
        let padded = (widest + 4).max(available);

        let start = self.view.lines.len() + usize::from(self.pending_blank.is_some());
        for spans in code_lines {
            let used = spans.iter().map(Span::width).sum::<usize>() + 2;
            let mut line = vec![Span::styled("  ", code_style)];
            line.extend(spans);
            line.push(Span::styled(" ".repeat(padded.saturating_sub(used)), code_style));
            self.push_line(line, &[], true);
        }

        if let Some(copy) = code.copy {
            self.view.code_blocks.push(CodeRegion {
                number: copy.number,
                code: code.code.clone(),
                lines: start..self.view.lines.len(),
            });
        }
        self.blank();
    }

    fn table(&mut self, table: &Table) {
        let widths = table.column_widths();
        if widths.is_empty() {
            return;
        }
        let scrollable = table.wrapper.is_some();
        let border = self.theme.dimmed_style;

        let rule = |left: &str, mid: &str, right: &str| {
            let body = widths
                .iter()
                .map(|w| "─".repeat(w + 2))
                .collect::<Vec<_>>()
                .join(mid);
            Span::styled(format!("{left}{body}{right}"), border)
        };

        self.push_line(vec![rule("┌", "┬", "┐")], &[], scrollable);
        let header_style = Style::default().add_modifier(Modifier::BOLD);
        self.table_row(&table.header, &widths, &table.alignments, header_style, scrollable);
        self.push_line(vec![rule("├", "┼", "┤")], &[], scrollable);
        for row in &table.rows {
            self.table_row(row, &widths, &table.alignments, Style::default(), scrollable);
        }
        self.push_line(vec![rule("└", "┴", "┘")], &[], scrollable);
        self.blank();
    }

    fn table_row(
        &mut self,
        cells: &[Vec<Inline>],
        widths: &[usize],
        alignments: &[Alignment],
        style: Style,
        scrollable: bool,
    ) {
        let border = self.theme.dimmed_style;
        let mut spans = vec![Span::styled("│", border)];
        let mut links = Vec::new();

        for (column, width) in widths.iter().enumerate() {
            let fragments = cells
                .get(column)
                .map(|cell| self.fragments(cell, style))
                .unwrap_or_default();
            let used: usize = fragments.iter().map(|f| f.text.width()).sum();
            let gap = width.saturating_sub(used);
            let (before, after) = match alignments.get(column).copied().unwrap_or_default() {
                Alignment::Left => (0, gap),
                Alignment::Right => (gap, 0),
                Alignment::Center => (gap / 2, gap - gap / 2),
            };

            spans.push(Span::raw(" ".repeat(before + 1)));
            for fragment in fragments {
                if let Some(target) = fragment.target {
                    links.push((spans.len(), target));
                }
                let text = fragment.text.replace('\n', " ");
                spans.push(Span::styled(text, fragment.style));
            }
            spans.push(Span::raw(" ".repeat(after + 1)));
            spans.push(Span::styled("│", border));
        }

        self.push_line(spans, &links, scrollable);
    }

    fn toc(&mut self, entries: &[TocEntry]) {
        let Some(top_level) = entries.iter().map(|e| e.level).min() else {
            return;
        };

        self.push_line(
            vec![Span::styled("Contents", self.theme.heading_style)],
            &[],
            false,
        );
        for entry in entries {
            let target =
                self.register_target(LinkTarget::Anchor(entry.anchor.clone()), entry.text.clone());
            let indent = "  ".repeat(usize::from(entry.level - top_level));
            self.push_line(
                vec![
                    Span::raw(indent),
                    Span::styled("· ", self.theme.dimmed_style),
                    Span::styled(entry.text.clone(), self.theme.link_style),
                ],
                &[(2, target)],
                false,
            );
        }
        self.blank();
    }

    fn fragments(&mut self, inlines: &[Inline], style: Style) -> Vec<Fragment> {
        let mut out = Vec::new();
        self.collect(inlines, style, None, &mut out);
        out
    }

    fn collect(
        &mut self,
        inlines: &[Inline],
        style: Style,
        target: Option<usize>,
        out: &mut Vec<Fragment>,
    ) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => out.push(Fragment {
                    text: text.clone(),
                    style,
                    target,
                }),
                Inline::Strong(children) => {
                    self.collect(children, style.add_modifier(Modifier::BOLD), target, out);
                }
                Inline::Emphasis(children) => {
                    self.collect(children, style.add_modifier(Modifier::ITALIC), target, out);
                }
                Inline::Strike(children) => {
                    self.collect(children, style.add_modifier(Modifier::CROSSED_OUT), target, out);
                }
                Inline::Code(code) => out.push(Fragment {
                    text: code.clone(),
                    style: style.patch(self.theme.code_style),
                    target,
                }),
                Inline::Link(link) => {
                    if target.is_some() {
                        self.collect(&link.children, style, target, out);
                        continue;
                    }
                    let mut label = plain_text(&link.children);
                    if label.is_empty() {
                        label.clone_from(&link.href);
                    }
                    let index = self.register_target(link.target.clone(), label.clone());
                    let link_style = style.patch(self.theme.link_style);
                    if link.children.is_empty() {
                        out.push(Fragment {
                            text: label,
                            style: link_style,
                            target: Some(index),
                        });
                    } else {
                        self.collect(&link.children, link_style, Some(index), out);
                    }
                    if link.target.opens_new_context() {
                        out.push(Fragment {
                            text: EXTERNAL_MARKER.to_string(),
                            style: style.patch(self.theme.dimmed_style),
                            target: Some(index),
                        });
                    }
                }
                Inline::Image { alt, .. } => out.push(Fragment {
                    text: format!("[image: {alt}]"),
                    style: style.patch(self.theme.dimmed_style),
                    target,
                }),
                Inline::LineBreak => out.push(Fragment {
                    text: "\n".to_string(),
                    style,
                    target: None,
                }),
            }
        }
    }

    /// Greedy word wrap. `first` prefixes the first line, `rest` the others.
    fn wrap(&mut self, fragments: Vec<Fragment>, first: Vec<Span<'static>>, rest: Vec<Span<'static>>) {
        let available = self.available();
        let rest_width: usize = rest.iter().map(Span::width).sum();

        let mut line = LineInProgress::new(first);
        let mut emitted = false;

        for fragment in &fragments {
            for piece in split_pieces(&fragment.text) {
                if piece == "\n" {
                    self.finish(&mut line, &rest, rest_width);
                    emitted = true;
                    continue;
                }

                let width = piece.width();
                if piece.chars().all(char::is_whitespace) {
                    if line.empty {
                        continue;
                    }
                    if line.column + width > available {
                        self.finish(&mut line, &rest, rest_width);
                        emitted = true;
                        continue;
                    }
                    line.push(piece, fragment);
                    continue;
                }

                if !line.empty && line.column + width > available {
                    self.finish(&mut line, &rest, rest_width);
                    emitted = true;
                }

                let mut remaining = piece;
                while line.column + remaining.width() > available {
                    let room = available.saturating_sub(line.column).max(1);
                    let split = split_at_width(remaining, room);
                    line.push(&remaining[..split], fragment);
                    remaining = &remaining[split..];
                    self.finish(&mut line, &rest, rest_width);
                    emitted = true;
                    if remaining.is_empty() {
                        break;
                    }
                }
                if !remaining.is_empty() {
                    line.push(remaining, fragment);
                }
            }
        }

        if !line.empty || !emitted {
            self.finish(&mut line, &rest, rest_width);
        }
    }

    fn finish(&mut self, line: &mut LineInProgress, rest: &[Span<'static>], rest_width: usize) {
        let done = std::mem::replace(line, LineInProgress::continuation(rest.to_vec(), rest_width));
        let (spans, links) = done.into_parts();
        self.push_line(spans, &links, false);
    }
}

struct LineInProgress {
    spans: Vec<Span<'static>>,
    links: Vec<(usize, usize)>,
    column: usize,
    empty: bool,
}

impl LineInProgress {
    fn new(prefix: Vec<Span<'static>>) -> Self {
        let column = prefix.iter().map(Span::width).sum();
        Self::continuation(prefix, column)
    }

    const fn continuation(prefix: Vec<Span<'static>>, column: usize) -> Self {
        Self {
            spans: prefix,
            links: Vec::new(),
            column,
            empty: true,
        }
    }

    fn push(&mut self, text: &str, fragment: &Fragment) {
        if let Some(target) = fragment.target {
            self.links.push((self.spans.len(), target));
        }
        self.spans.push(Span::styled(text.to_string(), fragment.style));
        self.column += text.width();
        self.empty = false;
    }

    /// Drops trailing whitespace spans along with their link positions.
    fn into_parts(mut self) -> (Vec<Span<'static>>, Vec<(usize, usize)>) {
        while self
            .spans
            .last()
            .is_some_and(|s| !s.content.is_empty() && s.content.trim().is_empty())
            && !self.empty
        {
            self.spans.pop();
            let len = self.spans.len();
            self.links.retain(|(span, _)| *span < len);
        }
        (self.spans, self.links)
    }
}

/// Splits into words, whitespace runs and single newlines.
fn split_pieces(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut kind = None;

    for (i, c) in text.char_indices() {
        let this = if c == '\n' {
            0
        } else if c.is_whitespace() {
            1
        } else {
            2
        };
        if kind != Some(this) || this == 0 {
            if i > start {
                pieces.push(&text[start..i]);
            }
            start = i;
            kind = Some(this);
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Byte index after the longest prefix of `s` no wider than `room`,
/// never less than one character.
fn split_at_width(s: &str, room: usize) -> usize {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > room && i > 0 {
            return i;
        }
        used += w;
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThemeMode;
    use crate::domain::entities::{CopyAffordance, Link, TableWrapper};

    struct PlainHighlighter;

    impl SyntaxHighlighter for PlainHighlighter {
        fn highlight(&self, code: &str, _: Option<&str>, _: ThemeMode) -> Vec<Span<'static>> {
            vec![Span::raw(code.to_string())]
        }
    }

    fn layout(blocks: Vec<Block>, width: u16) -> DocumentView {
        DocumentLayout::new(Arc::new(PlainHighlighter)).layout(
            &RenderedDocument::new(blocks),
            width,
            &Theme::default(),
        )
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn texts(view: &DocumentView) -> Vec<String> {
        view.lines.iter().map(text).collect()
    }

    fn para(s: &str) -> Block {
        Block::Paragraph(vec![Inline::Text(s.to_string())])
    }

    #[test]
    fn test_paragraph_wraps_at_word_boundaries() {
        let view = layout(vec![para("one two three four")], 9);
        assert_eq!(texts(&view), vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let view = layout(vec![para("abcdefghij")], 4);
        assert_eq!(texts(&view), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_blocks_separated_by_single_blank_line() {
        let view = layout(vec![para("a"), Block::Rule, para("b")], 5);
        assert_eq!(texts(&view), vec!["a", "", "─────", "", "b"]);
    }

    #[test]
    fn test_heading_anchor_points_at_heading_line() {
        let view = layout(
            vec![
                para("intro"),
                Block::Heading(Heading {
                    level: 2,
                    id: Some("usage".to_string()),
                    content: vec![Inline::Text("Usage".to_string())],
                }),
            ],
            40,
        );

        let line = view.anchor_line("usage").unwrap();
        assert_eq!(text(&view.lines[line]), "## Usage");
        assert_eq!(view.anchor_line("missing"), None);
    }

    #[test]
    fn test_heading_without_id_is_reachable_by_slug() {
        let view = layout(
            vec![
                Block::Heading(Heading {
                    level: 2,
                    id: Some("heading-0".to_string()),
                    content: vec![Inline::Text("Partial Specialization".to_string())],
                }),
                para("text"),
            ],
            40,
        );

        assert_eq!(view.anchor_line("heading-0"), Some(0));
        assert_eq!(view.anchor_line("partial-specialization"), Some(0));
    }

    #[test]
    fn test_list_items_indent_continuation() {
        let view = layout(
            vec![
                Block::ListItem {
                    depth: 0,
                    marker: ListMarker::Bullet,
                    content: vec![Inline::Text("alpha beta".to_string())],
                },
                Block::ListItem {
                    depth: 1,
                    marker: ListMarker::Ordered(2),
                    content: vec![Inline::Text("gamma".to_string())],
                },
            ],
            10,
        );

        assert_eq!(texts(&view), vec!["• alpha", "  beta", "  2. gamma"]);
    }

    #[test]
    fn test_quote_lines_are_prefixed() {
        let view = layout(vec![Block::Quote(vec![para("note")])], 20);
        assert_eq!(texts(&view), vec!["┃ note"]);
    }

    #[test]
    fn test_link_segments_and_external_marker() {
        let mut link = Link::new(
            "https://isocpp.org",
            vec![Inline::Text("isocpp".to_string())],
        );
        link.target = LinkTarget::External("https://isocpp.org".to_string());
        let view = layout(
            vec![Block::Paragraph(vec![
                Inline::Text("see ".to_string()),
                Inline::Link(link),
            ])],
            40,
        );

        assert_eq!(texts(&view), vec!["see isocpp ↗"]);
        assert_eq!(view.targets.len(), 1);
        assert_eq!(view.targets[0].label, "isocpp");
        assert_eq!(view.targets[0].segments, vec![(0, 2), (0, 3), (0, 4)]);
    }

    #[test]
    fn test_code_block_region_and_copy_label() {
        let view = layout(
            vec![
                para("before"),
                Block::Code(CodeBlock {
                    lang: Some("cpp".to_string()),
                    code: "int a;\nint b;\n".to_string(),
                    copy: Some(CopyAffordance { number: 1 }),
                }),
            ],
            30,
        );

        assert!(text(&view.lines[2]).contains("copy #1"));
        let region = &view.code_blocks[0];
        assert_eq!(region.lines, 3..5);
        assert_eq!(text(&view.lines[3]).trim_end(), "  int a;");
        assert!(view.is_scrollable(3));
        assert!(!view.is_scrollable(0));
        assert_eq!(view.code_block_in(4, 10).map(|r| r.number), Some(1));
        assert_eq!(view.code_block_in(0, 2), None);
    }

    #[test]
    fn test_wrapped_table_is_scrollable() {
        let table = Table {
            alignments: vec![Alignment::Left, Alignment::Right],
            header: vec![
                vec![Inline::Text("Name".to_string())],
                vec![Inline::Text("Size".to_string())],
            ],
            rows: vec![vec![
                vec![Inline::Text("int".to_string())],
                vec![Inline::Text("4".to_string())],
            ]],
            wrapper: Some(TableWrapper {
                class: "table-wrapper".to_string(),
            }),
        };
        let view = layout(vec![Block::Table(table)], 10);

        assert_eq!(
            texts(&view),
            vec![
                "┌──────┬──────┐",
                "│ Name │ Size │",
                "├──────┼──────┤",
                "│ int  │    4 │",
                "└──────┴──────┘",
            ]
        );
        assert!((0..5).all(|l| view.is_scrollable(l)));
        assert_eq!(view.max_width(), 15);
    }

    #[test]
    fn test_toc_entries_are_targets() {
        let view = layout(
            vec![Block::Toc(vec![
                TocEntry {
                    level: 2,
                    text: "Basics".to_string(),
                    anchor: "basics".to_string(),
                },
                TocEntry {
                    level: 3,
                    text: "Details".to_string(),
                    anchor: "heading-2".to_string(),
                },
            ])],
            40,
        );

        assert_eq!(texts(&view), vec!["Contents", "· Basics", "  · Details"]);
        assert_eq!(
            view.targets[1].target,
            LinkTarget::Anchor("heading-2".to_string())
        );
        assert_eq!(view.next_target(None, 0), Some(0));
        assert_eq!(view.next_target(Some(1), 0), Some(0));
        assert_eq!(view.previous_target(Some(0), 3), Some(1));
    }
}
