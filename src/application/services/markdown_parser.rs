use std::iter::Peekable;
use std::str::{CharIndices, Lines};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{
    Alignment, Block, CodeBlock, Heading, Inline, Link, ListMarker, RenderedDocument, Table,
};
use crate::domain::ports::MarkdownRenderer;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid regex")
});
static HEADING_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\{#([A-Za-z0-9_.:-]+)\}$").expect("valid regex")
});
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)([-*+]|\d{1,9}[.)])[ \t]+(.*)$").expect("valid regex")
});
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$")
        .expect("valid regex")
});
static TABLE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?$")
        .expect("valid regex")
});

/// Line-oriented Markdown renderer used by the reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMarkdownRenderer;

impl BlockMarkdownRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for BlockMarkdownRenderer {
    fn render(&self, source: &str) -> RenderedDocument {
        RenderedDocument::new(parse_markdown(source))
    }
}

#[must_use]
pub fn parse_markdown(content: &str) -> Vec<Block> {
    Parser::parse(content)
}

struct Fence {
    marker: char,
    len: usize,
    indent: usize,
}

struct Parser;

impl Parser {
    fn parse(input: &str) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();
        let mut lines = input.lines().peekable();

        while let Some(line) = lines.next() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                continue;
            }

            if let Some(fence) = open_fence(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Code(read_fenced_code(trimmed, &fence, &mut lines)));
                continue;
            }

            if let Some(heading) = parse_heading(trimmed) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Heading(heading));
                continue;
            }

            if !paragraph.is_empty() && is_setext_underline(trimmed) {
                let level = if trimmed.starts_with('=') { 1 } else { 2 };
                let text = paragraph
                    .drain(..)
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join(" ");
                blocks.push(Block::Heading(heading_from_text(level, &text)));
                continue;
            }

            if RULE_RE.is_match(trimmed) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Rule);
                continue;
            }

            if trimmed.starts_with('>') {
                flush_paragraph(&mut paragraph, &mut blocks);
                let mut quoted = String::new();
                push_quote_line(trimmed, &mut quoted);
                while let Some(next) = lines.peek() {
                    let next = next.trim();
                    if !next.starts_with('>') {
                        break;
                    }
                    push_quote_line(next, &mut quoted);
                    lines.next();
                }
                blocks.push(Block::Quote(Self::parse(&quoted)));
                continue;
            }

            if let Some((depth, marker, text)) = parse_list_item(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                let mut content = text.to_string();
                while let Some(next) = lines.peek() {
                    if !is_list_continuation(next) {
                        break;
                    }
                    content.push(' ');
                    content.push_str(next.trim());
                    lines.next();
                }
                blocks.push(Block::ListItem {
                    depth,
                    marker,
                    content: parse_inline(&content),
                });
                continue;
            }

            if line.contains('|')
                && lines
                    .peek()
                    .is_some_and(|next| TABLE_SEPARATOR_RE.is_match(next.trim()))
            {
                flush_paragraph(&mut paragraph, &mut blocks);
                let separator = lines.next().unwrap_or_default();
                blocks.push(Block::Table(read_table(line, separator, &mut lines)));
                continue;
            }

            paragraph.push(line);
        }

        flush_paragraph(&mut paragraph, &mut blocks);
        blocks
    }
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if paragraph.is_empty() {
        return;
    }

    let mut inlines = Vec::new();
    let count = paragraph.len();
    for (i, raw) in paragraph.drain(..).enumerate() {
        let hard_break = raw.ends_with("  ") || raw.trim_end().ends_with('\\');
        let text = raw.trim();
        let text = if hard_break {
            text.trim_end_matches('\\')
        } else {
            text
        };
        inlines.extend(parse_inline(text));

        if i + 1 < count {
            if hard_break {
                inlines.push(Inline::LineBreak);
            } else {
                inlines.push(Inline::Text(" ".to_string()));
            }
        }
    }

    blocks.push(Block::Paragraph(normalize(inlines)));
}

fn open_fence(line: &str) -> Option<Fence> {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }

    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    if marker == '`' && trimmed[len..].contains('`') {
        return None;
    }

    Some(Fence {
        marker,
        len,
        indent,
    })
}

fn read_fenced_code(opening: &str, fence: &Fence, lines: &mut Peekable<Lines>) -> CodeBlock {
    let info = opening[fence.len..].trim();
    let lang = info
        .split_whitespace()
        .next()
        .map(|l| l.trim_start_matches('{').trim_end_matches('}').to_string())
        .filter(|l| !l.is_empty());

    let mut code = String::new();
    for line in lines.by_ref() {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == fence.marker).count();
        if run >= fence.len && trimmed[run..].trim().is_empty() {
            break;
        }

        let strip = line
            .chars()
            .take(fence.indent)
            .take_while(|c| *c == ' ')
            .count();
        code.push_str(&line[strip..]);
        code.push('\n');
    }

    if code.ends_with('\n') {
        code.pop();
    }

    CodeBlock {
        lang,
        code,
        copy: None,
    }
}

fn parse_heading(trimmed: &str) -> Option<Heading> {
    let caps = HEADING_RE.captures(trimmed)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    let text = caps.get(2).map_or("", |m| m.as_str());
    Some(heading_from_text(level, text))
}

fn heading_from_text(level: u8, text: &str) -> Heading {
    let (text, id) = match HEADING_ID_RE.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.start());
            (&text[..whole], caps.get(1).map(|m| m.as_str().to_string()))
        }
        None => (text, None),
    };

    Heading {
        level,
        id,
        content: parse_inline(text.trim()),
    }
}

fn is_setext_underline(trimmed: &str) -> bool {
    !trimmed.is_empty()
        && (trimmed.chars().all(|c| c == '=') || trimmed.chars().all(|c| c == '-'))
}

fn push_quote_line(line: &str, out: &mut String) {
    let content = line.strip_prefix('>').unwrap_or(line);
    let content = content.strip_prefix(' ').unwrap_or(content);
    out.push_str(content);
    out.push('\n');
}

fn parse_list_item(line: &str) -> Option<(u8, ListMarker, &str)> {
    let caps = LIST_ITEM_RE.captures(line)?;
    let indent: usize = caps
        .get(1)?
        .as_str()
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    let depth = u8::try_from(indent / 2).unwrap_or(u8::MAX);

    let marker_text = caps.get(2)?.as_str();
    let marker = if marker_text.ends_with(['.', ')']) {
        let number = marker_text[..marker_text.len() - 1].parse().ok()?;
        ListMarker::Ordered(number)
    } else {
        ListMarker::Bullet
    };

    Some((depth, marker, caps.get(3)?.as_str()))
}

fn is_list_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && line.starts_with([' ', '\t'])
        && parse_list_item(line).is_none()
        && open_fence(line).is_none()
        && !trimmed.starts_with('>')
        && !trimmed.starts_with('#')
        && !trimmed.starts_with('|')
}

fn read_table(header: &str, separator: &str, lines: &mut Peekable<Lines>) -> Table {
    let header = split_row(header);
    let alignments = split_row(separator)
        .iter()
        .map(|cell| {
            let cell = cell.trim();
            match (cell.starts_with(':'), cell.ends_with(':')) {
                (true, true) => Alignment::Center,
                (false, true) => Alignment::Right,
                _ => Alignment::Left,
            }
        })
        .collect();

    let mut rows = Vec::new();
    while let Some(next) = lines.peek() {
        if next.trim().is_empty() || !next.contains('|') {
            break;
        }
        rows.push(
            split_row(next)
                .iter()
                .map(|cell| parse_inline(cell.trim()))
                .collect(),
        );
        lines.next();
    }

    Table {
        alignments,
        header: header.iter().map(|cell| parse_inline(cell.trim())).collect(),
        rows,
        wrapper: None,
    }
}

/// Splits a pipe table row, honouring `\|` escapes and code spans.
fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = if trimmed.ends_with('|') && !trimmed.ends_with("\\|") {
        &trimmed[..trimmed.len() - 1]
    } else {
        trimmed
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_code = false;
    let mut chars = trimmed.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '`' => {
                in_code = !in_code;
                current.push(c);
            }
            '|' if !in_code => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);
    cells
}

#[must_use]
pub fn parse_inline(input: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut start = 0;

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => handle_escape(input, idx, &mut start, &mut nodes, &mut chars),
            '`' => handle_backtick(input, idx, &mut start, &mut nodes, &mut chars),
            '*' | '_' => handle_emphasis(input, idx, ch, &mut start, &mut nodes, &mut chars),
            '~' => handle_tilde(input, idx, &mut start, &mut nodes, &mut chars),
            '!' => handle_image(input, idx, &mut start, &mut nodes, &mut chars),
            '[' => handle_link(input, idx, &mut start, &mut nodes, &mut chars),
            '<' => handle_autolink(input, idx, &mut start, &mut nodes, &mut chars),
            _ => {}
        }
    }

    if start < input.len() {
        nodes.push(Inline::Text(input[start..].to_string()));
    }

    normalize(nodes)
}

fn push_pending(input: &str, idx: usize, start: usize, nodes: &mut Vec<Inline>) {
    if idx > start {
        nodes.push(Inline::Text(input[start..idx].to_string()));
    }
}

fn handle_escape(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    let Some(next) = input[idx + 1..].chars().next() else {
        return;
    };
    if !next.is_ascii_punctuation() {
        return;
    }

    push_pending(input, idx, *start, nodes);
    *start = idx + 1;
    advance_chars(chars, idx + 1 + next.len_utf8());
}

fn handle_backtick(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    let run = input[idx..].chars().take_while(|c| *c == '`').count();
    let delimiter = "`".repeat(run);
    let content_start = idx + run;

    let Some(end_offset) = input[content_start..].find(&delimiter) else {
        advance_chars(chars, content_start);
        return;
    };

    push_pending(input, idx, *start, nodes);

    let content = &input[content_start..content_start + end_offset];
    let content = if content.len() > 1 && content.starts_with(' ') && content.ends_with(' ') {
        &content[1..content.len() - 1]
    } else {
        content
    };
    nodes.push(Inline::Code(content.to_string()));

    let end_total = content_start + end_offset + run;
    advance_chars(chars, end_total);
    *start = end_total;
}

fn handle_emphasis(
    input: &str,
    idx: usize,
    marker: char,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    if marker == '_'
        && input[..idx]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    {
        return;
    }

    let double: String = [marker, marker].iter().collect();
    let is_strong = input[idx..].starts_with(&double);
    let delimiter = if is_strong {
        double
    } else {
        marker.to_string()
    };
    let content_start = idx + delimiter.len();

    let opens = input[content_start..]
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace() && c != marker);
    if !opens {
        if is_strong {
            advance_chars(chars, content_start);
        }
        return;
    }

    let Some(end_offset) = find_closing(&input[content_start..], &delimiter, marker) else {
        if is_strong {
            advance_chars(chars, content_start);
        }
        return;
    };

    push_pending(input, idx, *start, nodes);

    let inner = &input[content_start..content_start + end_offset];
    let children = parse_inline(inner);
    nodes.push(if is_strong {
        Inline::Strong(children)
    } else {
        Inline::Emphasis(children)
    });

    let end_total = content_start + end_offset + delimiter.len();
    advance_chars(chars, end_total);
    *start = end_total;
}

/// Finds a closing delimiter that is not preceded by whitespace and, for
/// underscores, not followed by a word character.
fn find_closing(haystack: &str, delimiter: &str, marker: char) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(delimiter) {
        let pos = from + offset;
        let before_ok = pos > 0
            && haystack[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_whitespace());
        let after = &haystack[pos + delimiter.len()..];
        let after_ok = marker != '_' || !after.chars().next().is_some_and(char::is_alphanumeric);
        let not_longer_run = delimiter.len() > 1 || !after.starts_with(marker);

        if before_ok && after_ok && not_longer_run {
            return Some(pos);
        }
        from = pos + delimiter.len();
    }
    None
}

fn handle_tilde(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    if !input[idx..].starts_with("~~") {
        return;
    }

    if let Some(end_offset) = input[idx + 2..].find("~~") {
        push_pending(input, idx, *start, nodes);

        let inner_content = &input[idx + 2..idx + 2 + end_offset];
        nodes.push(Inline::Strike(parse_inline(inner_content)));

        let end_total = idx + 2 + end_offset + 2;
        advance_chars(chars, end_total);
        *start = end_total;
    }
}

/// Parses `[text](href "title")` starting at the opening bracket.
///
/// Returns the text, the destination and the end offset.
fn parse_link_parts(input: &str, bracket: usize) -> Option<(&str, &str, usize)> {
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in input[bracket..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(bracket + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;

    let rest = &input[close + 1..];
    if !rest.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    let mut paren_close = None;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    paren_close = Some(close + 1 + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let paren_close = paren_close?;

    let destination = input[close + 2..paren_close].trim();
    let href = destination
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_start_matches('<')
        .trim_end_matches('>');

    Some((&input[bracket + 1..close], href, paren_close + 1))
}

fn handle_link(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    let Some((text, href, end)) = parse_link_parts(input, idx) else {
        return;
    };

    push_pending(input, idx, *start, nodes);
    nodes.push(Inline::Link(Link::new(href, parse_inline(text))));

    advance_chars(chars, end);
    *start = end;
}

fn handle_image(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    if !input[idx..].starts_with("![") {
        return;
    }
    let Some((alt, src, end)) = parse_link_parts(input, idx + 1) else {
        return;
    };

    push_pending(input, idx, *start, nodes);
    nodes.push(Inline::Image {
        alt: alt.to_string(),
        src: src.to_string(),
    });

    advance_chars(chars, end);
    *start = end;
}

fn handle_autolink(
    input: &str,
    idx: usize,
    start: &mut usize,
    nodes: &mut Vec<Inline>,
    chars: &mut Peekable<CharIndices>,
) {
    let Some(end_offset) = input[idx + 1..].find('>') else {
        return;
    };
    let inner = &input[idx + 1..idx + 1 + end_offset];
    let is_url = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| inner.starts_with(scheme));
    if !is_url || inner.contains(char::is_whitespace) {
        return;
    }

    push_pending(input, idx, *start, nodes);
    nodes.push(Inline::Link(Link::new(
        inner,
        vec![Inline::Text(inner.to_string())],
    )));

    let end_total = idx + 1 + end_offset + 1;
    advance_chars(chars, end_total);
    *start = end_total;
}

fn advance_chars(chars: &mut Peekable<CharIndices>, target: usize) {
    while let Some((curr_idx, _)) = chars.peek() {
        if *curr_idx < target {
            chars.next();
        } else {
            break;
        }
    }
}

/// Merges adjacent text runs and drops empty ones.
fn normalize(nodes: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(t) if t.is_empty() => {}
            Inline::Text(t) => {
                if let Some(Inline::Text(prev)) = out.last_mut() {
                    prev.push_str(&t);
                } else {
                    out.push(Inline::Text(t));
                }
            }
            other => out.push(other),
        }
    }
    out
}
