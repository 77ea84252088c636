//! Rendered document model.
//!
//! A [`RenderedDocument`] is what a Markdown source turns into before it is
//! laid out on screen. It is replaced wholesale on every navigation.

use unicode_width::UnicodeWidthStr;

use super::topic::TopicId;

/// Inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link(Link),
    Image { alt: String, src: String },
    LineBreak,
}

/// Where activating a link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Not yet classified.
    Unresolved,
    /// A heading of the current document.
    Anchor(String),
    /// Another topic of the guide, optionally at a heading.
    Topic {
        id: TopicId,
        anchor: Option<String>,
    },
    /// A resource on the content host that is not a topic.
    SameSite(String),
    /// A resource on another host.
    External(String),
}

impl LinkTarget {
    /// Links to other hosts open in a new browsing context.
    #[must_use]
    pub const fn opens_new_context(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// The new context never gets a handle back to the reader.
    #[must_use]
    pub const fn keeps_opener(&self) -> bool {
        !self.opens_new_context()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub children: Vec<Inline>,
    pub target: LinkTarget,
}

impl Link {
    #[must_use]
    pub fn new(href: impl Into<String>, children: Vec<Inline>) -> Self {
        Self {
            href: href.into(),
            children,
            target: LinkTarget::Unresolved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub id: Option<String>,
    pub content: Vec<Inline>,
}

impl Heading {
    #[must_use]
    pub fn text(&self) -> String {
        plain_text(&self.content)
    }
}

/// Copy-to-clipboard affordance attached to a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyAffordance {
    /// 1-based number shown next to the block.
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub lang: Option<String>,
    pub code: String,
    pub copy: Option<CopyAffordance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Horizontally scrollable container around a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWrapper {
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub alignments: Vec<Alignment>,
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
    pub wrapper: Option<TableWrapper>,
}

impl Table {
    /// Display width of each column over header and body.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|c| {
                std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(c))
                    .map(|cell| plain_text(cell).width())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Ordered(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

/// Block content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Vec<Inline>),
    ListItem {
        depth: u8,
        marker: ListMarker,
        content: Vec<Inline>,
    },
    Quote(Vec<Block>),
    Code(CodeBlock),
    Table(Table),
    Rule,
    Toc(Vec<TocEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    #[must_use]
    pub const fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Top-level headings in document order.
    #[must_use]
    pub fn headings(&self) -> Vec<&Heading> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn code_blocks(&self) -> Vec<&CodeBlock> {
        let mut out = Vec::new();
        collect_code_blocks(&self.blocks, &mut out);
        out
    }

    #[must_use]
    pub fn toc(&self) -> Option<&[TocEntry]> {
        self.blocks.iter().find_map(|b| match b {
            Block::Toc(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }

    /// Title taken from the first heading.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.headings().first().map(|h| h.text())
    }

    /// Approximate number of rows the document occupies at `width` columns.
    #[must_use]
    pub fn estimated_rows(&self, width: u16) -> usize {
        let width = usize::from(width.max(1));
        self.blocks.iter().map(|b| block_rows(b, width)).sum()
    }
}

fn collect_code_blocks<'a>(blocks: &'a [Block], out: &mut Vec<&'a CodeBlock>) {
    for block in blocks {
        match block {
            Block::Code(code) => out.push(code),
            Block::Quote(inner) => collect_code_blocks(inner, out),
            _ => {}
        }
    }
}

fn wrapped_rows(text_width: usize, width: usize) -> usize {
    text_width.div_ceil(width).max(1)
}

fn block_rows(block: &Block, width: usize) -> usize {
    match block {
        Block::Heading(_) => 2,
        Block::Paragraph(inlines) => wrapped_rows(plain_text(inlines).width(), width) + 1,
        Block::ListItem { depth, content, .. } => {
            let indent = usize::from(*depth) * 2 + 2;
            wrapped_rows(plain_text(content).width(), width.saturating_sub(indent).max(1))
        }
        Block::Quote(inner) => inner
            .iter()
            .map(|b| block_rows(b, width.saturating_sub(2).max(1)))
            .sum(),
        Block::Code(code) => code.code.lines().count() + 3,
        Block::Table(table) => table.rows.len() + 4,
        Block::Rule => 2,
        Block::Toc(entries) => entries.len() + 3,
    }
}

/// Concatenated text of inline content.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(inlines, &mut out);
    out
}

fn push_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Strong(children) | Inline::Emphasis(children) | Inline::Strike(children) => {
                push_plain_text(children, out);
            }
            Inline::Link(link) => push_plain_text(&link.children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push(' '),
        }
    }
}

/// GitHub-style anchor slug of a heading text.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if c == ' ' || c == '-' || c == '_' {
            slug.push('-');
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_plain_text_flattens_nesting() {
        let inlines = vec![
            text("Use "),
            Inline::Strong(vec![Inline::Code("std::move".to_string())]),
            text(" with "),
            Inline::Link(Link::new("x", vec![text("care")])),
        ];
        assert_eq!(plain_text(&inlines), "Use std::move with care");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Smart Pointers & RAII"), "smart-pointers--raii");
        assert_eq!(slugify("  unique_ptr  "), "unique-ptr");
        assert_eq!(slugify("Rule of 3/5/0"), "rule-of-350");
    }

    #[test]
    fn test_external_links_drop_opener() {
        let external = LinkTarget::External("https://cppreference.com".to_string());
        let anchor = LinkTarget::Anchor("intro".to_string());

        assert!(external.opens_new_context());
        assert!(!external.keeps_opener());
        assert!(!anchor.opens_new_context());
        assert!(anchor.keeps_opener());
    }

    #[test]
    fn test_column_widths_cover_ragged_rows() {
        let table = Table {
            alignments: vec![],
            header: vec![vec![text("Name")], vec![text("Header")]],
            rows: vec![
                vec![vec![text("unique_ptr")]],
                vec![vec![text("a")], vec![text("b")], vec![text("extra")]],
            ],
            wrapper: None,
        };
        assert_eq!(table.column_widths(), vec![10, 6, 5]);
    }

    #[test]
    fn test_estimated_rows_grows_with_content() {
        let short = RenderedDocument::new(vec![Block::Paragraph(vec![text("hi")])]);
        let long = RenderedDocument::new(vec![Block::Paragraph(vec![text(&"x".repeat(400))])]);

        assert_eq!(short.estimated_rows(80), 2);
        assert_eq!(long.estimated_rows(80), 6);
    }

    #[test]
    fn test_code_blocks_include_quoted() {
        let code = CodeBlock {
            lang: Some("cpp".to_string()),
            code: "int x;".to_string(),
            copy: None,
        };
        let doc = RenderedDocument::new(vec![
            Block::Code(code.clone()),
            Block::Quote(vec![Block::Code(code)]),
        ]);
        assert_eq!(doc.code_blocks().len(), 2);
    }
}
