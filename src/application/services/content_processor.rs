//! Post-processing applied to every freshly rendered topic.

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::domain::entities::{
    Block, CopyAffordance, Inline, LinkTarget, RenderedDocument, TableWrapper, TocEntry,
};
use crate::domain::TopicCatalog;

/// Class attached to every table container.
pub const TABLE_WRAPPER_CLASS: &str = "table-wrapper";

/// Thresholds that decide whether a table of contents is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocPolicy {
    /// Minimum estimated height in rows.
    pub min_rows: usize,
    pub min_headings: usize,
}

impl Default for TocPolicy {
    fn default() -> Self {
        Self {
            min_rows: 42,
            min_headings: 3,
        }
    }
}

pub struct ContentProcessor {
    catalog: Arc<TopicCatalog>,
    content_host: Option<String>,
    toc: TocPolicy,
}

impl ContentProcessor {
    /// `content_host` is the host topics are served from, `None` for a
    /// local directory.
    #[must_use]
    pub const fn new(
        catalog: Arc<TopicCatalog>,
        content_host: Option<String>,
        toc: TocPolicy,
    ) -> Self {
        Self {
            catalog,
            content_host,
            toc,
        }
    }

    /// Classifies links, wraps tables, numbers code blocks and inserts the
    /// table of contents when the document is long enough at `width`.
    ///
    /// The table of contents is decided once per load, using the pane width
    /// at the time the fetch was issued. Resizing the terminal afterwards
    /// does not add or remove it; reloading the topic does.
    #[must_use]
    pub fn process(&self, mut document: RenderedDocument, width: u16) -> RenderedDocument {
        self.classify_blocks(&mut document.blocks);
        wrap_tables(&mut document.blocks);

        let mut copy_number = 0;
        attach_copy_affordances(&mut document.blocks, &mut copy_number);

        self.insert_toc(&mut document, width);
        document
    }

    fn insert_toc(&self, document: &mut RenderedDocument, width: u16) {
        let heading_count = document.headings().len();
        let rows = document.estimated_rows(width);

        if heading_count < self.toc.min_headings || rows <= self.toc.min_rows {
            debug!(heading_count, rows, "No table of contents needed");
            return;
        }

        let mut entries = Vec::with_capacity(heading_count);
        let mut first_heading = None;
        let mut ordinal = 0;

        for (position, block) in document.blocks.iter_mut().enumerate() {
            let Block::Heading(heading) = block else {
                continue;
            };
            first_heading.get_or_insert(position);

            let anchor = heading
                .id
                .get_or_insert_with(|| format!("heading-{ordinal}"))
                .clone();
            ordinal += 1;

            entries.push(TocEntry {
                level: heading.level,
                text: heading.text(),
                anchor,
            });
        }

        if let Some(position) = first_heading {
            debug!(entries = entries.len(), rows, "Inserting table of contents");
            document.blocks.insert(position + 1, Block::Toc(entries));
        }
    }

    fn classify_blocks(&self, blocks: &mut [Block]) {
        for block in blocks {
            match block {
                Block::Heading(heading) => self.classify_inlines(&mut heading.content),
                Block::Paragraph(content) | Block::ListItem { content, .. } => {
                    self.classify_inlines(content);
                }
                Block::Quote(inner) => self.classify_blocks(inner),
                Block::Table(table) => {
                    for cell in table.header.iter_mut().chain(table.rows.iter_mut().flatten()) {
                        self.classify_inlines(cell);
                    }
                }
                Block::Code(_) | Block::Rule | Block::Toc(_) => {}
            }
        }
    }

    fn classify_inlines(&self, inlines: &mut [Inline]) {
        for inline in inlines {
            match inline {
                Inline::Link(link) => {
                    link.target = self.classify(&link.href);
                    self.classify_inlines(&mut link.children);
                }
                Inline::Strong(children) | Inline::Emphasis(children) | Inline::Strike(children) => {
                    self.classify_inlines(children);
                }
                _ => {}
            }
        }
    }

    /// Decides where a link leads.
    #[must_use]
    pub fn classify(&self, href: &str) -> LinkTarget {
        let href = href.trim();

        if let Some(fragment) = href.strip_prefix('#') {
            return match self.catalog.resolve(fragment) {
                Some(topic) => LinkTarget::Topic {
                    id: topic.id().clone(),
                    anchor: None,
                },
                None => LinkTarget::Anchor(fragment.to_string()),
            };
        }

        if let Ok(url) = Url::parse(href) {
            let same_host = matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some()
                && url.host_str() == self.content_host.as_deref();

            if !same_host {
                return LinkTarget::External(href.to_string());
            }

            let file = url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or("");
            return self.topic_or_same_site(file, url.fragment(), href);
        }

        let (path, fragment) = match href.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (href, None),
        };
        self.topic_or_same_site(path, fragment, href)
    }

    fn topic_or_same_site(&self, path: &str, fragment: Option<&str>, href: &str) -> LinkTarget {
        let anchor = fragment.filter(|f| !f.is_empty()).map(str::to_string);

        match self.catalog.resolve(path) {
            Some(topic) => LinkTarget::Topic {
                id: topic.id().clone(),
                anchor,
            },
            None => LinkTarget::SameSite(href.to_string()),
        }
    }
}

fn wrap_tables(blocks: &mut [Block]) {
    for block in blocks {
        match block {
            Block::Table(table) => {
                table.wrapper = Some(TableWrapper {
                    class: TABLE_WRAPPER_CLASS.to_string(),
                });
            }
            Block::Quote(inner) => wrap_tables(inner),
            _ => {}
        }
    }
}

fn attach_copy_affordances(blocks: &mut [Block], counter: &mut usize) {
    for block in blocks {
        match block {
            Block::Code(code) => {
                *counter += 1;
                code.copy = Some(CopyAffordance { number: *counter });
            }
            Block::Quote(inner) => attach_copy_affordances(inner, counter),
            _ => {}
        }
    }
}
