use crate::domain::entities::RenderedDocument;

/// Converts Markdown text into a rendered document.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> RenderedDocument;
}
