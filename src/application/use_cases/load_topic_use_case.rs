//! Load topic use case implementation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::ContentProcessor;
use crate::domain::entities::{RenderedDocument, TopicId};
use crate::domain::errors::ContentError;
use crate::domain::ports::{ContentSourcePort, MarkdownRenderer};

/// Fetches a topic file, renders it and post-processes the result.
#[derive(Clone)]
pub struct LoadTopicUseCase {
    source: Arc<dyn ContentSourcePort>,
    renderer: Arc<dyn MarkdownRenderer>,
    processor: Arc<ContentProcessor>,
}

impl LoadTopicUseCase {
    #[must_use]
    pub const fn new(
        source: Arc<dyn ContentSourcePort>,
        renderer: Arc<dyn MarkdownRenderer>,
        processor: Arc<ContentProcessor>,
    ) -> Self {
        Self {
            source,
            renderer,
            processor,
        }
    }

    /// Loads `topic` laid out for a content area `width` columns wide.
    ///
    /// # Errors
    /// Returns the source's [`ContentError`] when the file cannot be fetched.
    pub async fn execute(
        &self,
        topic: &TopicId,
        width: u16,
    ) -> Result<RenderedDocument, ContentError> {
        debug!(topic = %topic, source = %self.source.describe(), "Fetching topic");

        let markdown = self.source.fetch(topic).await.map_err(|e| {
            warn!(topic = %topic, error = %e, "Topic fetch failed");
            e
        })?;

        let document = self.renderer.render(&markdown);
        let document = self.processor.process(document, width);

        debug!(
            topic = %topic,
            bytes = markdown.len(),
            blocks = document.blocks.len(),
            "Topic rendered"
        );
        Ok(document)
    }
}
