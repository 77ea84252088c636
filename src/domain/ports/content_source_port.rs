//! Port for obtaining topic sources.

use async_trait::async_trait;

use crate::domain::entities::TopicId;
use crate::domain::errors::ContentError;

/// Port for fetching the Markdown text of a topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSourcePort: Send + Sync {
    /// Fetches the raw Markdown of a topic file.
    async fn fetch(&self, topic: &TopicId) -> Result<String, ContentError>;

    /// Host the content is served from, if any.
    ///
    /// Links to any other host are treated as external.
    fn host(&self) -> Option<String>;

    /// Human readable origin, for logs and the header.
    fn describe(&self) -> String;
}
