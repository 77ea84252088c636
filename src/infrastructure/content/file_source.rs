//! Topic source backed by a local directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::TopicId;
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentSourcePort;

/// Reads topic files from a directory.
pub struct FileContentSource {
    root: PathBuf,
}

impl FileContentSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a topic file. Ids escaping the directory are rejected.
    ///
    /// # Errors
    /// Returns error for absolute ids or ids containing `..`.
    pub fn topic_path(&self, topic: &TopicId) -> Result<PathBuf, ContentError> {
        let relative = Path::new(topic.as_str());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ContentError::invalid_source(
                topic.as_str(),
                "topic must be a path inside the content directory",
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSourcePort for FileContentSource {
    async fn fetch(&self, topic: &TopicId) -> Result<String, ContentError> {
        let path = self.topic_path(topic)?;
        debug!(path = %path.display(), "Reading topic");

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentError::io(topic.as_str(), "file not found"),
            _ => ContentError::io(topic.as_str(), e.to_string()),
        })?;

        String::from_utf8(bytes).map_err(|_| ContentError::Decode {
            file: topic.to_string(),
        })
    }

    fn host(&self) -> Option<String> {
        None
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
