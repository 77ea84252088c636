//! Topic entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a topic: the name of its Markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates an identifier from a file name.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self(file.into())
    }

    /// Returns the file name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for TopicId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TopicId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One navigable unit of study-guide content, backed by one Markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    label: String,
    index: usize,
}

impl Topic {
    /// Creates a topic at the given position of the sequence.
    #[must_use]
    pub fn new(id: impl Into<TopicId>, label: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            index,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &TopicId {
        &self.id
    }

    /// Display label shown in the sidebar and on the step buttons.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl From<String> for TopicId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
