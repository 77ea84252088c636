//! Content loading error types.

use thiserror::Error;

/// Failure to obtain the Markdown source of a topic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("network error while fetching {file}: {message}")]
    Network { file: String, message: String },

    #[error("{file} returned HTTP {status}")]
    HttpStatus { file: String, status: u16 },

    #[error("could not read {file}: {message}")]
    Io { file: String, message: String },

    #[error("{file} is not valid UTF-8 text")]
    Decode { file: String },

    #[error("invalid content source {source_ref}: {reason}")]
    InvalidSource { source_ref: String, reason: String },
}

impl ContentError {
    /// Creates network error.
    #[must_use]
    pub fn network(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates HTTP status error.
    #[must_use]
    pub fn status(file: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            file: file.into(),
            status,
        }
    }

    /// Creates I/O error.
    #[must_use]
    pub fn io(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates invalid source error.
    #[must_use]
    pub fn invalid_source(source_ref: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            source_ref: source_ref.into(),
            reason: reason.into(),
        }
    }

    /// Name of the file that failed, or the source reference.
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Network { file, .. }
            | Self::HttpStatus { file, .. }
            | Self::Io { file, .. }
            | Self::Decode { file } => file,
            Self::InvalidSource { source_ref, .. } => source_ref,
        }
    }

    /// Human readable detail without the file name.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Network { message, .. } | Self::Io { message, .. } => message.clone(),
            Self::HttpStatus { status, .. } => format!("HTTP {status}"),
            Self::Decode { .. } => "not valid UTF-8 text".to_string(),
            Self::InvalidSource { reason, .. } => reason.clone(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_and_detail() {
        let error = ContentError::status("4-Templates.md", 404);

        assert_eq!(error.file(), "4-Templates.md");
        assert_eq!(error.detail(), "HTTP 404");
        assert_eq!(error.to_string(), "4-Templates.md returned HTTP 404");
        assert!(error.is_network_error());
    }

    #[test]
    fn test_io_is_not_network() {
        let error = ContentError::io("CheatSheet.md", "No such file or directory");
        assert!(!error.is_network_error());
        assert_eq!(error.detail(), "No such file or directory");
    }
}
