//! Content source adapters.

mod file_source;
mod http_source;

use std::sync::Arc;
use std::time::Duration;

pub use file_source::FileContentSource;
pub use http_source::HttpContentSource;

use crate::domain::errors::ContentError;
use crate::domain::ports::ContentSourcePort;

/// Picks the adapter matching the shape of `source`: an `http(s)://` URL or
/// a directory (optionally written as a `file://` URL).
///
/// # Errors
/// Returns error if a URL source is malformed.
pub fn content_source_from(
    source: &str,
    timeout: Option<Duration>,
) -> Result<Arc<dyn ContentSourcePort>, ContentError> {
    let source = source.trim();

    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(Arc::new(HttpContentSource::new(source, timeout)?));
    }

    let path = source.strip_prefix("file://").unwrap_or(source);
    if path.is_empty() {
        return Err(ContentError::invalid_source(source, "empty source"));
    }
    Ok(Arc::new(FileContentSource::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_adapter_by_shape() {
        let http = content_source_from("https://example.org/guide/", None).unwrap();
        assert_eq!(http.host().as_deref(), Some("example.org"));

        let dir = content_source_from("file:///srv/guide", None).unwrap();
        assert!(dir.host().is_none());
        assert_eq!(dir.describe(), "/srv/guide");

        assert!(content_source_from("  ", None).is_err());
    }
}
