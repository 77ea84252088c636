//! Topic source served over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::domain::entities::TopicId;
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentSourcePort;

const USER_AGENT: &str = concat!("studyguide/", env!("CARGO_PKG_VERSION"));

/// Fetches `<base>/<file>` with a plain GET.
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
}

impl HttpContentSource {
    /// Creates a source rooted at `base_url`.
    ///
    /// Without a `timeout` requests wait indefinitely.
    ///
    /// # Errors
    /// Returns error if the URL is not an absolute http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ContentError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ContentError::invalid_source(base_url, e.to_string()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ContentError::invalid_source(
                base_url.as_str(),
                "only http and https are supported",
            ));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ContentError::invalid_source(
                base_url.as_str(),
                format!("failed to create HTTP client: {e}"),
            )
        })?;

        Ok(Self { client, base_url })
    }

    /// Address of a topic file.
    ///
    /// # Errors
    /// Returns error if the file name does not form a valid URL.
    pub fn topic_url(&self, topic: &TopicId) -> Result<Url, ContentError> {
        self.base_url
            .join(topic.as_str())
            .map_err(|e| ContentError::invalid_source(topic.as_str(), e.to_string()))
    }
}

#[async_trait]
impl ContentSourcePort for HttpContentSource {
    async fn fetch(&self, topic: &TopicId) -> Result<String, ContentError> {
        let url = self.topic_url(topic)?;
        debug!(url = %url, "Requesting topic");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(topic = %topic, error = %e, "Topic request failed");
            if e.is_timeout() {
                ContentError::network(topic.as_str(), "request timed out")
            } else if e.is_connect() {
                ContentError::network(topic.as_str(), "failed to connect")
            } else {
                ContentError::network(topic.as_str(), e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::status(topic.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ContentError::network(topic.as_str(), e.to_string()))
    }

    fn host(&self) -> Option<String> {
        self.base_url.host_str().map(str::to_string)
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response and returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/markdown\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/guide")
    }

    #[test]
    fn test_topic_url_joins_base_path() {
        let source = HttpContentSource::new("https://example.org/cpp", None).unwrap();
        let url = source.topic_url(&TopicId::new("1-OOP.md")).unwrap();

        assert_eq!(url.as_str(), "https://example.org/cpp/1-OOP.md");
        assert_eq!(source.host().as_deref(), Some("example.org"));
    }

    #[test]
    fn test_rejects_non_http_sources() {
        assert!(matches!(
            HttpContentSource::new("ftp://example.org/", None),
            Err(ContentError::InvalidSource { .. })
        ));
        assert!(HttpContentSource::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = serve_once("200 OK", "# Overview").await;
        let source = HttpContentSource::new(&base, Some(Duration::from_secs(5))).unwrap();

        let text = source.fetch(&TopicId::new("Overview.md")).await.unwrap();
        assert_eq!(text, "# Overview");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base = serve_once("404 Not Found", "missing").await;
        let source = HttpContentSource::new(&base, Some(Duration::from_secs(5))).unwrap();

        let err = source
            .fetch(&TopicId::new("4-Templates.md"))
            .await
            .unwrap_err();
        assert_eq!(err, ContentError::status("4-Templates.md", 404));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpContentSource::new(&format!("http://{addr}/"), Some(Duration::from_secs(5)))
                .unwrap();
        let err = source.fetch(&TopicId::new("1-OOP.md")).await.unwrap_err();

        assert!(err.is_network_error());
        assert_eq!(err.file(), "1-OOP.md");
    }
}
