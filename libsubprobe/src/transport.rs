use crate::{http::create_http_pool, types::ProbeConfig};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} timed out")]
    Timeout { url: String },
    #[error("Connection to {url} failed: {reason}")]
    Connect { url: String, reason: String },
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout { url: url.to_string() }
        } else if err.is_connect() {
            TransportError::Connect {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            TransportError::Request {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// Header-only retrieval of a URL.
///
/// Returns the final status code after redirects. Any status counts as a
/// response; only transport-level failures are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &str) -> Result<u16, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ProbeConfig) -> Result<Self, TransportError> {
        let client = create_http_pool(config).map_err(TransportError::Client)?;
        Ok(Self { client })
    }

    /// Uses a caller-built client, e.g. one with DNS overrides.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn head(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    #[tokio::test]
    async fn head_reports_any_status_as_a_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/");
                then.status(503);
            })
            .await;

        let transport = HttpTransport::new(&ProbeConfig::default()).unwrap();
        let status = transport.head(&server.url("/")).await.unwrap();

        assert_eq!(status, 503);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn head_follows_redirects() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(HEAD).path("/old");
                then.status(307).header("Location", "/new");
            })
            .await;
        let target = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/new");
                then.status(200);
            })
            .await;

        let transport = HttpTransport::new(&ProbeConfig::default()).unwrap();
        let status = transport.head(&server.url("/old")).await.unwrap();

        assert_eq!(status, 200);
        target.assert_async().await;
    }

    #[tokio::test]
    async fn refused_connection_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&ProbeConfig::default()).unwrap();
        let result = transport.head(&format!("http://{}/", addr)).await;

        assert!(result.is_err());
    }
}
