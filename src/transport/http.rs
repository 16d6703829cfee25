//! HTTP comparator client.
//!
//! Posts each framed match request to
//! `{server}/api/sessions/running/{session_id}?apiKey={key}` as
//! `application/octet-stream` and reads the `asExpected` flag from the JSON
//! reply.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::SessionId;

use super::{Comparator, RunningSession};

// ============================================================================
// Constants
// ============================================================================

/// Path segments of the running-session endpoint.
const RUNNING_SESSION_PATH: [&str; 3] = ["api", "sessions", "running"];

/// Content type of framed match bodies.
const OCTET_STREAM: &str = "application/octet-stream";

// ============================================================================
// Types
// ============================================================================

/// Comparator reply to a match request.
#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(rename = "asExpected")]
    as_expected: bool,
}

// ============================================================================
// HttpComparator
// ============================================================================

/// Comparator reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpComparator {
    client: reqwest::Client,
    server_url: Url,
    api_key: String,
}

impl HttpComparator {
    /// Creates a client for a comparator server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `server_url` is not a valid base URL.
    pub fn new(server_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let server_url = Url::parse(server_url)
            .map_err(|e| Error::config(format!("Invalid server URL {server_url:?}: {e}")))?;
        if server_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Server URL cannot be a base: {server_url}"
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            server_url,
            api_key: api_key.into(),
        })
    }

    /// Uses a preconfigured HTTP client (proxies, timeouts, TLS).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the server base URL.
    #[inline]
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Builds the endpoint URL for a running session.
    fn running_session_url(&self, session_id: &SessionId) -> Result<Url> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::config(format!("Server URL cannot be a base: {}", self.server_url))
            })?
            .pop_if_empty()
            .extend(RUNNING_SESSION_PATH)
            .push(session_id.as_str());
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl Comparator for HttpComparator {
    async fn match_window(&self, session: &RunningSession, body: Vec<u8>) -> Result<bool> {
        let url = self.running_session_url(&session.id)?;
        debug!(session_id = %session.id, bytes = body.len(), "Sending match request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::server_status(status.as_u16(), text));
        }

        let text = response.text().await?;
        trace!(session_id = %session.id, response = %text, "Match response");
        let reply: MatchResponse = serde_json::from_str(&text)
            .map_err(|e| Error::comparator(format!("Invalid match response: {e}")))?;

        debug!(
            session_id = %session.id,
            as_expected = reply.as_expected,
            "Match response received"
        );
        Ok(reply.as_expected)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session() -> RunningSession {
        RunningSession::new(SessionId::new("abc-123"))
    }

    #[test]
    fn test_invalid_server_url() {
        let err = HttpComparator::new("not a url", "key").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_running_session_url() {
        let comparator = HttpComparator::new("https://eyes.example.com/", "k&y").expect("client");
        let url = comparator
            .running_session_url(&SessionId::new("abc-123"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://eyes.example.com/api/sessions/running/abc-123?apiKey=k%26y"
        );
    }

    #[test]
    fn test_running_session_url_keeps_base_path() {
        let comparator = HttpComparator::new("https://example.com/eyes", "key").expect("client");
        let url = comparator.running_session_url(&SessionId::new("s")).expect("url");
        assert_eq!(url.path(), "/eyes/api/sessions/running/s");
    }

    #[tokio::test]
    async fn test_match_window_as_expected() {
        let server = MockServer::start().await;
        let body = b"\x00\x00\x00\x02{}IMG".to_vec();

        Mock::given(method("POST"))
            .and(path("/api/sessions/running/abc-123"))
            .and(query_param("apiKey", "secret"))
            .and(header("content-type", OCTET_STREAM))
            .and(body_bytes(body.clone()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"asExpected": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let comparator = HttpComparator::new(&server.uri(), "secret").expect("client");
        let as_expected = comparator.match_window(&session(), body).await.expect("match");
        assert!(as_expected);
    }

    #[tokio::test]
    async fn test_match_window_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"asExpected": false})),
            )
            .mount(&server)
            .await;

        let comparator = HttpComparator::new(&server.uri(), "secret").expect("client");
        let as_expected = comparator.match_window(&session(), vec![0; 8]).await.expect("match");
        assert!(!as_expected);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let comparator = HttpComparator::new(&server.uri(), "secret").expect("client");
        let err = comparator.match_window(&session(), vec![0; 8]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::ServerStatus { status: 503, ref message } if message == "maintenance"
        ));
        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let comparator = HttpComparator::new(&server.uri(), "secret").expect("client");
        let err = comparator.match_window(&session(), vec![0; 8]).await.unwrap_err();
        assert!(matches!(err, Error::Comparator { .. }));
    }
}
