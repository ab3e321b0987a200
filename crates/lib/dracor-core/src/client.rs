//! HTTP client for the DraCor API.
//!
//! Every tool invocation maps to one or more requests against a single base
//! URL. The client carries the base URL, the admin credentials for write
//! operations, and one process-wide request timeout.

use std::{error::Error, fmt, time::Duration};

use serde_json::Value;
use tracing::debug;

/// Public staging instance of the DraCor API v1.
pub const DEFAULT_API_BASE_URL: &str = "https://staging.dracor.org/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Basic-auth credentials for the eXist-DB backing a local DraCor instance.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// The password must not leak into logs or error payloads.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for building a [`DracorClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials {
                username: "admin".to_string(),
                password: String::new(),
            },
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Error type for DraCor API requests.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure, including timeouts and body decode errors.
    Http(reqwest::Error),
    /// The server answered with a non-success status code.
    Status { code: u16 },
    /// The response body did not have the expected shape.
    Shape(String),
}

impl ApiError {
    #[must_use]
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// The upstream status code, when the failure was a status error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code } => Some(*code),
            Self::Http(_) | Self::Shape(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { code } => {
                write!(f, "request was not successful, server returned status code {code}")
            }
            Self::Shape(message) => write!(f, "unexpected response shape: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

/// Builds a request URL from the base URL and the optional corpus, play and
/// sub-resource segments.
///
/// Exactly one trailing slash is stripped from `base` before concatenation.
/// No percent-encoding is applied; callers that need URL-safe identifiers
/// encode them separately.
#[must_use]
pub fn build_url(base: &str, corpus: Option<&str>, play: Option<&str>, method: Option<&str>) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    match (corpus, play, method) {
        (Some(corpus), Some(play), Some(method)) => {
            format!("{base}/corpora/{corpus}/plays/{play}/{method}")
        }
        (Some(corpus), Some(play), None) => format!("{base}/corpora/{corpus}/plays/{play}"),
        (Some(corpus), None, Some(method)) => format!("{base}/corpora/{corpus}/{method}"),
        (Some(corpus), None, None) => format!("{base}/corpora/{corpus}"),
        (None, _, Some(method)) => format!("{base}/{method}"),
        (None, _, None) => format!("{base}/info"),
    }
}

/// Client for a single DraCor instance.
#[derive(Debug, Clone)]
pub struct DracorClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl DracorClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            credentials: config.credentials,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL of the DraCor frontend serving this API, derived by cutting
    /// the base URL at its `/api/` segment.
    #[must_use]
    pub fn frontend_base(&self) -> &str {
        self.base_url
            .find("/api/")
            .map_or(self.base_url.as_str(), |idx| &self.base_url[..idx])
    }

    /// Resolves an API URL for the given corpus/play/method combination.
    #[must_use]
    pub fn api_url(&self, corpus: Option<&str>, play: Option<&str>, method: Option<&str>) -> String {
        build_url(&self.base_url, corpus, play, method)
    }

    /// Fetches an API path and parses the body as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport or decode failures.
    pub async fn get_json(
        &self,
        corpus: Option<&str>,
        play: Option<&str>,
        method: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.get_json_query(corpus, play, method, &[]).await
    }

    /// Fetches an API path with query parameters and parses the body as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport or decode failures.
    pub async fn get_json_query(
        &self,
        corpus: Option<&str>,
        play: Option<&str>,
        method: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let url = self.api_url(corpus, play, method);
        let response = self.get(&url, query).await?;
        Ok(response.json().await?)
    }

    /// Fetches an API path and returns the raw body text.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport failures.
    pub async fn get_text(
        &self,
        corpus: Option<&str>,
        play: Option<&str>,
        method: Option<&str>,
    ) -> Result<String, ApiError> {
        self.get_text_query(corpus, play, method, &[]).await
    }

    /// Fetches an API path with query parameters and returns the raw body
    /// text.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport failures.
    pub async fn get_text_query(
        &self,
        corpus: Option<&str>,
        play: Option<&str>,
        method: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<String, ApiError> {
        let url = self.api_url(corpus, play, method);
        let response = self.get(&url, query).await?;
        Ok(response.text().await?)
    }

    /// Fetches an absolute URL outside the API tree and parses the body as
    /// JSON. Used for the corpus registry.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport or decode failures.
    pub async fn get_json_url(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.get(url, &[]).await?;
        Ok(response.json().await?)
    }

    /// Fetches an absolute URL outside the API tree and returns the raw body
    /// text. Used for the ODD, schema, README and research documents.
    ///
    /// # Errors
    /// Returns `ApiError::Status` for any non-200 response and
    /// `ApiError::Http` for transport failures.
    pub async fn get_text_url(&self, url: &str) -> Result<String, ApiError> {
        let response = self.get(url, &[]).await?;
        Ok(response.text().await?)
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response, ApiError> {
        debug!(url, "GET");
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let code = response.status().as_u16();
        if code == 200 {
            Ok(response)
        } else {
            Err(ApiError::Status { code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_with_corpus_play_and_method() {
        assert_eq!(
            build_url("https://x/api/", Some("ger"), Some("lessing-emilia-galotti"), Some("characters")),
            "https://x/api/corpora/ger/plays/lessing-emilia-galotti/characters"
        );
    }

    #[test]
    fn url_with_corpus_and_play() {
        assert_eq!(
            build_url("https://x/api", Some("ger"), Some("gogol-revizor"), None),
            "https://x/api/corpora/ger/plays/gogol-revizor"
        );
    }

    #[test]
    fn url_with_corpus_only() {
        assert_eq!(build_url("https://x/api", Some("rus"), None, None), "https://x/api/corpora/rus");
        assert_eq!(
            build_url("https://x/api", Some("rus"), None, Some("metadata")),
            "https://x/api/corpora/rus/metadata"
        );
    }

    #[test]
    fn url_with_method_only() {
        assert_eq!(
            build_url("https://x/api", None, None, Some("dts/collection")),
            "https://x/api/dts/collection"
        );
    }

    #[test]
    fn url_without_segments_points_at_info() {
        assert_eq!(build_url("https://x/api", None, None, None), "https://x/api/info");
    }

    #[test]
    fn play_without_corpus_is_ignored() {
        assert_eq!(build_url("https://x/api", None, Some("orphan"), None), "https://x/api/info");
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(build_url("https://x/api//", Some("ger"), None, None), "https://x/api//corpora/ger");
    }

    #[test]
    fn frontend_base_cuts_at_api_segment() {
        let client = DracorClient::new(ClientConfig::new("https://staging.dracor.org/api/v1"))
            .expect("client");
        assert_eq!(client.frontend_base(), "https://staging.dracor.org");
    }

    #[test]
    fn frontend_base_without_api_segment_is_the_base_url() {
        let client = DracorClient::new(ClientConfig::new("https://example.org/v1")).expect("client");
        assert_eq!(client.frontend_base(), "https://example.org/v1");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
