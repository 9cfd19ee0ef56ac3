//! Transport client for the maintenance REST API.
//!
//! One call to [`ApiClient::request`] is one HTTP request: JSON in, JSON out,
//! every failure normalized into [`RequestError`]. No retries, no timeout, no
//! caching.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{RequestError, RequestResult};

// ============================================================================
// Request options
// ============================================================================

/// Per-request options: method, JSON body, extra headers and query pairs.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> RequestResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append query parameters. Callers only pass parameters that are set.
    pub fn with_query<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// Shared HTTP client bound to one API base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and decode the JSON response body as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> RequestResult<T> {
        let body = self.send(endpoint, options).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Issue a request whose success body is irrelevant (e.g. DELETE).
    pub async fn execute(&self, endpoint: &str, options: RequestOptions) -> RequestResult<()> {
        self.send(endpoint, options).await.map(|_| ())
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> RequestResult<String> {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = merge_headers(&options.headers)?;

        debug!(method = %options.method, url = %url, "Sending API request");

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            // an unreadable error body still reports the status
            let text = response.text().await.unwrap_or_default();
            let err = RequestError::from_response_body(status, &text);
            warn!(status = status.as_u16(), url = %url, "API request failed: {}", err);
            return Err(err);
        }

        Ok(response.text().await?)
    }
}

/// JSON content type first, then caller headers; callers win on conflicts.
fn merge_headers(extra: &[(String, String)]) -> RequestResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RequestError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| RequestError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
