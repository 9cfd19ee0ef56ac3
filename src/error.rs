//! Error type shared by the transport client, the resource accessors and the views.
//!
//! Every failure the client can produce collapses into [`RequestError`]. Its
//! `Display` output is the single human-readable message a view shows in place
//! of its content.

use reqwest::StatusCode;

/// Result alias used throughout the client.
pub type RequestResult<T> = Result<T, RequestError>;

/// Failure of a request against the maintenance API.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the `detail` field of the error body when present,
    /// otherwise `HTTP {status}`.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// No response was obtained (connection refused, DNS, TLS, ...).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response carried a body that is not the expected JSON.
    #[error("Invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Required fields were missing; detected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// A caller-supplied header could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl RequestError {
    /// Build an HTTP error from a status and the raw error body.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self::Http { status, message }
    }

    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Extract a non-empty string `detail` from a JSON error body.
///
/// Anything else (invalid JSON, a non-object, a missing or non-string
/// `detail`) yields `None` and the caller falls back to a generic message.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
