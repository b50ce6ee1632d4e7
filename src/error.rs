//! Error types
//!
//! HTTP failures are classified by status code so callers can match on the
//! kind of failure instead of parsing messages.

use crate::knowledge::KnowledgeError;

/// Errors returned by the Grafana client
#[derive(Debug, thiserror::Error)]
pub enum GrafanaError {
    /// 400 - the server rejected the request payload
    #[error("Bad input: {status} - {message}")]
    BadInput { status: u16, message: String },

    /// 401 or 403
    #[error("Unauthorized: {status} - {message}")]
    Unauthorized { status: u16, message: String },

    /// 5xx
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status
    #[error("Client error: {status} - {message}")]
    Client { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}

impl GrafanaError {
    /// Classify a non-2xx response.
    ///
    /// The message is taken from a JSON `message` field when the body has
    /// one, otherwise the raw body is used.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            400 => Self::BadInput { status, message },
            401 | 403 => Self::Unauthorized { status, message },
            500..=599 => Self::Server { status, message },
            _ => Self::Client { status, message },
        }
    }

    /// HTTP status code, for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadInput { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::Server { status, .. }
            | Self::Client { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message reported by the server, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::BadInput { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Server { message, .. }
            | Self::Client { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GrafanaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

pub type Result<T> = std::result::Result<T, GrafanaError>;
