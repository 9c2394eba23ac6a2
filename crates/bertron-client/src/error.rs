//! Error types for the BERtron API client

use std::fmt;

/// Underlying cause of a failed API request
#[derive(Debug)]
pub enum ApiFailure {
    /// Transport failure: connection refused, DNS, timeout, body read
    Http(Box<reqwest::Error>),
    /// Server answered with a non-2xx status
    Status { status: u16, body: String },
    /// 2xx response whose body is not valid JSON
    Json(serde_json::Error),
    /// Request issued after the client was closed
    Closed,
}

impl ApiFailure {
    /// Whether the request was aborted by the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "{}", e),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "server returned status {}", status)
            }
            Self::Status { status, body } => {
                write!(f, "server returned status {}: {}", status, body)
            }
            Self::Json(e) => write!(f, "invalid JSON in response: {}", e),
            Self::Closed => write!(f, "client is closed"),
        }
    }
}

/// Errors that can occur when interacting with the BERtron API
#[derive(Debug)]
pub enum BertronError {
    /// API request failed; every transport and HTTP-status failure lands here
    Api(ApiFailure),
    /// A response document could not be turned into a typed value
    Deserialize(serde_json::Error),
    /// Invalid client configuration
    Config(String),
}

impl BertronError {
    /// HTTP status reported by the server, if the failure was a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(ApiFailure::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether this is the unified API request failure
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

impl fmt::Display for BertronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(cause) => write!(f, "API request failed: {}", cause),
            Self::Deserialize(e) => write!(f, "Invalid BERtron document: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BertronError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(ApiFailure::Http(e)) => Some(e.as_ref()),
            Self::Api(ApiFailure::Json(e)) => Some(e),
            Self::Deserialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiFailure> for BertronError {
    fn from(cause: ApiFailure) -> Self {
        Self::Api(cause)
    }
}

impl From<reqwest::Error> for BertronError {
    fn from(e: reqwest::Error) -> Self {
        Self::Api(ApiFailure::Http(Box::new(e)))
    }
}

/// Result type for BERtron API operations
pub type Result<T> = std::result::Result<T, BertronError>;
