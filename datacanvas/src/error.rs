//! Error types for the DataCanvas API client.
//!
//! [`Error`] is the single type every resource call returns. Match on a
//! variant for targeted recovery, or treat it as a whole for blanket handling.
//! [`ConfigError`] is kept apart: it only surfaces while constructing a
//! client and signals a setup mistake rather than a runtime API failure.

use thiserror::Error;

/// Base error type for DataCanvas operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP 401: the access key or secret was rejected.
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// HTTP 403: the credentials lack permission for the resource.
    #[error("Authorization failed: {0}")]
    Authorization(ApiError),

    /// HTTP 400/422, or a request parameter rejected before sending.
    #[error("Validation failed: {0}")]
    Validation(ApiError),

    /// HTTP 404.
    #[error("{resource} not found: {error}")]
    NotFound { resource: String, error: ApiError },

    /// HTTP 429.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(ApiError),

    /// HTTP 5xx.
    #[error("Server error: {0}")]
    Server(ApiError),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Any other API failure: unexpected status or a response body that
    /// does not have the expected shape.
    #[error("API error: {0}")]
    Api(ApiError),
}

impl Error {
    /// Client-side parameter rejection; never carries a status code.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(ApiError::new(message, None, None))
    }

    /// A 2xx response whose body could not be turned into the expected record.
    pub(crate) fn unexpected_response(
        message: impl Into<String>,
        status_code: Option<u16>,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Error::Api(ApiError::new(message, status_code, response_data))
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Network(e) => e.message.as_str(),
            other => other
                .api_error()
                .map(|e| e.message.as_str())
                .unwrap_or_default(),
        }
    }

    /// HTTP status that produced this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().and_then(|e| e.status_code)
    }

    fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Authentication(e)
            | Error::Authorization(e)
            | Error::Validation(e)
            | Error::RateLimit(e)
            | Error::Server(e)
            | Error::Api(e) => Some(e),
            Error::NotFound { error, .. } => Some(error),
            Error::Network(_) => None,
        }
    }
}

/// Details of an error reported by the API (or by local validation).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<u16>,
    pub response_data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(
        message: impl Into<String>,
        status_code: Option<u16>,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_data,
        }
    }
}

/// Raised for connection refusals, DNS failures, timeouts and other
/// transport failures that happen before an HTTP response exists.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timed out: {err}")
        } else {
            format!("Network request failed: {err}")
        };
        Self {
            message,
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.into())
    }
}

/// Invalid client configuration, detected while constructing the client.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: access_key_client is required and must be a non-empty string")]
    AccessKeyClient,

    #[error("Invalid configuration: access_key_secret is required and must be a non-empty string")]
    AccessKeySecret,

    #[error("Invalid configuration: project_id is required and must be a positive integer")]
    ProjectId,

    #[error("Invalid configuration: base_url is required and must be a non-empty string")]
    BaseUrl,

    #[error("Invalid configuration: base_url is not a valid URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Failed to initialise HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ConfigError {
    /// Name of the offending configuration field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::AccessKeyClient => Some("access_key_client"),
            ConfigError::AccessKeySecret => Some("access_key_secret"),
            ConfigError::ProjectId => Some("project_id"),
            ConfigError::BaseUrl | ConfigError::InvalidBaseUrl(_) => Some("base_url"),
            ConfigError::Transport(_) => None,
        }
    }
}
