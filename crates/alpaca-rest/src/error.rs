//! Error types for REST API operations

use alpaca_config::ConfigError;
use serde::Deserialize;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Alpaca error code, when the body carried one
        code: Option<i64>,
        /// Error message from the body, or the raw body
        message: String,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credentials could not be resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

impl RestError {
    /// Build an API error from a failed response
    ///
    /// Alpaca error bodies look like `{"code": 40410000, "message": "..."}`.
    /// Anything else is kept verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { code, message: Some(message) }) => Self::Api { status, code, message },
            Ok(ErrorBody { code, message: None }) => Self::Api {
                status,
                code,
                message: body.to_string(),
            },
            Err(_) => Self::Api {
                status,
                code: None,
                message: body.to_string(),
            },
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Parse(_) | Self::InvalidParameter(_) | Self::Config(_) => false,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Check if the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
