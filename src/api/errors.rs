//! API error types
//!
//! Every failure of a remote call falls in one of two classes:
//! - Server rejection: a response arrived with a non-2xx status
//! - Transport: no usable response (connect/timeout/body/decode failures)

use thiserror::Error;

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Remote API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's `message` field if any
    #[error("Server rejected request with status {status}")]
    ServerRejection { status: u16, message: Option<String> },

    /// The request could not complete
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The configured endpoint is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be built
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ServerRejection { .. } => "SCHOOLDIR_SERVER_REJECTION",
            ApiError::Transport(_) => "SCHOOLDIR_TRANSPORT",
            ApiError::Decode(_) => "SCHOOLDIR_DECODE",
            ApiError::InvalidUrl(_) => "SCHOOLDIR_INVALID_URL",
            ApiError::InvalidPayload(_) => "SCHOOLDIR_INVALID_PAYLOAD",
        }
    }

    /// HTTP status, for server rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True if the server answered at all
    pub fn is_server_rejection(&self) -> bool {
        matches!(self, ApiError::ServerRejection { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
