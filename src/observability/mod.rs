//! Observability for schooldir
//!
//! Logging goes through `tracing`. Library code only emits events; the
//! binary installs the subscriber once at startup via `init_logging`.
//!
//! # Usage
//!
//! ```ignore
//! use schooldir::observability::{init_logging, LogConfig};
//!
//! init_logging(LogConfig { verbose: true, ..Default::default() })?;
//! tracing::info!(count = 3, "School list loaded");
//! ```

mod logger;

pub use logger::{init_logging, LogConfig};

use std::fmt;

/// Observability error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservabilityErrorCode {
    /// The global subscriber could not be installed
    LoggingInitFailed,
}

impl ObservabilityErrorCode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservabilityErrorCode::LoggingInitFailed => "SCHOOLDIR_LOGGING_INIT_FAILED",
        }
    }
}

impl fmt::Display for ObservabilityErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observability error
///
/// Never fatal: a client without logs still works.
#[derive(Debug)]
pub struct ObservabilityError {
    code: ObservabilityErrorCode,
    message: String,
}

impl ObservabilityError {
    /// Subscriber installation failed
    pub fn init_failed(message: impl Into<String>) -> Self {
        Self {
            code: ObservabilityErrorCode::LoggingInitFailed,
            message: message.into(),
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        self.code.as_str()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ObservabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ObservabilityError {}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
