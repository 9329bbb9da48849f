//! CLI-specific error types
//!
//! Every CLI error ends the command with a non-zero exit status. Errors
//! from the library convert with `From` and keep their message.

use std::fmt;
use std::io;

use serde_json::Value;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::form::FormError;
use crate::schema::{SchemaError, ValidationErrors};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Form input failed validation
    ValidationFailed,
    /// The server rejected the school or the request failed
    SubmissionFailed,
    /// The school list could not be fetched
    FetchFailed,
    /// Runtime or client setup failed
    SetupFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SCHOOLDIR_CLI_CONFIG_ERROR",
            Self::IoError => "SCHOOLDIR_CLI_IO_ERROR",
            Self::ValidationFailed => "SCHOOLDIR_VALIDATION_FAILED",
            Self::SubmissionFailed => "SCHOOLDIR_SUBMISSION_FAILED",
            Self::FetchFailed => "SCHOOLDIR_FETCH_FAILED",
            Self::SetupFailed => "SCHOOLDIR_CLI_SETUP_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    details: Option<Value>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Validation failed; the per-field messages travel as details
    pub fn validation_failed(errors: &ValidationErrors) -> Self {
        Self {
            code: CliErrorCode::ValidationFailed,
            message: format!("{} field(s) invalid", errors.len()),
            details: serde_json::to_value(errors).ok(),
        }
    }

    /// Submission rejected or failed
    pub fn submission_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SubmissionFailed, msg)
    }

    /// List fetch failed
    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::FetchFailed, msg)
    }

    /// Setup failed
    pub fn setup_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SetupFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured details, if any
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::setup_failed(e.to_string())
    }
}

impl From<FormError> for CliError {
    fn from(e: FormError) -> Self {
        Self::setup_failed(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::setup_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
