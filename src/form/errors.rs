//! Form Error Types
//!
//! Form errors are programming or setup errors. User-facing outcomes
//! (invalid input, rejected or failed submissions) are states, not errors.

use std::fmt;

use crate::schema::SchemaError;

/// Form error type
#[derive(Debug, Clone)]
pub struct FormError {
    /// Error kind
    pub kind: FormErrorKind,
    /// Error message
    pub message: String,
}

/// Form error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormErrorKind {
    /// Forbidden submission state transition attempted
    ForbiddenTransition,

    /// The validation schema could not be built
    SchemaUnavailable,
}

impl FormErrorKind {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::ForbiddenTransition => "SCHOOLDIR_FORBIDDEN_TRANSITION",
            Self::SchemaUnavailable => "SCHOOLDIR_SCHEMA_UNAVAILABLE",
        }
    }
}

impl FormError {
    /// Create a new form error.
    pub fn new(kind: FormErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a forbidden transition error.
    pub fn forbidden_transition(from: &str, to: &str) -> Self {
        Self::new(
            FormErrorKind::ForbiddenTransition,
            format!("forbidden transition: {} → {}", from, to),
        )
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for FormError {}

impl From<SchemaError> for FormError {
    fn from(e: SchemaError) -> Self {
        Self::new(FormErrorKind::SchemaUnavailable, e.to_string())
    }
}

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;
