//! Schema error types
//!
//! Field failures are values (`ValidationErrors`), not errors of schema
//! construction.
//!
//! Error codes:
//! - SCHOOLDIR_SCHEMA_INVALID_PATTERN: a rule's pattern did not compile

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::types::Field;

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The first violated rule of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Per-field validation failures.
///
/// Holds at most one message per field, kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier one for the same field
    pub fn insert(&mut self, error: FieldError) {
        match self.errors.binary_search_by_key(&error.field, |e| e.field) {
            Ok(pos) => self.errors[pos] = error,
            Err(pos) => self.errors.insert(pos, error),
        }
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Keep only the errors whose field satisfies `keep`
    pub fn filtered(&self, keep: impl Fn(Field) -> bool) -> Self {
        Self {
            errors: self.errors.iter().filter(|e| keep(e.field)).cloned().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(error.field.wire_name(), &error.message)?;
        }
        map.end()
    }
}

/// Schema errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl SchemaError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::InvalidPattern { .. } => "SCHOOLDIR_SCHEMA_INVALID_PATTERN",
        }
    }
}
