//! Validation schema for the school form
//!
//! Every field carries an ordered list of rules. A field's verdict is the
//! message of its first failing rule, so required-ness is always reported
//! before length or format.
//!
//! # Design Principles
//!
//! - Pure: no I/O, no side effects
//! - Per-field: no cross-field rules
//! - Deterministic: the same input yields the same messages

mod errors;
mod rules;
mod types;
mod validator;

pub use errors::{FieldError, SchemaError, SchemaResult, ValidationErrors};
pub use rules::{FieldValue, Rule};
pub use types::{mime_from_extension, Field, ImageFile, SchoolInput, ValidatedSchool};
pub use validator::{SchoolSchema, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};
