//! Field rules
//!
//! A rule is a single check with the message shown when it fails. Rules
//! that do not apply to a value's kind (length on a file, size on text)
//! pass, as do file checks when no file is selected.

use regex::{Regex, RegexBuilder};

use super::errors::{SchemaError, SchemaResult};
use super::types::ImageFile;

/// Local part: letters, digits and `_ ' + - .`, ending in a non-dot.
/// Domain: one or more labels followed by a TLD of two or more letters.
const EMAIL_PATTERN: &str =
    r"^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";

/// The value a rule is checked against
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    File(Option<&'a ImageFile>),
}

/// A single validation rule
#[derive(Debug, Clone)]
pub enum Rule {
    /// Text is non-empty, or a file is selected
    Required { message: String },

    /// Text is at least `min` UTF-16 code units long
    MinLength { min: usize, message: String },

    /// Text matches `regex` in full
    Pattern { regex: Regex, message: String },

    /// Text is an email address
    Email { regex: Regex, message: String },

    /// Selected file is at most `max_bytes` long
    MaxFileSize { max_bytes: u64, message: String },

    /// Selected file has one of the listed MIME types
    AllowedMimeTypes { types: Vec<String>, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Compile a pattern rule
    pub fn pattern(pattern: &str, message: impl Into<String>) -> SchemaResult<Self> {
        let regex = compile(pattern, false)?;
        Ok(Rule::Pattern {
            regex,
            message: message.into(),
        })
    }

    /// Compile the email rule
    pub fn email(message: impl Into<String>) -> SchemaResult<Self> {
        let regex = compile(EMAIL_PATTERN, true)?;
        Ok(Rule::Email {
            regex,
            message: message.into(),
        })
    }

    pub fn max_file_size(max_bytes: u64, message: impl Into<String>) -> Self {
        Rule::MaxFileSize {
            max_bytes,
            message: message.into(),
        }
    }

    pub fn allowed_mime_types<I, S>(types: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::AllowedMimeTypes {
            types: types.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Message shown when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::Email { message, .. }
            | Rule::MaxFileSize { message, .. }
            | Rule::AllowedMimeTypes { message, .. } => message,
        }
    }

    /// Check a value against this rule
    pub fn check(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Required { .. }, FieldValue::Text(text)) => !text.is_empty(),
            (Rule::Required { .. }, FieldValue::File(file)) => file.is_some(),

            (Rule::MinLength { min, .. }, FieldValue::Text(text)) => {
                text.encode_utf16().count() >= *min
            }
            (Rule::Pattern { regex, .. }, FieldValue::Text(text)) => regex.is_match(text),
            (Rule::Email { regex, .. }, FieldValue::Text(text)) => is_email(regex, text),

            (Rule::MaxFileSize { max_bytes, .. }, FieldValue::File(Some(file))) => {
                file.size() <= *max_bytes
            }
            (Rule::AllowedMimeTypes { types, .. }, FieldValue::File(Some(file))) => {
                types.iter().any(|t| t == &file.content_type)
            }

            _ => true,
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> SchemaResult<Regex> {
    // Classes are ASCII only; Unicode case folding would let `[A-Z]`
    // match U+017F and U+212A.
    RegexBuilder::new(pattern)
        .unicode(false)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

// The regex engine has no lookahead, so the leading-dot and
// double-dot exclusions are checked separately.
fn is_email(regex: &Regex, text: &str) -> bool {
    !text.starts_with('.') && !text.contains("..") && regex.is_match(text)
}
