//! School form schema
//!
//! Validation semantics:
//! - Each field is validated independently against its current value
//! - Rules within a field run in order; the first failure is reported
//! - No cross-field rules
//! - Validation is pure and deterministic

use super::errors::{FieldError, SchemaResult, ValidationErrors};
use super::rules::{FieldValue, Rule};
use super::types::{Field, SchoolInput, ValidatedSchool};

/// Largest accepted image, in bytes
pub const MAX_IMAGE_BYTES: u64 = 5_000_000;

/// Accepted image MIME types
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Ordered rules for each form field.
#[derive(Debug, Clone)]
pub struct SchoolSchema {
    rules: [Vec<Rule>; 7],
}

impl SchoolSchema {
    /// Build the standard school schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidPattern` if a rule pattern fails to
    /// compile.
    pub fn new() -> SchemaResult<Self> {
        Ok(Self {
            rules: [
                vec![
                    Rule::required("School name is required"),
                    Rule::min_length(3, "School name must be at least 3 characters"),
                ],
                vec![
                    Rule::required("Address is required"),
                    Rule::min_length(10, "Address must be at least 10 characters"),
                ],
                vec![
                    Rule::required("City is required"),
                    Rule::min_length(2, "City must be at least 2 characters"),
                ],
                vec![
                    Rule::required("State is required"),
                    Rule::min_length(2, "State must be at least 2 characters"),
                ],
                vec![
                    Rule::required("Contact number is required"),
                    Rule::pattern(r"^[0-9]{10}$", "Contact must be exactly 10 digits")?,
                ],
                vec![
                    Rule::required("Email is required"),
                    Rule::email("Please enter a valid email address")?,
                ],
                vec![
                    Rule::required("School image is required"),
                    Rule::max_file_size(MAX_IMAGE_BYTES, "File size should be less than 5MB"),
                    Rule::allowed_mime_types(
                        ALLOWED_IMAGE_TYPES,
                        "Only .jpg, .jpeg, .png and .gif formats are supported",
                    ),
                ],
            ],
        })
    }

    /// Rules for one field, in evaluation order
    pub fn rules(&self, field: Field) -> &[Rule] {
        &self.rules[field.index()]
    }

    /// Validate a single field.
    ///
    /// Returns the first failing rule's message, or `None` if the field is
    /// valid.
    pub fn validate_field(&self, field: Field, input: &SchoolInput) -> Option<FieldError> {
        let value = match input.text(field) {
            Some(text) => FieldValue::Text(text),
            None => FieldValue::File(input.image.as_ref()),
        };

        self.rules(field)
            .iter()
            .find(|rule| !rule.check(value))
            .map(|rule| FieldError::new(field, rule.message()))
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns one `FieldError` per failing field, in form order.
    pub fn validate(&self, input: &SchoolInput) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in Field::ALL {
            if let Some(error) = self.validate_field(field, input) {
                errors.insert(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and snapshot the input for submission.
    pub fn validated(&self, input: &SchoolInput) -> Result<ValidatedSchool, ValidationErrors> {
        self.validate(input)?;

        let image = match &input.image {
            Some(image) => image.clone(),
            // Unreachable after a passing `validate`
            None => {
                let mut errors = ValidationErrors::new();
                errors.insert(FieldError::new(
                    Field::Image,
                    self.rules(Field::Image)
                        .first()
                        .map(|r| r.message().to_string())
                        .unwrap_or_default(),
                ));
                return Err(errors);
            }
        };

        Ok(ValidatedSchool {
            name: input.name.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            contact: input.contact.clone(),
            email_id: input.email_id.clone(),
            image,
        })
    }
}
