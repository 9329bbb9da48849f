//! School form model
//!
//! Holds the current input, which fields have been touched, the live
//! validation verdict and the submission state. It performs no I/O:
//! `FormController` drives the network half of a submission.

use tracing::{debug, info, warn};

use super::state::{failure_message, SubmissionState};
use crate::api::ApiResult;
use crate::schema::{
    Field, FieldError, ImageFile, SchoolInput, SchoolSchema, ValidatedSchool, ValidationErrors,
};

/// Result of trying to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Input is valid; send `school` and report back with `attempt`
    Ready { attempt: u64, school: ValidatedSchool },
    /// Input is invalid; no request may be sent
    Invalid(ValidationErrors),
    /// A submission is already in flight
    InFlight,
}

/// Result of one submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    /// Rejected locally because another submission is in flight
    InFlight,
    /// The server accepted the school
    Succeeded,
    /// The server rejected the school or the request failed
    Failed(String),
    /// The form was reset while the request was in flight
    Discarded,
}

/// The add-school form
#[derive(Debug, Clone)]
pub struct SchoolForm {
    schema: SchoolSchema,
    input: SchoolInput,
    touched: [bool; 7],
    errors: ValidationErrors,
    state: SubmissionState,
    attempt: u64,
}

impl SchoolForm {
    /// Create an empty, untouched form
    pub fn new(schema: SchoolSchema) -> Self {
        let input = SchoolInput::new();
        let errors = verdict(&schema, &input);
        Self {
            schema,
            input,
            touched: [false; 7],
            errors,
            state: SubmissionState::Idle,
            attempt: 0,
        }
    }

    pub fn input(&self) -> &SchoolInput {
        &self.input
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn schema(&self) -> &SchoolSchema {
        &self.schema
    }

    /// Set a text field and revalidate.
    ///
    /// Setting `Field::Image` through this method is ignored; use
    /// `set_image`.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Option<&str> {
        let Some(slot) = self.input.text_mut(field) else {
            warn!(field = %field, "Ignoring text value for file field");
            return None;
        };
        *slot = value.into();
        self.changed(field)
    }

    /// Select or clear the image and revalidate
    pub fn set_image(&mut self, image: Option<ImageFile>) -> Option<&str> {
        self.input.image = image;
        self.changed(Field::Image)
    }

    fn changed(&mut self, field: Field) -> Option<&str> {
        self.touched[field.index()] = true;
        self.revalidate();
        self.field_error(field)
    }

    fn revalidate(&mut self) {
        self.errors = verdict(&self.schema, &self.input);
    }

    /// True when every field passes, touched or not
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Full verdict, including untouched fields
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Errors for touched fields only
    pub fn visible_errors(&self) -> ValidationErrors {
        self.errors.filtered(|field| self.touched[field.index()])
    }

    /// Displayed message for a field
    pub fn field_error(&self, field: Field) -> Option<&str> {
        if self.touched[field.index()] {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    /// Submit is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
    }

    /// Current attempt generation
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Clear all fields, errors and messages
    pub fn reset(&mut self) {
        if self.state.is_submitting() {
            info!(attempt = self.attempt, "Form reset during submission; result will be discarded");
        }
        self.input = SchoolInput::new();
        self.touched = [false; 7];
        self.revalidate();
        self.state = self.state.reset();
        self.attempt += 1;
    }

    /// Start a submission.
    ///
    /// Every field becomes touched so all messages surface. On success the
    /// form enters `Submitting` and returns the validated snapshot to send.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.state.is_submitting() {
            debug!(attempt = self.attempt, "Submit ignored; request in flight");
            return SubmitStart::InFlight;
        }

        self.touched = [true; 7];
        self.revalidate();

        let school = match self.schema.validated(&self.input) {
            Ok(school) => school,
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "Submit blocked by validation");
                return SubmitStart::Invalid(errors);
            }
        };

        match self.state.begin() {
            Ok(next) => self.state = next,
            Err(_) => return SubmitStart::InFlight,
        }
        self.attempt += 1;
        info!(attempt = self.attempt, school = school.name(), "Submitting school");

        SubmitStart::Ready {
            attempt: self.attempt,
            school,
        }
    }

    /// Apply the result of the request started by `begin_submit`.
    ///
    /// Results for a stale attempt (the form was reset meanwhile) are
    /// dropped and leave the form untouched.
    pub fn complete_submit(&mut self, attempt: u64, result: ApiResult<()>) -> SubmitOutcome {
        if attempt != self.attempt || !self.state.is_submitting() {
            info!(
                attempt,
                current = self.attempt,
                "Discarding result of superseded submission"
            );
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                let next = self.state.succeed();
                self.input = SchoolInput::new();
                self.touched = [false; 7];
                self.revalidate();
                if let Ok(next) = next {
                    self.state = next;
                }
                info!(attempt, "School added");
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                let message = failure_message(&err);
                warn!(attempt, code = err.code(), status = ?err.status(), "School submission failed");
                if let Ok(next) = self.state.fail(message.clone()) {
                    self.state = next;
                }
                SubmitOutcome::Failed(message)
            }
        }
    }
}

fn verdict(schema: &SchoolSchema, input: &SchoolInput) -> ValidationErrors {
    schema.validate(input).err().unwrap_or_default()
}

/// Convenience for callers that only care about one field
pub fn first_error(errors: &ValidationErrors) -> Option<FieldError> {
    errors.iter().next().cloned()
}
