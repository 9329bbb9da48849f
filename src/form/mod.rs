//! Add-school form and submission pipeline
//!
//! validate → build multipart body → POST → interpret result → update state
//!
//! # Error Conditions
//!
//! - Invalid input: field-scoped messages, no request sent
//! - Server rejection: server message (or a default), input preserved
//! - Transport failure: fixed network message, input preserved
//!
//! None of these is fatal. The user recovers by editing and resubmitting.

mod controller;
mod errors;
mod model;
mod state;

pub use controller::{FormController, SuccessCallback};
pub use errors::{FormError, FormErrorKind, FormResult};
pub use model::{first_error, SchoolForm, SubmitOutcome, SubmitStart};
pub use state::{
    failure_message, SubmissionState, DEFAULT_REJECTION_MESSAGE, NETWORK_ERROR_MESSAGE,
    SUCCESS_MESSAGE,
};
