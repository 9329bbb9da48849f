//! Submission State Machine
//!
//! - States are explicit and enumerable
//! - Exactly one state holds at a time
//! - Transitions are event-driven
//!
//! ```text
//!   Idle ──submit──▶ Submitting ──2xx──────────▶ Succeeded
//!    ▲                   │                          │
//!    │                   └──non-2xx / transport──▶ Failed
//!    │                                              │
//!    └──────────────── reset (from any state) ◀─────┘
//! ```
//!
//! Succeeded and Failed may also start a new attempt directly.

use super::errors::{FormError, FormResult};
use crate::api::ApiError;

/// Shown after a successful create
pub const SUCCESS_MESSAGE: &str = "School added successfully!";

/// Shown when the server rejects a create without a message
pub const DEFAULT_REJECTION_MESSAGE: &str = "Error adding school";

/// Shown when a request cannot complete
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Submission state of a form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing in flight, no message shown
    #[default]
    Idle,

    /// A create request is in flight; submit is disabled
    Submitting,

    /// The last attempt was accepted
    Succeeded { message: String },

    /// The last attempt was rejected or could not complete
    Failed { message: String },
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::Idle
    }

    /// State name for observability
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Submitting => "Submitting",
            Self::Succeeded { .. } => "Succeeded",
            Self::Failed { .. } => "Failed",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Success or failure message, if one is shown
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { message } | Self::Failed { message } => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// Idle | Succeeded | Failed → Submitting
    pub fn begin(&self) -> FormResult<Self> {
        match self {
            Self::Submitting => Err(FormError::forbidden_transition(
                self.state_name(),
                "Submitting",
            )),
            _ => Ok(Self::Submitting),
        }
    }

    /// Submitting → Succeeded
    pub fn succeed(&self) -> FormResult<Self> {
        match self {
            Self::Submitting => Ok(Self::Succeeded {
                message: SUCCESS_MESSAGE.to_string(),
            }),
            _ => Err(FormError::forbidden_transition(self.state_name(), "Succeeded")),
        }
    }

    /// Submitting → Failed
    pub fn fail(&self, message: impl Into<String>) -> FormResult<Self> {
        match self {
            Self::Submitting => Ok(Self::Failed {
                message: message.into(),
            }),
            _ => Err(FormError::forbidden_transition(self.state_name(), "Failed")),
        }
    }

    /// Any → Idle
    pub fn reset(&self) -> Self {
        Self::Idle
    }
}

/// Message to show for a failed create
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::ServerRejection { message, .. } => message
            .clone()
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
        _ => NETWORK_ERROR_MESSAGE.to_string(),
    }
}
