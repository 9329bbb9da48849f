//! Form controller
//!
//! Drives a `SchoolForm` through a submission against a `SchoolApi`.
//!
//! Ownership:
//! - The controller owns the form state; the lock is never held across
//!   an `.await`
//! - The delayed success notification runs in a timer task that holds only
//!   a weak reference to the form, and is aborted on reset and on drop
//! - Lock order is form, then pending timer

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::errors::FormResult;
use super::model::{SchoolForm, SubmitOutcome, SubmitStart};
use super::state::SubmissionState;
use crate::api::SchoolApi;
use crate::config::ClientConfig;
use crate::schema::{Field, ImageFile, SchoolInput, SchoolSchema, ValidationErrors};

/// Notification fired once, a fixed delay after a successful submission
pub type SuccessCallback = Arc<dyn Fn() + Send + Sync>;

/// Async driver for the add-school form
pub struct FormController<A: SchoolApi> {
    form: Arc<Mutex<SchoolForm>>,
    api: Arc<A>,
    success_delay: Duration,
    on_success: Option<SuccessCallback>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: SchoolApi> FormController<A> {
    /// Create a controller with the standard schema and the configured delay
    pub fn new(api: Arc<A>, config: &ClientConfig) -> FormResult<Self> {
        let schema = SchoolSchema::new()?;
        Ok(Self::with_schema(api, schema, config.success_delay()))
    }

    pub fn with_schema(api: Arc<A>, schema: SchoolSchema, success_delay: Duration) -> Self {
        Self {
            form: Arc::new(Mutex::new(SchoolForm::new(schema))),
            api,
            success_delay,
            on_success: None,
            pending: Mutex::new(None),
        }
    }

    /// Register the notification fired after a successful submission
    pub fn on_success(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SchoolForm> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read the form
    pub fn read<R>(&self, f: impl FnOnce(&SchoolForm) -> R) -> R {
        f(&self.lock())
    }

    /// Set a text field; returns the field's displayed message
    pub fn set_text(&self, field: Field, value: impl Into<String>) -> Option<String> {
        self.lock().set_text(field, value).map(str::to_string)
    }

    /// Select or clear the image; returns the image's displayed message
    pub fn set_image(&self, image: Option<ImageFile>) -> Option<String> {
        self.lock().set_image(image).map(str::to_string)
    }

    /// Fill every field from an input record
    pub fn fill(&self, input: SchoolInput) -> ValidationErrors {
        let mut form = self.lock();
        for field in Field::ALL {
            if let Some(value) = input.text(field) {
                form.set_text(field, value);
            }
        }
        form.set_image(input.image);
        form.visible_errors()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state().clone()
    }

    pub fn input(&self) -> SchoolInput {
        self.lock().input().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    pub fn is_valid(&self) -> bool {
        self.lock().is_valid()
    }

    pub fn field_error(&self, field: Field) -> Option<String> {
        self.lock().field_error(field).map(str::to_string)
    }

    pub fn visible_errors(&self) -> ValidationErrors {
        self.lock().visible_errors()
    }

    /// Clear the form and cancel a pending success notification
    pub fn reset(&self) {
        let mut form = self.lock();
        self.cancel_pending();
        form.reset();
    }

    /// Validate, send and record the result of one submission
    pub async fn submit(&self) -> SubmitOutcome {
        let start = self.lock().begin_submit();
        let (attempt, school) = match start {
            SubmitStart::Ready { attempt, school } => (attempt, school),
            SubmitStart::Invalid(errors) => return SubmitOutcome::Invalid(errors),
            SubmitStart::InFlight => return SubmitOutcome::InFlight,
        };

        let result = self.api.create_school(&school).await;

        // The timer is scheduled under the form lock so a concurrent reset
        // either discards this result or cancels the timer.
        let mut form = self.lock();
        let outcome = form.complete_submit(attempt, result);
        if outcome == SubmitOutcome::Succeeded {
            self.schedule_success();
        }
        outcome
    }

    fn schedule_success(&self) {
        let Some(callback) = self.on_success.clone() else {
            return;
        };
        let alive = Arc::downgrade(&self.form);
        let delay = self.success_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if alive.upgrade().is_some() {
                info!("Firing success notification");
                callback();
            } else {
                debug!("Form dropped before success notification");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_pending(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = pending.take() {
            debug!("Cancelling pending success notification");
            handle.abort();
        }
    }

    /// True while a success notification is scheduled and has not fired
    pub fn has_pending_notification(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<A: SchoolApi> Drop for FormController<A> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
