//! Submission Pipeline Tests
//!
//! Drives `FormController` against an in-memory `SchoolApi`:
//! - Invalid input never reaches the network
//! - Success clears the form and notifies once after the delay
//! - Server rejections surface verbatim and keep the input
//! - Reset and drop cancel the pending notification
//! - Results of superseded submissions are discarded

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use schooldir::api::{ApiError, ApiResult, School, SchoolApi};
use schooldir::form::{
    FormController, SubmissionState, SubmitOutcome, NETWORK_ERROR_MESSAGE, SUCCESS_MESSAGE,
};
use schooldir::schema::{Field, ImageFile, SchoolInput, SchoolSchema, ValidatedSchool};
use tokio::sync::Notify;

const DELAY: Duration = Duration::from_secs(2);

// =============================================================================
// Fake API
// =============================================================================

#[derive(Default)]
struct FakeApi {
    calls: AtomicUsize,
    results: Mutex<VecDeque<ApiResult<()>>>,
    sent: Mutex<Vec<ValidatedSchool>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    fn with_results(results: Vec<ApiResult<()>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..Default::default()
        }
    }

    /// Every create waits on `gate` before answering
    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SchoolApi for FakeApi {
    fn fetch_schools(&self) -> impl Future<Output = ApiResult<Vec<School>>> + Send {
        async { Ok(Vec::new()) }
    }

    fn create_school(
        &self,
        school: &ValidatedSchool,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(school.clone());
        let result = self.results.lock().unwrap().pop_front().unwrap_or(Ok(()));
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            result
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn valid_input() -> SchoolInput {
    SchoolInput {
        name: "Green Valley".into(),
        address: "12 Orchard Road".into(),
        city: "Austin".into(),
        state: "TX".into(),
        contact: "5125550100".into(),
        email_id: "office@gv.edu".into(),
        image: Some(ImageFile::new("gv.png", "image/png", vec![1, 2, 3])),
    }
}

fn controller(api: Arc<FakeApi>, fired: Arc<AtomicUsize>) -> FormController<FakeApi> {
    FormController::with_schema(api, SchoolSchema::new().unwrap(), DELAY).on_success(move || {
        fired.fetch_add(1, Ordering::SeqCst);
    })
}

async fn wait_until_submitting(controller: &FormController<FakeApi>) {
    while !controller.state().is_submitting() {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Validation Gate
// =============================================================================

#[tokio::test]
async fn test_invalid_input_makes_no_request() {
    let api = Arc::new(FakeApi::default());
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = controller(Arc::clone(&api), fired);

    let mut input = valid_input();
    input.contact = "12345".into();
    controller.fill(input);

    let outcome = controller.submit().await;
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected Invalid, got {:?}", outcome);
    };
    assert_eq!(errors.get(Field::Contact), Some("Contact must be exactly 10 digits"));
    assert_eq!(api.calls(), 0);
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_submit_touches_every_field() {
    let api = Arc::new(FakeApi::default());
    let controller = controller(Arc::clone(&api), Arc::new(AtomicUsize::new(0)));

    assert!(controller.visible_errors().is_empty());
    assert!(controller.can_submit());

    let outcome = controller.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(controller.visible_errors().len(), Field::ALL.len());
    assert_eq!(
        controller.field_error(Field::Image).as_deref(),
        Some("School image is required")
    );
    assert_eq!(api.calls(), 0);
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_success_resets_and_notifies_once_after_delay() {
    let api = Arc::new(FakeApi::default());
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = controller(Arc::clone(&api), Arc::clone(&fired));
    controller.fill(valid_input());

    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 1);
    assert_eq!(api.sent.lock().unwrap()[0].name(), "Green Valley");

    assert!(controller.input().is_empty());
    assert_eq!(controller.state().message(), Some(SUCCESS_MESSAGE));
    assert!(controller.visible_errors().is_empty());

    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(controller.has_pending_notification());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!controller.has_pending_notification());
}

#[tokio::test(start_paused = true)]
async fn test_drop_before_delay_cancels_notification() {
    let api = Arc::new(FakeApi::default());
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = controller(api, Arc::clone(&fired));
    controller.fill(valid_input());

    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    drop(controller);

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_notification() {
    let api = Arc::new(FakeApi::default());
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = controller(api, Arc::clone(&fired));
    controller.fill(valid_input());

    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    assert!(controller.has_pending_notification());

    controller.reset();
    assert!(!controller.has_pending_notification());
    assert_eq!(controller.state(), SubmissionState::Idle);

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Failure Path
// =============================================================================

#[tokio::test]
async fn test_server_message_shown_verbatim_and_input_kept() {
    let api = Arc::new(FakeApi::with_results(vec![Err(ApiError::ServerRejection {
        status: 409,
        message: Some("Duplicate school".into()),
    })]));
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = controller(Arc::clone(&api), Arc::clone(&fired));
    controller.fill(valid_input());

    let outcome = controller.submit().await;
    assert_eq!(outcome, SubmitOutcome::Failed("Duplicate school".into()));
    assert_eq!(controller.state().message(), Some("Duplicate school"));
    assert_eq!(controller.input(), valid_input());
    assert!(!controller.has_pending_notification());
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transport_failure_uses_network_message() {
    let api = Arc::new(FakeApi::with_results(vec![Err(ApiError::Transport(
        "connection refused".into(),
    ))]));
    let controller = controller(api, Arc::new(AtomicUsize::new(0)));
    controller.fill(valid_input());

    let outcome = controller.submit().await;
    assert_eq!(outcome, SubmitOutcome::Failed(NETWORK_ERROR_MESSAGE.into()));
    assert_eq!(controller.input().name, "Green Valley");
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let api = Arc::new(FakeApi::with_results(vec![
        Err(ApiError::ServerRejection {
            status: 500,
            message: None,
        }),
        Ok(()),
    ]));
    let controller = controller(Arc::clone(&api), Arc::new(AtomicUsize::new(0)));
    controller.fill(valid_input());

    assert!(matches!(controller.submit().await, SubmitOutcome::Failed(_)));
    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 2);
}

// =============================================================================
// In-Flight Handling
// =============================================================================

#[tokio::test]
async fn test_second_submit_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi::gated(Arc::clone(&gate)));
    let controller = Arc::new(controller(Arc::clone(&api), Arc::new(AtomicUsize::new(0))));
    controller.fill(valid_input());

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit().await }
    });
    wait_until_submitting(&controller).await;

    assert_eq!(controller.submit().await, SubmitOutcome::InFlight);
    assert!(!controller.can_submit());

    gate.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_flight_discards_result() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi::gated(Arc::clone(&gate)));
    let fired = Arc::new(AtomicUsize::new(0));
    let controller = Arc::new(controller(api, Arc::clone(&fired)));
    controller.fill(valid_input());

    let pending = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit().await }
    });
    wait_until_submitting(&controller).await;

    controller.reset();
    controller.set_text(Field::Name, "Blue Ridge");
    gate.notify_one();

    assert_eq!(pending.await.unwrap(), SubmitOutcome::Discarded);
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.input().name, "Blue Ridge");

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

/// Whatever the interleaving, a reset that has returned leaves no
/// notification to fire.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reset_never_leaks_notification() {
    let delay = Duration::from_millis(10);

    for _ in 0..50 {
        let api = Arc::new(FakeApi::default());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let controller = Arc::new(
            FormController::with_schema(api, SchoolSchema::new().unwrap(), delay).on_success(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
            ),
        );
        controller.fill(valid_input());

        let submit = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        });
        let reset = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.reset() }
        });

        let outcome = submit.await.unwrap();
        reset.await.unwrap();
        assert!(
            matches!(
                outcome,
                SubmitOutcome::Succeeded | SubmitOutcome::Discarded | SubmitOutcome::Invalid(_)
            ),
            "unexpected {:?}",
            outcome
        );

        tokio::time::sleep(delay * 3).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!controller.has_pending_notification());
    }
}
