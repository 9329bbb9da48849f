//! Directory View Tests
//!
//! Drives `DirectoryView` against an in-memory `SchoolApi`:
//! - Load, failure and retry
//! - Case-insensitive search over name, city and address
//! - Statistics, empty states and cards
//! - Background loads that outlive the view

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use schooldir::api::{ApiError, ApiResult, School, SchoolApi, SchoolId};
use schooldir::directory::{DirectoryView, LoadState, FETCH_FAILED_MESSAGE};
use schooldir::form::NETWORK_ERROR_MESSAGE;
use schooldir::schema::ValidatedSchool;
use tokio::sync::Notify;

const ASSETS: &str = "https://assets.example.org";

// =============================================================================
// Fake API
// =============================================================================

#[derive(Default)]
struct FakeApi {
    fetches: AtomicUsize,
    results: Mutex<VecDeque<ApiResult<Vec<School>>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    fn with_results(results: Vec<ApiResult<Vec<School>>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..Default::default()
        }
    }
}

impl SchoolApi for FakeApi {
    fn fetch_schools(&self) -> impl Future<Output = ApiResult<Vec<School>>> + Send {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let result = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            result
        }
    }

    fn create_school(
        &self,
        _school: &ValidatedSchool,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        async { Ok(()) }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn school(id: u64, name: &str, address: &str, city: &str, state: &str) -> School {
    School {
        id: SchoolId::Number(id),
        name: name.into(),
        address: address.into(),
        city: city.into(),
        state: state.into(),
        image: format!("schoolImages/{}.png", id),
        contact: "5125550100".into(),
        email: "office@example.edu".into(),
    }
}

fn schools() -> Vec<School> {
    vec![
        school(1, "Green Valley", "12 Orchard Road", "Austin", "TX"),
        school(2, "Blue Ridge", "4 Hill Street", "Dallas", "TX"),
        school(3, "Lakeside Academy", "9 Austin Avenue", "Madison", "WI"),
    ]
}

fn view(results: Vec<ApiResult<Vec<School>>>) -> (DirectoryView<FakeApi>, Arc<FakeApi>) {
    let api = Arc::new(FakeApi::with_results(results));
    (DirectoryView::with_asset_base(Arc::clone(&api), ASSETS), api)
}

fn names(view: &DirectoryView<FakeApi>) -> Vec<String> {
    view.visible().into_iter().map(|s| s.name).collect()
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn test_new_view_is_loading() {
    let (view, api) = view(vec![]);
    assert!(view.is_loading());
    assert!(view.empty_state().is_none());
    assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_keeps_server_order() {
    let (view, api) = view(vec![Ok(schools())]);

    assert!(matches!(view.load().await, LoadState::Loaded(_)));
    assert_eq!(names(&view), ["Green Valley", "Blue Ridge", "Lakeside Academy"]);
    assert_eq!(view.result_label(), "3 schools found");
    assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_then_retry() {
    let (view, api) = view(vec![
        Err(ApiError::ServerRejection {
            status: 503,
            message: None,
        }),
        Ok(schools()),
    ]);

    assert_eq!(view.load().await, LoadState::Failed(FETCH_FAILED_MESSAGE.into()));
    assert!(view.visible().is_empty());
    assert!(view.stats().is_none());
    assert!(view.empty_state().is_none());

    assert!(matches!(view.retry().await, LoadState::Loaded(_)));
    assert_eq!(view.visible().len(), 3);
    assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_transport_failure_message() {
    let (view, _api) = view(vec![Err(ApiError::Transport("dns".into()))]);
    assert_eq!(view.load().await, LoadState::Failed(NETWORK_ERROR_MESSAGE.into()));

    let snapshot = view.snapshot();
    assert_eq!(snapshot.status, "failed");
    assert_eq!(snapshot.error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (view, _api) = view(vec![Ok(vec![
        school(1, "Green Valley", "12 Orchard Road", "Austin", "TX"),
        school(2, "Blue Ridge", "4 Hill Street", "Dallas", "TX"),
    ])]);
    view.load().await;

    for query in ["austin", "AUSTIN", "AuStIn"] {
        view.set_query(query);
        assert_eq!(names(&view), ["Green Valley"], "query {}", query);
    }
    assert_eq!(view.result_label(), "1 school found");

    view.clear_query();
    assert_eq!(names(&view), ["Green Valley", "Blue Ridge"]);
}

#[tokio::test]
async fn test_search_covers_name_city_and_address() {
    let (view, _api) = view(vec![Ok(schools())]);
    view.load().await;

    view.set_query("austin");
    assert_eq!(names(&view), ["Green Valley", "Lakeside Academy"]);

    view.set_query("ridge");
    assert_eq!(names(&view), ["Blue Ridge"]);

    view.set_query("hill st");
    assert_eq!(names(&view), ["Blue Ridge"]);

    // State is not searched
    view.set_query("wi");
    assert!(names(&view).is_empty());
}

// =============================================================================
// Stats, Empty States, Cards
// =============================================================================

#[tokio::test]
async fn test_stats_ignore_query() {
    let (view, _api) = view(vec![Ok(schools())]);
    view.load().await;
    view.set_query("dallas");

    let stats = view.stats().unwrap();
    assert_eq!(stats.total_schools, 3);
    assert_eq!(stats.cities_covered, 3);
    assert_eq!(stats.states_covered, 2);
}

#[tokio::test]
async fn test_empty_states() {
    let (empty, _api) = view(vec![Ok(Vec::new())]);
    empty.load().await;
    let state = empty.empty_state().unwrap();
    assert_eq!(state.title, "No schools found");
    assert!(!state.can_clear_search);
    assert_eq!(empty.result_label(), "0 schools found");

    let (view, _api) = view(vec![Ok(schools())]);
    view.load().await;
    assert!(view.empty_state().is_none());

    view.set_query("zzz");
    let state = view.empty_state().unwrap();
    assert_eq!(state.title, "No schools match your search");
    assert!(state.can_clear_search);
}

#[tokio::test]
async fn test_cards_and_snapshot() {
    let mut list = schools();
    list[1].image = String::new();
    let (view, _api) = view(vec![Ok(list)]);
    view.load().await;

    let cards = view.cards();
    assert_eq!(cards[0].location, "Austin, TX");
    assert_eq!(
        cards[0].image.src(),
        "https://assets.example.org/schoolImages/1.png"
    );
    assert!(cards[1].image.is_placeholder());
    assert!(cards[1].image.src().starts_with("data:image/svg+xml;base64,"));

    let mut card = cards[0].clone();
    card.image_failed();
    assert!(card.image.is_placeholder());

    let json = serde_json::to_value(view.snapshot()).unwrap();
    assert_eq!(json["status"], "loaded");
    assert_eq!(json["label"], "3 schools found");
    assert_eq!(json["schools"][0]["image"]["kind"], "remote");
    assert_eq!(json["stats"]["total_schools"], 3);
    assert!(json.get("empty_state").is_none());
}

// =============================================================================
// Background Loads
// =============================================================================

#[tokio::test]
async fn test_spawn_load_applies_result() {
    let (view, _api) = view(vec![Ok(schools())]);

    view.spawn_load().await.unwrap();
    assert_eq!(view.visible().len(), 3);
}

#[tokio::test]
async fn test_spawn_load_outliving_view_is_harmless() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi {
        results: Mutex::new(VecDeque::from([Ok(schools())])),
        gate: Some(Arc::clone(&gate)),
        ..Default::default()
    });
    let view = DirectoryView::with_asset_base(Arc::clone(&api), ASSETS);

    let handle = view.spawn_load();
    drop(view);
    gate.notify_one();

    handle.await.unwrap();
    assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_latest_load_wins() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi {
        results: Mutex::new(VecDeque::from([
            Ok(vec![school(1, "Stale", "1 Old Road", "Austin", "TX")]),
        ])),
        gate: Some(Arc::clone(&gate)),
        ..Default::default()
    });
    let view = DirectoryView::with_asset_base(Arc::clone(&api), ASSETS);

    let stale = view.spawn_load();
    while api.fetches.load(Ordering::SeqCst) < 1 {
        tokio::task::yield_now().await;
    }

    // The second fetch gets the empty default list
    let fresh = view.spawn_load();
    gate.notify_waiters();
    gate.notify_one();
    stale.await.unwrap();
    fresh.await.unwrap();

    assert_eq!(view.load_state(), LoadState::Loaded(Vec::new()));
}
