//! School list view model
//!
//! Owns the fetched list, its load state and the search query. A load can
//! be awaited directly or spawned; a spawned load holds only a weak
//! reference to the view state and drops its result if the view is gone.
//! Overlapping loads resolve to the most recently started one.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::card::{DirectoryStats, SchoolCard};
use super::filter::SearchFilter;
use crate::api::{ApiError, ApiResult, School, SchoolApi};
use crate::config::ClientConfig;
use crate::form::NETWORK_ERROR_MESSAGE;

/// Shown when the server answers the list request with a non-2xx status
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch schools";

/// Load state of the list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<School>),
    Failed(String),
}

impl LoadState {
    pub fn state_name(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Loaded(_) => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}

/// Message and hint shown when no card is visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    /// Offer a "clear search" action
    pub can_clear_search: bool,
}

impl EmptyState {
    fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self {
                title: "No schools found",
                hint: "Get started by adding your first school to the database.",
                can_clear_search: false,
            }
        } else {
            Self {
                title: "No schools match your search",
                hint: "Try adjusting your search terms or clear the search to see all schools.",
                can_clear_search: true,
            }
        }
    }
}

/// Everything needed to render the list at one instant
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySnapshot {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub query: String,
    pub label: String,
    pub schools: Vec<SchoolCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DirectoryStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Default)]
struct ViewState {
    load: LoadState,
    query: String,
    generation: u64,
}

/// Message to show for a failed list fetch
pub fn fetch_failure_message(err: &ApiError) -> &'static str {
    if err.is_server_rejection() {
        FETCH_FAILED_MESSAGE
    } else {
        NETWORK_ERROR_MESSAGE
    }
}

/// `"1 school found"`, `"3 schools found"`
pub fn result_label(count: usize) -> String {
    if count == 1 {
        "1 school found".to_string()
    } else {
        format!("{} schools found", count)
    }
}

/// The school list view
pub struct DirectoryView<A: SchoolApi> {
    state: Arc<Mutex<ViewState>>,
    api: Arc<A>,
    asset_base: String,
}

impl<A: SchoolApi> DirectoryView<A> {
    /// Create a view in the `Loading` state; call `load` or `spawn_load`
    pub fn new(api: Arc<A>, config: &ClientConfig) -> Self {
        Self::with_asset_base(api, config.asset_base())
    }

    pub fn with_asset_base(api: Arc<A>, asset_base: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::default())),
            api,
            asset_base: asset_base.into(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        lock_state(&self.state)
    }

    fn start_load(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.load = LoadState::Loading;
        state.generation
    }

    /// Fetch the list and apply the result
    pub async fn load(&self) -> LoadState {
        let generation = self.start_load();
        let result = self.api.fetch_schools().await;
        apply(&self.state, generation, result);
        self.load_state()
    }

    /// Repeat the fetch after a failure
    pub async fn retry(&self) -> LoadState {
        info!("Retrying school list fetch");
        self.load().await
    }

    /// Fetch in the background
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let generation = self.start_load();
        let view: Weak<Mutex<ViewState>> = Arc::downgrade(&self.state);
        let api = Arc::clone(&self.api);

        tokio::spawn(async move {
            let result = api.fetch_schools().await;
            match view.upgrade() {
                Some(state) => apply(&state, generation, result),
                None => debug!("School list view dropped before fetch completed"),
            }
        })
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lock().load, LoadState::Loading)
    }

    /// The full fetched list (empty unless loaded)
    pub fn schools(&self) -> Vec<School> {
        match &self.lock().load {
            LoadState::Loaded(schools) => schools.clone(),
            _ => Vec::new(),
        }
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.lock().query = query.into();
    }

    pub fn clear_query(&self) {
        self.lock().query.clear();
    }

    /// Schools matching the current query, in list order
    pub fn visible(&self) -> Vec<School> {
        let state = self.lock();
        let filter = SearchFilter::new(&state.query);
        match &state.load {
            LoadState::Loaded(schools) => schools
                .iter()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn result_label(&self) -> String {
        result_label(self.visible().len())
    }

    /// Statistics over the unfiltered list; `None` unless non-empty
    pub fn stats(&self) -> Option<DirectoryStats> {
        let schools = self.schools();
        if schools.is_empty() {
            None
        } else {
            Some(DirectoryStats::from_schools(&schools))
        }
    }

    /// Empty-state copy; `None` while loading, after failure, or when
    /// something is visible
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !matches!(self.lock().load, LoadState::Loaded(_)) {
            return None;
        }
        if self.visible().is_empty() {
            Some(EmptyState::for_query(&self.query()))
        } else {
            None
        }
    }

    /// Cards for the visible schools
    pub fn cards(&self) -> Vec<SchoolCard> {
        self.visible()
            .iter()
            .map(|s| SchoolCard::from_school(s, &self.asset_base))
            .collect()
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        let load = self.load_state();
        let cards = self.cards();
        DirectorySnapshot {
            status: load.state_name(),
            error: match &load {
                LoadState::Failed(message) => Some(message.clone()),
                _ => None,
            },
            query: self.query(),
            label: result_label(cards.len()),
            schools: cards,
            stats: self.stats(),
            empty_state: self.empty_state(),
        }
    }
}

fn lock_state(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn apply(state: &Mutex<ViewState>, generation: u64, result: ApiResult<Vec<School>>) {
    let mut state = lock_state(state);
    if state.generation != generation {
        debug!(generation, current = state.generation, "Discarding superseded list fetch");
        return;
    }

    state.load = match result {
        Ok(schools) => {
            info!(count = schools.len(), "School list loaded");
            LoadState::Loaded(schools)
        }
        Err(err) => {
            warn!(code = err.code(), error = %err, "School list fetch failed");
            LoadState::Failed(fetch_failure_message(&err).to_string())
        }
    };
}
