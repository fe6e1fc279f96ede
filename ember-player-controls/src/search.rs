//! Debounced catalog search where the most recently issued query wins.

use ember_player_models::SearchResults;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::provider::CatalogProvider;

pub const DEBOUNCE: Duration = Duration::from_millis(500);
pub const SEARCH_FAILED: &str = "Failed to fetch search results. Please try again.";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Option<SearchResults>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct Search {
    provider: Arc<dyn CatalogProvider>,
    debounce: Duration,
    issued: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl Search {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_debounce(provider, DEBOUNCE)
    }

    pub fn with_debounce(provider: Arc<dyn CatalogProvider>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());

        Self {
            provider,
            debounce,
            issued: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, request: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == request
    }

    /// Runs a search for `query` unless a newer one is issued first.
    ///
    /// A blank query clears everything immediately. Each call claims a sequence
    /// number; results are only written while that number is still the latest.
    pub async fn submit(&self, query: &str) {
        let request = self.issue();

        if query.trim().is_empty() {
            self.state.send_replace(SearchState::default());
            return;
        }

        self.state.send_modify(|state| {
            state.query = query.to_string();
            state.results = None;
            state.error = None;
            state.loading = true;
        });

        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(request) {
            debug!(query, "search superseded while debouncing");
            return;
        }

        let result = self.provider.search(query).await;

        let applied = self.state.send_if_modified(|state| {
            if !self.is_latest(request) {
                return false;
            }

            match &result {
                Ok(results) => {
                    state.results = Some(results.clone());
                    state.error = None;
                }
                Err(error) => {
                    error!(query, %error, "search failed");
                    state.results = None;
                    state.error = Some(SEARCH_FAILED.to_string());
                }
            }
            state.loading = false;
            true
        });

        if !applied {
            debug!(query, "discarding stale search response");
        }
    }

    /// Clears the query and results, and invalidates any search in flight.
    pub fn clear(&self) {
        self.issue();
        self.state.send_replace(SearchState::default());
    }
}
