use crate::filters::FilterSet;
use crate::models::Property;
use crate::search::error::SearchError;
use crate::search::traits::SearchBackend;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifecycle of the listings search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No filter set has been established yet.
    Uninitialized,
    Loading,
    /// The search succeeded. An empty list means "no matches".
    Ready(Vec<Property>),
    Errored { reason: String },
}

/// Flat view of [`SearchState`] for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub properties: Vec<Property>,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&SearchState> for SearchResult {
    fn from(state: &SearchState) -> Self {
        match state {
            SearchState::Uninitialized => SearchResult::default(),
            SearchState::Loading => SearchResult {
                loading: true,
                ..Default::default()
            },
            SearchState::Ready(properties) => SearchResult {
                properties: properties.clone(),
                ..Default::default()
            },
            SearchState::Errored { reason } => SearchResult {
                error: Some(reason.clone()),
                ..Default::default()
            },
        }
    }
}

/// A dispatched search. Only the most recently dispatched ticket may
/// publish its outcome.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub seq: u64,
    pub filters: FilterSet,
}

#[derive(Debug)]
struct Inner {
    latest: u64,
    state: SearchState,
    abandoned: bool,
}

/// Runs searches against a [`SearchBackend`] with last-request-wins semantics.
pub struct SearchExecutor {
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
    inner: Mutex<Inner>,
}

impl SearchExecutor {
    pub fn new(backend: Arc<dyn SearchBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            inner: Mutex::new(Inner {
                latest: 0,
                state: SearchState::Uninitialized,
                abandoned: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SearchState {
        self.lock().state.clone()
    }

    pub fn result(&self) -> SearchResult {
        SearchResult::from(&self.lock().state)
    }

    /// Sequence number of the newest dispatched search (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.lock().latest
    }

    /// Register a new search and move to `Loading`.
    ///
    /// Any ticket issued earlier becomes stale from this point on.
    pub fn dispatch(&self, filters: FilterSet) -> SearchTicket {
        let mut inner = self.lock();
        inner.latest += 1;
        if !inner.abandoned {
            inner.state = SearchState::Loading;
        }
        debug!("Dispatched search #{} with {:?}", inner.latest, filters);
        SearchTicket {
            seq: inner.latest,
            filters,
        }
    }

    /// Query the backend, bounded by the configured timeout. Never fails:
    /// errors come back as the `Err` side for [`complete`](Self::complete).
    pub async fn execute(&self, filters: &FilterSet) -> Result<Vec<Property>, SearchError> {
        match tokio::time::timeout(self.timeout, self.backend.search(filters)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchError::Timeout(self.timeout)),
        }
    }

    /// Publish the outcome of search `seq`.
    ///
    /// Returns `false` and leaves the state untouched when a newer search has
    /// been dispatched or the executor was abandoned.
    pub fn complete(&self, seq: u64, outcome: Result<Vec<Property>, SearchError>) -> bool {
        let mut inner = self.lock();
        if inner.abandoned {
            debug!("Dropping result of search #{} after abandon", seq);
            return false;
        }
        if seq != inner.latest {
            debug!(
                "Discarding stale result of search #{} (latest is #{})",
                seq, inner.latest
            );
            return false;
        }

        inner.state = match outcome {
            Ok(properties) => {
                info!("Search #{} ready with {} properties", seq, properties.len());
                SearchState::Ready(properties)
            }
            Err(err) => {
                warn!("Search #{} failed: {}", seq, err);
                SearchState::Errored {
                    reason: err.to_string(),
                }
            }
        };
        true
    }

    /// Execute a dispatched ticket and publish its outcome if still current.
    pub async fn run(&self, ticket: SearchTicket) -> bool {
        debug!("Querying {} for search #{}", self.backend.source_name(), ticket.seq);
        let outcome = self.execute(&ticket.filters).await;
        self.complete(ticket.seq, outcome)
    }

    /// Dispatch and run in one go.
    pub async fn search(&self, filters: FilterSet) -> bool {
        let ticket = self.dispatch(filters);
        self.run(ticket).await
    }

    /// Stop publishing results. In-flight searches resolve silently.
    pub fn abandon(&self) {
        let mut inner = self.lock();
        if !inner.abandoned {
            info!("Abandoning listings search (latest #{})", inner.latest);
        }
        inner.abandoned = true;
    }
}
