//! A running search pipeline: debouncer and fetcher tasks plus the channels
//! that connect them to the UI.
//!
//! ```text
//! set_query ──watch──► debounce::run ──mpsc──► fetcher::run ──watch──► subscribe / snapshot
//! ```
//!
//! Must be created from within a tokio runtime. Dropping the session aborts
//! both tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{debounce, fetcher, OntologySearch, SearchState};

pub struct SearchSession {
    raw: watch::Sender<String>,
    state: watch::Receiver<SearchState>,
    tasks: [JoinHandle<()>; 2],
}

impl SearchSession {
    /// Spawn the debouncer and fetcher for `source` with the given quiet
    /// period.
    pub fn spawn<S: OntologySearch>(source: Arc<S>, quiet: Duration) -> Self {
        let (raw, raw_rx) = watch::channel(String::new());
        let (active_tx, active_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(SearchState::default());

        let debouncer = tokio::spawn(debounce::run(raw_rx, String::new(), quiet, active_tx));
        let fetcher = tokio::spawn(fetcher::run(source, active_rx, state_tx));
        tracing::debug!(quiet_ms = quiet.as_millis() as u64, "session: started");

        Self {
            raw,
            state,
            tasks: [debouncer, fetcher],
        }
    }

    /// Replace the raw query. Called on every edit of the search input.
    pub fn set_query(&self, raw: &str) {
        self.raw.send_replace(raw.to_string());
    }

    /// The current raw query.
    pub fn raw_query(&self) -> String {
        self.raw.borrow().clone()
    }

    /// A copy of the latest search state.
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified whenever the search state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
