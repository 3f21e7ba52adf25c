//! Query fetcher: reacts to committed active queries by issuing searches
//! and folding their outcomes into the shared [`SearchState`].
//!
//! Each non-blank commit spawns exactly one request. Requests are never
//! aborted or retried; instead every response travels back with the
//! [`Ticket`] it was issued under and [`SearchState::complete`] drops it if a
//! newer commit has happened in the meantime.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::{OntologySearch, OntologyTerm, SearchError, SearchState, Ticket};

struct Completion {
    ticket: Ticket,
    outcome: Result<Vec<OntologyTerm>, SearchError>,
}

/// Run the fetcher until the active-query sender is dropped.
///
/// Requests still in flight at that point finish in the background but their
/// outcomes are ignored.
pub async fn run<S: OntologySearch>(
    source: Arc<S>,
    mut active: mpsc::UnboundedReceiver<String>,
    state: watch::Sender<SearchState>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

    loop {
        tokio::select! {
            query = active.recv() => {
                let Some(query) = query else { break };

                let mut ticket = None;
                state.send_modify(|s| ticket = s.commit(&query));

                if let Some(ticket) = ticket {
                    tracing::debug!(
                        generation = ticket.generation(),
                        query = ticket.query(),
                        "fetch: request issued"
                    );
                    let source = Arc::clone(&source);
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let outcome = source.search(ticket.query()).await;
                        let _ = done_tx.send(Completion { ticket, outcome });
                    });
                }
            }
            Some(done) = done_rx.recv() => {
                state.send_if_modified(|s| s.complete(&done.ticket, done.outcome));
            }
        }
    }
}

/// Run a single search outside the debounce pipeline, through the same state
/// transitions the interactive session uses.
pub async fn search_once<S: OntologySearch>(source: &S, query: &str) -> SearchState {
    let mut state = SearchState::default();
    if let Some(ticket) = state.commit(query) {
        let outcome = source.search(ticket.query()).await;
        state.complete(&ticket, outcome);
    }
    state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
