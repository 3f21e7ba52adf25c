//! The search state machine.
//!
//! [`SearchState`] is the only mutable record the pipeline owns. It changes
//! through exactly two transitions:
//!
//! - [`SearchState::commit`]: a new active query arrived. Blank queries
//!   clear the state; anything else starts a fetch and hands out a
//!   [`Ticket`].
//! - [`SearchState::complete`]: a fetch finished. The outcome is applied
//!   only if its ticket belongs to the latest commit.
//!
//! Every commit bumps `generation`, so a slow response for an old query can
//! never overwrite the state of a newer one.

/// Where the current active query is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No request for the current query (blank query, or nothing typed yet).
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request returned results (possibly zero).
    Success,
    /// The latest request failed; holds the user-facing message.
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Proof that a fetch was started by a particular commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: String,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The trimmed query the request should be issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    active_query: String,
    results: Vec<crate::OntologyTerm>,
    status: FetchStatus,
    generation: u64,
}

impl SearchState {
    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn results(&self) -> &[crate::OntologyTerm] {
        &self.results
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the active query is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.active_query.trim().is_empty()
    }

    /// Apply a newly committed active query.
    ///
    /// Returns `None` for a blank query (results cleared, status `Idle`, no
    /// request to make). Otherwise the status becomes `Loading`, previous
    /// results and errors are dropped, and the returned ticket must be
    /// passed back to [`complete`](Self::complete) with the outcome.
    pub fn commit(&mut self, query: &str) -> Option<Ticket> {
        self.generation += 1;
        self.active_query = query.to_string();
        self.results.clear();

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.status = FetchStatus::Idle;
            tracing::debug!(generation = self.generation, "search: cleared");
            return None;
        }

        self.status = FetchStatus::Loading;
        tracing::debug!(generation = self.generation, query = trimmed, "search: loading");
        Some(Ticket {
            generation: self.generation,
            query: trimmed.to_string(),
        })
    }

    /// Apply the outcome of the fetch started by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when a newer commit
    /// has happened since the ticket was issued.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        outcome: Result<Vec<crate::OntologyTerm>, crate::SearchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                query = %ticket.query,
                "search: discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(terms) => {
                tracing::debug!(generation = self.generation, hits = terms.len(), "search: success");
                self.results = terms;
                self.status = FetchStatus::Success;
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(generation = self.generation, error = %message, "search: failed");
                self.results.clear();
                self.status = FetchStatus::Failed(message);
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
