//! The seam between the fetcher and whatever answers ontology queries.
//!
//! Production code uses the OLS adapter from `dox-ols`; tests plug in
//! scripted fakes with controllable latency.

use std::future::Future;

use crate::{OntologyTerm, SearchError};

/// An ontology search backend.
///
/// `search` receives the already-trimmed, non-blank active query. It is
/// called at most once per committed query and is never retried.
pub trait OntologySearch: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<OntologyTerm>, SearchError>> + Send;
}
