//! dox-core: Disease Ontology eXplorer core library.
//!
//! This crate owns the search pipeline and the types shared by the OLS
//! adapter, the TUI and the headless printer.
//!
//! # Architecture
//!
//! ```text
//! RawQuery ──► Debouncer ──► Fetcher ──► SearchState ──► UI
//!                               │
//!                               └──► OntologySearch (dox-ols)
//! ```
//!
//! The debouncer and fetcher run as `tokio` tasks wired together by
//! [`session::SearchSession`]; the UI only ever reads [`SearchState`]
//! snapshots from a `watch` channel.

pub mod config;
pub mod debounce;
pub mod error;
pub mod featured;
pub mod fetcher;
pub mod session;
pub mod source;
pub mod state;
pub mod types;

pub use error::SearchError;
pub use source::OntologySearch;
pub use state::{FetchStatus, SearchState, Ticket};
pub use types::OntologyTerm;
