//! dox: Disease Ontology eXplorer
//!
//! Terminal search client for EFO and MONDO disease terms served by the EBI
//! Ontology Lookup Service. The interactive UI lives in `dox-tui`; this crate
//! adds the one-shot [`headless`] printer used by `dox --query`.
//!
//! # Architecture
//!
//! ```text
//! SearchBar ──► Debouncer ──► Fetcher ──► SearchState ──► TUI
//!                               │
//! --query ──────────────────────┴──► search_once ──► headless printer
//! ```

pub mod headless;
