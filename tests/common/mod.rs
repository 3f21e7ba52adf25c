//! Shared test utilities for dox integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod fake_ols_api;
pub mod fixtures;

pub use fake_ols_api::FakeOlsApi;
pub use fixtures::*;

use std::time::Duration;

use dox_core::SearchState;
use tokio::sync::watch;

/// Wait until the watched search state satisfies `pred`, failing the test
/// after `limit`.
pub async fn wait_for_state(
    rx: &mut watch::Receiver<SearchState>,
    limit: Duration,
    pred: impl FnMut(&SearchState) -> bool,
) -> SearchState {
    tokio::time::timeout(limit, rx.wait_for(pred))
        .await
        .expect("timed out waiting for search state")
        .expect("search session stopped")
        .clone()
}
