//! OLS `select` response bodies.
//!
//! Only the path `response.docs` matters; everything else the server sends
//! (facets, highlighting, `responseHeader`) is ignored.

use dox_core::{OntologyTerm, SearchError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SelectBody {
    response: SelectResponse,
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    docs: Vec<OntologyTerm>,
}

/// Extract the result docs from a success body.
pub fn parse_docs(body: &[u8]) -> Result<Vec<OntologyTerm>, SearchError> {
    serde_json::from_slice::<SelectBody>(body)
        .map(|b| b.response.docs)
        .map_err(|e| SearchError::Parse(e.to_string()))
}

/// The top-level `message` string of an error body, if there is one.
pub fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}
