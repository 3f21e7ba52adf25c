//! OLS response bodies and client configuration shared across harnesses.

use dox_core::config::SearchConfig;
use serde_json::{json, Value};

/// One `response.docs` entry in the shape OLS sends it: `description` is an
/// array of strings.
pub fn doc(label: &str, iri: &str, description: &[&str], obo_id: &str) -> Value {
    json!({
        "label": label,
        "iri": iri,
        "description": description,
        "obo_id": obo_id,
    })
}

/// A complete `select` body wrapping `docs`.
pub fn select_body(docs: &[Value]) -> String {
    json!({
        "responseHeader": { "status": 0 },
        "response": { "numFound": docs.len(), "start": 0, "docs": docs },
    })
    .to_string()
}

/// A body containing a single doc labelled `label`.
pub fn single_doc(label: &str) -> String {
    select_body(&[doc(
        label,
        &format!("http://example.org/{label}"),
        &[],
        "EFO:0000001",
    )])
}

/// Default search settings pointed at `endpoint`.
pub fn search_config(endpoint: &str) -> SearchConfig {
    SearchConfig {
        endpoint: endpoint.to_string(),
        ..SearchConfig::default()
    }
}

pub const CANCER_IRI: &str = "http://purl.obolibrary.org/obo/MONDO_0004992";
pub const CANCER_OBO_ID: &str = "MONDO:0004992";
pub const CANCER_DESCRIPTION: &[&str] = &[
    "A tumor composed of atypical neoplastic, often pleomorphic cells that invade other tissues.",
    "Malignant neoplasms often metastasize to distant anatomic sites.",
];

pub fn cancer_doc() -> Value {
    doc("cancer", CANCER_IRI, CANCER_DESCRIPTION, CANCER_OBO_ID)
}
