//! Core types for dox-core.
//!
//! [`OntologyTerm`] is the one record the remote API hands back. It is a
//! plain value object: two terms with the same fields are the same term.

use serde::{Deserialize, Deserializer, Serialize};

/// One ontology entry as returned in `response.docs` of an OLS `select`
/// query.
///
/// Every field defaults to the empty string when the server omits it or
/// sends `null`; the renderer shows empty values rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyTerm {
    /// Human-readable term name, e.g. `"breast cancer"`.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub label: String,
    /// Canonical IRI of the term.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub iri: String,
    /// Free-text definition. OLS sends this as a list of strings; the
    /// entries are joined with a single space.
    #[serde(default, deserialize_with = "string_or_seq")]
    pub description: String,
    /// OBO-style identifier, e.g. `"MONDO:0007254"`.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub obo_id: String,
}

impl OntologyTerm {
    pub fn new(
        label: impl Into<String>,
        iri: impl Into<String>,
        description: impl Into<String>,
        obo_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            iri: iri.into(),
            description: description.into(),
            obo_id: obo_id.into(),
        }
    }
}

fn string_or_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

fn string_or_seq<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(de)? {
        Some(OneOrMany::One(s)) => s,
        Some(OneOrMany::Many(parts)) => parts.join(" "),
        None => String::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
