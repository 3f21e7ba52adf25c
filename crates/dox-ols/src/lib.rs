//! dox-ols: EBI Ontology Lookup Service adapter for dox.
//!
//! [`OlsClient`] implements [`dox_core::OntologySearch`] on top of the OLS4
//! `select` endpoint:
//!
//! ```text
//! GET <endpoint>?q=<query>&ontology=efo,mondo&rows=40&start=0&format=json
//! ```
//!
//! Every failure is mapped onto [`SearchError`]; nothing here retries or
//! times out.

pub mod response;

use dox_core::config::SearchConfig;
use dox_core::{OntologySearch, OntologyTerm, SearchError};
use reqwest::Url;

/// Errors raised while constructing a client. Search-time failures are
/// [`SearchError`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid OLS endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client for the OLS `select` API.
#[derive(Debug, Clone)]
pub struct OlsClient {
    http: reqwest::Client,
    endpoint: Url,
    ontologies: String,
    rows: String,
    start: String,
}

impl OlsClient {
    pub fn new(config: &SearchConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dox/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http(config, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http(config: &SearchConfig, http: reqwest::Client) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            endpoint,
            ontologies: config.ontologies.join(","),
            rows: config.rows.to_string(),
            start: config.start.to_string(),
        })
    }

    /// The full request URL for `query`, with every parameter URL-encoded.
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("ontology", &self.ontologies)
            .append_pair("rows", &self.rows)
            .append_pair("start", &self.start)
            .append_pair("format", "json");
        url
    }
}

impl OntologySearch for OlsClient {
    async fn search(&self, query: &str) -> Result<Vec<OntologyTerm>, SearchError> {
        let url = self.request_url(query);
        tracing::debug!(%url, "ols: GET");

        let reply = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = reply.status();
        let body = reply
            .bytes()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "ols: non-success response");
            return Err(SearchError::Server {
                status: status.as_u16(),
                message: response::server_message(&body),
            });
        }

        let docs = response::parse_docs(&body)?;
        tracing::debug!(hits = docs.len(), "ols: parsed docs");
        Ok(docs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
