//! Search error taxonomy.
//!
//! Every failure of an ontology search is one of three kinds. None of them
//! escape the fetcher: they are flattened into a single user-facing line by
//! [`SearchError::user_message`] and stored in
//! [`FetchStatus::Failed`](crate::FetchStatus::Failed).

use thiserror::Error;

/// Message shown when neither the server nor the transport said anything
/// useful.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The request never produced a response (DNS, connect, TLS, reset…).
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status. `message` is the
    /// body's `message` field when the server provided one.
    #[error("Request failed with status code {status}")]
    Server { status: u16, message: Option<String> },

    /// A success response whose body did not have the expected shape.
    #[error("{0}")]
    Parse(String),
}

impl SearchError {
    /// The text to display in place of the results.
    ///
    /// Priority: server-provided message, then the transport-level message,
    /// then [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        if let SearchError::Server { message: Some(m), .. } = self {
            if !m.trim().is_empty() {
                return m.clone();
            }
        }
        let transport = self.to_string();
        if transport.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            transport
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::server_message(
        SearchError::Server { status: 500, message: Some("rate limited".into()) },
        "rate limited"
    )]
    #[case::server_without_message(
        SearchError::Server { status: 502, message: None },
        "Request failed with status code 502"
    )]
    #[case::server_blank_message(
        SearchError::Server { status: 503, message: Some("  ".into()) },
        "Request failed with status code 503"
    )]
    #[case::network(SearchError::Network("connection refused".into()), "connection refused")]
    #[case::parse(SearchError::Parse("missing field `response`".into()), "missing field `response`")]
    #[case::empty_network(SearchError::Network(String::new()), FALLBACK_MESSAGE)]
    #[case::empty_parse(SearchError::Parse(" ".into()), FALLBACK_MESSAGE)]
    fn user_message_priority(#[case] err: SearchError, #[case] expected: &str) {
        assert_eq!(err.user_message(), expected);
    }
}
