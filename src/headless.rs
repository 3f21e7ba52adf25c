//! One-shot search for scripts and pipes.
//!
//! Runs a single query through [`fetcher::search_once`] (no debounce) and
//! prints the result cards. A blank query prints the featured-diseases list,
//! the same thing the TUI shows before anything is typed.

use std::io::Write;

use dox_core::{
    featured::{FEATURED, INTRO},
    fetcher, FetchStatus, OntologySearch, OntologyTerm,
};

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable cards, one block per term.
    #[default]
    Text,
    /// One JSON object per line.
    Jsonl,
}

/// Run `query` against `source` and write the outcome to `out`.
///
/// A failed search is returned as an error carrying the user-facing message.
pub async fn run<S, W>(
    source: &S,
    query: &str,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: OntologySearch,
    W: Write,
{
    let state = fetcher::search_once(source, query).await;
    tracing::debug!(
        query = state.active_query(),
        status = ?state.status(),
        results = state.results().len(),
        "headless: search finished"
    );

    match state.status() {
        FetchStatus::Failed(message) => anyhow::bail!("{message}"),
        FetchStatus::Idle => write_featured(format, out)?,
        FetchStatus::Success | FetchStatus::Loading => {
            for term in state.results() {
                write_term(term, format, out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_term<W: Write>(term: &OntologyTerm, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(term)?)?,
        OutputFormat::Text => {
            writeln!(out, "{}", term.label)?;
            writeln!(out, "  Latest Article: {}", term.iri)?;
            writeln!(out, "  Description: {}", term.description)?;
            writeln!(out, "  OBO ID: {}", term.obo_id)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_featured<W: Write>(format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Jsonl => {
            for disease in &FEATURED {
                let line = serde_json::json!({
                    "name": disease.name,
                    "summary": disease.summary,
                });
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Text => {
            writeln!(out, "{INTRO}")?;
            writeln!(out)?;
            for disease in &FEATURED {
                writeln!(out, "{}", disease.name)?;
                writeln!(out, "  {}", disease.summary)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dox_core::SearchError;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        outcome: Result<Vec<OntologyTerm>, SearchError>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(outcome: Result<Vec<OntologyTerm>, SearchError>) -> Self {
            Self { outcome, calls: AtomicUsize::new(0) }
        }
    }

    impl OntologySearch for Fixed {
        async fn search(&self, _query: &str) -> Result<Vec<OntologyTerm>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    async fn output(source: &Fixed, query: &str, format: OutputFormat) -> (anyhow::Result<()>, String) {
        let mut buf = Vec::new();
        let result = run(source, query, format, &mut buf).await;
        (result, String::from_utf8(buf).expect("utf-8 output"))
    }

    #[tokio::test]
    async fn text_card_has_all_four_fields() {
        let source = Fixed::new(Ok(vec![OntologyTerm::new(
            "Cancer",
            "http://purl.obolibrary.org/obo/MONDO_0004992",
            "A malignant neoplasm.",
            "MONDO:0004992",
        )]));
        let (result, text) = output(&source, "cancer", OutputFormat::Text).await;
        assert!(result.is_ok());
        assert_eq!(
            text,
            "Cancer\n  Latest Article: http://purl.obolibrary.org/obo/MONDO_0004992\n  \
             Description: A malignant neoplasm.\n  OBO ID: MONDO:0004992\n\n"
        );
    }

    #[tokio::test]
    async fn jsonl_emits_one_object_per_term() {
        let source = Fixed::new(Ok(vec![
            OntologyTerm::new("a", "", "", ""),
            OntologyTerm::new("b", "", "", ""),
        ]));
        let (_, text) = output(&source, "x", OutputFormat::Jsonl).await;
        let labels: Vec<String> = text
            .lines()
            .map(|l| serde_json::from_str::<OntologyTerm>(l).expect("valid json").label)
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn blank_query_prints_featured_without_searching() {
        let source = Fixed::new(Ok(vec![]));
        let (result, text) = output(&source, "   ", OutputFormat::Text).await;
        assert!(result.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(text.starts_with(INTRO));
        for disease in &FEATURED {
            assert!(text.contains(disease.name));
        }
    }

    #[tokio::test]
    async fn failure_carries_user_message() {
        let source = Fixed::new(Err(SearchError::Server {
            status: 500,
            message: Some("rate limited".into()),
        }));
        let (result, text) = output(&source, "cancer", OutputFormat::Text).await;
        let err = result.expect_err("search should fail");
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(text, "");
    }
}
