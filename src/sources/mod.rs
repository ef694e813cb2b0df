//! News-search providers and the collector that fans queries out over them.
//!
//! # Supported Providers
//!
//! | Provider | Module | Result field | Notes |
//! |----------|--------|--------------|-------|
//! | newsdata.io | [`newsdata`] | `results` | Category codes or boolean `q` |
//! | Brave Search | [`brave`] | `web.results` | Category codes are sent as plain query text |
//!
//! Each provider implements [`NewsSource`]. [`collect`] runs every query,
//! logs the ones that fail, and concatenates what came back in query order.

use crate::error::ApiError;
use crate::models::{ArticleRecord, QuerySpec};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

pub mod brave;
pub mod newsdata;

/// A news-search API that answers one [`QuerySpec`] with a list of records.
pub trait NewsSource {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Run one query. Order of the returned records is the provider's order.
    async fn search(&self, query: &QuerySpec) -> Result<Vec<ArticleRecord>, ApiError>;
}

/// Run every query against `source` and concatenate the results.
///
/// A failing query is logged and contributes nothing. Up to `concurrency`
/// queries run at once, but output order always follows `queries` order.
/// Duplicates across queries are kept.
#[instrument(level = "info", skip_all, fields(source = source.name(), queries = queries.len()))]
pub async fn collect<S: NewsSource>(
    source: &S,
    queries: &[QuerySpec],
    concurrency: usize,
) -> Vec<ArticleRecord> {
    let per_query: Vec<Vec<ArticleRecord>> = stream::iter(queries)
        .map(|query| async move {
            match source.search(query).await {
                Ok(records) => {
                    info!(label = %query.label, count = records.len(), "Collected articles");
                    records
                }
                Err(e) => {
                    warn!(
                        label = %query.label,
                        error = %e.for_log(),
                        "News query failed; treating as empty"
                    );
                    Vec::new()
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let articles: Vec<ArticleRecord> = per_query.into_iter().flatten().collect();
    info!(count = articles.len(), "Total articles collected");
    articles
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned provider: answers by query label, records every call.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub answers: HashMap<String, Result<Vec<ArticleRecord>, u16>>,
        pub delays_ms: HashMap<String, u64>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub fn answer(mut self, label: &str, records: Vec<ArticleRecord>) -> Self {
            self.answers.insert(label.to_string(), Ok(records));
            self
        }

        pub fn fail(mut self, label: &str, status: u16) -> Self {
            self.answers.insert(label.to_string(), Err(status));
            self
        }

        pub fn delay(mut self, label: &str, ms: u64) -> Self {
            self.delays_ms.insert(label.to_string(), ms);
            self
        }
    }

    impl NewsSource for FakeSource {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn search(&self, query: &QuerySpec) -> Result<Vec<ArticleRecord>, ApiError> {
            self.calls.lock().unwrap().push(query.label.clone());
            if let Some(ms) = self.delays_ms.get(&query.label) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            match self.answers.get(&query.label) {
                Some(Ok(records)) => Ok(records.clone()),
                Some(Err(status)) => Err(ApiError::Status {
                    status: *status,
                    message: "boom".to_string(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }

    fn queries(labels: &[&str]) -> Vec<QuerySpec> {
        labels
            .iter()
            .map(|l| QuerySpec::category(l, l, 8))
            .collect()
    }

    #[tokio::test]
    async fn test_failed_query_contributes_nothing() {
        let source = FakeSource::default()
            .answer("global", vec![ArticleRecord::new("A", "u1")])
            .fail("tech", 500);

        let articles = collect(&source, &queries(&["global", "tech"]), 1).await;

        assert_eq!(articles, vec![ArticleRecord::new("A", "u1")]);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_later_queries() {
        let source = FakeSource::default()
            .fail("global", 429)
            .answer("tech", vec![ArticleRecord::new("T", "t1")])
            .answer("business", vec![ArticleRecord::new("B", "b1")]);

        let articles = collect(&source, &queries(&["global", "tech", "business"]), 1).await;

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["T", "B"]);
        assert_eq!(source.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicates_across_queries_are_kept() {
        let dup = ArticleRecord::new("Same", "same-url");
        let source = FakeSource::default()
            .answer("global", vec![dup.clone()])
            .answer("tech", vec![dup.clone()]);

        let articles = collect(&source, &queries(&["global", "tech"]), 1).await;

        assert_eq!(articles, vec![dup.clone(), dup]);
    }

    #[tokio::test]
    async fn test_concurrent_collection_keeps_query_order() {
        let source = FakeSource::default()
            .answer(
                "slow",
                vec![ArticleRecord::new("S1", "s1"), ArticleRecord::new("S2", "s2")],
            )
            .delay("slow", 50)
            .answer("fast", vec![ArticleRecord::new("F1", "f1")]);

        let articles = collect(&source, &queries(&["slow", "fast"]), 4).await;

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["S1", "S2", "F1"]);
    }

    #[tokio::test]
    async fn test_sequential_collection_issues_queries_in_order() {
        let source = FakeSource::default();
        collect(&source, &queries(&["a", "b", "c"]), 1).await;
        assert_eq!(*source.calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_treated_as_sequential() {
        let source = FakeSource::default().answer("a", vec![ArticleRecord::new("A", "u")]);
        let articles = collect(&source, &queries(&["a"]), 0).await;
        assert_eq!(articles.len(), 1);
    }
}
