//! One run of the digest: collect → summarize → publish.
//!
//! Every stage absorbs its own failures, so [`run`] cannot fail. The only
//! early exit is an empty collection, which skips the model call and the
//! write entirely.

use crate::api::AskAsync;
use crate::models::QuerySpec;
use crate::outputs::notion::Workspace;
use crate::outputs::publisher::Publisher;
use crate::sources::{NewsSource, collect};
use crate::summarizer::Summarizer;
use tracing::{info, instrument, warn};

/// Counters for one run, logged by `main` on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub collected: usize,
    /// The model produced the digest. `false` when nothing was collected or the
    /// fallback sentence was published instead.
    pub summarized: bool,
    pub published: bool,
}

/// The collector's inputs.
#[derive(Debug)]
pub struct Collection<'a, S> {
    pub source: &'a S,
    pub queries: &'a [QuerySpec],
    pub concurrency: usize,
}

#[instrument(level = "info", skip_all)]
pub async fn run<S, A, W>(
    collection: Collection<'_, S>,
    summarizer: &Summarizer<A>,
    publisher: &Publisher<W>,
) -> RunReport
where
    S: NewsSource,
    A: AskAsync<Response = String>,
    W: Workspace,
{
    let articles = collect(collection.source, collection.queries, collection.concurrency).await;
    let mut report = RunReport {
        collected: articles.len(),
        ..RunReport::default()
    };

    if articles.is_empty() {
        warn!("No articles collected; skipping summary and publish");
        return report;
    }

    info!(count = articles.len(), "Summarizing collected articles");
    let digest = summarizer.summarize(&articles).await;
    report.summarized = digest.from_model;

    info!(from_model = digest.from_model, "Publishing digest");
    report.published = publisher.publish(&digest.text).await;
    report
}
