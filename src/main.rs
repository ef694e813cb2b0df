//! # News Digest
//!
//! A daily news digest that collects headlines from a news-search API, asks
//! Claude to pick and summarize the five most important stories, and writes
//! the result into a Notion page.
//!
//! ## Usage
//!
//! ```sh
//! NEWSDATA_API_KEY=... ANTHROPIC_API_KEY=... NOTION_API_KEY=... NOTION_PAGE_ID=... news_digest
//! ```
//!
//! ## Architecture
//!
//! The application follows a three-stage pipeline:
//! 1. **Collecting**: Run each topical query against newsdata.io or Brave Search
//! 2. **Summarizing**: Send every collected article to the model in one prompt
//! 3. **Publishing**: Translate the model's markup into Notion blocks and append them
//!
//! Each stage logs and absorbs its own failures. A run only exits non-zero on
//! setup errors such as an unreadable config file.

use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod summarizer;
mod utils;

use api::AnthropicClient;
use cli::Cli;
use config::{Config, HttpConfig, Provider, PublishMode};
use outputs::notion::NotionClient;
use outputs::publisher::{PageTarget, Publisher};
use pipeline::{Collection, RunReport, run};
use sources::brave::BraveSearchClient;
use sources::newsdata::NewsdataClient;
use summarizer::Summarizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!(started_at = %Utc::now(), "news_digest starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref()).await?;
    let http = build_http_client(&config.http)?;

    // ---- Summarizer ----
    let model = AnthropicClient::new(
        http.clone(),
        args.anthropic_api_key.clone(),
        &config.summarizer.base_url,
        config.summarizer.model.clone(),
        config.summarizer.max_tokens,
    )?;
    let mut summarizer = Summarizer::new(model, config.summarizer.description_budget);
    if let Some(template) = &config.summarizer.template {
        summarizer = summarizer.with_template(template.as_str());
    }

    // ---- Publisher ----
    let page_id = args.notion_page_id.clone().unwrap_or_default();
    if page_id.trim().is_empty() {
        warn!("NOTION_PAGE_ID is not set; publishing will fail");
    }
    let target = match config.publish.mode {
        PublishMode::Append => PageTarget::Append { page_id },
        PublishMode::DatedSubPage => PageTarget::DatedSubPage { parent_id: page_id },
    };
    let workspace = NotionClient::new(
        http.clone(),
        args.notion_api_key.clone(),
        &config.publish.base_url,
    )?;
    let publisher = Publisher::new(workspace, target);

    // ---- Run ----
    let report: RunReport = match config.provider {
        Provider::Newsdata => {
            let source = NewsdataClient::new(
                http.clone(),
                args.newsdata_api_key.clone(),
                &config.collector.newsdata_base_url,
            )?;
            let collection = Collection {
                source: &source,
                queries: &config.queries,
                concurrency: config.collector.concurrency,
            };
            run(collection, &summarizer, &publisher).await
        }
        Provider::Brave => {
            let source = BraveSearchClient::new(
                http.clone(),
                args.brave_api_key.clone(),
                &config.collector.brave_base_url,
            )?;
            let collection = Collection {
                source: &source,
                queries: &config.queries,
                concurrency: config.collector.concurrency,
            };
            run(collection, &summarizer, &publisher).await
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        collected = report.collected,
        summarized = report.summarized,
        published = report.published,
        "Execution complete"
    );

    Ok(())
}

/// One HTTP client shared by all three API clients.
fn build_http_client(http: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(secs) = http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}
