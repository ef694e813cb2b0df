//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a default, so running without a config file reproduces the
//! stock digest: newsdata.io buckets (world/politics, technology, business),
//! Claude summarization, and appending to the configured Notion page.
//!
//! ```yaml
//! provider: brave
//! queries:
//!   - label: global
//!     query: "world news"
//!     limit: 5
//!     freshness: pd
//! summarizer:
//!   max_tokens: 1500
//!   description_budget: 200
//!   template: |
//!     Pick the five biggest stories of {date}.
//!     {news_data}
//! publish:
//!   mode: dated_sub_page
//! ```

use crate::models::QuerySpec;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Which news-search API the collector talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// newsdata.io `latest` endpoint.
    #[default]
    Newsdata,
    /// Brave web search.
    Brave,
}

/// Where the publisher writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Append to the configured page.
    #[default]
    Append,
    /// Create a child page titled with today's date and write there.
    DatedSubPage,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: Provider,
    pub queries: Vec<QuerySpec>,
    pub collector: CollectorConfig,
    pub summarizer: SummarizerConfig,
    pub publish: PublishConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// How many queries may be in flight at once. 1 runs them one after another.
    pub concurrency: usize,
    pub newsdata_base_url: String,
    pub brave_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Cut each article description to this many characters before prompting.
    pub description_budget: Option<usize>,
    /// Instruction text with `{news_data}` and `{date}` placeholders. Unset uses
    /// the built-in Korean five-story template.
    pub template: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub mode: PublishMode,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout. Unset leaves the client default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            queries: default_queries(),
            collector: CollectorConfig::default(),
            summarizer: SummarizerConfig::default(),
            publish: PublishConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            newsdata_base_url: "https://newsdata.io".to_string(),
            brave_base_url: "https://api.search.brave.com".to_string(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-sonnet-20240229".to_string(),
            max_tokens: 2000,
            description_budget: None,
            template: None,
            base_url: "https://api.anthropic.com".to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            mode: PublishMode::default(),
            base_url: "https://api.notion.com".to_string(),
        }
    }
}

/// Topic buckets: world/politics and technology get most of the budget,
/// business fills in.
fn default_queries() -> Vec<QuerySpec> {
    vec![
        QuerySpec::category("global", "world,politics", 8),
        QuerySpec::text(
            "tech",
            r#"technology OR AI OR "artificial intelligence" OR startup OR blockchain"#,
            8,
        ),
        QuerySpec::category("business", "business", 4),
    ]
}

impl Config {
    /// Parse a YAML document. Missing keys fall back to defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from `path` when given, otherwise use the built-in defaults.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&raw)?;
        info!(
            path = %path.display(),
            provider = ?config.provider,
            queries = config.queries.len(),
            mode = ?config.publish.mode,
            "Loaded configuration"
        );
        Ok(config)
    }
}
