//! Data models shared by the three pipeline stages.
//!
//! - [`QuerySpec`]: one topical search request against the news provider
//! - [`ArticleRecord`]: one normalized news item returned by a provider
//! - [`ContentBlock`]: one publishable unit written to the workspace page
//!
//! Nothing here is persisted. Records and blocks live for a single run.

use serde::{Deserialize, Serialize};

/// A single news item, normalized from whichever provider produced it.
///
/// `title` and `url` are always present. Providers that return items without
/// them are passed through with empty strings; filtering is the provider's job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleRecord {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Publication time as the provider formats it.
    pub published_at: Option<String>,
    pub source_name: Option<String>,
    pub categories: Vec<String>,
}

impl ArticleRecord {
    /// Minimal record with only the required fields set.
    #[cfg(test)]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// What a query searches for.
///
/// Serialized externally tagged so a YAML query reads as either
/// `category: business` or `query: "AI OR startup"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryTerm {
    /// Provider category code(s), comma separated (e.g. `world,politics`).
    Category(String),
    /// Free-text boolean query.
    Query(String),
}

impl QueryTerm {
    /// The raw text of the term, whichever kind it is.
    pub fn as_str(&self) -> &str {
        match self {
            QueryTerm::Category(c) => c,
            QueryTerm::Query(q) => q,
        }
    }
}

/// Parameters for one topical search request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuerySpec {
    /// Bucket name used in logs and in the prompt (e.g. "global", "tech").
    pub label: String,
    #[serde(flatten)]
    pub term: QueryTerm,
    /// Maximum number of results to request.
    pub limit: u32,
    #[serde(default = "default_language")]
    pub language: String,
    /// Provider-specific freshness window (newsdata `timeframe`, Brave `freshness`).
    #[serde(default)]
    pub freshness: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl QuerySpec {
    pub fn category(label: &str, category: &str, limit: u32) -> Self {
        Self {
            label: label.to_string(),
            term: QueryTerm::Category(category.to_string()),
            limit,
            language: default_language(),
            freshness: None,
        }
    }

    pub fn text(label: &str, query: &str, limit: u32) -> Self {
        Self {
            label: label.to_string(),
            term: QueryTerm::Query(query.to_string()),
            limit,
            language: default_language(),
            freshness: None,
        }
    }
}

/// One typed block of page content carrying a single plain-text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// `## ` lines: the digest title.
    TopHeading(String),
    /// `### ` and `#### ` lines: one selected story or a sub-item of it.
    SectionHeading(String),
    /// `- ` lines.
    BulletedItem(String),
    /// Everything else.
    Paragraph(String),
}

impl ContentBlock {
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::TopHeading(t)
            | ContentBlock::SectionHeading(t)
            | ContentBlock::BulletedItem(t)
            | ContentBlock::Paragraph(t) => t,
        }
    }
}
