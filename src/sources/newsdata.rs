//! newsdata.io aggregator client.
//!
//! Queries the `latest` endpoint. A query is either a category list
//! (`category=world,politics`) or a boolean text query (`q=AI OR startup`).
//! The response carries items under `results`, which may be missing or null
//! when nothing matched.

use crate::error::{ApiError, check_status};
use crate::models::{ArticleRecord, QuerySpec, QueryTerm};
use crate::sources::NewsSource;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    results: Option<Vec<NewsdataItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsdataItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    pub_date: Option<String>,
    #[serde(default, rename = "source_id")]
    source_id: Option<String>,
    #[serde(default)]
    category: Option<Vec<String>>,
}

impl From<NewsdataItem> for ArticleRecord {
    fn from(item: NewsdataItem) -> Self {
        ArticleRecord {
            title: item.title.unwrap_or_default(),
            description: item.description,
            url: item.link.unwrap_or_default(),
            published_at: item.pub_date,
            source_name: item.source_id,
            categories: item.category.unwrap_or_default(),
        }
    }
}

/// Client for `GET /api/1/latest`.
#[derive(Debug, Clone)]
pub struct NewsdataClient {
    http: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl NewsdataClient {
    pub fn new(
        http: Client,
        api_key: Option<String>,
        base_url: &str,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            api_key,
            base_url: Url::parse(base_url)?,
        })
    }
}

/// Query string for one search, credential first as the API documents it.
fn query_params(query: &QuerySpec, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![("apikey", api_key.to_string())];
    match &query.term {
        QueryTerm::Category(c) => params.push(("category", c.clone())),
        QueryTerm::Query(q) => params.push(("q", q.clone())),
    }
    params.push(("language", query.language.clone()));
    params.push(("size", query.limit.to_string()));
    if let Some(hours) = &query.freshness {
        params.push(("timeframe", hours.clone()));
    }
    params
}

/// Parse a `latest` response body into records, preserving provider order.
fn parse_latest(body: &str) -> Result<Vec<ArticleRecord>, ApiError> {
    let parsed: LatestResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("{e}; body: {}", truncate_for_log(body, 300))))?;
    Ok(parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .map(ArticleRecord::from)
        .collect())
}

impl NewsSource for NewsdataClient {
    fn name(&self) -> &'static str {
        "newsdata"
    }

    #[instrument(level = "info", skip_all, fields(label = %query.label))]
    async fn search(&self, query: &QuerySpec) -> Result<Vec<ArticleRecord>, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingCredential("NEWSDATA_API_KEY"))?;
        let endpoint = self.base_url.join("api/1/latest")?;
        debug!(%endpoint, term = %query.term.as_str(), limit = query.limit, "Querying newsdata.io");

        let response = self
            .http
            .get(endpoint)
            .query(&query_params(query, api_key))
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        parse_latest(&body)
    }
}
