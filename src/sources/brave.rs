//! Brave Search web-search client.
//!
//! Results live under `web.results`. Brave has no category filter, so a
//! category term is searched as plain text.

use crate::error::{ApiError, check_status};
use crate::models::{ArticleRecord, QuerySpec};
use crate::sources::NewsSource;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct WebSearchResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Debug, Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Option<Vec<WebResult>>,
}

#[derive(Debug, Deserialize)]
struct WebResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    page_age: Option<String>,
    #[serde(default)]
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    name: Option<String>,
}

impl From<WebResult> for ArticleRecord {
    fn from(r: WebResult) -> Self {
        ArticleRecord {
            title: r.title.unwrap_or_default(),
            description: r.description,
            url: r.url.unwrap_or_default(),
            published_at: r.page_age,
            source_name: r.profile.and_then(|p| p.name),
            categories: Vec::new(),
        }
    }
}

/// Client for `GET /res/v1/web/search`.
#[derive(Debug, Clone)]
pub struct BraveSearchClient {
    http: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl BraveSearchClient {
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

fn query_params(query: &QuerySpec) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", query.term.as_str().to_string()),
        ("count", query.limit.to_string()),
        ("search_lang", query.language.clone()),
    ];
    if let Some(window) = &query.freshness {
        params.push(("freshness", window.clone()));
    }
    params
}

fn parse_web_search(body: &str) -> Result<Vec<ArticleRecord>, ApiError> {
    let parsed: WebSearchResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("{e}; body: {}", truncate_for_log(body, 300))))?;
    Ok(parsed
        .web
        .and_then(|w| w.results)
        .unwrap_or_default()
        .into_iter()
        .map(ArticleRecord::from)
        .collect())
}

impl NewsSource for BraveSearchClient {
    fn name(&self) -> &'static str {
        "brave"
    }

    #[instrument(level = "info", skip_all, fields(label = %query.label))]
    async fn search(&self, query: &QuerySpec) -> Result<Vec<ArticleRecord>, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingCredential("BRAVE_API_KEY"))?;
        let endpoint = self.base_url.join("res/v1/web/search")?;
        debug!(%endpoint, q = %query.term.as_str(), count = query.limit, "Querying Brave Search");

        let response = self
            .http
            .get(endpoint)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key)
            .query(&query_params(query))
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        parse_web_search(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_search_maps_nested_results() {
        let body = r#"{
            "type": "search",
            "web": {
                "type": "search",
                "results": [{
                    "title": "New model released",
                    "url": "https://example.com/model",
                    "description": "A lab shipped a model.",
                    "page_age": "2026-10-16T08:00:00",
                    "profile": { "name": "Example News", "url": "https://example.com" }
                }]
            }
        }"#;

        let records = parse_web_search(body).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "New model released");
        assert_eq!(records[0].url, "https://example.com/model");
        assert_eq!(records[0].published_at.as_deref(), Some("2026-10-16T08:00:00"));
        assert_eq!(records[0].source_name.as_deref(), Some("Example News"));
        assert!(records[0].categories.is_empty());
    }

    #[test]
    fn test_parse_web_search_without_web_section_is_empty() {
        assert!(parse_web_search(r#"{"type":"search","query":{"original":"x"}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_web_search_tolerates_nulls() {
        assert!(parse_web_search(r#"{"web":{"results":null}}"#).unwrap().is_empty());

        let body = r#"{"web":{"results":[
            {"title":"A","url":"u"},
            {"title":null,"url":"u2","description":null,"profile":null}
        ]}}"#;
        let records = parse_web_search(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[0].url, "u");
        assert_eq!(records[1].title, "");
        assert_eq!(records[1].url, "u2");
        assert!(records[1].source_name.is_none());
    }

    #[test]
    fn test_query_params_send_category_as_text() {
        let mut query = QuerySpec::category("business", "business", 4);
        query.freshness = Some("pd".to_string());
        assert_eq!(
            query_params(&query),
            vec![
                ("q", "business".to_string()),
                ("count", "4".to_string()),
                ("search_lang", "en".to_string()),
                ("freshness", "pd".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_without_key_fails_before_network() {
        let client =
            BraveSearchClient::new(Client::new(), None, "https://api.search.brave.com").unwrap();
        let err = client
            .search(&QuerySpec::text("tech", "AI", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential("BRAVE_API_KEY")));
    }
}
