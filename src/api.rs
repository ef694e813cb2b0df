//! Text-generation API interaction.
//!
//! - [`AskAsync`]: core trait for a single-turn model request
//! - [`AnthropicClient`]: implementation against the Anthropic Messages API
//!
//! There is no retry layer. A failed request is reported once and the
//! summarizer substitutes its fallback text.

use crate::error::{ApiError, check_status};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument, warn};
use url::Url;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Trait for async LLM interaction.
///
/// Implementors send one user message and return the model's answer. The
/// summarizer only depends on this trait, so tests can swap in a double.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send `text` as a single user turn and wait for the answer.
    async fn ask(&self, text: &str) -> Result<Self::Response, ApiError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentSegment>,
}

#[derive(Debug, Deserialize)]
struct ContentSegment {
    #[serde(default)]
    text: Option<String>,
}

/// Client for `POST /v1/messages` with a fixed model and token budget.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: Option<String>,
    base_url: Url,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(
        http: Client,
        api_key: Option<String>,
        base_url: &str,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            api_key,
            base_url: Url::parse(base_url)?,
            model: model.into(),
            max_tokens,
        })
    }
}

/// The first content segment's text, verbatim.
fn first_text(body: &str) -> Result<String, ApiError> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("{e}; body: {}", truncate_for_log(body, 300))))?;
    parsed
        .content
        .into_iter()
        .next()
        .and_then(|segment| segment.text)
        .ok_or(ApiError::EmptyResponse("model returned no text segment"))
}

impl AnthropicClient {
    /// One request/response round trip. Body read failures are returned too.
    async fn request_answer(&self, text: &str) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingCredential("ANTHROPIC_API_KEY"))?;
        let endpoint = self.base_url.join("v1/messages")?;
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: text,
            }],
        };

        let response = self
            .http
            .post(endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        first_text(&body)
    }
}

impl AskAsync for AnthropicClient {
    type Response = String;

    #[instrument(
        level = "info",
        skip_all,
        fields(model = %self.model, max_tokens = self.max_tokens)
    )]
    async fn ask(&self, text: &str) -> Result<Self::Response, ApiError> {
        let t0 = Instant::now();
        let res = self.request_answer(text).await;
        let dt = t0.elapsed();

        match &res {
            Ok(summary) => info!(
                elapsed_ms = dt.as_millis(),
                chars = summary.chars().count(),
                "Model call succeeded"
            ),
            Err(e) => warn!(elapsed_ms = dt.as_millis(), error = %e.for_log(), "Model call failed"),
        }
        res
    }
}
