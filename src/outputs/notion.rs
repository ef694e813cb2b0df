//! Notion workspace client.
//!
//! Two calls are needed: create a child page under a parent, and append a
//! batch of blocks to a page. Both go through the [`Workspace`] trait so the
//! publisher can be tested without a network.

use crate::error::{ApiError, check_status};
use crate::models::ContentBlock;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

const NOTION_VERSION: &str = "2022-06-28";

/// The document workspace the publisher writes into.
pub trait Workspace {
    /// Create a page titled `title` under `parent_id`; returns the new page id.
    async fn create_page(&self, parent_id: &str, title: &str) -> Result<String, ApiError>;

    /// Append `blocks` in order to the end of `page_id`, in one call.
    async fn append_blocks(&self, page_id: &str, blocks: &[ContentBlock]) -> Result<(), ApiError>;
}

/// Notion block type name for a [`ContentBlock`].
///
/// Top headings are `heading_2` and section headings `heading_3`, leaving
/// `heading_1` to the page title.
pub fn block_type(block: &ContentBlock) -> &'static str {
    match block {
        ContentBlock::TopHeading(_) => "heading_2",
        ContentBlock::SectionHeading(_) => "heading_3",
        ContentBlock::BulletedItem(_) => "bulleted_list_item",
        ContentBlock::Paragraph(_) => "paragraph",
    }
}

/// Notion block object for a [`ContentBlock`]: one plain `text` rich-text run.
pub fn block_json(block: &ContentBlock) -> Value {
    let kind = block_type(block);
    json!({
        "object": "block",
        "type": kind,
        kind: {
            "rich_text": [{ "type": "text", "text": { "content": block.text() } }]
        }
    })
}

fn create_page_body(parent_id: &str, title: &str) -> Value {
    json!({
        "parent": { "page_id": parent_id },
        "properties": {
            "title": { "title": [{ "text": { "content": title } }] }
        }
    })
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

/// Client for the Notion REST API.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl NotionClient {
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

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingCredential("NOTION_API_KEY"))?;
        Ok(request
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION))
    }
}

impl Workspace for NotionClient {
    #[instrument(level = "info", skip(self))]
    async fn create_page(&self, parent_id: &str, title: &str) -> Result<String, ApiError> {
        if parent_id.trim().is_empty() {
            return Err(ApiError::MissingPageId);
        }
        let endpoint = self.base_url.join("v1/pages")?;
        let request = self
            .authorized(self.http.post(endpoint))?
            .json(&create_page_body(parent_id, title));

        let response = check_status(request.send().await?).await?;
        let page: CreatedPage = response.json().await?;
        debug!(page_id = %page.id, "Created Notion page");
        Ok(page.id)
    }

    #[instrument(level = "info", skip(self, blocks), fields(blocks = blocks.len()))]
    async fn append_blocks(&self, page_id: &str, blocks: &[ContentBlock]) -> Result<(), ApiError> {
        if page_id.trim().is_empty() {
            return Err(ApiError::MissingPageId);
        }
        let endpoint = self
            .base_url
            .join(&format!("v1/blocks/{}/children", page_id.trim()))?;
        let children: Vec<Value> = blocks.iter().map(block_json).collect();
        let request = self
            .authorized(self.http.patch(endpoint))?
            .json(&json!({ "children": children }));

        check_status(request.send().await?).await?;
        Ok(())
    }
}
