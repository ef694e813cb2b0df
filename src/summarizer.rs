//! Turns collected articles into one model instruction and returns the digest text.
//!
//! The default instruction embeds the selection policy (exactly five stories,
//! global impact and technology trends first), every article's fields, and the
//! markup template the publisher understands (`##`, `###`, `- `). A configured
//! template replaces it; `{news_data}` and `{date}` are filled in either way.
//! The model's answer is returned untouched; whatever shape it has is what
//! gets published.

use crate::api::AskAsync;
use crate::models::ArticleRecord;
use crate::utils::{display_date, short_date_label, truncate_chars};
use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use tracing::{error, info, instrument, warn};

/// Published in place of the digest when the model call fails.
pub const FALLBACK_SUMMARY: &str = "오늘의 뉴스 요약을 생성할 수 없습니다.";

/// Instruction sent when no template is configured. `{news_data}` is replaced
/// by the rendered articles and `{date}` by the display date.
pub const DEFAULT_TEMPLATE: &str = r#"다음 뉴스들을 분석해서 가장 중요한 글로벌 뉴스와 기술 트렌드 5개를 선별하고 요약해주세요.

뉴스 데이터:
{news_data}

다음 형식으로 답변해주세요:
## 📰 오늘의 주요 뉴스 & 기술 트렌드 ({date})

### 1. [뉴스 제목]
- **핵심 내용**: [1-2줄 요약]
- **영향**: [why it matters]
- **출처**: [출처명] - [URL]

### 2. [뉴스 제목]
...

정확히 5개만 선별해주세요. 글로벌 영향력이 큰 뉴스와 최신 기술 트렌드를 우선적으로 선택해주세요."#;

/// Text to publish, and whether the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub text: String,
    /// `false` when the model call failed and `text` is [`FALLBACK_SUMMARY`].
    pub from_model: bool,
}

/// Serialize one article the way the prompt lists it.
fn render_article(article: &ArticleRecord, description_budget: Option<usize>) -> String {
    let description = article.description.as_deref().unwrap_or("");
    let description = match description_budget {
        Some(max) => truncate_chars(description, max),
        None => description.to_string(),
    };
    let categories = if article.categories.is_empty() {
        "General".to_string()
    } else {
        article.categories.iter().join(", ")
    };

    format!(
        "제목: {}\n설명: {}\nURL: {}\n발행시간: {}\n출처: {}\n카테고리: {}\n",
        article.title,
        description,
        article.url,
        article.published_at.as_deref().unwrap_or(""),
        article.source_name.as_deref().unwrap_or("Unknown"),
        categories,
    )
}

/// Fill `template` with `articles` and `today`.
///
/// The date is substituted first so article text is never rescanned for
/// placeholders.
pub fn build_prompt(
    template: &str,
    articles: &[ArticleRecord],
    today: NaiveDate,
    description_budget: Option<usize>,
) -> String {
    let news_data = articles
        .iter()
        .map(|a| render_article(a, description_budget))
        .join("\n---\n");

    template
        .replace("{date}", &short_date_label(today))
        .replace("{news_data}", &news_data)
}

/// Wraps a model client with the digest prompt and the fallback policy.
#[derive(Debug)]
pub struct Summarizer<A> {
    model: A,
    template: String,
    description_budget: Option<usize>,
}

impl<A> Summarizer<A>
where
    A: AskAsync<Response = String>,
{
    pub fn new(model: A, description_budget: Option<usize>) -> Self {
        Self {
            model,
            template: DEFAULT_TEMPLATE.to_string(),
            description_budget,
        }
    }

    /// Replace [`DEFAULT_TEMPLATE`].
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        let template = template.into();
        if !template.contains("{news_data}") {
            warn!("Prompt template has no {{news_data}} placeholder; articles will not be sent");
        }
        self.template = template;
        self
    }

    #[cfg(test)]
    pub fn model(&self) -> &A {
        &self.model
    }

    /// Summarize `articles` as of today in the display timezone.
    pub async fn summarize(&self, articles: &[ArticleRecord]) -> Digest {
        self.summarize_on(articles, display_date(Utc::now())).await
    }

    /// Summarize with an explicit display date. Never fails: a model error
    /// yields [`FALLBACK_SUMMARY`].
    #[instrument(level = "info", skip_all, fields(articles = articles.len(), %today))]
    pub async fn summarize_on(&self, articles: &[ArticleRecord], today: NaiveDate) -> Digest {
        let prompt = build_prompt(&self.template, articles, today, self.description_budget);
        info!(prompt_chars = prompt.chars().count(), "Requesting digest from model");

        match self.model.ask(&prompt).await {
            Ok(text) => Digest {
                text,
                from_model: true,
            },
            Err(e) => {
                error!(error = %e.for_log(), "Summary generation failed; publishing fallback text");
                Digest {
                    text: FALLBACK_SUMMARY.to_string(),
                    from_model: false,
                }
            }
        }
    }
}
