//! Writes the digest into the workspace.
//!
//! With [`PageTarget::DatedSubPage`] a child page named after today's date
//! (UTC+9) is created first and becomes the write target. Content that
//! translates to no blocks is not written at all. Failures are logged and
//! reported as `false`; nothing is retried.

use crate::models::ContentBlock;
use crate::outputs::blocks::translate;
use crate::outputs::notion::Workspace;
use crate::utils::{display_date, page_title_label};
use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

/// Where the digest ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// Append to an existing page.
    Append { page_id: String },
    /// Create a dated child page under `parent_id` and write there.
    DatedSubPage { parent_id: String },
}

#[derive(Debug)]
pub struct Publisher<W> {
    workspace: W,
    target: PageTarget,
}

impl<W: Workspace> Publisher<W> {
    pub fn new(workspace: W, target: PageTarget) -> Self {
        Self { workspace, target }
    }

    #[cfg(test)]
    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    /// Publish `content` as of now. Returns whether the blocks were written.
    pub async fn publish(&self, content: &str) -> bool {
        self.publish_at(content, Utc::now()).await
    }

    #[instrument(level = "info", skip_all, fields(target = ?self.target))]
    pub async fn publish_at(&self, content: &str, now: DateTime<Utc>) -> bool {
        let blocks: Vec<ContentBlock> = translate(content);
        if blocks.is_empty() {
            warn!(bytes = content.len(), "Digest has no non-blank lines; nothing to write");
            return false;
        }

        let Some(page_id) = self.resolve_target(now).await else {
            return false;
        };

        info!(%page_id, blocks = blocks.len(), "Appending digest blocks");

        match self.workspace.append_blocks(&page_id, &blocks).await {
            Ok(()) => {
                info!(%page_id, "Digest written to workspace");
                true
            }
            Err(e) => {
                error!(
                    %page_id,
                    error = %e.for_log(),
                    "Failed to append digest blocks"
                );
                false
            }
        }
    }

    /// The page to write into, creating the dated sub-page when needed.
    async fn resolve_target(&self, now: DateTime<Utc>) -> Option<String> {
        match &self.target {
            PageTarget::Append { page_id } => Some(page_id.clone()),
            PageTarget::DatedSubPage { parent_id } => {
                let title = page_title_label(display_date(now));
                match self.workspace.create_page(parent_id, &title).await {
                    Ok(page_id) => {
                        info!(%parent_id, %page_id, %title, "Created dated sub-page");
                        Some(page_id)
                    }
                    Err(e) => {
                        error!(
                            %parent_id,
                            %title,
                            error = %e.for_log(),
                            "Failed to create dated sub-page"
                        );
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::TimeZone;
    use std::sync::Mutex;

    /// Workspace double that records every call and can be told to fail.
    #[derive(Default)]
    pub(crate) struct FakeWorkspace {
        pub fail_create: bool,
        pub fail_append: bool,
        pub created: Mutex<Vec<(String, String)>>,
        pub appended: Mutex<Vec<(String, Vec<ContentBlock>)>>,
    }

    impl Workspace for FakeWorkspace {
        async fn create_page(&self, parent_id: &str, title: &str) -> Result<String, ApiError> {
            self.created
                .lock()
                .unwrap()
                .push((parent_id.to_string(), title.to_string()));
            if self.fail_create {
                return Err(ApiError::Status {
                    status: 403,
                    message: "restricted_resource".to_string(),
                });
            }
            Ok("new-page".to_string())
        }

        async fn append_blocks(
            &self,
            page_id: &str,
            blocks: &[ContentBlock],
        ) -> Result<(), ApiError> {
            self.appended
                .lock()
                .unwrap()
                .push((page_id.to_string(), blocks.to_vec()));
            if self.fail_append {
                return Err(ApiError::Status {
                    status: 400,
                    message: "validation_error".to_string(),
                });
            }
            Ok(())
        }
    }

    fn evening_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 16, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_append_mode_writes_to_configured_page() {
        let publisher = Publisher::new(
            FakeWorkspace::default(),
            PageTarget::Append {
                page_id: "page-1".to_string(),
            },
        );

        assert!(publisher.publish_at("## T\n- a", evening_utc()).await);

        assert!(publisher.workspace.created.lock().unwrap().is_empty());
        let appended = publisher.workspace.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0, "page-1");
        assert_eq!(
            appended[0].1,
            vec![
                ContentBlock::TopHeading("T".to_string()),
                ContentBlock::BulletedItem("a".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_dated_mode_creates_page_then_writes_into_it() {
        let publisher = Publisher::new(
            FakeWorkspace::default(),
            PageTarget::DatedSubPage {
                parent_id: "parent".to_string(),
            },
        );

        assert!(publisher.publish_at("body", evening_utc()).await);

        // 16:30 UTC is already the next day in UTC+9.
        assert_eq!(
            *publisher.workspace.created.lock().unwrap(),
            vec![("parent".to_string(), "2026년 10월 17일".to_string())]
        );
        assert_eq!(publisher.workspace.appended.lock().unwrap()[0].0, "new-page");
    }

    #[tokio::test]
    async fn test_blank_content_writes_nothing() {
        let publisher = Publisher::new(
            FakeWorkspace::default(),
            PageTarget::DatedSubPage {
                parent_id: "parent".to_string(),
            },
        );

        assert!(!publisher.publish_at("\n   \n\t\n", evening_utc()).await);

        assert!(publisher.workspace.created.lock().unwrap().is_empty());
        assert!(publisher.workspace.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_page_creation_skips_append() {
        let workspace = FakeWorkspace {
            fail_create: true,
            ..FakeWorkspace::default()
        };
        let publisher = Publisher::new(
            workspace,
            PageTarget::DatedSubPage {
                parent_id: "parent".to_string(),
            },
        );

        assert!(!publisher.publish_at("body", evening_utc()).await);
        assert!(publisher.workspace.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_append_is_reported_not_raised() {
        let workspace = FakeWorkspace {
            fail_append: true,
            ..FakeWorkspace::default()
        };
        let publisher = Publisher::new(
            workspace,
            PageTarget::Append {
                page_id: "page-1".to_string(),
            },
        );

        assert!(!publisher.publish_at("text", evening_utc()).await);
        assert_eq!(publisher.workspace.appended.lock().unwrap().len(), 1);
    }
}
