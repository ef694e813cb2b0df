//! Command-line interface definitions for News Digest.
//!
//! The binary is meant to run unattended with no arguments. Credentials and
//! the target page come from the environment; the flags only exist so a run
//! can be pointed somewhere else by hand.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Stock run, everything from the environment
/// news_digest
///
/// # Custom query buckets and a dated sub-page
/// news_digest --config ./digest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// newsdata.io API key
    #[arg(long, env = "NEWSDATA_API_KEY", hide_env_values = true)]
    pub newsdata_api_key: Option<String>,

    /// Brave Search API subscription token
    #[arg(long, env = "BRAVE_API_KEY", hide_env_values = true)]
    pub brave_api_key: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_api_key: Option<String>,

    /// Notion page to append to, or parent of the dated sub-page
    #[arg(long, env = "NOTION_PAGE_ID")]
    pub notion_page_id: Option<String>,
}
