//! Publishing the digest into the document workspace.
//!
//! # Submodules
//!
//! - [`blocks`]: translates the model's markup into [`ContentBlock`](crate::models::ContentBlock)s
//! - [`notion`]: the [`Workspace`](notion::Workspace) trait and its Notion client
//! - [`publisher`]: resolves the target page and writes the blocks

pub mod blocks;
pub mod notion;
pub mod publisher;
