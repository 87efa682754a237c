//! GitHub API access
//!
//! Provides:
//! - The `GitHubApi` capability the walker and classifier run against
//! - Wire types for tree entries and commits
//! - An HTTP implementation over reqwest

pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

pub use http::HttpGitHub;
pub use types::{
    CommitDetail, CommitFile, CommitRef, CommitsListOptions, EntryType, FileStatus, TreeEntry,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Everything the core needs from GitHub: one GraphQL entry point and
/// two REST calls on commits.
///
/// Dropping a returned future cancels the request in flight.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Run a GraphQL query and return its `data` object
    async fn query(&self, query: &str, variables: Value) -> Result<Value>;

    /// List commits matching `opts`, across all pages
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        opts: &CommitsListOptions,
    ) -> Result<Vec<CommitRef>>;

    /// Fetch one commit with its files
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitDetail>;
}
