//! ghpaths - GitHub repository path collector
//!
//! A library for watching a directory across a set of GitHub repositories:
//! - Listing every file under a path on the default branch (GraphQL tree walk)
//! - Filtering by file type
//! - Reporting files added, removed or modified in the last N hours (REST commits)

pub mod changes;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod github;
pub mod walker;

pub use changes::{changed_since, classify_file, ChangeSet, CopyRenamePolicy};
pub use client::PathsClient;
pub use config::{ChangesConfig, Config, GitHubConfig};
pub use error::QueryError;
pub use filter::{filter_by_suffix, PathFilter};
pub use github::{GitHubApi, HttpGitHub};
pub use walker::{list_paths, walk, TreeWalk};
