//! Repository-wide listing and change reports
//!
//! Runs the walker and the classifier over every configured repository,
//! one after the other, and concatenates the results. The first failure
//! ends the call; results from repositories already done are dropped.

use chrono::{DateTime, Duration, Utc};

use crate::changes::{changed_since, ChangeSet};
use crate::config::Config;
use crate::error::Result;
use crate::filter::filter_by_suffix;
use crate::github::{GitHubApi, HttpGitHub};
use crate::walker::list_paths;

/// Entry point of the library
///
/// # Example
///
/// ```rust,ignore
/// use ghpaths::{Config, PathFilter, PathsClient};
///
/// let config = Config::new(
///     "kubernetes",
///     &["website"],
///     "main",
///     PathFilter::new("content/en/blog/_posts", &[".md"]),
/// );
/// let client = PathsClient::from_config(config)?;
///
/// let posts = client.list_all_paths().await?;
/// let changes = client.list_changes_since(24).await?;
/// ```
pub struct PathsClient<A: GitHubApi> {
    api: A,
    config: Config,
}

impl PathsClient<HttpGitHub> {
    /// Client talking to GitHub over HTTP with the `[github]` settings of `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let api = HttpGitHub::new(&config.github)?;
        Ok(Self::new(api, config))
    }
}

impl<A: GitHubApi> PathsClient<A> {
    pub fn new(api: A, config: Config) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every file under the filter path on the default branch, across all
    /// repositories, narrowed to the configured file types
    pub async fn list_all_paths(&self) -> Result<Vec<String>> {
        let expression = self.config.filter.tree_expression(&self.config.default_branch);

        let mut paths = Vec::new();
        for repo in &self.config.repositories {
            let found = list_paths(&self.api, &self.config.owner, repo, &expression).await?;
            tracing::info!(repo = %repo, files = found.len(), "listed repository tree");
            paths.extend(found);
        }

        Ok(filter_by_suffix(paths, &self.config.filter.file_types))
    }

    /// Files under the filter path touched in the last `hours` hours
    pub async fn list_changes_since(&self, hours: u32) -> Result<ChangeSet> {
        self.list_changes_between(window_start(Utc::now(), hours)).await
    }

    /// Files under the filter path touched at or after `since`
    pub async fn list_changes_between(&self, since: DateTime<Utc>) -> Result<ChangeSet> {
        let mut changes = ChangeSet::default();
        for repo in &self.config.repositories {
            let found = changed_since(
                &self.api,
                &self.config.owner,
                repo,
                since,
                &self.config.filter.path,
                self.config.changes.copy_rename_policy,
                self.config.changes.per_page,
            )
            .await?;
            tracing::info!(
                repo = %repo,
                added = found.added.len(),
                removed = found.removed.len(),
                modified = found.modified.len(),
                "classified recent changes"
            );
            changes.extend(found);
        }

        Ok(changes)
    }
}

/// `now - hours`, never earlier than the Unix epoch (nothing on GitHub predates it)
fn window_start(now: DateTime<Utc>, hours: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::hours(i64::from(hours)))
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |since| {
            since.max(DateTime::<Utc>::UNIX_EPOCH)
        })
}
