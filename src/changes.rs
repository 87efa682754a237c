//! Classification of files touched by recent commits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::{CommitFile, CommitsListOptions, FileStatus, GitHubApi};

/// Paths added, removed and modified over a time window.
///
/// Entries are not deduplicated: a file touched by three commits shows up
/// three times. Multiplicity reflects touch count, not distinct file count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Append another set's lists to this one
    pub fn extend(&mut self, other: ChangeSet) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.modified.extend(other.modified);
    }

    fn new_name_list(&mut self, policy: CopyRenamePolicy) -> &mut Vec<String> {
        match policy {
            CopyRenamePolicy::Added => &mut self.added,
            CopyRenamePolicy::Modified => &mut self.modified,
        }
    }
}

/// Where the new name of a renamed or copied file is reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyRenamePolicy {
    /// The new name counts as an added file
    #[default]
    Added,
    /// The new name counts as a modified file
    Modified,
}

/// Sort one touched file into `changes`, if its status is one we track
pub fn classify_file(changes: &mut ChangeSet, file: &CommitFile, policy: CopyRenamePolicy) {
    match file.status {
        FileStatus::Removed => changes.removed.push(file.filename.clone()),
        FileStatus::Added => changes.added.push(file.filename.clone()),
        FileStatus::Modified | FileStatus::Changed => {
            changes.modified.push(file.filename.clone())
        }
        FileStatus::Renamed => {
            changes.new_name_list(policy).push(file.filename.clone());
            if let Some(ref previous) = file.previous_filename {
                changes.removed.push(previous.clone());
            }
        }
        FileStatus::Copied => changes.new_name_list(policy).push(file.filename.clone()),
        FileStatus::Unchanged | FileStatus::Other => {}
    }
}

/// Classify every file under `path_prefix` touched by a commit since `since`.
///
/// Commits are read one by one in the order GitHub lists them. Any failed
/// call aborts the repository.
pub async fn changed_since<A: GitHubApi + ?Sized>(
    api: &A,
    owner: &str,
    repo: &str,
    since: DateTime<Utc>,
    path_prefix: &str,
    policy: CopyRenamePolicy,
    per_page: u32,
) -> Result<ChangeSet> {
    let opts = CommitsListOptions {
        since,
        path: path_prefix.to_string(),
        per_page,
    };

    let commits = api.list_commits(owner, repo, &opts).await?;
    tracing::debug!(repo, commits = commits.len(), %since, "listed commits");

    let mut changes = ChangeSet::default();
    for commit in &commits {
        let detail = api.get_commit(owner, repo, &commit.sha).await?;
        tracing::debug!(repo, sha = %commit.sha, files = detail.files.len(), "fetched commit");

        for file in detail
            .files
            .iter()
            .filter(|f| f.filename.starts_with(path_prefix))
        {
            classify_file(&mut changes, file, policy);
        }
    }

    Ok(changes)
}
