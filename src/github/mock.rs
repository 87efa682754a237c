//! In-memory `GitHubApi` for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::types::{CommitDetail, CommitFile, CommitRef, CommitsListOptions, FileStatus, TreeEntry};
use super::GitHubApi;
use crate::error::{QueryError, Result};

/// Trees are keyed by `(repo, expression)`, commits by `repo` and details by sha.
#[derive(Default)]
pub struct MockGitHub {
    trees: HashMap<(String, String), Vec<TreeEntry>>,
    commits: HashMap<String, Vec<String>>,
    details: HashMap<String, Vec<CommitFile>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    list_options: Mutex<Vec<CommitsListOptions>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(mut self, repo: &str, expression: &str, entries: Vec<TreeEntry>) -> Self {
        self.trees
            .insert((repo.to_string(), expression.to_string()), entries);
        self
    }

    pub fn with_commit(mut self, repo: &str, sha: &str, files: Vec<CommitFile>) -> Self {
        self.commits
            .entry(repo.to_string())
            .or_default()
            .push(sha.to_string());
        self.details.insert(sha.to_string(), files);
        self
    }

    /// Make any call whose key (expression, repo or sha) equals `key` fail
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Calls seen so far, as `query:<repo>:<expr>`, `list:<repo>:<path>` or `get:<repo>:<sha>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Options passed to every `list_commits` call, in call order
    pub fn list_options(&self) -> Vec<CommitsListOptions> {
        self.list_options.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(QueryError::Status {
                status: 502,
                body: format!("injected failure for {}", key),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn query(&self, _query: &str, variables: Value) -> Result<Value> {
        let repo = variables["name"].as_str().unwrap_or_default().to_string();
        let expression = variables["expression"].as_str().unwrap_or_default().to_string();
        self.record(format!("query:{}:{}", repo, expression));
        self.check(&expression)?;

        let object = match self.trees.get(&(repo, expression)) {
            Some(entries) => json!({ "entries": entries }),
            None => Value::Null,
        };
        Ok(json!({ "repository": { "object": object } }))
    }

    async fn list_commits(
        &self,
        _owner: &str,
        repo: &str,
        opts: &CommitsListOptions,
    ) -> Result<Vec<CommitRef>> {
        self.record(format!("list:{}:{}", repo, opts.path));
        self.list_options.lock().unwrap().push(opts.clone());
        self.check(repo)?;

        Ok(self
            .commits
            .get(repo)
            .map(|shas| {
                shas.iter()
                    .map(|sha| CommitRef { sha: sha.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_commit(&self, _owner: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        self.record(format!("get:{}:{}", repo, sha));
        self.check(sha)?;

        let files = self
            .details
            .get(sha)
            .cloned()
            .ok_or_else(|| QueryError::Status {
                status: 404,
                body: format!("No commit found for SHA: {}", sha),
            })?;
        Ok(CommitDetail { files })
    }
}

pub fn file(filename: &str, status: FileStatus) -> CommitFile {
    CommitFile {
        filename: filename.to_string(),
        previous_filename: None,
        status,
    }
}

pub fn renamed(from: &str, to: &str) -> CommitFile {
    CommitFile {
        filename: to.to_string(),
        previous_filename: Some(from.to_string()),
        status: FileStatus::Renamed,
    }
}
