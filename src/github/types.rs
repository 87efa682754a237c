//! Wire types for the GitHub tree query and the commits endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of object a tree entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Blob,
    Tree,
    /// Submodules and anything GitHub adds later
    #[serde(other)]
    Other,
}

/// A child of a tree object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

impl TreeEntry {
    pub fn blob(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryType::Blob,
        }
    }

    pub fn tree(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryType::Tree,
        }
    }
}

/// Options for listing commits
#[derive(Debug, Clone)]
pub struct CommitsListOptions {
    /// Only commits at or after this instant
    pub since: DateTime<Utc>,
    /// Only commits touching this path
    pub path: String,
    /// Page size hint, GitHub caps it at 100
    pub per_page: u32,
}

/// A commit as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Per-file status reported by the commit endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Changed,
    Renamed,
    Copied,
    Unchanged,
    #[serde(other)]
    Other,
}

/// A file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    #[serde(default)]
    pub previous_filename: Option<String>,
    pub status: FileStatus,
}

/// A single commit with its file-level diff
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_entries() {
        let json = r#"[
            {"name": "a.md", "path": "_posts/a.md", "type": "blob"},
            {"name": "sub", "path": "_posts/sub", "type": "tree"},
            {"name": "vendor", "path": "_posts/vendor", "type": "commit"}
        ]"#;

        let entries: Vec<TreeEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryType::Blob);
        assert_eq!(entries[1].kind, EntryType::Tree);
        assert_eq!(entries[2].kind, EntryType::Other);
    }

    #[test]
    fn test_parse_commit_detail() {
        let json = r#"{
            "sha": "6dcb09b",
            "files": [
                {"filename": "docs/new.md", "previous_filename": "docs/old.md", "status": "renamed", "additions": 0},
                {"filename": "docs/a.md", "status": "modified"},
                {"filename": "docs/b.md", "status": "something-new"}
            ]
        }"#;

        let detail: CommitDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.files.len(), 3);
        assert_eq!(detail.files[0].status, FileStatus::Renamed);
        assert_eq!(detail.files[0].previous_filename.as_deref(), Some("docs/old.md"));
        assert_eq!(detail.files[1].previous_filename, None);
        assert_eq!(detail.files[2].status, FileStatus::Other);
    }

    #[test]
    fn test_commit_detail_without_files() {
        let detail: CommitDetail = serde_json::from_str(r#"{"sha": "abc"}"#).unwrap();
        assert!(detail.files.is_empty());
    }
}
