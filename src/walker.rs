//! Depth-first listing of a repository tree through the GraphQL API

use serde::Deserialize;
use serde_json::json;

use crate::error::{QueryError, Result};
use crate::github::{EntryType, GitHubApi, TreeEntry};

/// Children of the tree at `$expression`; blobs and non-tree objects come back as `{}`
pub const TREE_QUERY: &str = r#"query($owner: String!, $name: String!, $expression: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $expression) {
      ... on Tree {
        entries {
          name
          path
          type
        }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct TreeQuery {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    object: Option<TreeObject>,
}

#[derive(Debug, Deserialize)]
struct TreeObject {
    #[serde(default)]
    entries: Vec<TreeEntry>,
}

/// Result of walking one tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeWalk {
    /// Blob paths, depth-first, in the API's entry order
    pub paths: Vec<String>,
    /// Tree queries issued
    pub queries: usize,
    /// Deepest level reached, the starting tree being level 1
    pub max_depth: usize,
}

enum Pending {
    File(String),
    Tree { expression: String, depth: usize },
}

/// Fetch the direct children of the tree at `expression`
pub async fn query_tree<A: GitHubApi + ?Sized>(
    api: &A,
    owner: &str,
    repo: &str,
    expression: &str,
) -> Result<Vec<TreeEntry>> {
    let variables = json!({
        "owner": owner,
        "name": repo,
        "expression": expression,
    });

    let data = api.query(TREE_QUERY, variables).await?;
    let response: TreeQuery = serde_json::from_value(data)?;

    let repository = response.repository.ok_or_else(|| {
        QueryError::InvalidResponse(format!("repository {}/{} not found", owner, repo))
    })?;

    Ok(repository.object.map(|o| o.entries).unwrap_or_default())
}

/// Every blob path reachable from `expression` (typically `branch:path`).
///
/// The first failing query aborts the walk; nothing collected so far is returned.
pub async fn list_paths<A: GitHubApi + ?Sized>(
    api: &A,
    owner: &str,
    repo: &str,
    expression: &str,
) -> Result<Vec<String>> {
    Ok(walk(api, owner, repo, expression).await?.paths)
}

/// Same as [`list_paths`], keeping query count and depth
pub async fn walk<A: GitHubApi + ?Sized>(
    api: &A,
    owner: &str,
    repo: &str,
    expression: &str,
) -> Result<TreeWalk> {
    let mut walk = TreeWalk::default();
    let mut stack = vec![Pending::Tree {
        expression: expression.to_string(),
        depth: 1,
    }];

    while let Some(item) = stack.pop() {
        let (expression, depth) = match item {
            Pending::File(path) => {
                walk.paths.push(path);
                continue;
            }
            Pending::Tree { expression, depth } => (expression, depth),
        };

        let entries = query_tree(api, owner, repo, &expression).await?;
        tracing::debug!(repo, %expression, entries = entries.len(), "queried tree");

        walk.queries += 1;
        walk.max_depth = walk.max_depth.max(depth);

        // Reversed so the stack pops children in API order
        for entry in entries.into_iter().rev() {
            match entry.kind {
                EntryType::Blob => stack.push(Pending::File(entry.path)),
                EntryType::Tree => stack.push(Pending::Tree {
                    expression: child_expression(&expression, &entry.name),
                    depth: depth + 1,
                }),
                EntryType::Other => {}
            }
        }
    }

    Ok(walk)
}

/// `main:docs` + `guides` -> `main:docs/guides`; `main:` + `docs` -> `main:docs`
fn child_expression(expression: &str, name: &str) -> String {
    if expression.ends_with(':') {
        format!("{}{}", expression, name)
    } else {
        format!("{}/{}", expression, name)
    }
}
