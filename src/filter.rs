//! File-type filtering and tree expressions

use serde::Deserialize;

/// Which part of a repository is watched, and which file types count
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathFilter {
    /// Directory inside the repository, without a trailing slash
    #[serde(default)]
    pub path: String,
    /// Suffixes such as ".md"; empty means every file type
    #[serde(default)]
    pub file_types: Vec<String>,
}

impl PathFilter {
    pub fn new(path: &str, file_types: &[&str]) -> Self {
        Self {
            path: path.to_string(),
            file_types: file_types.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Tree expression for the GraphQL `object` field, e.g. `main:content/en`
    pub fn tree_expression(&self, branch: &str) -> String {
        format!("{}:{}", branch, self.path)
    }
}

fn has_file_type(path: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
}

/// Keep the paths ending with one of `suffixes`.
///
/// An empty suffix list means no filter is configured and every path is kept.
pub fn filter_by_suffix(paths: Vec<String>, suffixes: &[String]) -> Vec<String> {
    if suffixes.is_empty() {
        return paths;
    }

    paths
        .into_iter()
        .filter(|p| has_file_type(p, suffixes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_by_suffix() {
        let paths = strings(&["a.md", "b.txt"]);
        assert_eq!(filter_by_suffix(paths, &strings(&[".md"])), strings(&["a.md"]));
    }

    #[test]
    fn test_empty_suffixes_is_identity() {
        let paths = strings(&["b.txt", "a.md", "Makefile"]);
        assert_eq!(filter_by_suffix(paths.clone(), &[]), paths);
    }

    #[test]
    fn test_multiple_suffixes_keep_order() {
        let paths = strings(&["x.md", "y.rs", "z.markdown", "w.txt"]);
        let kept = filter_by_suffix(paths, &strings(&[".markdown", ".md"]));
        assert_eq!(kept, strings(&["x.md", "z.markdown"]));
    }

    #[test]
    fn test_no_match_yields_empty() {
        let paths = strings(&["a.txt"]);
        assert!(filter_by_suffix(paths, &strings(&[".md"])).is_empty());
    }

    #[test]
    fn test_tree_expression() {
        let filter = PathFilter::new("content/en/blog/_posts", &[".md"]);
        assert_eq!(filter.tree_expression("main"), "main:content/en/blog/_posts");
        assert_eq!(PathFilter::default().tree_expression("main"), "main:");
    }
}
