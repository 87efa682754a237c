use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::changes::CopyRenamePolicy;
use crate::filter::PathFilter;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Which repositories to look at and which of their files matter
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub owner: String,
    pub repositories: Vec<String>,
    pub default_branch: String,
    #[serde(default)]
    pub filter: PathFilter,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub changes: ChangesConfig,
}

/// Connection settings for the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// API token, `${VAR}` references are expanded. Falls back to GITHUB_TOKEN.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangesConfig {
    /// Where the new name of a renamed or copied file is reported
    #[serde(default)]
    pub copy_rename_policy: CopyRenamePolicy,
    /// Commit list page size (1-100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_graphql_url() -> String {
    DEFAULT_GRAPHQL_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("ghpaths/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_per_page() -> u32 {
    100
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            copy_rename_policy: CopyRenamePolicy::default(),
            per_page: default_per_page(),
        }
    }
}

impl GitHubConfig {
    /// Token from config (with env expansion) or from GITHUB_TOKEN
    pub fn resolve_token(&self) -> Option<String> {
        let token = match &self.token {
            Some(raw) => shellexpand::env(raw)
                .map(|expanded| expanded.into_owned())
                .unwrap_or_else(|_| raw.clone()),
            None => std::env::var(TOKEN_ENV_VAR).ok()?,
        };

        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

impl Config {
    pub fn new(owner: &str, repositories: &[&str], default_branch: &str, filter: PathFilter) -> Self {
        Self {
            owner: owner.to_string(),
            repositories: repositories.iter().map(|r| r.to_string()).collect(),
            default_branch: default_branch.to_string(),
            filter,
            github: GitHubConfig::default(),
            changes: ChangesConfig::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            anyhow::bail!("'owner' must not be empty");
        }

        if self.repositories.is_empty() {
            anyhow::bail!("At least one repository must be listed in 'repositories'");
        }

        if let Some(name) = self.repositories.iter().find(|r| r.trim().is_empty()) {
            anyhow::bail!("Invalid repository name: '{}'", name);
        }

        if self.default_branch.trim().is_empty() {
            anyhow::bail!("'default_branch' must not be empty");
        }

        if !(1..=100).contains(&self.changes.per_page) {
            anyhow::bail!(
                "changes.per_page must be between 1 and 100, got {}",
                self.changes.per_page
            );
        }

        Ok(())
    }
}
