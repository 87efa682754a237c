//! GitHub API over HTTP

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{CommitDetail, CommitRef, CommitsListOptions};
use super::GitHubApi;
use crate::config::GitHubConfig;
use crate::error::{QueryError, Result};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// `GitHubApi` backed by api.github.com (or a GitHub Enterprise host)
pub struct HttpGitHub {
    api_url: String,
    graphql_url: String,
    client: Client,
}

impl HttpGitHub {
    /// Build a client from the `[github]` config table
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| QueryError::Config(format!("invalid user agent: {}", e)))?,
        );
        if let Some(token) = config.resolve_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| QueryError::Config(format!("invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_url.clone(),
            client,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Status { status, body });
        }

        Ok(response)
    }

    /// One page of a list endpoint, with the `rel="next"` link if there is one
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<(Vec<T>, Option<String>)> {
        let response = self.send(self.client.get(&url)).await?;
        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_url);

        let items: Vec<T> = response.json().await?;
        tracing::debug!(%url, count = items.len(), "fetched page");
        Ok((items, next))
    }
}

/// Collect every page starting at `first`, following `next` links until none is left
async fn follow_pages<T, F, Fut>(first: String, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>)>>,
{
    let mut items = Vec::new();
    let mut next = Some(first);

    while let Some(url) = next {
        let (page, following) = fetch(url).await?;
        items.extend(page);
        next = following;
    }

    Ok(items)
}

#[async_trait]
impl GitHubApi for HttpGitHub {
    async fn query(&self, query: &str, variables: Value) -> Result<Value> {
        let request = self
            .client
            .post(&self.graphql_url)
            .json(&GraphQlRequest { query, variables });

        let body: GraphQlResponse = self.send(request).await?.json().await?;

        if !body.errors.is_empty() {
            return Err(QueryError::GraphQl(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        body.data
            .ok_or_else(|| QueryError::InvalidResponse("missing data in GraphQL response".to_string()))
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        opts: &CommitsListOptions,
    ) -> Result<Vec<CommitRef>> {
        let url = format!("{}/repos/{}/{}/commits", self.api_url, owner, repo);
        let first = Url::parse_with_params(
            &url,
            &[
                ("since", opts.since.to_rfc3339()),
                ("path", opts.path.clone()),
                ("per_page", opts.per_page.to_string()),
            ],
        )
        .map_err(|e| QueryError::Config(format!("invalid API URL {}: {}", url, e)))?;

        let commits = follow_pages(first.to_string(), |page| self.fetch_page(page)).await?;
        tracing::debug!(repo, count = commits.len(), "listed commits");
        Ok(commits)
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        let url = format!("{}/repos/{}/{}/commits/{}", self.api_url, owner, repo, sha);
        let detail = self.send(self.client.get(&url)).await?.json().await?;
        Ok(detail)
    }
}

/// Pull the `rel="next"` target out of a `Link` header
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| p.trim() == r#"rel="next""#);
        if is_next {
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(|t| t.to_string())
        } else {
            None
        }
    })
}
