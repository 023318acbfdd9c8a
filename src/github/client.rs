//! GitHub REST API client

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::github::repo_ref::RepoRef;
use crate::github::{ApiError, TagSource};

/// A tag as returned by the tags endpoint
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
}

/// Client over the GitHub REST API.
///
/// Unauthenticated requests hit a very low rate limit, so a token should be
/// supplied for any scan covering more than a handful of apps.
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Creates a client with a custom base URL
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ApiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub API response: {}", e);
            ApiError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl TagSource for GithubClient {
    async fn list_tags(&self, repo: &RepoRef) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/repos/{}/{}/tags", self.base_url, repo.owner, repo.repo);
        let tags: Vec<Tag> = self.get_json(&url).await?;
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn default_branch_tip(&self, repo: &RepoRef) -> Result<String, ApiError> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.repo);
        let info: RepoInfo = self.get_json(&url).await?;

        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.base_url, repo.owner, repo.repo, info.default_branch
        );
        let commit: CommitInfo = self.get_json(&url).await?;
        Ok(commit.sha.get(..7).unwrap_or(&commit.sha).to_string())
    }
}
