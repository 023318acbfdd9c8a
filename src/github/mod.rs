//! GitHub API access
//!
//! The scan needs two things from an upstream repository: its tag list and
//! the abbreviated tip commit of its default branch. [`TagSource`] is the
//! seam; [`GithubClient`] is the real implementation over the REST API.

pub mod client;
pub mod repo_ref;

pub use client::GithubClient;
pub use repo_ref::RepoRef;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("repository not found: {0}")]
    NotFound(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Upstream release information for a resolved repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagSource: Send + Sync {
    /// Fetch all tag names for a repository, in the API's newest-first order
    async fn list_tags(&self, repo: &RepoRef) -> Result<Vec<String>, ApiError>;

    /// The 7-character abbreviated tip commit of the default branch
    async fn default_branch_tip(&self, repo: &RepoRef) -> Result<String, ApiError>;
}
