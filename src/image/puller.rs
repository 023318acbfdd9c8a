//! Registry pull boundary
//!
//! Production pulls go through the docker CLI. The trait seam keeps the
//! resolver and orchestrator testable without a daemon.

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::PULL_TIMEOUT_SECS;

#[derive(Debug, Error)]
pub enum PullError {
    #[error("failed to run docker: {0}")]
    Io(#[from] std::io::Error),

    #[error("pull of `{image}` failed: {stderr}")]
    PullFailed { image: String, stderr: String },

    #[error("pull of `{0}` timed out")]
    Timeout(String),

    #[error("inspect of `{image}` failed: {stderr}")]
    InspectFailed { image: String, stderr: String },

    #[error("no repo digest recorded for `{0}`")]
    MissingDigest(String),

    #[error("unexpected inspect output: {0}")]
    InvalidInspectOutput(#[from] serde_json::Error),
}

/// Pull and inspect operations against a container registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ImagePuller: Send + Sync {
    /// Pull `image` from its registry; fails when the tag does not exist
    async fn pull(&self, image: &str) -> Result<(), PullError>;

    /// Content digest (`sha256:...`) the locally pulled image resolves to
    async fn repo_digest(&self, image: &str) -> Result<String, PullError>;
}

/// One entry of `docker image inspect` output
#[derive(Debug, Deserialize)]
struct InspectedImage {
    #[serde(rename = "RepoDigests", default)]
    repo_digests: Vec<String>,
}

/// The real puller, shelling out to the docker CLI
pub struct DockerCli;

#[async_trait::async_trait]
impl ImagePuller for DockerCli {
    async fn pull(&self, image: &str) -> Result<(), PullError> {
        let pull = Command::new("docker").args(["pull", image]).output();
        let output = timeout(Duration::from_secs(PULL_TIMEOUT_SECS), pull)
            .await
            .map_err(|_| PullError::Timeout(image.to_string()))??;

        if !output.status.success() {
            return Err(PullError::PullFailed {
                image: image.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn repo_digest(&self, image: &str) -> Result<String, PullError> {
        let output = Command::new("docker")
            .args(["image", "inspect", image])
            .output()
            .await?;

        if !output.status.success() {
            return Err(PullError::InspectFailed {
                image: image.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let inspected: Vec<InspectedImage> = serde_json::from_slice(&output.stdout)?;
        // RepoDigests entries are `repository@sha256:...`
        inspected
            .first()
            .and_then(|entry| entry.repo_digests.first())
            .and_then(|reference| reference.split_once('@'))
            .map(|(_, digest)| digest.to_string())
            .ok_or_else(|| PullError::MissingDigest(image.to_string()))
    }
}
