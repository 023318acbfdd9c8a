//! Test doubles for scan integration tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use appcheck::github::{ApiError, RepoRef, TagSource};
use appcheck::image::{ImagePuller, PullError};
use appcheck::notify::Announcer;

/// Tag source backed by fixed per-repository data
#[derive(Default)]
pub struct StaticTagSource {
    tags: HashMap<String, Vec<String>>,
    tips: HashMap<String, String>,
}

impl StaticTagSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, repo: &str, tags: &[&str]) -> Self {
        self.tags.insert(
            repo.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_tip(mut self, repo: &str, tip: &str) -> Self {
        self.tips.insert(repo.to_string(), tip.to_string());
        self
    }
}

#[async_trait]
impl TagSource for StaticTagSource {
    async fn list_tags(&self, repo: &RepoRef) -> Result<Vec<String>, ApiError> {
        self.tags
            .get(&repo.to_string())
            .cloned()
            .ok_or_else(|| ApiError::NotFound(repo.to_string()))
    }

    async fn default_branch_tip(&self, repo: &RepoRef) -> Result<String, ApiError> {
        self.tips
            .get(&repo.to_string())
            .cloned()
            .ok_or_else(|| ApiError::NotFound(repo.to_string()))
    }
}

/// Puller that only "knows" an allow-listed set of image tags, recording
/// every pull attempt
#[derive(Default)]
pub struct FakePuller {
    digests: HashMap<String, String>,
    pub pulls: Mutex<Vec<String>>,
}

impl FakePuller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, image: &str, digest: &str) -> Self {
        self.digests.insert(image.to_string(), digest.to_string());
        self
    }
}

#[async_trait]
impl ImagePuller for FakePuller {
    async fn pull(&self, image: &str) -> Result<(), PullError> {
        self.pulls.lock().unwrap().push(image.to_string());
        if self.digests.contains_key(image) {
            Ok(())
        } else {
            Err(PullError::PullFailed {
                image: image.to_string(),
                stderr: "manifest unknown".to_string(),
            })
        }
    }

    async fn repo_digest(&self, image: &str) -> Result<String, PullError> {
        self.digests
            .get(image)
            .cloned()
            .ok_or_else(|| PullError::MissingDigest(image.to_string()))
    }
}

/// Announcer that collects every message it is handed
#[derive(Default)]
pub struct RecordingAnnouncer {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Announcer for RecordingAnnouncer {
    async fn announce(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
