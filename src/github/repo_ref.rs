//! Parsing upstream repository references
//!
//! Catalog records and manifest metadata reference upstream repositories
//! either as full `https://github.com/...` URLs or as `owner/repo`
//! shorthand. Anything else (other hosts, malformed paths) is unsupported
//! and the app's check is reported as failed rather than attempted.

use url::Url;

/// A resolved `(owner, repo)` pair on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse a GitHub URL or `owner/repo` shorthand; `None` if the
    /// reference is not GitHub-hosted or has no usable owner/repo path.
    pub fn parse(reference: &str) -> Option<Self> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            Self::from_url(reference)
        } else {
            Self::from_shorthand(reference)
        }
    }

    fn from_url(reference: &str) -> Option<Self> {
        let url = Url::parse(reference).ok()?;
        match url.host_str() {
            Some("github.com") | Some("www.github.com") => {}
            _ => return None,
        }
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        Some(Self {
            owner: owner.to_string(),
            repo: repo.trim_end_matches(".git").to_string(),
        })
    }

    fn from_shorthand(reference: &str) -> Option<Self> {
        let (owner, repo) = reference.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
