//! App catalog sources
//!
//! A catalog record carries the minimal per-app identity a check needs.
//! Records come either from a node distribution's published JSON catalog
//! ([`remote`]) or from a local per-app directory tree ([`local`]).

pub mod local;
pub mod remote;

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// One app as the catalog describes it. Catalogs carry many more fields
/// (category, tagline, gallery, ...); everything the checker does not need
/// is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub repo: Option<String>,
}

/// Which node distribution's public catalog to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Umbrel,
    Citadel,
}

impl Node {
    /// Raw URL of the node's published app catalog
    pub fn catalog_url(&self) -> String {
        let (repo, branch, file) = match self {
            Node::Umbrel => ("getumbrel/umbrel", "master", "registry.json"),
            Node::Citadel => ("runcitadel/compose-nonfree", "main", "apps.json"),
        };
        format!("https://raw.githubusercontent.com/{repo}/{branch}/apps/{file}")
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Umbrel => write!(f, "Umbrel"),
            Node::Citadel => write!(f, "Citadel"),
        }
    }
}

impl std::str::FromStr for Node {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "umbrel" => Ok(Node::Umbrel),
            "citadel" => Ok(Node::Citadel),
            other => Err(format!("unknown node `{other}`, expected Umbrel or Citadel")),
        }
    }
}

/// Failures at the catalog level abort the whole run; there is nothing to
/// scan without records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog fetch from {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cannot read app directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
