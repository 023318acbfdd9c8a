//! Comment-preserving manifest file round-trip
//!
//! The YAML parser drops comments. App manifests conventionally open with a
//! comment block (maintainer notes, generator warnings) that must survive
//! an automated edit, so the leading run of comment lines is captured
//! verbatim from the raw text and re-prepended on save. Only that leading
//! block is protected; the structural body is re-serialized and may come
//! back with different formatting.

use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::error::ManifestError;
use crate::manifest::schema::Manifest;

/// A manifest bound to its file for one load-modify-save cycle
pub struct ManifestFile {
    path: PathBuf,
    preamble: String,
    pub manifest: Manifest,
}

impl ManifestFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest = Manifest::parse(&text)?;
        Ok(Self {
            preamble: leading_comments(&text),
            manifest,
            path,
        })
    }

    /// Render back to text: the captured comment block, a separating blank
    /// line, then the re-serialized body. No preamble, no separator.
    pub fn render(&self) -> Result<String, ManifestError> {
        let body = serde_yml::to_string(&self.manifest)?;
        if self.preamble.is_empty() {
            Ok(body)
        } else {
            Ok(format!("{}\n{}", self.preamble, body))
        }
    }

    pub fn save(&self) -> Result<(), ManifestError> {
        fs::write(&self.path, self.render()?).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The leading run of comment lines, stopping at the first line that is
/// not a comment
fn leading_comments(text: &str) -> String {
    let mut preamble = String::new();
    for line in text.lines() {
        if line.trim_start().starts_with('#') {
            preamble.push_str(line);
            preamble.push('\n');
        } else {
            break;
        }
    }
    preamble
}
