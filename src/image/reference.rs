//! Image reference strings
//!
//! A manifest references an image as `repository[:tag][@digest]`. The
//! repository portion is everything before the first colon and must
//! survive any rewrite byte-for-byte; only the tag and digest ever change.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub repository: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Split an image reference at the first colon; the tail is then split
    /// at `@` into tag and digest. Never fails: a bare repository is a
    /// valid reference.
    pub fn parse(image: &str) -> Self {
        match image.split_once(':') {
            None => Self {
                repository: image.to_string(),
                tag: None,
                digest: None,
            },
            Some((repository, tail)) => {
                let (tag, digest) = match tail.split_once('@') {
                    None => (tail, None),
                    Some((tag, digest)) => (tag, Some(digest.to_string())),
                };
                Self {
                    repository: repository.to_string(),
                    tag: (!tag.is_empty()).then(|| tag.to_string()),
                    digest,
                }
            }
        }
    }

    /// The same repository with a different tag and no digest
    pub fn with_tag(&self, tag: &str) -> String {
        format!("{}:{}", self.repository, tag)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
