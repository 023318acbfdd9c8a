//! App manifest schema revisions
//!
//! The revisions differ in metadata shape: revision 1 has a single
//! developer and repository, revision 2 grew mappings for both plus an
//! explicit main-container pointer, revision 3 dropped that pointer again
//! in favor of naming conventions. Container entries are handled uniformly;
//! deployment fields the updater never touches (ports, environment, mounts,
//! permissions) ride along in order-preserving catch-alls so a
//! load-modify-save cycle does not drop them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yml::Value;

use crate::manifest::error::ManifestError;

/// A field that may be written as a single item or as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }
}

/// Upstream repository reference: one URL, or a mapping of display names to
/// URLs for apps assembled from several repositories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoField {
    Single(String),
    Multiple(IndexMap<String, String>),
}

impl RepoField {
    /// The canonical upstream: the single URL, or the first mapping entry
    pub fn primary(&self) -> Option<&str> {
        match self {
            RepoField::Single(repo) => Some(repo),
            RepoField::Multiple(repos) => repos.values().next().map(String::as_str),
        }
    }
}

/// One deployable unit within a manifest.
///
/// Only `name` and `image` are interpreted; everything else a container
/// declares is preserved verbatim in `rest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataV1 {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(rename = "mainContainer", skip_serializing_if = "Option::is_none")]
    pub main_container: Option<String>,
    #[serde(rename = "updateContainer", skip_serializing_if = "Option::is_none")]
    pub update_container: Option<OneOrMany<String>>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataV2 {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub developers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<RepoField>,
    #[serde(rename = "mainContainer", skip_serializing_if = "Option::is_none")]
    pub main_container: Option<String>,
    #[serde(rename = "updateContainer", skip_serializing_if = "Option::is_none")]
    pub update_container: Option<OneOrMany<String>>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

/// Revision 3 has no explicit main-container pointer; resolution is purely
/// by naming convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataV3 {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub developers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<RepoField>,
    #[serde(rename = "updateContainer", skip_serializing_if = "Option::is_none")]
    pub update_container: Option<OneOrMany<String>>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestV1 {
    /// Schema marker, kept exactly as written (`1` or `"1"`) for round-trips
    pub version: Value,
    pub metadata: MetadataV1,
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestV2 {
    pub version: Value,
    pub metadata: MetadataV2,
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestV3 {
    pub version: Value,
    pub metadata: MetadataV3,
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

/// A parsed manifest of any supported schema revision
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    V1(ManifestV1),
    V2(ManifestV2),
    V3(ManifestV3),
}

/// The schema marker may be written as a YAML number or string
fn schema_version_of(value: &Value) -> Result<String, ManifestError> {
    match value.get("version") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ManifestError::UnsupportedSchema("missing".to_string())),
    }
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_yml::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        let version = schema_version_of(&value)?;
        match version.as_str() {
            "1" => Ok(Self::V1(serde_yml::from_value(value)?)),
            "2" => Ok(Self::V2(serde_yml::from_value(value)?)),
            "3" => Ok(Self::V3(serde_yml::from_value(value)?)),
            _ => Err(ManifestError::UnsupportedSchema(version)),
        }
    }

    pub fn schema_version(&self) -> u32 {
        match self {
            Manifest::V1(_) => 1,
            Manifest::V2(_) => 2,
            Manifest::V3(_) => 3,
        }
    }

    /// Displayed app name
    pub fn name(&self) -> &str {
        match self {
            Manifest::V1(m) => &m.metadata.name,
            Manifest::V2(m) => &m.metadata.name,
            Manifest::V3(m) => &m.metadata.name,
        }
    }

    /// Declared app version (semantics depend on the app's policy)
    pub fn app_version(&self) -> &str {
        match self {
            Manifest::V1(m) => &m.metadata.version,
            Manifest::V2(m) => &m.metadata.version,
            Manifest::V3(m) => &m.metadata.version,
        }
    }

    pub fn set_app_version(&mut self, version: &str) {
        match self {
            Manifest::V1(m) => m.metadata.version = version.to_string(),
            Manifest::V2(m) => m.metadata.version = version.to_string(),
            Manifest::V3(m) => m.metadata.version = version.to_string(),
        }
    }

    /// The canonical upstream repository reference, if any
    pub fn repo(&self) -> Option<&str> {
        match self {
            Manifest::V1(m) => m.metadata.repo.as_deref(),
            Manifest::V2(m) => m.metadata.repo.as_ref().and_then(RepoField::primary),
            Manifest::V3(m) => m.metadata.repo.as_ref().and_then(RepoField::primary),
        }
    }

    /// Explicit main-container name from metadata, where the revision has one
    pub fn main_container_name(&self) -> Option<&str> {
        match self {
            Manifest::V1(m) => m.metadata.main_container.as_deref(),
            Manifest::V2(m) => m.metadata.main_container.as_deref(),
            Manifest::V3(_) => None,
        }
    }

    /// The `updateContainer` field as written, if present
    pub fn update_container(&self) -> Option<&OneOrMany<String>> {
        match self {
            Manifest::V1(m) => m.metadata.update_container.as_ref(),
            Manifest::V2(m) => m.metadata.update_container.as_ref(),
            Manifest::V3(m) => m.metadata.update_container.as_ref(),
        }
    }

    pub fn containers(&self) -> &[ContainerSpec] {
        match self {
            Manifest::V1(m) => &m.containers,
            Manifest::V2(m) => &m.containers,
            Manifest::V3(m) => &m.containers,
        }
    }

    pub fn containers_mut(&mut self) -> &mut [ContainerSpec] {
        match self {
            Manifest::V1(m) => &mut m.containers,
            Manifest::V2(m) => &mut m.containers,
            Manifest::V3(m) => &mut m.containers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1_MANIFEST: &str = r#"
version: 1
metadata:
  name: Example
  version: 1.2.3
  developer: Example Dev
  repo: https://github.com/example/example
  updateContainer: web
containers:
  - name: web
    image: example/example:1.2.3@sha256:aaa
    ports:
      - 8080
  - name: db
    image: library/postgres:14
"#;

    #[test]
    fn parses_v1_with_numeric_schema_marker() {
        let manifest = Manifest::parse(V1_MANIFEST).unwrap();
        assert_eq!(manifest.schema_version(), 1);
        assert_eq!(manifest.name(), "Example");
        assert_eq!(manifest.app_version(), "1.2.3");
        assert_eq!(manifest.repo(), Some("https://github.com/example/example"));
        assert_eq!(manifest.containers().len(), 2);
    }

    #[test]
    fn parses_string_schema_marker() {
        let text = V1_MANIFEST.replace("version: 1\n", "version: \"1\"\n");
        let manifest = Manifest::parse(&text).unwrap();
        assert_eq!(manifest.schema_version(), 1);
    }

    #[test]
    fn parses_v2_with_repo_mapping() {
        let manifest = Manifest::parse(
            r#"
version: 2
metadata:
  name: Example
  version: 2.0.0
  developers:
    Example Dev: https://example.com
  repo:
    Server: https://github.com/example/server
    Client: https://github.com/example/client
  mainContainer: server
containers:
  - name: server
    image: example/server:2.0.0
"#,
        )
        .unwrap();
        assert_eq!(manifest.schema_version(), 2);
        // the first mapping entry is the canonical upstream
        assert_eq!(manifest.repo(), Some("https://github.com/example/server"));
        assert_eq!(manifest.main_container_name(), Some("server"));
    }

    #[test]
    fn v3_has_no_main_container_pointer() {
        let manifest = Manifest::parse(
            r#"
version: 3
metadata:
  name: Example
  version: 3.0.0
  repo: https://github.com/example/example
containers:
  - name: main
    image: example/example:3.0.0
"#,
        )
        .unwrap();
        assert_eq!(manifest.schema_version(), 3);
        assert_eq!(manifest.main_container_name(), None);
    }

    #[test]
    fn update_container_accepts_single_name_and_list() {
        let single = Manifest::parse(V1_MANIFEST).unwrap();
        let names: Vec<_> = single.update_container().unwrap().iter().collect();
        assert_eq!(names, vec!["web"]);

        let text = V1_MANIFEST.replace(
            "updateContainer: web",
            "updateContainer:\n    - web\n    - db",
        );
        let many = Manifest::parse(&text).unwrap();
        let names: Vec<_> = many.update_container().unwrap().iter().collect();
        assert_eq!(names, vec!["web", "db"]);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let err = Manifest::parse("version: 4\nmetadata:\n  name: X\n  version: 1.0.0\n")
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedSchema(v) if v == "4"));

        let err = Manifest::parse("metadata:\n  name: X\n  version: 1.0.0\n").unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedSchema(v) if v == "missing"));
    }

    #[test]
    fn unmodeled_fields_survive_a_round_trip() {
        let manifest = Manifest::parse(V1_MANIFEST).unwrap();
        let rendered = serde_yml::to_string(&manifest).unwrap();
        let reparsed = Manifest::parse(&rendered).unwrap();

        let web = &reparsed.containers()[0];
        assert_eq!(web.name.as_deref(), Some("web"));
        assert!(web.rest.contains_key("ports"));

        match &reparsed {
            Manifest::V1(m) => assert_eq!(m.metadata.developer.as_deref(), Some("Example Dev")),
            _ => panic!("expected a v1 manifest"),
        }
    }

    #[test]
    fn set_app_version_only_touches_the_version_field() {
        let mut manifest = Manifest::parse(V1_MANIFEST).unwrap();
        manifest.set_app_version("1.3.0");
        assert_eq!(manifest.app_version(), "1.3.0");
        assert_eq!(manifest.name(), "Example");
        assert_eq!(
            manifest.containers()[0].image.as_deref(),
            Some("example/example:1.2.3@sha256:aaa")
        );
    }
}
