use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unsupported manifest schema version `{0}`")]
    UnsupportedSchema(String),

    #[error("manifest declares no containers")]
    NoContainers,

    #[error("no container named `{0}`")]
    NoSuchContainer(String),

    #[error("container `{0}` has no image")]
    MissingImage(String),
}
