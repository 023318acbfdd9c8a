use thiserror::Error;

/// Why a version check could not reach a verdict.
///
/// All of these are recorded as failed-check rows in the report; none of
/// them aborts the scan.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("repository reference `{0}` is not a supported GitHub repository")]
    UnsupportedRepository(String),

    #[error("declared version `{0}` does not match the app's versioning scheme")]
    InvalidDeclaredVersion(String),

    #[error("no usable tags remain after filtering")]
    NoUsableTags,

    #[error(transparent)]
    Api(#[from] crate::github::ApiError),
}
