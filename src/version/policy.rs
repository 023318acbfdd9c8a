//! Per-app versioning policy dispatch
//!
//! The mapping below is a deliberate allow-list: these upstreams tag
//! releases in ways the default semantic-version ordering cannot handle,
//! and there is no generic rule that covers them all.

use crate::version::error::CheckError;
use crate::version::outcome::CheckOutcome;
use crate::version::policies;

/// Apps that never publish a non-prerelease tag; for them prerelease
/// filtering would leave nothing to compare against.
const BETA_ONLY_APPS: &[&str] = &["lightning-terminal"];

/// How an app's upstream numbers its releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningPolicy {
    /// Strict semantic-version ordering over release tags (the default)
    SemVer {
        /// Admit prerelease tags into the candidate set
        allow_prerelease: bool,
    },
    /// Tags are plain integers, newest is the numeric maximum
    DateNumber,
    /// Calendar tags `YEAR.MONTH[.RELEASE]`, compared segment by segment
    DateSegment,
    /// No releases at all; the declared version is the abbreviated tip
    /// commit of the upstream default branch
    CommitHash,
}

impl VersioningPolicy {
    /// Policy for a given app id, defaulting to semantic versioning
    pub fn for_app(app_id: &str) -> Self {
        match app_id {
            "photoprism" => Self::DateNumber,
            "home-assistant" | "pihole" => Self::DateSegment,
            "lnbits" => Self::CommitHash,
            _ => Self::SemVer {
                allow_prerelease: BETA_ONLY_APPS.contains(&app_id),
            },
        }
    }

    /// Whether this policy compares against the default-branch tip commit
    /// instead of release tags
    pub fn tracks_commits(&self) -> bool {
        matches!(self, Self::CommitHash)
    }

    /// Compare a declared version against the upstream candidates.
    ///
    /// For tag-based policies `candidates` is the upstream tag list; for
    /// [`VersioningPolicy::CommitHash`] it is the single abbreviated tip
    /// commit hash.
    pub fn compare(
        &self,
        current: &str,
        candidates: &[String],
    ) -> Result<CheckOutcome, CheckError> {
        match self {
            Self::SemVer { allow_prerelease } => {
                policies::semver::compare(current, candidates, *allow_prerelease)
            }
            Self::DateNumber => policies::date_number::compare(current, candidates),
            Self::DateSegment => policies::date_segment::compare(current, candidates),
            Self::CommitHash => policies::commit::compare(current, candidates),
        }
    }
}
