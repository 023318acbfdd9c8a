//! Default semantic-version policy
//!
//! Strips a leading `v` from the declared version and from every candidate
//! tag, discards tags that are not valid semantic versions, discards
//! prereleases (unless the app only ever publishes prereleases), and
//! compares against the semantic maximum of what remains.

use semver::Version;

use crate::version::error::CheckError;
use crate::version::outcome::CheckOutcome;

/// Upstreams tag both `1.2.3` and `v1.2.3`; comparison is over the bare form
fn normalize(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// A tag counts as a prerelease if it carries a semver prerelease segment
/// or the literal `rc`/`beta` markers some upstreams use instead.
fn is_prerelease(tag: &str) -> bool {
    let normalized = normalize(tag);
    let has_prerelease_segment = Version::parse(normalized)
        .map(|v| !v.pre.is_empty())
        .unwrap_or(false);
    has_prerelease_segment || normalized.contains("rc") || normalized.contains("beta")
}

pub fn compare(
    current: &str,
    candidates: &[String],
    allow_prerelease: bool,
) -> Result<CheckOutcome, CheckError> {
    let declared = Version::parse(normalize(current))
        .map_err(|_| CheckError::InvalidDeclaredVersion(current.to_string()))?;

    let latest = candidates
        .iter()
        .filter(|tag| allow_prerelease || !is_prerelease(tag))
        .filter_map(|tag| Version::parse(normalize(tag)).ok())
        .max()
        .ok_or(CheckError::NoUsableTags)?;

    if latest > declared {
        Ok(CheckOutcome::UpdateAvailable {
            latest: latest.to_string(),
        })
    } else {
        Ok(CheckOutcome::UpToDate)
    }
}
