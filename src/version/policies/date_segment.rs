//! Calendar-versioned tag policy
//!
//! Tags follow `YEAR.MONTH[.RELEASE]`, with the release number defaulting
//! to 0 when absent. Beta builds carry a `b` somewhere in the tag
//! (`2023.6.0b1`) and are excluded outright. Comparison is by year, then
//! month, then release, each as an independent integer.

use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::CheckError;
use crate::version::outcome::CheckOutcome;

static SEGMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap());

fn parse_segments(version: &str) -> Option<(u32, u32, u32)> {
    let caps = SEGMENTS.captures(version)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let release = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some((year, month, release))
}

pub fn compare(current: &str, candidates: &[String]) -> Result<CheckOutcome, CheckError> {
    let declared = parse_segments(current)
        .ok_or_else(|| CheckError::InvalidDeclaredVersion(current.to_string()))?;

    let (latest_segments, latest_tag) = candidates
        .iter()
        .filter(|tag| !tag.contains('b'))
        .filter_map(|tag| parse_segments(tag).map(|segments| (segments, tag)))
        .max_by_key(|(segments, _)| *segments)
        .ok_or(CheckError::NoUsableTags)?;

    if latest_segments > declared {
        Ok(CheckOutcome::UpdateAvailable {
            latest: latest_tag.clone(),
        })
    } else {
        Ok(CheckOutcome::UpToDate)
    }
}
