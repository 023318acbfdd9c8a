//! Date-numbered tag policy
//!
//! Some upstreams tag releases with a plain number derived from the release
//! date (`220528`, `230625`, ...). The newest release is simply the numeric
//! maximum, and an update exists when it exceeds the declared version
//! parsed the same way.

use crate::version::error::CheckError;
use crate::version::outcome::CheckOutcome;

pub fn compare(current: &str, candidates: &[String]) -> Result<CheckOutcome, CheckError> {
    let declared: u64 = current
        .parse()
        .map_err(|_| CheckError::InvalidDeclaredVersion(current.to_string()))?;

    let (latest_number, latest_tag) = candidates
        .iter()
        .filter_map(|tag| tag.parse::<u64>().ok().map(|number| (number, tag)))
        .max_by_key(|(number, _)| *number)
        .ok_or(CheckError::NoUsableTags)?;

    if latest_number > declared {
        Ok(CheckOutcome::UpdateAvailable {
            latest: latest_tag.clone(),
        })
    } else {
        Ok(CheckOutcome::UpToDate)
    }
}
