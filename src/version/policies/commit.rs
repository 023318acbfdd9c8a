//! Commit-tracking policy
//!
//! For apps that deploy straight from the upstream default branch, the
//! declared "version" is a 7-character abbreviated commit hash. There is
//! no ordering between hashes; any difference from the current tip means
//! an update.

use crate::version::error::CheckError;
use crate::version::outcome::CheckOutcome;

/// `candidates` holds the single abbreviated tip commit of the upstream
/// default branch.
pub fn compare(current: &str, candidates: &[String]) -> Result<CheckOutcome, CheckError> {
    let tip = candidates
        .first()
        .filter(|tip| !tip.is_empty())
        .ok_or(CheckError::NoUsableTags)?;

    if tip != current {
        Ok(CheckOutcome::UpdateAvailable { latest: tip.clone() })
    } else {
        Ok(CheckOutcome::UpToDate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differing_tip_means_update() {
        let outcome = compare("0a1b2c3", &["deadbee".to_string()]).unwrap();
        assert_eq!(
            outcome,
            CheckOutcome::UpdateAvailable {
                latest: "deadbee".to_string()
            }
        );
    }

    #[test]
    fn identical_tip_means_up_to_date() {
        let outcome = compare("deadbee", &["deadbee".to_string()]).unwrap();
        assert_eq!(outcome, CheckOutcome::UpToDate);
    }

    #[test]
    fn missing_or_empty_tip_is_an_error() {
        assert!(matches!(
            compare("deadbee", &[]).unwrap_err(),
            CheckError::NoUsableTags
        ));
        assert!(matches!(
            compare("deadbee", &[String::new()]).unwrap_err(),
            CheckError::NoUsableTags
        ));
    }
}
