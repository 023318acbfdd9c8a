//! Outcome of a single app's version check

/// What a version check concluded about one app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The declared version matches the newest usable upstream release
    UpToDate,
    /// A newer upstream release exists
    UpdateAvailable {
        /// The version the app should be updated to
        latest: String,
    },
}
