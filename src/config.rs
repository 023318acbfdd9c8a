//! Shared constants for network and registry operations

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent sent with all HTTP requests
pub const USER_AGENT: &str = "appcheck";

/// Timeout for a single HTTP request (30 seconds)
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Timeout for a single registry pull (10 minutes; a hung pull must not
/// stall the rest of the scan forever)
pub const PULL_TIMEOUT_SECS: u64 = 600;
