//! Version comparison core
//!
//! Decides, for one app at a time, whether a newer upstream version exists.
//! Upstream projects tag releases in incompatible ways, so comparison is
//! dispatched through an explicit allow-list of per-app policies:
//!
//! - [`policies::semver`]: the default; strict semantic-version ordering
//! - [`policies::date_number`]: tags are plain integers (release dates)
//! - [`policies::date_segment`]: calendar tags, `YEAR.MONTH[.RELEASE]`
//! - [`policies::commit`]: tracks the default-branch tip commit, not tags
//!
//! The mapping from app id to policy lives in [`policy::VersioningPolicy`].

pub mod error;
pub mod outcome;
pub mod policies;
pub mod policy;

pub use error::CheckError;
pub use outcome::CheckOutcome;
pub use policy::VersioningPolicy;
