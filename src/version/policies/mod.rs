//! Policy implementations, one module per tagging convention

pub mod commit;
pub mod date_number;
pub mod date_segment;
pub mod semver;
