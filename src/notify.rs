//! Outbound update announcements
//!
//! One fixed sentence per applied (or failed) update. Delivery is a seam:
//! the default sink only logs, so the binary stays offline unless a real
//! announcer is wired in.

use tracing::info;

/// Sink for update announcements
#[async_trait::async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, message: &str);
}

pub fn update_applied_message(app_name: &str, version: &str) -> String {
    format!("{app_name} has been updated to {version} in the app store.")
}

pub fn update_failed_message(app_name: &str, version: &str) -> String {
    format!("An update of {app_name} to {version} could not be applied automatically.")
}

/// Default sink: announcements go to the log
pub struct LogAnnouncer;

#[async_trait::async_trait]
impl Announcer for LogAnnouncer {
    async fn announce(&self, message: &str) {
        info!("{message}");
    }
}
