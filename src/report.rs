//! Markdown report rendering
//!
//! The report is one table row per app with an available update or a
//! failed check. Apps that could not be checked keep their place in the
//! table with a fixed placeholder, so a scan over N interesting apps never
//! quietly shrinks.

/// Placeholder for both value columns of a failed check
pub const CHECK_FAILED_PLACEHOLDER: &str = "Couldn't check";

/// One row of the final report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub app: String,
    /// Newest upstream version, or the failure placeholder
    pub latest: String,
    /// Version the node currently declares, or the failure placeholder
    pub declared: String,
}

pub fn render_markdown(node_label: &str, rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return "No updates were found, everything seems up-to-date.".to_string();
    }

    let mut table = format!("| app | current release | used in {node_label} |\n");
    table.push_str("|-----|-----------------|----------------|\n");
    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            row.app, row.latest, row.declared
        ));
    }
    table
}
