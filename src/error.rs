use thiserror::Error;

/// Errors surfaced by the dashboard.
///
/// `DataUnavailable` is fatal at startup. `InvalidSelection` never escapes the
/// controller: it is turned into the placeholder text in the chart panel.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dataset unavailable from {source_locator}: {reason}")]
    DataUnavailable {
        source_locator: String,
        reason: String,
    },

    #[error("no report for the current report type and year")]
    InvalidSelection,
}
