use crate::chart::{ChartSpec, to_chart_spec};
use crate::data::aggregate::{ReportMode, aggregate};
use crate::data::model::SalesTable;
use crate::error::DashboardError;

/// Shown instead of charts when the selection does not name a report.
pub const PLACEHOLDER: &str = "Select a valid report type and year.";

// ---------------------------------------------------------------------------
// Selection and derived chart panel
// ---------------------------------------------------------------------------

/// The two user inputs. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mode: Option<ReportMode>,
    pub year: Option<i32>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            mode: Some(ReportMode::Yearly),
            year: None,
        }
    }
}

/// Content of the chart region.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Charts(Vec<ChartSpec>),
    Placeholder(String),
}

/// The year selector only applies to yearly reports.
pub fn year_selector_enabled(mode: Option<ReportMode>) -> bool {
    mode == Some(ReportMode::Yearly)
}

/// Aggregate and adapt the full chart set for a selection.
pub fn build_charts(
    table: &SalesTable,
    selection: &Selection,
) -> Result<Vec<ChartSpec>, DashboardError> {
    let reports = aggregate(table, selection.mode, selection.year);
    if reports.is_empty() {
        return Err(DashboardError::InvalidSelection);
    }
    Ok(reports
        .iter()
        .map(|report| to_chart_spec(&report.table, report.slot))
        .collect())
}

/// Pure function of the table and the current selection.
pub fn render_panel(table: &SalesTable, selection: &Selection) -> ChartPanel {
    match build_charts(table, selection) {
        Ok(charts) => ChartPanel::Charts(charts),
        Err(e) => {
            log::debug!("{e} (mode {:?}, year {:?})", selection.mode, selection.year);
            ChartPanel::Placeholder(PLACEHOLDER.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup, shared read-only.
    pub dataset: SalesTable,

    /// Current report type and year.
    pub selection: Selection,

    /// Chart region, recomputed on every selection change.
    pub panel: ChartPanel,

    /// Whether each chart shows its summary table underneath.
    pub show_data: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: SalesTable) -> Self {
        let selection = Selection::default();
        let panel = render_panel(&dataset, &selection);
        Self {
            dataset,
            selection,
            panel,
            show_data: false,
            status_message: None,
        }
    }

    pub fn year_selector_enabled(&self) -> bool {
        year_selector_enabled(self.selection.mode)
    }

    /// Choose the report type. The selected year is kept even while its
    /// selector is disabled.
    pub fn set_mode(&mut self, mode: Option<ReportMode>) {
        if self.selection.mode != mode {
            self.selection.mode = mode;
            self.refresh();
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        if self.selection.year != year {
            self.selection.year = year;
            self.refresh();
        }
    }

    /// Replace the whole chart panel from the current selection.
    pub fn refresh(&mut self) {
        self.panel = render_panel(&self.dataset, &self.selection);
        if let ChartPanel::Charts(charts) = &self.panel {
            log::debug!(
                "Rendered {} charts for {:?} / {:?}",
                charts.len(),
                self.selection.mode,
                self.selection.year
            );
        }
    }

    /// Charts currently on screen (empty while the placeholder shows).
    pub fn charts(&self) -> &[ChartSpec] {
        match &self.panel {
            ChartPanel::Charts(charts) => charts,
            ChartPanel::Placeholder(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Month, SalesRecord};

    fn table() -> SalesTable {
        let row = |year, recession| SalesRecord {
            year,
            month: Month::Mar,
            recession,
            vehicle_type: "Sports".to_string(),
            automobile_sales: 10.0,
            advertising_expenditure: 2.0,
            unemployment_rate: 6.0,
        };
        SalesTable::new(vec![row(2008, true), row(2015, false)])
    }

    #[test]
    fn starts_on_yearly_without_year() {
        let state = AppState::new(table());
        assert_eq!(state.selection.mode, Some(ReportMode::Yearly));
        assert!(state.year_selector_enabled());
        assert_eq!(state.panel, ChartPanel::Placeholder(PLACEHOLDER.to_string()));
        assert!(state.charts().is_empty());
    }

    #[test]
    fn mode_toggles_year_selector() {
        let mut state = AppState::new(table());
        state.set_mode(Some(ReportMode::Recession));
        assert!(!state.year_selector_enabled());
        assert_eq!(state.charts().len(), 4);

        state.set_mode(Some(ReportMode::Yearly));
        assert!(state.year_selector_enabled());
        assert!(!year_selector_enabled(None));
    }

    #[test]
    fn year_change_replaces_panel() {
        let mut state = AppState::new(table());
        state.set_year(Some(2015));
        assert_eq!(state.charts().len(), 4);
        assert_eq!(state.charts()[2].title, "Average Vehicles Sold by Vehicle Type in 2015");

        state.set_year(None);
        assert_eq!(state.panel, ChartPanel::Placeholder(PLACEHOLDER.to_string()));
    }

    #[test]
    fn unset_mode_is_invalid_selection() {
        let selection = Selection {
            mode: None,
            year: Some(2015),
        };
        assert!(matches!(
            build_charts(&table(), &selection),
            Err(DashboardError::InvalidSelection)
        ));
    }
}
