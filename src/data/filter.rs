use super::model::{SalesRecord, SalesTable};

// ---------------------------------------------------------------------------
// Row predicate: which rows of the table an aggregation sees
// ---------------------------------------------------------------------------

/// Row selection applied before grouping. The table itself is never modified;
/// a filter only decides which rows are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// Every row.
    All,
    /// Rows flagged as falling inside a recession.
    Recession,
    /// Rows of a single year.
    Year(i32),
}

impl RowFilter {
    pub fn matches(self, record: &SalesRecord) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::Recession => record.recession,
            RowFilter::Year(year) => record.year == year,
        }
    }
}

/// Iterate over the rows that pass `filter`, in table order.
pub fn filtered(table: &SalesTable, filter: RowFilter) -> impl Iterator<Item = &SalesRecord> {
    table.records().iter().filter(move |r| filter.matches(r))
}
