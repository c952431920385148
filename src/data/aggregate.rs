use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::filter::{RowFilter, filtered};
use super::model::{Column, GroupKey, SalesRecord, SalesTable};

/// Years offered by the year selector.
pub const YEAR_MIN: i32 = 1980;
pub const YEAR_MAX: i32 = 2023;

// ---------------------------------------------------------------------------
// Report mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportMode {
    Yearly,
    Recession,
}

impl ReportMode {
    pub const ALL: [ReportMode; 2] = [ReportMode::Yearly, ReportMode::Recession];

    /// Label shown in the report-type selector.
    pub fn label(self) -> &'static str {
        match self {
            ReportMode::Yearly => "Yearly Statistics",
            ReportMode::Recession => "Recession Period Statistics",
        }
    }

    /// Inverse of [`ReportMode::label`]. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Summary tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Mean,
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// One entry per grouping column, in the table's `keys` order.
    pub key: Vec<GroupKey>,
    pub value: f64,
}

/// Result of grouping rows by one or more columns and reducing a numeric
/// column. Rows are in ascending key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub keys: Vec<Column>,
    pub value: Column,
    pub reduction: Reduction,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct values of the key column at `position`, in key order.
    pub fn distinct_keys(&self, position: usize) -> Vec<GroupKey> {
        let mut seen: Vec<GroupKey> = self
            .rows
            .iter()
            .filter_map(|r| r.key.get(position).cloned())
            .collect();
        seen.sort();
        seen.dedup();
        seen
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group `rows` by `keys` and reduce `value` with `reduction`.
///
/// No value is skipped: a `NaN` anywhere in a group makes that group's
/// result `NaN`.
pub fn group_by<'a, I>(
    rows: I,
    keys: &[Column],
    value: Column,
    reduction: Reduction,
) -> SummaryTable
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut groups: BTreeMap<Vec<GroupKey>, Accumulator> = BTreeMap::new();
    for record in rows {
        let key: Vec<GroupKey> = keys.iter().map(|&c| record.key(c)).collect();
        let acc = groups.entry(key).or_default();
        acc.sum += record.value(value);
        acc.count += 1;
    }

    let rows = groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            key,
            value: match reduction {
                Reduction::Sum => acc.sum,
                Reduction::Mean => acc.sum / acc.count as f64,
            },
        })
        .collect();

    SummaryTable {
        keys: keys.to_vec(),
        value,
        reduction,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Report slots
// ---------------------------------------------------------------------------

/// The fixed chart positions of both report modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSlot {
    RecessionSalesByYear,
    RecessionSalesByVehicle,
    RecessionAdShareByVehicle,
    RecessionUnemploymentEffect,
    YearlySales,
    MonthlySales,
    VehicleSalesInYear(i32),
    AdSpendInYear(i32),
}

impl ReportSlot {
    fn filter(self) -> RowFilter {
        match self {
            ReportSlot::RecessionSalesByYear
            | ReportSlot::RecessionSalesByVehicle
            | ReportSlot::RecessionAdShareByVehicle
            | ReportSlot::RecessionUnemploymentEffect => RowFilter::Recession,
            ReportSlot::YearlySales | ReportSlot::MonthlySales => RowFilter::All,
            ReportSlot::VehicleSalesInYear(year) | ReportSlot::AdSpendInYear(year) => {
                RowFilter::Year(year)
            }
        }
    }

    fn grouping(self) -> (&'static [Column], Column, Reduction) {
        const BY_YEAR: &[Column] = &[Column::Year];
        const BY_MONTH: &[Column] = &[Column::Month];
        const BY_VEHICLE: &[Column] = &[Column::VehicleType];
        const BY_RATE_AND_VEHICLE: &[Column] = &[Column::UnemploymentRate, Column::VehicleType];

        match self {
            ReportSlot::RecessionSalesByYear | ReportSlot::YearlySales => {
                (BY_YEAR, Column::AutomobileSales, Reduction::Mean)
            }
            ReportSlot::RecessionSalesByVehicle | ReportSlot::VehicleSalesInYear(_) => {
                (BY_VEHICLE, Column::AutomobileSales, Reduction::Mean)
            }
            ReportSlot::RecessionAdShareByVehicle | ReportSlot::AdSpendInYear(_) => {
                (BY_VEHICLE, Column::AdvertisingExpenditure, Reduction::Sum)
            }
            ReportSlot::RecessionUnemploymentEffect => {
                (BY_RATE_AND_VEHICLE, Column::AutomobileSales, Reduction::Mean)
            }
            ReportSlot::MonthlySales => (BY_MONTH, Column::AutomobileSales, Reduction::Sum),
        }
    }

    /// Run this slot's aggregation over `table`.
    pub fn summarize(self, table: &SalesTable) -> SummaryTable {
        let (keys, value, reduction) = self.grouping();
        group_by(filtered(table, self.filter()), keys, value, reduction)
    }
}

/// One computed report position.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub slot: ReportSlot,
    pub table: SummaryTable,
}

/// Slots for a selection, or `None` when the selection is not a valid report.
pub fn report_slots(mode: Option<ReportMode>, year: Option<i32>) -> Option<[ReportSlot; 4]> {
    match (mode, year) {
        (Some(ReportMode::Recession), _) => Some([
            ReportSlot::RecessionSalesByYear,
            ReportSlot::RecessionSalesByVehicle,
            ReportSlot::RecessionAdShareByVehicle,
            ReportSlot::RecessionUnemploymentEffect,
        ]),
        (Some(ReportMode::Yearly), Some(year)) if (YEAR_MIN..=YEAR_MAX).contains(&year) => Some([
            ReportSlot::YearlySales,
            ReportSlot::MonthlySales,
            ReportSlot::VehicleSalesInYear(year),
            ReportSlot::AdSpendInYear(year),
        ]),
        _ => None,
    }
}

/// Compute the four summary tables for a report mode and year.
///
/// Returns an empty vector when the combination is not a valid report
/// (no mode, or Yearly without a year in range).
pub fn aggregate(table: &SalesTable, mode: Option<ReportMode>, year: Option<i32>) -> Vec<Report> {
    let Some(slots) = report_slots(mode, year) else {
        return Vec::new();
    };
    slots
        .into_iter()
        .map(|slot| Report {
            slot,
            table: slot.summarize(table),
        })
        .collect()
}
