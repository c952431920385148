use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Month – calendar month label
// ---------------------------------------------------------------------------

/// Calendar month. Ordering follows the calendar, not the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }
}

impl FromStr for Month {
    type Err = String;

    /// Accepts "Jan", "jan", "January", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| {
                let short = m.label().to_ascii_lowercase();
                lower.len() >= 3 && lower.starts_with(&short) && full_name(*m).starts_with(&lower)
            })
            .ok_or_else(|| format!("unknown month '{s}'"))
    }
}

fn full_name(m: Month) -> &'static str {
    match m {
        Month::Jan => "january",
        Month::Feb => "february",
        Month::Mar => "march",
        Month::Apr => "april",
        Month::May => "may",
        Month::Jun => "june",
        Month::Jul => "july",
        Month::Aug => "august",
        Month::Sep => "september",
        Month::Oct => "october",
        Month::Nov => "november",
        Month::Dec => "december",
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Column – the typed columns of the sales table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Year,
    Month,
    Recession,
    VehicleType,
    AutomobileSales,
    AdvertisingExpenditure,
    UnemploymentRate,
}

impl Column {
    /// Header name in the source CSV.
    pub fn name(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::Recession => "Recession",
            Column::VehicleType => "Vehicle_Type",
            Column::AutomobileSales => "Automobile_Sales",
            Column::AdvertisingExpenditure => "Advertising_Expenditure",
            Column::UnemploymentRate => "Unemployment_Rate",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// GroupKey – one component of a group-by key
// ---------------------------------------------------------------------------

/// A grouping value. Used as a `BTreeMap` key, so it must be `Ord` even for
/// floating point rates.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Year(i32),
    Month(Month),
    Category(String),
    Rate(f64),
}

impl GroupKey {
    /// Numeric position on a continuous axis, if the key has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GroupKey::Year(y) => Some(f64::from(*y)),
            GroupKey::Month(m) => Some(f64::from(m.number())),
            GroupKey::Rate(r) => Some(*r),
            GroupKey::Category(_) => None,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use GroupKey::*;
        fn discriminant(k: &GroupKey) -> u8 {
            match k {
                Year(_) => 0,
                Month(_) => 1,
                Rate(_) => 2,
                Category(_) => 3,
            }
        }
        match (self, other) {
            (Year(a), Year(b)) => a.cmp(b),
            (Month(a), Month(b)) => a.cmp(b),
            (Rate(a), Rate(b)) => a.total_cmp(b),
            (Category(a), Category(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for GroupKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            GroupKey::Year(y) => y.hash(state),
            GroupKey::Month(m) => m.hash(state),
            GroupKey::Category(s) => s.hash(state),
            GroupKey::Rate(r) => r.to_bits().hash(state),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(y) => write!(f, "{y}"),
            GroupKey::Month(m) => write!(f, "{m}"),
            GroupKey::Category(s) => write!(f, "{s}"),
            GroupKey::Rate(r) => write!(f, "{r}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i32,
    pub month: Month,
    pub recession: bool,
    pub vehicle_type: String,
    /// `NaN` when the source cell was empty.
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
}

impl SalesRecord {
    /// Grouping value of a categorical (or key-like) column.
    pub fn key(&self, column: Column) -> GroupKey {
        match column {
            Column::Year => GroupKey::Year(self.year),
            Column::Month => GroupKey::Month(self.month),
            Column::Recession => GroupKey::Category(u8::from(self.recession).to_string()),
            Column::VehicleType => GroupKey::Category(self.vehicle_type.clone()),
            Column::UnemploymentRate => GroupKey::Rate(self.unemployment_rate),
            Column::AutomobileSales => GroupKey::Rate(self.automobile_sales),
            Column::AdvertisingExpenditure => GroupKey::Rate(self.advertising_expenditure),
        }
    }

    /// Numeric value of a column, as reduced by mean / sum.
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Year => f64::from(self.year),
            Column::Month => f64::from(self.month.number()),
            Column::Recession => f64::from(u8::from(self.recession)),
            Column::VehicleType => f64::NAN,
            Column::AutomobileSales => self.automobile_sales,
            Column::AdvertisingExpenditure => self.advertising_expenditure,
            Column::UnemploymentRate => self.unemployment_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Rows are never mutated after load; clones share the
/// same allocation.
#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Arc<[SalesRecord]>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last year present, if any.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Sorted distinct vehicle types.
    pub fn vehicle_types(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.vehicle_type.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parses_short_and_long_names() {
        assert_eq!("Jan".parse::<Month>().unwrap(), Month::Jan);
        assert_eq!("september".parse::<Month>().unwrap(), Month::Sep);
        assert_eq!(" DEC ".parse::<Month>().unwrap(), Month::Dec);
        assert!("Ja".parse::<Month>().is_err());
        assert!("Janx".parse::<Month>().is_err());
    }

    #[test]
    fn months_order_by_calendar() {
        let mut months = vec![Month::Dec, Month::Apr, Month::Aug, Month::Jan];
        months.sort();
        assert_eq!(months, vec![Month::Jan, Month::Apr, Month::Aug, Month::Dec]);
    }

    #[test]
    fn rate_keys_have_total_order() {
        let mut keys = vec![
            GroupKey::Rate(f64::NAN),
            GroupKey::Rate(5.5),
            GroupKey::Rate(2.0),
        ];
        keys.sort();
        assert_eq!(keys[0], GroupKey::Rate(2.0));
        assert_eq!(keys[1], GroupKey::Rate(5.5));
        assert!(matches!(keys[2], GroupKey::Rate(r) if r.is_nan()));
    }
}
