use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{ReportSlot, SummaryTable};
use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// How the summary table's columns map onto the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Bindings {
    Xy {
        x: Column,
        y: Column,
        /// Splits the series by this category, one color each.
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Column>,
    },
    Pie {
        values: Column,
        names: Column,
    },
}

/// A renderer-independent chart: kind, bindings, title and the data it draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub bindings: Bindings,
    pub title: String,
    pub data: SummaryTable,
}

impl ReportSlot {
    pub fn kind(self) -> ChartKind {
        match self {
            ReportSlot::RecessionSalesByYear
            | ReportSlot::YearlySales
            | ReportSlot::MonthlySales => ChartKind::Line,
            ReportSlot::RecessionSalesByVehicle
            | ReportSlot::RecessionUnemploymentEffect
            | ReportSlot::VehicleSalesInYear(_) => ChartKind::Bar,
            ReportSlot::RecessionAdShareByVehicle | ReportSlot::AdSpendInYear(_) => ChartKind::Pie,
        }
    }

    pub fn title(self) -> String {
        match self {
            ReportSlot::RecessionSalesByYear => "Automobile Sales During Recessions".to_string(),
            ReportSlot::RecessionSalesByVehicle => "Average Sales by Vehicle Type".to_string(),
            ReportSlot::RecessionAdShareByVehicle => {
                "Advertising Expenditure Share by Vehicle Type".to_string()
            }
            ReportSlot::RecessionUnemploymentEffect => {
                "Effect of Unemployment Rate on Vehicle Type and Sales".to_string()
            }
            ReportSlot::YearlySales => "Yearly Automobile Sales".to_string(),
            ReportSlot::MonthlySales => "Total Monthly Automobile Sales".to_string(),
            ReportSlot::VehicleSalesInYear(year) => {
                format!("Average Vehicles Sold by Vehicle Type in {year}")
            }
            ReportSlot::AdSpendInYear(_) => {
                "Total Advertisement Expenditure by Vehicle Type".to_string()
            }
        }
    }
}

/// Map a summary table onto the chart for its report slot.
///
/// The first grouping column is the x axis (or pie names); a second grouping
/// column becomes the color split.
pub fn to_chart_spec(table: &SummaryTable, slot: ReportSlot) -> ChartSpec {
    let kind = slot.kind();
    let primary = table.keys.first().copied().unwrap_or(Column::Year);

    let bindings = match kind {
        ChartKind::Pie => Bindings::Pie {
            values: table.value,
            names: primary,
        },
        ChartKind::Line | ChartKind::Bar => Bindings::Xy {
            x: primary,
            y: table.value,
            color: table.keys.get(1).copied(),
        },
    };

    ChartSpec {
        kind,
        bindings,
        title: slot.title(),
        data: table.clone(),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write a chart set as pretty-printed JSON.
pub fn write_json(path: &Path, charts: &[ChartSpec]) -> Result<()> {
    let text = serde_json::to_string_pretty(charts).context("serializing charts")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{Reduction, SummaryRow};
    use crate::data::model::GroupKey;

    fn summary(keys: Vec<Column>, value: Column) -> SummaryTable {
        SummaryTable {
            keys,
            value,
            reduction: Reduction::Mean,
            rows: vec![SummaryRow {
                key: vec![GroupKey::Category("Sports".to_string())],
                value: 1.0,
            }],
        }
    }

    #[test]
    fn vehicle_title_names_the_year() {
        let t = summary(vec![Column::VehicleType], Column::AutomobileSales);
        let spec = to_chart_spec(&t, ReportSlot::VehicleSalesInYear(2015));
        assert_eq!(spec.title, "Average Vehicles Sold by Vehicle Type in 2015");
        assert_eq!(spec.kind, ChartKind::Bar);
    }

    #[test]
    fn pie_binds_values_and_names() {
        let t = summary(vec![Column::VehicleType], Column::AdvertisingExpenditure);
        let spec = to_chart_spec(&t, ReportSlot::RecessionAdShareByVehicle);
        assert_eq!(spec.kind, ChartKind::Pie);
        assert_eq!(
            spec.bindings,
            Bindings::Pie {
                values: Column::AdvertisingExpenditure,
                names: Column::VehicleType,
            }
        );
    }

    #[test]
    fn second_key_becomes_color_split() {
        let t = summary(
            vec![Column::UnemploymentRate, Column::VehicleType],
            Column::AutomobileSales,
        );
        let spec = to_chart_spec(&t, ReportSlot::RecessionUnemploymentEffect);
        assert_eq!(
            spec.bindings,
            Bindings::Xy {
                x: Column::UnemploymentRate,
                y: Column::AutomobileSales,
                color: Some(Column::VehicleType),
            }
        );
    }

    #[test]
    fn exported_json_uses_column_names() {
        let t = summary(vec![Column::VehicleType], Column::AutomobileSales);
        let spec = to_chart_spec(&t, ReportSlot::RecessionSalesByVehicle);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        write_json(&path, &[spec]).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "bar");
        assert_eq!(json[0]["bindings"]["x"], "Vehicle_Type");
        assert_eq!(json[0]["data"]["rows"][0]["key"][0], "Sports");
    }
}
