use std::io::Write;

use auto_sales_dashboard::chart::{ChartKind, to_chart_spec};
use auto_sales_dashboard::config::{DashboardConfig, Source};
use auto_sales_dashboard::data::aggregate::{Reduction, ReportMode, YEAR_MAX, YEAR_MIN, aggregate};
use auto_sales_dashboard::data::loader;
use auto_sales_dashboard::data::model::SalesTable;
use auto_sales_dashboard::state::{AppState, ChartPanel, PLACEHOLDER, Selection, render_panel};
use tempfile::NamedTempFile;

const CSV: &str = "\
Date,Year,Month,Recession,Consumer_Confidence,Seasonality_Weight,Price,Advertising_Expenditure,Competition,GDP,Growth_Rate,unemployment_rate,Automobile_Sales,Vehicle_Type,City
1/31/1980,1980,Jan,1,108.24,0.5,27483.57,1558,7,60.223,0.01,5.4,456,Supperminicar,Georgia
2/29/1980,1980,Feb,1,98.75,0.75,24308.51,3048,4,45.986,-0.31,4.8,555.9,Smallfamiliycar,New York
3/31/1981,1981,Mar,1,107.48,0.2,28238.49,3137,3,35.141,-0.16,3.1,620,Mediumfamilycar,New York
4/30/1981,1981,Apr,0,115.01,1,19087.12,1653,8,45.673,0.29,4.8,720,Supperminicar,Illinois
5/31/2015,2015,May,0,98.03,0.2,21534.58,4525,7,55.237,0.41,2.3,3500,Sports,California
6/30/2015,2015,Jun,0,92.21,0.6,22102.31,2310,5,57.111,0.35,2.2,2900,Executivecar,Georgia
";

fn load_fixture() -> SalesTable {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{CSV}").unwrap();

    let config = DashboardConfig::from_args(vec![tmp.path().display().to_string()]).unwrap();
    assert!(matches!(config.source, Source::Path(_)));
    loader::load(&config.source).unwrap()
}

#[test]
fn loads_fixture_from_disk() {
    let table = load_fixture();
    assert_eq!(table.len(), 6);
    assert_eq!(table.year_span(), Some((1980, 2015)));
    assert_eq!(table.vehicle_types().len(), 5);
}

#[test]
fn every_valid_year_yields_four_charts_titled_with_the_year() {
    let table = load_fixture();
    for year in YEAR_MIN..=YEAR_MAX {
        let reports = aggregate(&table, Some(ReportMode::Yearly), Some(year));
        assert_eq!(reports.len(), 4, "year {year}");

        let third = to_chart_spec(&reports[2].table, reports[2].slot);
        assert!(third.title.contains(&year.to_string()));
    }
}

#[test]
fn recession_report_is_independent_of_year() {
    let table = load_fixture();
    let without = aggregate(&table, Some(ReportMode::Recession), None);
    assert_eq!(without.len(), 4);
    for year in [None, Some(1980), Some(2015), Some(1900)] {
        assert_eq!(aggregate(&table, Some(ReportMode::Recession), year), without);
    }
}

#[test]
fn yearly_2015_charts() {
    let table = load_fixture();
    let selection = Selection {
        mode: Some(ReportMode::Yearly),
        year: Some(2015),
    };
    let ChartPanel::Charts(charts) = render_panel(&table, &selection) else {
        panic!("expected charts for 2015");
    };

    let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ChartKind::Line, ChartKind::Line, ChartKind::Bar, ChartKind::Pie]);
    assert_eq!(charts[0].title, "Yearly Automobile Sales");
    assert_eq!(charts[1].title, "Total Monthly Automobile Sales");
    assert_eq!(charts[2].title, "Average Vehicles Sold by Vehicle Type in 2015");
    assert_eq!(charts[3].title, "Total Advertisement Expenditure by Vehicle Type");

    // Yearly chart averages every year's rows.
    assert_eq!(charts[0].data.reduction, Reduction::Mean);
    let yearly: Vec<f64> = charts[0].data.rows.iter().map(|r| r.value).collect();
    assert_eq!(yearly, vec![(456.0 + 555.9) / 2.0, (620.0 + 720.0) / 2.0, (3500.0 + 2900.0) / 2.0]);

    // Only two vehicle types were sold in 2015.
    assert_eq!(charts[2].data.rows.len(), 2);
    assert_eq!(charts[3].data.rows.iter().map(|r| r.value).sum::<f64>(), 4525.0 + 2310.0);

    // The first two charts cover every year regardless of the selection.
    let other = render_panel(
        &table,
        &Selection {
            mode: Some(ReportMode::Yearly),
            year: Some(1981),
        },
    );
    let ChartPanel::Charts(other) = other else {
        panic!("expected charts for 1981");
    };
    assert_eq!(charts[0], other[0]);
    assert_eq!(charts[1], other[1]);
    assert_ne!(charts[2], other[2]);
}

#[test]
fn recession_charts_only_see_recession_rows() {
    let table = load_fixture();
    let reports = aggregate(&table, Some(ReportMode::Recession), None);

    let by_year = &reports[0].table;
    assert_eq!(by_year.rows.len(), 2);
    assert_eq!(by_year.rows[0].value, (456.0 + 555.9) / 2.0);
    assert_eq!(by_year.rows[1].value, 620.0);

    let titles: Vec<String> = reports
        .iter()
        .map(|r| to_chart_spec(&r.table, r.slot).title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Automobile Sales During Recessions",
            "Average Sales by Vehicle Type",
            "Advertising Expenditure Share by Vehicle Type",
            "Effect of Unemployment Rate on Vehicle Type and Sales",
        ]
    );
}

#[test]
fn invalid_selections_render_placeholder() {
    let table = load_fixture();
    let placeholder = ChartPanel::Placeholder(PLACEHOLDER.to_string());

    for selection in [
        Selection {
            mode: Some(ReportMode::Yearly),
            year: None,
        },
        Selection {
            mode: None,
            year: Some(2015),
        },
        Selection {
            mode: None,
            year: None,
        },
    ] {
        assert_eq!(render_panel(&table, &selection), placeholder);
    }
    assert_eq!(PLACEHOLDER, "Select a valid report type and year.");
}

#[test]
fn repeated_selection_is_idempotent() {
    let table = load_fixture();
    let mut state = AppState::new(table.clone());
    state.set_year(Some(1980));
    let first = state.panel.clone();

    state.set_mode(Some(ReportMode::Recession));
    state.set_mode(Some(ReportMode::Yearly));
    assert_eq!(state.panel, first);
    assert_eq!(
        aggregate(&table, Some(ReportMode::Yearly), Some(1980)),
        aggregate(&table, Some(ReportMode::Yearly), Some(1980))
    );
}

#[test]
fn unreadable_source_is_data_unavailable() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "Year,Month\n1980,Jan\n").unwrap();

    let err = loader::load(&Source::Path(tmp.path().to_path_buf())).unwrap_err();
    assert!(err.to_string().starts_with("dataset unavailable from"));
}
