//! Writes a synthetic automobile sales dataset with the same columns as the
//! public one, so the dashboard can run offline:
//!
//! ```text
//! cargo run --bin generate_sample -- sample_sales.csv
//! cargo run -- sample_sales.csv
//! ```

use anyhow::{Context, Result};
use auto_sales_dashboard::data::aggregate::{YEAR_MAX, YEAR_MIN};
use auto_sales_dashboard::data::model::Month;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const VEHICLE_TYPES: [&str; 5] = [
    "Supperminicar",
    "Smallfamiliycar",
    "Mediumfamilycar",
    "Executivecar",
    "Sports",
];

const CITIES: [&str; 4] = ["Georgia", "New York", "California", "Illinois"];

/// Years with at least one recession month.
const RECESSION_YEARS: [i32; 10] = [1980, 1981, 1982, 1991, 2000, 2001, 2007, 2008, 2009, 2020];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: &'static str,
    #[serde(rename = "Recession")]
    recession: u8,
    #[serde(rename = "Consumer_Confidence")]
    consumer_confidence: f64,
    #[serde(rename = "Seasonality_Weight")]
    seasonality_weight: f64,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Advertising_Expenditure")]
    advertising_expenditure: f64,
    #[serde(rename = "Competition")]
    competition: u32,
    #[serde(rename = "GDP")]
    gdp: f64,
    #[serde(rename = "Growth_Rate")]
    growth_rate: f64,
    #[serde(rename = "unemployment_rate")]
    unemployment_rate: f64,
    #[serde(rename = "Automobile_Sales")]
    automobile_sales: f64,
    #[serde(rename = "Vehicle_Type")]
    vehicle_type: &'static str,
    #[serde(rename = "City")]
    city: &'static str,
}

fn days_in_month(year: i32, month: Month) -> u32 {
    match month {
        Month::Feb if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        Month::Feb => 28,
        Month::Apr | Month::Jun | Month::Sep | Month::Nov => 30,
        _ => 31,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0usize;
    for year in YEAR_MIN..=YEAR_MAX {
        let recession = RECESSION_YEARS.contains(&year);
        let base_unemployment: f64 = if recession { 7.5 } else { 4.5 };

        for month in Month::ALL {
            let vehicle_type = VEHICLE_TYPES[rng.gen_range(0..VEHICLE_TYPES.len())];
            let seasonality = 0.8 + 0.4 * (f64::from(month.number()) / 12.0);
            let unemployment = base_unemployment + rng.gen_range(-1.5..1.5);
            let base_sales = if recession { 1_800.0 } else { 3_200.0 };

            let row = Row {
                date: format!("{}/{}/{year}", month.number(), days_in_month(year, month)),
                year,
                month: month.label(),
                recession: u8::from(recession),
                consumer_confidence: round2(rng.gen_range(75.0..130.0)),
                seasonality_weight: round2(seasonality),
                price: round2(rng.gen_range(8_000.0..45_000.0)),
                advertising_expenditure: rng.gen_range(1_000.0..5_000.0_f64).round(),
                competition: rng.gen_range(100..1_000),
                gdp: round2(rng.gen_range(12.0..70.0)),
                growth_rate: round2(rng.gen_range(-0.5..0.6)),
                unemployment_rate: (unemployment * 10.0).round() / 10.0,
                automobile_sales: round2(base_sales * seasonality + rng.gen_range(-400.0..400.0)),
                vehicle_type,
                city: CITIES[rng.gen_range(0..CITIES.len())],
            };
            writer.serialize(&row).context("writing CSV row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} rows ({YEAR_MIN}-{YEAR_MAX}) to {output_path}");
    Ok(())
}
