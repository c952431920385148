use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::{Month, SalesRecord, SalesTable};
use crate::config::Source;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the sales dataset from its source. Any failure is reported as
/// [`DashboardError::DataUnavailable`]; callers treat it as fatal.
pub fn load(source: &Source) -> Result<SalesTable, DashboardError> {
    let result = match source {
        Source::Url(url) => load_url(url),
        Source::Path(path) => load_path(path),
    };

    result.map_err(|e| DashboardError::DataUnavailable {
        source_locator: source.to_string(),
        reason: format!("{e:#}"),
    })
}

fn load_path(path: &Path) -> Result<SalesTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(file)
}

fn load_url(url: &str) -> Result<SalesTable> {
    log::info!("Fetching dataset from {url}");
    let response = reqwest::blocking::Client::new()
        .get(url)
        .send()
        .context("sending HTTP request")?;

    let status = response.status();
    if !status.is_success() {
        bail!("HTTP request failed with status {status}");
    }

    let body = response.bytes().context("reading HTTP response body")?;
    read_csv(&body[..])
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One raw CSV row. Columns are addressed by header name, so extra columns in
/// the file (Date, GDP, City, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Recession")]
    recession: u8,
    #[serde(rename = "Vehicle_Type")]
    vehicle_type: String,
    #[serde(rename = "Automobile_Sales")]
    automobile_sales: Option<f64>,
    #[serde(rename = "Advertising_Expenditure")]
    advertising_expenditure: Option<f64>,
    #[serde(rename = "Unemployment_Rate", alias = "unemployment_rate")]
    unemployment_rate: Option<f64>,
}

impl RawRecord {
    fn into_record(self) -> Result<SalesRecord> {
        let month: Month = self.month.parse().map_err(anyhow::Error::msg)?;
        let recession = match self.recession {
            0 => false,
            1 => true,
            other => bail!("Recession flag must be 0 or 1, got {other}"),
        };
        let vehicle_type = self.vehicle_type.trim().to_string();
        if vehicle_type.is_empty() {
            bail!("empty Vehicle_Type");
        }

        Ok(SalesRecord {
            year: self.year,
            month,
            recession,
            vehicle_type,
            // Empty cells stay visible as NaN through every reduction.
            automobile_sales: self.automobile_sales.unwrap_or(f64::NAN),
            advertising_expenditure: self.advertising_expenditure.unwrap_or(f64::NAN),
            unemployment_rate: self.unemployment_rate.unwrap_or(f64::NAN),
        })
    }
}

/// Parse the dataset from any CSV reader with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<SalesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    if records.is_empty() {
        bail!("dataset contains no rows");
    }

    let table = SalesTable::new(records);
    if let Some((first, last)) = table.year_span() {
        log::info!(
            "Loaded {} sales rows covering {first}-{last}, vehicle types {:?}",
            table.len(),
            table.vehicle_types()
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Year,Month,Recession,Consumer_Confidence,Advertising_Expenditure,GDP,unemployment_rate,Automobile_Sales,Vehicle_Type,City";

    fn sample_csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let text = sample_csv(&[
            "1/31/1980,1980,Jan,1,108.24,1558,60.223,5.4,456,Supperminicar,Georgia",
            "2/29/1980,1980,Feb,1,98.75,3048,45.986,4.8,555.9,Smallfamiliycar,New York",
        ]);
        let table = read_csv(text.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.year, 1980);
        assert_eq!(first.month, Month::Jan);
        assert!(first.recession);
        assert_eq!(first.vehicle_type, "Supperminicar");
        assert_eq!(first.advertising_expenditure, 1558.0);
        assert_eq!(first.unemployment_rate, 5.4);
        assert_eq!(table.records()[1].automobile_sales, 555.9);
    }

    #[test]
    fn empty_numeric_cells_load_as_nan() {
        let text = sample_csv(&["1/31/1980,1980,Jan,0,108.24,,60.223,5.4,,Sports,Georgia"]);
        let table = read_csv(text.as_bytes()).unwrap();

        let row = &table.records()[0];
        assert!(row.automobile_sales.is_nan());
        assert!(row.advertising_expenditure.is_nan());
        assert!(!row.recession);
    }

    #[test]
    fn rejects_bad_flags_and_months() {
        let bad_flag =
            sample_csv(&["1/31/1980,1980,Jan,2,108.24,1558,60.223,5.4,456,Sports,Georgia"]);
        let err = read_csv(bad_flag.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Recession flag"));

        let bad_month =
            sample_csv(&["1/31/1980,1980,Smarch,0,108.24,1558,60.223,5.4,456,Sports,Georgia"]);
        assert!(read_csv(bad_month.as_bytes()).is_err());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(read_csv(HEADER.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let source = Source::Path("definitely/not/here.csv".into());
        match load(&source) {
            Err(DashboardError::DataUnavailable { source_locator, .. }) => {
                assert_eq!(source_locator, "definitely/not/here.csv");
            }
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }
}
