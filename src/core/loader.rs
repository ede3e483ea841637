//! Tabular input parsing.
//!
//! The source table must carry the `RegionName`, `RegionCode`, `Time` and
//! `NumValue` columns; any other column is ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::{RawRecord, TimeValue};
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "RegionName")]
    region_name: String,
    #[serde(rename = "RegionCode")]
    region_code: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "NumValue")]
    num_value: String,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            region_name: row.region_name.trim().to_owned(),
            region_code2: row.region_code.trim().to_owned(),
            time: TimeValue::from_cell(&row.time),
            num_value: parse_num_value(&row.num_value),
        }
    }
}

fn parse_num_value(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reads raw records from a CSV file on disk.
pub fn read_csv_path(path: impl AsRef<Path>) -> DashboardResult<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv_reader(file)?;
    debug!(path = %path.display(), rows = records.len(), "read dataset file");
    Ok(records)
}

/// Reads raw records from any CSV byte stream with a header row.
pub fn read_csv_reader<R: Read>(reader: R) -> DashboardResult<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row.map_err(|err| DashboardError::Csv(err.to_string()))?;
        records.push(RawRecord::from(row));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_value_cells_parse_or_become_absent() {
        assert_eq!(parse_num_value(" 12.5 "), Some(12.5));
        assert_eq!(parse_num_value(""), None);
        assert_eq!(parse_num_value("n/a"), None);
        assert_eq!(parse_num_value("inf"), None);
    }
}
