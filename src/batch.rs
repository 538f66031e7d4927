//! Batch conversion of CSV point lists
//!
//! Each input row carries either `latitude,longitude` or an `mgrs` reference,
//! plus an optional `name`. Rows convert independently and in parallel; a bad
//! row is reported in its own `error` column and never aborts the batch.

use std::io::{self, Read};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::{to_mgrs, GeographicCoordinate, Mgrs};

/// One input row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchRow {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub mgrs: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl BatchRow {
    /// Recovers what it can from a record that failed to deserialize
    fn from_raw(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        let cell = |column: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
        };

        Self {
            latitude: cell("latitude").and_then(|v| v.parse().ok()),
            longitude: cell("longitude").and_then(|v| v.parse().ok()),
            mgrs: cell("mgrs").map(str::to_string),
            name: cell("name").map(str::to_string),
        }
    }
}

/// One converted row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub mgrs: Option<String>,
    pub name: Option<String>,
    pub error: Option<String>,
}

impl BatchResult {
    fn failed(row: &BatchRow, error: impl ToString) -> Self {
        Self {
            latitude: row.latitude,
            longitude: row.longitude,
            mgrs: row.mgrs.clone(),
            name: row.name.clone(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Results of a batch with summary statistics
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results: Vec<BatchResult>,
    pub execution_time_ms: f64,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Renders the report as CSV preceded by `#` statistics lines
    pub fn to_csv(&self) -> Result<String> {
        let mut output = String::with_capacity(self.results.len() * 48 + 160);

        output.push_str("# Statistics\n");
        output.push_str(&format!("# Total points: {}\n", self.total()));
        output.push_str(&format!("# Successful: {}\n", self.successful()));
        output.push_str(&format!("# Failed: {}\n", self.failed()));
        output.push_str(&format!("# Execution time: {:.2} ms\n", self.execution_time_ms));

        let has_names = self.results.iter().any(|r| r.name.is_some());
        let mut writer = csv::Writer::from_writer(Vec::with_capacity(self.results.len() * 48));

        if has_names {
            writer.write_record(["latitude", "longitude", "mgrs", "name", "error"])?;
        } else {
            writer.write_record(["latitude", "longitude", "mgrs", "error"])?;
        }

        for result in &self.results {
            let latitude = result.latitude.map(|v| v.to_string()).unwrap_or_default();
            let longitude = result.longitude.map(|v| v.to_string()).unwrap_or_default();
            let mgrs = result.mgrs.as_deref().unwrap_or("");
            let error = result.error.as_deref().unwrap_or("");

            if has_names {
                let name = result.name.as_deref().unwrap_or("");
                writer.write_record([latitude.as_str(), longitude.as_str(), mgrs, name, error])?;
            } else {
                writer.write_record([latitude.as_str(), longitude.as_str(), mgrs, error])?;
            }
        }

        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        output.push_str(&body);

        Ok(output)
    }
}

/// Converts a single row, preferring the MGRS column when both are present
pub fn convert_row(row: &BatchRow, precision: u8) -> BatchResult {
    if let Some(reference) = row.mgrs.as_deref().filter(|s| !s.trim().is_empty()) {
        let converted = reference
            .parse::<Mgrs>()
            .and_then(|mgrs| Ok((mgrs.to_string(), mgrs.to_coordinate()?)));

        return match converted {
            Ok((canonical, coord)) => BatchResult {
                latitude: Some(coord.latitude),
                longitude: Some(coord.longitude),
                mgrs: Some(canonical),
                name: row.name.clone(),
                error: None,
            },
            Err(e) => BatchResult::failed(row, e),
        };
    }

    match (row.latitude, row.longitude) {
        (Some(latitude), Some(longitude)) => {
            match to_mgrs(GeographicCoordinate::new(latitude, longitude), precision) {
                Ok(mgrs) => BatchResult {
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                    mgrs: Some(mgrs),
                    name: row.name.clone(),
                    error: None,
                },
                Err(e) => BatchResult::failed(row, e),
            }
        }
        _ => BatchResult::failed(row, "row needs latitude and longitude, or mgrs"),
    }
}

/// Converts rows in parallel, preserving input order
pub fn convert_rows(rows: &[BatchRow], precision: u8) -> Vec<BatchResult> {
    rows.par_iter()
        .map(|row| convert_row(row, precision))
        .collect()
}

/// Reads a CSV point list and converts every row
pub fn convert_csv<R: Read>(reader: R, precision: u8) -> Result<BatchReport> {
    let start = Instant::now();

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    // Keep undecodable rows in place so output lines up with input
    let mut parsed: Vec<std::result::Result<BatchRow, (BatchRow, String)>> = Vec::new();
    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => {
                parsed.push(Err((BatchRow::default(), format!("Invalid row: {}", e))));
                continue;
            }
        };

        match record.deserialize::<BatchRow>(Some(&headers)) {
            Ok(row) => parsed.push(Ok(row)),
            Err(e) => {
                let raw: Vec<&str> = record.iter().collect();
                parsed.push(Err((
                    BatchRow::from_raw(&headers, &record),
                    format!("Invalid row [{}]: {}", raw.join(","), e),
                )));
            }
        }
    }

    let results: Vec<BatchResult> = parsed
        .par_iter()
        .map(|entry| match entry {
            Ok(row) => convert_row(row, precision),
            Err((row, msg)) => BatchResult::failed(row, msg),
        })
        .collect();

    let report = BatchReport {
        results,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    tracing::debug!(
        total = report.total(),
        failed = report.failed(),
        "converted batch in {:.2} ms",
        report.execution_time_ms
    );

    Ok(report)
}
