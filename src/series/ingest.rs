// Series ingestion module
// Reads seismometer CSV exports and extracts the time/velocity columns

use std::io::Read;

use thiserror::Error;

use crate::profiles::DatasetProfile;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column in header: {column}")]
    MissingColumn { column: String },

    #[error("Row {row}: column {column} is not a number: {value:?}")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: column {column} is not finite")]
    NonFinite { row: usize, column: String },

    #[error("No data rows in input")]
    EmptyInput,
}

#[derive(Debug, Clone)]
pub struct SeriesData {
    /// Relative timestamps in seconds, in file order
    pub time: Vec<f64>,

    /// Velocity channel in instrument units, parallel to `time`
    pub velocity: Vec<f64>,
}

impl SeriesData {
    /// Number of samples in the series
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time covered by the series in seconds (last minus first timestamp)
    pub fn span_secs(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Parse a seismometer CSV export into a time/velocity series
/// Column names come from the dataset profile; row order is preserved
pub fn parse_series<R: Read>(
    reader: R,
    profile: &DatasetProfile,
) -> Result<SeriesData, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let time_idx = find_column(&headers, &profile.time_column)?;
    let velocity_idx = find_column(&headers, &profile.velocity_column)?;

    let mut time = Vec::new();
    let mut velocity = Vec::new();

    // Data rows are numbered from 1 for error messages
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 1;

        time.push(parse_field(&record, time_idx, &profile.time_column, row)?);
        velocity.push(parse_field(
            &record,
            velocity_idx,
            &profile.velocity_column,
            row,
        )?);
    }

    if time.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    Ok(SeriesData { time, velocity })
}

/// Locate a named column in the header row
/// Header cells are compared after trimming surrounding whitespace
fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| IngestError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<f64, IngestError> {
    let raw = record.get(idx).unwrap_or("").trim();

    let value: f64 = raw.parse().map_err(|_| IngestError::Parse {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(IngestError::NonFinite {
            row,
            column: column.to_string(),
        });
    }

    Ok(value)
}
