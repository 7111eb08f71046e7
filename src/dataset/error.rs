use crate::types::error::StationError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No station metadata for: {}", .0.join(", "))]
    UnmatchedStations(Vec<String>),

    #[error("Dataset has no Hémisphère/Latitude columns and no station metadata was given")]
    MissingStationMetadata,

    #[error("Row {row}: '{label}' is not a recognised month")]
    UnknownMonth { row: usize, label: String },

    #[error("Row {row}: missing or invalid value in column '{column}'")]
    InvalidValue { row: usize, column: String },

    #[error("Row {row}: invalid station information")]
    InvalidStation {
        row: usize,
        #[source]
        source: StationError,
    },

    #[error("No station-year group has all twelve months")]
    NoCompleteGroups,

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to create CSV file '{0}'")]
    CsvCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV data")]
    CsvWrite(#[source] PolarsError),
}
