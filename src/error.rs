use std::path::PathBuf;
use thiserror::Error;

use crate::models::Period;
use crate::processors::ReportMode;

pub type Result<T> = std::result::Result<T, WeatherError>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No known date column found (columns: {columns:?})")]
    NoDateColumn { columns: Vec<String> },

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Unparsable file {path}: {reason}")]
    UnparsableFile { path: PathBuf, reason: String },

    #[error("no data available for {period}")]
    NoDataForQuery { period: Period },

    #[error("Not a readable directory: {0}")]
    InvalidDirectory(PathBuf),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("{0:?} report requires a month")]
    MonthRequired(ReportMode),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
