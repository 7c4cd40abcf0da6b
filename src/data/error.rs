use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the data layer.
///
/// None of these are fatal: the viewer shows the message and falls back to an
/// empty state. A filter that matches nothing is *not* an error.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("data file {path} is unavailable: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("invalid elevation range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid elevation buckets: {0}")]
    InvalidBuckets(String),

    #[error("failed to read CSV header: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
