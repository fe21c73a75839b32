//! Errors raised while loading a rate table

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate a rate table
#[derive(Error, Debug)]
pub enum RateTableError {
    /// A CSV file could not be opened or parsed
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A field could not be parsed as the expected type
    #[error("{file} line {line}: invalid {field} value {value:?}")]
    Parse {
        file: &'static str,
        line: u64,
        field: &'static str,
        value: String,
    },

    /// A required statutory value is missing from statutory_values.csv
    #[error("missing statutory value: {0}")]
    Missing(&'static str),

    /// The loaded table is structurally unusable
    #[error("invalid rate table: {0}")]
    Invalid(String),
}
