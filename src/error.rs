//! Error taxonomy for the aggregation pipeline.

use std::path::PathBuf;

use crate::month::MonthLabel;

/// Everything that can stop a month from being aggregated or a series from
/// being assembled. No variant is ever turned into a numeric value.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{path}: file name does not end in a YYYY_MM month label")]
    InvalidFileName { path: PathBuf },

    #[error("{path}: cannot open file: {source}")]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: required column '{column}' not found in header")]
    Schema { path: PathBuf, column: &'static str },

    #[error("{path}: malformed CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: no valid delay rows for '{line}' in {month}")]
    NoDataForLine {
        path: PathBuf,
        month: MonthLabel,
        line: &'static str,
    },

    #[error("month {month} appears twice: {first} and {second}")]
    DuplicateMonth {
        month: MonthLabel,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("no monthly files left to build a series from")]
    NoMonths,
}

pub type Result<T> = std::result::Result<T, ReportError>;
