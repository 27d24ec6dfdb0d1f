use std::path::PathBuf;
use thiserror::Error;

/// Column of a transaction row, used to point at the offending field when a
/// row cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    SubscriberId,
    Revenue,
    Date,
}

impl std::fmt::Display for RowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RowField::SubscriberId => "subscriber id",
            RowField::Revenue => "revenue",
            RowField::Date => "date",
        };
        f.write_str(name)
    }
}

/// All errors produced by the subscription report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A date string did not match the `MM/DD/YYYY` format.
    #[error("Invalid date format: {0}")]
    DateParse(String),

    /// A data row was missing a field or held a value that could not be parsed.
    #[error("Malformed row at line {line}: invalid {field} {value:?}")]
    MalformedRow {
        line: u64,
        field: RowField,
        value: String,
    },

    /// The CSV reader failed on the underlying input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A report could not be serialised to JSON.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
