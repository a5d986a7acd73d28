use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Coarse classification of a [`ScreenerError`], used by the UI to decide
/// how to word the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file unreadable, malformed, or missing expected columns.
    DataAccess,
    /// A filter or weight field could not be turned into a number.
    InputParse,
}

#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("row {row}: column '{column}' value '{value}' is not a number")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("{field} for {metric}: '{value}' is not a number")]
    InvalidNumber {
        metric: String,
        field: &'static str,
        value: String,
    },

    #[error("weight for {metric} must not be negative (got {value})")]
    NegativeWeight { metric: String, value: f64 },
}

impl ScreenerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScreenerError::InvalidNumber { .. } | ScreenerError::NegativeWeight { .. } => {
                ErrorKind::InputParse
            }
            _ => ErrorKind::DataAccess,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
