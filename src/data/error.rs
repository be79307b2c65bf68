use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading and cleaning a sales table.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source table lacks one of the required columns.
    #[error("dataset is missing required column '{column}'")]
    Schema { column: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON")]
    Json(#[from] serde_json::Error),

    #[error("reading parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow data")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("{0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
