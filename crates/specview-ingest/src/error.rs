//! Error types for catalog ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a product catalog.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Catalog file not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the catalog file.
    #[error("failed to read catalog {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record could not be decoded.
    #[error("failed to parse record {record} of {path}: {source}")]
    CsvParse {
        path: PathBuf,
        record: usize,
        #[source]
        source: csv::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
