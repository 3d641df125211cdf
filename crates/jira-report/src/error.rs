//! Error types for report output.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while writing the annotated artifact. All of them are fatal.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending a batch failed; carries the batch position.
    #[error("failed to write batch {batch_index} (rows from {first_row}) to {path}: {source}")]
    WriteBatch {
        path: PathBuf,
        batch_index: usize,
        first_row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
