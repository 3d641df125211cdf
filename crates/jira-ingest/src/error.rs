//! Error types for record ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the issue export. All of them abort the run.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parameter Errors ===
    #[error("chunk size must be at least 1 (got {chunk_size})")]
    InvalidChunkSize { chunk_size: usize },

    #[error("delimiter '{delimiter}' is not a single-byte ASCII character")]
    InvalidDelimiter { delimiter: char },

    // === CSV Parsing Errors ===
    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header names the same column twice.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },

    /// A data row could not be decoded.
    #[error("malformed row at line {line} of {path}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Any other CSV reader failure.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
