//! Error types for TSV file operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing TSV files
#[derive(Error, Debug)]
pub enum TsvError {
    /// Input file does not exist
    #[error("TSV file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read input file
    #[error("Failed to read TSV file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write TSV file: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for TSV operations
pub type TsvResult<T> = Result<T, TsvError>;
