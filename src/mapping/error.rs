//! Error types for mapping-table loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading mapping tables
#[derive(Error, Debug)]
pub enum MappingError {
    /// Mapping file does not exist
    #[error("Mapping file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read mapping file
    #[error("Failed to read mapping file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse mapping YAML
    #[error("Failed to parse mapping: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Structurally valid YAML that does not describe a usable table
    #[error("Invalid mapping table: {0}")]
    InvalidTable(String),
}

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;
