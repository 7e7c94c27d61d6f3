//! Error types for schema loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a schema
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Schema file does not exist
    #[error("Schema not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read schema file
    #[error("Failed to read schema file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse schema JSON
    #[error("Failed to parse schema: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Schema without any column list
    #[error("Schema defines no columns")]
    NoColumns,

    /// Unknown schema kind string
    #[error("Unknown schema kind: {0} (expected inbound or transactions)")]
    UnknownKind(String),
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
