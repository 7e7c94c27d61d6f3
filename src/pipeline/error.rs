//! Error types for file pipelines
//!
//! Errors chain their causes for debugging and offer a short user-facing
//! message with a hint for CLI output.

use std::path::PathBuf;
use thiserror::Error;

use crate::mapping::MappingError;
use crate::schema::SchemaError;
use crate::tsv::TsvError;

/// Errors that can occur while running a file pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Pipeline configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file does not exist
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Failed to parse a TOML configuration file
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    /// Input file has a header but no data rows
    #[error("No data rows found in TSV: {0}")]
    NoRows(PathBuf),

    /// IO error with path context
    #[error("IO error with {path}: {message}")]
    IoErrorWithPath {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema loading failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Mapping table loading failed
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// TSV reading or writing failed
    #[error(transparent)]
    Tsv(#[from] TsvError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create an IO error with path context
    pub fn io_with_path(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoErrorWithPath {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::ConfigError(msg) => {
                format!("Configuration error: {msg}\n\nHint: Check dealsheet.toml.")
            }
            PipelineError::Schema(SchemaError::NotFound(path)) => {
                format!(
                    "Schema not found: {}\n\nHint: Run from the project root or set the schema path in dealsheet.toml.",
                    path.display()
                )
            }
            PipelineError::Mapping(MappingError::NotFound(path)) => {
                format!(
                    "Mapping file not found: {}\n\nHint: Run from the project root or set property_type_map in dealsheet.toml.",
                    path.display()
                )
            }
            PipelineError::NoRows(path) => {
                format!(
                    "No data rows found in TSV: {}\n\nHint: The first non-empty line is the header; add at least one row below it.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}
