//! Error types for CLI commands

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Invalid row JSON: {0}")]
    RowParseError(#[from] serde_json::Error),

    #[error("Validation failed: {0} problem(s)")]
    ValidationFailed(usize),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Pipeline(err) => err.user_message(),
            CliError::RowParseError(err) => format!(
                "Invalid row JSON: {err}\n\nHint: Pass one JSON object per row, or an array of objects."
            ),
            _ => self.to_string(),
        }
    }
}
