//! Validate command implementation

use std::path::Path;

use crate::cli::error::CliError;
use crate::cli::output::{format_validation, to_json};
use crate::pipeline::{PipelineConfig, validate_file};
use crate::schema::SchemaKind;

/// Handle the validate command. Fails when any row has a problem.
pub fn handle_validate(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
    json: bool,
) -> Result<(), CliError> {
    let report = validate_file(config, kind, input)?;

    if json {
        println!("{}", to_json(&report, true)?);
    } else {
        print!("{}", format_validation(&report));
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(report.errors.len()))
    }
}
