//! Normalize command implementation

use std::path::Path;

use crate::cli::error::CliError;
use crate::pipeline::{PipelineConfig, normalize_file};
use crate::schema::SchemaKind;

/// Handle the normalize command
pub fn handle_normalize(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), CliError> {
    let report = normalize_file(config, kind, input, output)?;
    if verbose {
        report.print_summary();
    }
    println!("Wrote normalized TSV: {}", output.display());
    Ok(())
}
