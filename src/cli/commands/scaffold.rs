//! Scaffold command implementation

use std::path::Path;

use crate::cli::error::CliError;
use crate::pipeline::{PipelineConfig, scaffold_file};
use crate::schema::SchemaKind;

/// Handle the scaffold command
pub fn handle_scaffold(
    config: &PipelineConfig,
    kind: SchemaKind,
    output: &Path,
) -> Result<(), CliError> {
    scaffold_file(config, kind, output)?;
    println!("Wrote: {}", output.display());
    Ok(())
}
