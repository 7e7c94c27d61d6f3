//! Render command implementation

use std::path::Path;

use crate::cli::error::CliError;
use crate::pipeline::{PipelineConfig, render_file};
use crate::schema::SchemaKind;

/// Handle the render command. Without an output file the block goes to
/// stdout, ready to paste.
pub fn handle_render(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
    output: Option<&Path>,
    country: Option<&str>,
    verbose: bool,
) -> Result<(), CliError> {
    let (block, report) = render_file(config, kind, input, output, country)?;
    if verbose {
        report.print_summary();
    }
    match output {
        Some(path) => println!("Wrote rendered TSV: {}", path.display()),
        None => println!("{block}"),
    }
    Ok(())
}
