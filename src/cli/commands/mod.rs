//! Command handlers

pub mod normalize;
pub mod render;
pub mod row;
pub mod scaffold;
pub mod validate;

use std::io::Read;
use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::schema::SchemaKind;

/// Load input content from file or stdin (`-`)
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Default scaffold file for a sheet kind
pub fn default_scaffold_path(kind: SchemaKind) -> PathBuf {
    match kind {
        SchemaKind::Inbound => PathBuf::from("output/inbound_rows.tsv"),
        SchemaKind::Transactions => PathBuf::from("output/transaction_rows.tsv"),
    }
}
