//! Tab-separated row files
//!
//! Reading: the first non-blank line is the header, blank lines are skipped,
//! short lines are padded with empty values and extra values are dropped.
//! Every value is read as text.
//!
//! Writing: a header line plus one line per row in the given column order,
//! with a trailing newline.

mod error;

pub use error::{TsvError, TsvResult};

use std::path::Path;

use tracing::info;

use crate::models::{FieldValue, Row};

/// Parse TSV text into rows
pub fn parse_tsv(content: &str) -> Vec<Row> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header.split('\t').collect();

    lines
        .map(|line| {
            let mut values = line.split('\t');
            headers
                .iter()
                .map(|name| (*name, FieldValue::from(values.next().unwrap_or_default())))
                .collect::<Row>()
        })
        .collect()
}

/// Read rows from a TSV file
pub fn read_tsv(path: impl AsRef<Path>) -> TsvResult<Vec<Row>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TsvError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| TsvError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_tsv(&content);
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Format rows as TSV text in column order; missing values are empty
pub fn format_tsv(columns: &[String], rows: &[Row]) -> String {
    let mut out = columns.join("\t");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

/// Write rows to a TSV file, creating parent directories
pub fn write_tsv(path: impl AsRef<Path>, columns: &[String], rows: &[Row]) -> TsvResult<()> {
    let path = path.as_ref();
    let write_error = |source: std::io::Error| TsvError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, format_tsv(columns, rows)).map_err(write_error)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
