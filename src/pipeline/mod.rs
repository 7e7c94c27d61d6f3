//! File pipelines
//!
//! Each pipeline reads a TSV file, runs one library operation over every row
//! and reports what it did:
//!
//! - `normalize_file`: normalize rows and write them in schema column order
//! - `validate_file`: check rows against the schema columns
//! - `render_file`: normalize, then render a paste-ready TSV block
//! - `scaffold_file`: write a header and one empty row

pub mod config;
pub mod error;

pub use config::{CONFIG_FILE_NAME, PipelineConfig};
pub use error::{PipelineError, PipelineResult};

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{FieldValue, Row};
use crate::normalize::{RowNormalizer, parse_number};
use crate::render::{RowRenderer, rows_to_tsv};
use crate::schema::SchemaKind;
use crate::tsv::{read_tsv, write_tsv};
use crate::validation::validate_rows;

/// Field holding a transaction price in millions
const PRICE_FIELD: &str = "Price";

/// Outcome of a file pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Operation name (`normalize`, `validate`, `render`, `scaffold`)
    pub operation: String,
    /// Sheet kind
    pub kind: SchemaKind,
    /// Input file, absent for scaffolding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// File written, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Rows processed
    pub rows: usize,
    /// Validation messages
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Wall-clock duration
    pub duration_ms: u64,
}

impl PipelineReport {
    /// Empty report for an operation
    pub fn new(operation: &str, kind: SchemaKind) -> Self {
        Self {
            operation: operation.to_string(),
            kind,
            input: None,
            output: None,
            rows: 0,
            errors: Vec::new(),
            duration_ms: 0,
        }
    }

    fn finish(mut self, start: Instant) -> Self {
        self.duration_ms = start.elapsed().as_millis() as u64;
        self
    }

    /// Check if the run found no problems
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Print a summary to stderr
    pub fn print_summary(&self) {
        eprintln!();
        eprintln!("=== {} ({}) ===", self.operation, self.kind);
        if let Some(input) = &self.input {
            eprintln!("Input: {}", input.display());
        }
        if let Some(output) = &self.output {
            eprintln!("Output: {}", output.display());
        }
        eprintln!("Rows: {}", self.rows);
        eprintln!("Duration: {}ms", self.duration_ms);
        if self.is_success() {
            eprintln!("Status: OK");
        } else {
            eprintln!("Status: {} problem(s)", self.errors.len());
            for error in &self.errors {
                eprintln!("  - {error}");
            }
        }
    }
}

/// Read input rows, treating a header-only file as an error
fn read_rows(input: &Path) -> PipelineResult<Vec<Row>> {
    let rows = read_tsv(input)?;
    if rows.is_empty() {
        warn!("No data rows found in {}", input.display());
        return Err(PipelineError::NoRows(input.to_path_buf()));
    }
    Ok(rows)
}

/// Normalize a TSV file and write the rows in schema column order.
///
/// Fields that are not schema columns are dropped from the output.
pub fn normalize_file(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
    output: &Path,
) -> PipelineResult<PipelineReport> {
    let start = Instant::now();
    let schema = config.load_schema(kind)?;
    let tables = config.load_tables()?;
    let rows = read_rows(input)?;

    let normalizer = RowNormalizer::for_kind(kind, &tables);
    let normalized: Vec<Row> = normalizer
        .normalize_all(&rows)
        .into_iter()
        .map(|normalized| normalized.row)
        .collect();

    write_tsv(output, &schema.column_names(), &normalized)?;
    info!(
        "Normalized {} {} rows: {} -> {}",
        normalized.len(),
        kind,
        input.display(),
        output.display()
    );

    let mut report = PipelineReport::new("normalize", kind);
    report.input = Some(input.to_path_buf());
    report.output = Some(output.to_path_buf());
    report.rows = normalized.len();
    Ok(report.finish(start))
}

/// Validate a TSV file against the schema columns
pub fn validate_file(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
) -> PipelineResult<PipelineReport> {
    let start = Instant::now();
    let schema = config.load_schema(kind)?;
    let rows = read_rows(input)?;

    let validation = validate_rows(&schema.columns, &rows);
    if validation.is_valid() {
        info!("{}: {} rows valid", input.display(), validation.rows_checked);
    } else {
        warn!(
            "{}: {} of {} rows invalid",
            input.display(),
            validation.invalid_rows(),
            validation.rows_checked
        );
    }

    let mut report = PipelineReport::new("validate", kind);
    report.input = Some(input.to_path_buf());
    report.rows = validation.rows_checked;
    report.errors = validation.errors;
    Ok(report.finish(start))
}

/// TSV cells are text; the renderer needs a numeric price to derive the
/// per-area column.
fn numeric_price(row: &mut Row) {
    let Some(value) = row.get_mut(PRICE_FIELD) else {
        return;
    };
    if !matches!(value, FieldValue::Text(_)) || value.is_blank() {
        return;
    }
    if let (Some(number), _) = parse_number(value, false).into_parts() {
        *value = number.into();
    }
}

/// Normalize and render a TSV file into a paste-ready block.
///
/// Returns the block (header plus one line per row, no trailing newline)
/// and writes it to `output` when given. `country` forces the transaction
/// layout; otherwise the first row's country decides it.
pub fn render_file(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &Path,
    output: Option<&Path>,
    country: Option<&str>,
) -> PipelineResult<(String, PipelineReport)> {
    let start = Instant::now();
    let schema = config.load_schema(kind)?;
    let tables = config.load_tables()?;
    let rows = read_rows(input)?;

    let normalizer = RowNormalizer::for_kind(kind, &tables);
    let normalized: Vec<Row> = normalizer
        .normalize_all(&rows)
        .into_iter()
        .map(|normalized| {
            let mut row = normalized.row;
            if kind == SchemaKind::Transactions {
                numeric_price(&mut row);
            }
            row
        })
        .collect();

    let mut renderer = RowRenderer::new(&schema, kind).with_profiles(config.profiles());
    if let Some(country) = country {
        renderer = renderer.with_country(country);
    }
    let block = rows_to_tsv(&normalized, &renderer);

    let mut report = PipelineReport::new("render", kind);
    report.input = Some(input.to_path_buf());
    report.rows = normalized.len();

    if let Some(output) = output {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PipelineError::io_with_path(parent, "failed to create output directory", e)
            })?;
        }
        std::fs::write(output, format!("{block}\n"))
            .map_err(|e| PipelineError::io_with_path(output, "failed to write output", e))?;
        report.output = Some(output.to_path_buf());
    }
    info!("Rendered {} {} rows from {}", report.rows, kind, input.display());

    Ok((block, report.finish(start)))
}

/// Write an empty sheet: the schema header and one row of empty cells
pub fn scaffold_file(
    config: &PipelineConfig,
    kind: SchemaKind,
    output: &Path,
) -> PipelineResult<PipelineReport> {
    let start = Instant::now();
    let schema = config.load_schema(kind)?;
    let columns = schema.column_names();
    let empty: Row = columns
        .iter()
        .map(|name| (name.as_str(), FieldValue::from("")))
        .collect();

    write_tsv(output, &columns, &[empty])?;
    info!("Wrote {} scaffold: {}", kind, output.display());

    let mut report = PipelineReport::new("scaffold", kind);
    report.output = Some(output.to_path_buf());
    report.rows = 1;
    Ok(report.finish(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_price() {
        let mut row = Row::new();
        row.insert(PRICE_FIELD, FieldValue::from("150"));
        numeric_price(&mut row);
        assert_eq!(row.get(PRICE_FIELD), Some(&FieldValue::Integer(150)));

        let mut row = Row::new();
        row.insert(PRICE_FIELD, FieldValue::from("12.5"));
        numeric_price(&mut row);
        assert_eq!(row.get(PRICE_FIELD), Some(&FieldValue::Float(12.5)));

        let mut row = Row::new();
        row.insert(PRICE_FIELD, FieldValue::from("n/a"));
        numeric_price(&mut row);
        assert_eq!(row.get(PRICE_FIELD), Some(&FieldValue::from("n/a")));
    }

    #[test]
    fn test_report_success() {
        let mut report = PipelineReport::new("validate", SchemaKind::Inbound);
        assert!(report.is_success());
        report.errors.push("Row 1: Missing required field: Country".to_string());
        assert!(!report.is_success());
    }
}
