//! Output formatting for CLI

use serde::Serialize;

use crate::cli::error::CliError;
use crate::models::{ConfidenceMap, Row};
use crate::pipeline::PipelineReport;
use crate::render::RenderedRow;

/// Result of running one row through normalization and rendering
#[derive(Debug, Clone, Serialize)]
pub struct RowOutput {
    pub normalized: Row,
    pub confidence: ConfidenceMap,
    pub rendered: RenderedRow,
}

/// Serialize a value as JSON, pretty-printed or on one line
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Format row results, a single object for one row and an array otherwise
pub fn format_rows(outputs: &[RowOutput], pretty: bool) -> Result<String, CliError> {
    match outputs {
        [single] => to_json(single, pretty),
        _ => to_json(&outputs, pretty),
    }
}

/// Format a validation report in compact mode
pub fn format_validation(report: &PipelineReport) -> String {
    let mut output = String::new();

    if report.is_success() {
        output.push_str(&format!("All {} row(s) valid\n", report.rows));
        return output;
    }

    output.push_str(&format!(
        "{} problem(s) in {} row(s):\n",
        report.errors.len(),
        report.rows
    ));
    for error in &report.errors {
        output.push_str(&format!("  - {}\n", error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    #[test]
    fn test_format_rows_single_is_object() {
        let output = RowOutput {
            normalized: Row::new(),
            confidence: ConfidenceMap::new(),
            rendered: RenderedRow::default(),
        };
        let json = format_rows(&[output.clone()], false).unwrap();
        assert!(json.starts_with('{'));
        let json = format_rows(&[output.clone(), output], false).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_format_validation() {
        let mut report = PipelineReport::new("validate", SchemaKind::Inbound);
        report.rows = 2;
        report
            .errors
            .push("Row 2: Missing required field: Country".to_string());
        let text = format_validation(&report);
        assert!(text.starts_with("1 problem(s) in 2 row(s)"));
        assert!(text.contains("Row 2: Missing required field: Country"));
    }
}
