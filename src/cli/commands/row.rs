//! Row command implementation
//!
//! Reads extracted rows as JSON (one object or an array of objects),
//! normalizes them and renders each one for its sheet.

use crate::cli::commands::load_input;
use crate::cli::error::CliError;
use crate::cli::output::{RowOutput, format_rows};
use crate::mapping::MappingTables;
use crate::models::Row;
use crate::normalize::RowNormalizer;
use crate::pipeline::PipelineConfig;
use crate::render::RowRenderer;
use crate::schema::{Schema, SchemaKind};

/// Parse one row object or an array of row objects
pub fn parse_rows(content: &str) -> Result<Vec<Row>, CliError> {
    if content.trim_start().starts_with('[') {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(vec![serde_json::from_str(content)?])
    }
}

/// Normalize and render rows
pub fn process_rows(
    rows: &[Row],
    kind: SchemaKind,
    schema: &Schema,
    tables: &MappingTables,
    config: &PipelineConfig,
    country: Option<&str>,
) -> Vec<RowOutput> {
    let normalizer = RowNormalizer::for_kind(kind, tables);
    let mut renderer = RowRenderer::new(schema, kind).with_profiles(config.profiles());
    if let Some(country) = country {
        renderer = renderer.with_country(country);
    }

    normalizer
        .normalize_all(rows)
        .into_iter()
        .map(|normalized| RowOutput {
            rendered: renderer.render(&normalized.row),
            normalized: normalized.row,
            confidence: normalized.confidence,
        })
        .collect()
}

/// Handle the row command
pub fn handle_row(
    config: &PipelineConfig,
    kind: SchemaKind,
    input: &str,
    country: Option<&str>,
    pretty: bool,
) -> Result<(), CliError> {
    let content = load_input(input)?;
    let rows = parse_rows(&content)?;
    if rows.is_empty() {
        return Err(CliError::InvalidArgument("no rows in input".to_string()));
    }

    let schema = config.load_schema(kind)?;
    let tables = config.load_tables()?;
    let outputs = process_rows(&rows, kind, &schema, &tables, config, country);

    println!("{}", format_rows(&outputs, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SynonymMapping;
    use crate::models::FieldValue;
    use crate::schema::{Column, ColumnType};

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows(r#"{"Country": "Sverige", "Price": 150}"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Price"), Some(&FieldValue::Integer(150)));

        let rows = parse_rows(r#"[{"Country": "Sweden"}, {"Country": "Denmark"}]"#).unwrap();
        assert_eq!(rows.len(), 2);

        assert!(matches!(parse_rows("not json"), Err(CliError::RowParseError(_))));
    }

    #[test]
    fn test_process_transaction_row() {
        let names = ["Country", "Property type", "Price, MSEK", "Area, m2", "Price, SEK/m2"];
        let columns = names
            .iter()
            .map(|name| Column::new(*name, ColumnType::String))
            .collect();
        let schema = Schema::default().with_variant("sweden", columns);
        let tables = MappingTables::new(
            SynonymMapping::new().with_type("Logistics", ["lager", "warehouse"]),
        );
        let rows = parse_rows(
            r#"{"Country": "Sverige", "Property type": "lager", "Price": 150, "Area, m2": "10 000"}"#,
        )
        .unwrap();

        let outputs = process_rows(
            &rows,
            SchemaKind::Transactions,
            &schema,
            &tables,
            &PipelineConfig::default(),
            None,
        );
        let output = &outputs[0];
        assert_eq!(output.normalized.get("Country"), Some(&"Sweden".into()));
        assert_eq!(output.rendered.get("Property type"), Some("Logistics"));
        assert_eq!(output.rendered.get("Price, MSEK"), Some("150"));
        assert_eq!(output.rendered.get("Price, SEK/m2"), Some("15,000"));
        assert!(output.confidence.contains_key("Country_confidence"));
    }
}
