//! Rendering tests against the shipped schemas

use dealsheet::schema::load_schema;
use dealsheet::{FieldValue, Row, RowRenderer, Schema, SchemaKind, rows_to_tsv};

fn shipped_schema(file: &str) -> Schema {
    let path = format!("{}/config/schemas/{}", env!("CARGO_MANIFEST_DIR"), file);
    load_schema(path).unwrap()
}

fn row(fields: &[(&str, FieldValue)]) -> Row {
    fields.iter().cloned().collect()
}

mod transaction_render_tests {
    use super::*;

    #[test]
    fn test_sweden_price_per_area() {
        let schema = shipped_schema("transactions.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Transactions);
        let input = row(&[
            ("Country", "Sweden".into()),
            ("Price", FieldValue::Integer(150)),
            ("Area, m2", FieldValue::Integer(10_000)),
        ]);

        let rendered = renderer.render(&input);
        assert_eq!(rendered.get("Price, MSEK"), Some("150"));
        assert_eq!(rendered.get("Price, SEK/m2"), Some("15,000"));
        assert_eq!(rendered.get("Area, m2"), Some("10,000"));
        assert_eq!(rendered.columns().next(), Some("Country"));
        assert_eq!(rendered.len(), 24);
    }

    #[test]
    fn test_missing_columns_are_empty() {
        let schema = shipped_schema("transactions.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Transactions);
        let rendered = renderer.render(&row(&[("Country", "Denmark".into())]));
        assert_eq!(rendered.get("Buyer"), Some(""));
        assert_eq!(rendered.get("Price, MDKK"), Some(""));
        assert!(rendered.values().all(|v| v.is_empty() || v == "Denmark"));
    }

    #[test]
    fn test_finland_layout_starts_with_source() {
        let schema = shipped_schema("transactions.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Transactions);
        let input = row(&[
            ("Country", "Finland".into()),
            ("Price", FieldValue::Float(12.5)),
            ("Source", "https://example.com".into()),
        ]);
        let rendered = renderer.render(&input);
        assert_eq!(rendered.columns().next(), Some("Source"));
        assert_eq!(rendered.get("Price, MEUR"), Some("12.50"));
    }

    #[test]
    fn test_unknown_country_uses_sweden_layout() {
        let schema = shipped_schema("transactions.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Transactions);
        let input = row(&[("Country", "Norway".into()), ("Price", FieldValue::Integer(80))]);
        let rendered = renderer.render(&input);
        assert!(rendered.columns().any(|c| c == "Price, MSEK"));
        assert_eq!(rendered.get("Price, MSEK"), Some(""));
    }

    #[test]
    fn test_block_uses_first_row_layout() {
        let schema = shipped_schema("transactions.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Transactions);
        let rows = vec![
            row(&[("Country", "Denmark".into()), ("Price", FieldValue::Integer(50))]),
            row(&[("Country", "Denmark".into()), ("Buyer", "Nordic Invest".into())]),
        ];
        let block = rows_to_tsv(&rows, &renderer);
        let lines: Vec<&str> = block.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Price, MDKK"));
        assert!(lines[1].contains("\t50\t"));
        assert!(lines[2].contains("Nordic Invest"));
    }
}

mod inbound_render_tests {
    use super::*;

    #[test]
    fn test_inbound_derived_columns() {
        let schema = shipped_schema("inbound_purple.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Inbound);
        let input = row(&[
            ("Date received", "2024/01/15".into()),
            ("Country", "Sweden".into()),
            ("Portfolio", FieldValue::Bool(true)),
            ("Leasable area, sqm", FieldValue::Integer(45_000)),
            ("NOI, CCY", FieldValue::Integer(28_500_000)),
            ("Yield", FieldValue::Float(4.5)),
            ("Comments", "Off-market".into()),
        ]);

        let rendered = renderer.render(&input);
        assert_eq!(rendered.get("Week nr."), Some("3"));
        assert_eq!(rendered.get("Portfolio"), Some("Yes"));
        assert_eq!(rendered.get("NOI, CCY"), Some("28,500,000"));
        assert_eq!(rendered.get("NOI, CCY/sqm"), Some("633"));
        assert_eq!(rendered.get("Yield"), Some("4.50"));
        assert_eq!(rendered.get("Comment"), Some("Off-market"));
        assert_eq!(rendered.get("Broker"), Some(""));
        assert_eq!(rendered.len(), schema.columns.len());
    }

    #[test]
    fn test_render_is_repeatable() {
        let schema = shipped_schema("inbound_purple.schema.json");
        let renderer = RowRenderer::new(&schema, SchemaKind::Inbound);
        let input = row(&[
            ("Leasable area, sqm", FieldValue::Integer(1_000)),
            ("Price, CCY", FieldValue::Integer(25_000_000)),
        ]);
        let first = renderer.render(&input);
        let second = renderer.render(&input);
        assert_eq!(first, second);
        assert_eq!(first.get("Price, CCY/sqm"), Some("25,000"));
        assert!(!input.contains_key("Price, CCY/sqm"));
    }
}
