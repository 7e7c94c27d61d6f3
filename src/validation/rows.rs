//! Row validation against schema columns
//!
//! Checks required presence, then type shape for non-blank values. All
//! problems of a row are reported; validation never stops at the first one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{FieldValue, Row};
use crate::schema::{Column, ColumnType, DEFAULT_DATE_FORMAT};

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap());

const BOOLEAN_TOKENS: &[&str] = &["true", "false", "yes", "no", "1", "0"];

/// Outcome of validating a set of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowValidationReport {
    /// Number of rows checked
    pub rows_checked: usize,
    /// Messages prefixed with `Row {n}: `, 1-based
    pub errors: Vec<String>,
}

impl RowValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of rows with at least one error
    pub fn invalid_rows(&self) -> usize {
        let mut rows: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|error| error.split_once(':').map(|(prefix, _)| prefix))
            .collect();
        rows.dedup();
        rows.len()
    }
}

fn is_number(value: &FieldValue) -> bool {
    match value {
        FieldValue::Integer(_) | FieldValue::Float(_) | FieldValue::Bool(_) => true,
        FieldValue::Null => false,
        FieldValue::Text(text) => {
            let compact: String = text
                .trim()
                .chars()
                .filter(|c| *c != ' ' && *c != ',')
                .collect();
            compact.parse::<f64>().is_ok()
        }
    }
}

fn is_integer(value: &FieldValue) -> bool {
    match value {
        FieldValue::Integer(_) => true,
        FieldValue::Text(text) => text.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn check_value(column: &Column, value: &FieldValue) -> Option<String> {
    let name = &column.name;
    let text = value.to_string();
    match column.column_type {
        ColumnType::Date => {
            let checked = column.date_format() == DEFAULT_DATE_FORMAT;
            (checked && !DATE_REGEX.is_match(text.trim())).then(|| {
                format!(
                    "Invalid date format for {}: '{}' (expected yyyy/mm/dd)",
                    name, text
                )
            })
        }
        ColumnType::Number => {
            (!is_number(value)).then(|| format!("Invalid number for {}: '{}'", name, text))
        }
        ColumnType::Integer => {
            (!is_integer(value)).then(|| format!("Invalid integer for {}: '{}'", name, text))
        }
        ColumnType::Boolean => {
            let token = text.trim().to_lowercase();
            (!BOOLEAN_TOKENS.contains(&token.as_str())).then(|| {
                format!(
                    "Invalid boolean for {}: '{}' (use true/false, yes/no, 1/0)",
                    name, text
                )
            })
        }
        ColumnType::Enum => {
            let allowed = column.allowed_values.as_ref()?;
            (!allowed.iter().any(|a| a == text.trim())).then(|| {
                format!(
                    "Invalid enum for {}: '{}' (allowed: {})",
                    name,
                    text,
                    allowed.join(", ")
                )
            })
        }
        ColumnType::String | ColumnType::Unknown => None,
    }
}

/// Validate one row against column definitions. Absent fields are blank.
pub fn validate_row(columns: &[Column], row: &Row) -> Vec<String> {
    let mut errors = Vec::new();
    for column in columns {
        let value = row.get(&column.name).unwrap_or(&FieldValue::Null);
        if value.is_blank() {
            if column.required {
                errors.push(format!("Missing required field: {}", column.name));
            }
            continue;
        }
        if let Some(error) = check_value(column, value) {
            errors.push(error);
        }
    }
    errors
}

/// Validate rows, prefixing every message with its 1-based row number
pub fn validate_rows(columns: &[Column], rows: &[Row]) -> RowValidationReport {
    let errors = rows
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            validate_row(columns, row)
                .into_iter()
                .map(move |error| format!("Row {}: {}", i + 1, error))
        })
        .collect();
    RowValidationReport {
        rows_checked: rows.len(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Date", ColumnType::Date).required(),
            Column::new("Area, m2", ColumnType::Number),
            Column::new("Week nr.", ColumnType::Integer),
            Column::new("Portfolio", ColumnType::Boolean),
            Column::new("Country", ColumnType::Enum).with_allowed_values(["Sweden", "Denmark"]),
            Column::new("Buyer", ColumnType::String),
        ]
    }

    fn row(fields: &[(&str, &str)]) -> Row {
        fields
            .iter()
            .map(|(k, v)| (*k, FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_valid_row() {
        let r = row(&[
            ("Date", "2024/01/15"),
            ("Area, m2", "12 345"),
            ("Week nr.", "3"),
            ("Portfolio", "Yes"),
            ("Country", "Sweden"),
        ]);
        assert!(validate_row(&columns(), &r).is_empty());
    }

    #[test]
    fn test_missing_required() {
        let errors = validate_row(&columns(), &row(&[("Date", "  ")]));
        assert_eq!(errors, vec!["Missing required field: Date"]);
    }

    #[test]
    fn test_all_errors_reported() {
        let r = row(&[
            ("Date", "2024-01-15"),
            ("Area, m2", "big"),
            ("Week nr.", "3.5"),
            ("Portfolio", "maybe"),
            ("Country", "Norway"),
        ]);
        let errors = validate_row(&columns(), &r);
        assert_eq!(
            errors,
            vec![
                "Invalid date format for Date: '2024-01-15' (expected yyyy/mm/dd)",
                "Invalid number for Area, m2: 'big'",
                "Invalid integer for Week nr.: '3.5'",
                "Invalid boolean for Portfolio: 'maybe' (use true/false, yes/no, 1/0)",
                "Invalid enum for Country: 'Norway' (allowed: Sweden, Denmark)",
            ]
        );
    }

    #[test]
    fn test_typed_values() {
        let mut r = Row::new();
        r.insert("Date", FieldValue::from("2024/01/15"));
        r.insert("Area, m2", FieldValue::Integer(25_000));
        r.insert("Week nr.", FieldValue::Integer(3));
        r.insert("Portfolio", FieldValue::Bool(false));
        assert!(validate_row(&columns(), &r).is_empty());

        r.insert("Week nr.", FieldValue::Float(3.0));
        assert_eq!(
            validate_row(&columns(), &r),
            vec!["Invalid integer for Week nr.: '3.0'"]
        );
    }

    #[test]
    fn test_custom_date_format_not_checked() {
        let columns = vec![Column::new("Date", ColumnType::Date).with_format("dd.mm.yyyy")];
        assert!(validate_row(&columns, &row(&[("Date", "15.01.2024")])).is_empty());
    }

    #[test]
    fn test_validate_rows_prefixes() {
        let rows = vec![
            row(&[("Date", "2024/01/15")]),
            row(&[("Date", "")]),
            row(&[("Date", "x"), ("Area, m2", "y")]),
        ];
        let report = validate_rows(&columns(), &rows);
        assert!(!report.is_valid());
        assert_eq!(report.rows_checked, 3);
        assert_eq!(
            report.errors,
            vec![
                "Row 2: Missing required field: Date",
                "Row 3: Invalid date format for Date: 'x' (expected yyyy/mm/dd)",
                "Row 3: Invalid number for Area, m2: 'y'",
            ]
        );
        assert_eq!(report.invalid_rows(), 2);
    }
}
