//! Display formatting for spreadsheet paste

use crate::models::FieldValue;

/// Format a value for a spreadsheet cell.
///
/// | Value | Output |
/// |---|---|
/// | null, `""` | `""` |
/// | `true` / `false` | `Yes` / `No` |
/// | `1500000`, `1500000.0` | `1,500,000` |
/// | `4.5` | `4.50` |
/// | text | unchanged |
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => String::new(),
        FieldValue::Bool(true) => "Yes".to_string(),
        FieldValue::Bool(false) => "No".to_string(),
        FieldValue::Integer(i) => group_thousands(*i),
        FieldValue::Float(x) if x.fract() == 0.0 && x.abs() < i64::MAX as f64 => {
            group_thousands(*x as i64)
        }
        FieldValue::Float(x) => format!("{:.2}", x),
        FieldValue::Text(text) => text.clone(),
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&FieldValue::Null), "");
        assert_eq!(format_value(&FieldValue::from("")), "");
        assert_eq!(format_value(&FieldValue::Bool(true)), "Yes");
        assert_eq!(format_value(&FieldValue::Bool(false)), "No");
        assert_eq!(format_value(&FieldValue::Integer(1_500_000)), "1,500,000");
        assert_eq!(format_value(&FieldValue::Float(1_500_000.0)), "1,500,000");
        assert_eq!(format_value(&FieldValue::Float(4.5)), "4.50");
        assert_eq!(format_value(&FieldValue::Integer(633)), "633");
        assert_eq!(format_value(&FieldValue::from("Stockholm")), "Stockholm");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }
}
