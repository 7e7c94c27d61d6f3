//! Loosely typed field values and rows

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ordered::OrderedMap;

/// A single cell value of a raw or normalized row
///
/// Raw rows coming from extraction are mostly `Text`; normalized rows carry
/// `Integer`/`Float` for numeric fields and canonical strings elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// `Null`, or text that is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view used by derived computations. Booleans and text are not
    /// numbers here, even when the text looks numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether this is an `Integer` or `Float`
    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A parsed numeric magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Integral floats collapse to `Integer`
    pub fn from_f64(x: f64) -> Self {
        if x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
            Number::Integer(x as i64)
        } else {
            Number::Float(x)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    /// Round to an integer, ties to even. `None` when the result does not
    /// fit in an `i64`.
    pub fn rounded(self) -> Option<Number> {
        match self {
            Number::Integer(_) => Some(self),
            Number::Float(x) => {
                let rounded = x.round_ties_even();
                (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
                    .then(|| Number::Integer(rounded as i64))
            }
        }
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => FieldValue::Integer(i),
            Number::Float(x) => FieldValue::Float(x),
        }
    }
}

/// A row: field name to value, in column/extraction order
pub type Row = OrderedMap<FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from("x").is_blank());
        assert!(!FieldValue::Integer(0).is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
    }

    #[test]
    fn test_untagged_json() {
        let row: Row =
            serde_json::from_str(r#"{"Price": 150, "Yield": 4.5, "Portfolio": true, "Seller": null, "Buyer": "X AB"}"#)
                .unwrap();
        assert_eq!(row.get("Price"), Some(&FieldValue::Integer(150)));
        assert_eq!(row.get("Yield"), Some(&FieldValue::Float(4.5)));
        assert_eq!(row.get("Portfolio"), Some(&FieldValue::Bool(true)));
        assert_eq!(row.get("Seller"), Some(&FieldValue::Null));
        assert_eq!(row.get("Buyer"), Some(&FieldValue::from("X AB")));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(95.0).to_string(), "95.0");
        assert_eq!(FieldValue::Float(4.25).to_string(), "4.25");
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::Integer(-3).to_string(), "-3");
    }

    #[test]
    fn test_number_rounding_ties_even() {
        assert_eq!(Number::Float(1_500_000.5).rounded(), Some(Number::Integer(1_500_000)));
        assert_eq!(Number::Float(2.5).rounded(), Some(Number::Integer(2)));
        assert_eq!(Number::Float(3.5).rounded(), Some(Number::Integer(4)));
        assert_eq!(Number::Float(1e20).rounded(), None);
        assert_eq!(Number::Float(-1e20).rounded(), None);
        assert_eq!(Number::Float(f64::NAN).rounded(), None);
        assert_eq!(Number::from_f64(95.0), Number::Integer(95));
    }
}
