//! Country resolution against a canonical set
//!
//! Unknown values are never passed through: a country that is not in the
//! table resolves to `("", low)` so downstream column selection falls back
//! to the default layout instead of guessing.

use serde::{Deserialize, Serialize};

use crate::models::{FieldValue, Normalized, OrderedMap};

/// Canonical country names plus a case-insensitive synonym table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTable {
    pub canonical: Vec<String>,
    #[serde(default)]
    pub synonyms: OrderedMap<String>,
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::nordic()
    }
}

impl CountryTable {
    /// Sweden, Denmark and Finland with native names, ISO codes and
    /// adjectives
    pub fn nordic() -> Self {
        let synonyms = [
            ("sweden", "Sweden"),
            ("sverige", "Sweden"),
            ("se", "Sweden"),
            ("swe", "Sweden"),
            ("swedish", "Sweden"),
            ("denmark", "Denmark"),
            ("danmark", "Denmark"),
            ("dk", "Denmark"),
            ("den", "Denmark"),
            ("danish", "Denmark"),
            ("finland", "Finland"),
            ("suomi", "Finland"),
            ("fi", "Finland"),
            ("fin", "Finland"),
            ("finnish", "Finland"),
        ]
        .into_iter()
        .map(|(synonym, canonical)| (synonym, canonical.to_string()))
        .collect();

        Self {
            canonical: vec![
                "Sweden".to_string(),
                "Denmark".to_string(),
                "Finland".to_string(),
            ],
            synonyms,
        }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.iter().any(|c| c == name)
    }

    /// Resolve a field value; non-text values are looked up by their display
    /// form
    pub fn resolve(&self, raw: &FieldValue) -> Normalized<String> {
        match raw {
            FieldValue::Null => Normalized::empty(),
            FieldValue::Text(text) => self.resolve_text(text),
            other => self.resolve_text(&other.to_string()),
        }
    }

    pub fn resolve_text(&self, text: &str) -> Normalized<String> {
        let text = text.trim();
        if text.is_empty() {
            return Normalized::empty();
        }
        if self.is_canonical(text) {
            return Normalized::high(text.to_string());
        }

        let lookup = text.to_lowercase();
        self.synonyms
            .iter()
            .find(|(synonym, _)| synonym.to_lowercase() == lookup)
            .map(|(_, canonical)| Normalized::high(canonical.clone()))
            .unwrap_or_else(Normalized::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_canonical_and_synonyms() {
        let table = CountryTable::nordic();
        assert_eq!(table.resolve_text("Sweden"), Normalized::high("Sweden".to_string()));
        assert_eq!(table.resolve_text("Sverige").value, "Sweden");
        assert_eq!(table.resolve_text("DANMARK").value, "Denmark");
        assert_eq!(table.resolve_text(" dk ").value, "Denmark");
        assert_eq!(table.resolve_text("Suomi").value, "Finland");
        assert_eq!(table.resolve_text("finnish").value, "Finland");
    }

    #[test]
    fn test_unknown_is_not_passed_through() {
        let table = CountryTable::nordic();
        let result = table.resolve_text("Norway");
        assert_eq!(result.value, "");
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn test_blank() {
        let table = CountryTable::nordic();
        assert_eq!(table.resolve(&FieldValue::Null), Normalized::empty());
        assert_eq!(table.resolve(&FieldValue::from("  ")), Normalized::empty());
        assert_eq!(table.resolve(&FieldValue::Integer(46)), Normalized::empty());
    }

    #[test]
    fn test_idempotent() {
        let table = CountryTable::nordic();
        let once = table.resolve_text("se").value;
        assert_eq!(table.resolve_text(&once).value, once);
    }
}
