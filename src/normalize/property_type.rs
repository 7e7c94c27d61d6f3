//! Property type resolution by synonym substring matching

use tracing::debug;

use crate::mapping::SynonymMapping;
use crate::models::{Confidence, FieldValue, Normalized};

/// Resolve free text to a canonical property type.
///
/// Every canonical type whose synonym list has a key contained in the
/// lowercased text is a hit. One hit is `high`; several hits resolve to the
/// mixed-use type when it is among them, otherwise to the first hit, at
/// `medium`. No hit returns the fallback type at `low`. Blank input returns
/// `("", low)`.
pub fn normalize_property_type(raw: &FieldValue, mapping: &SynonymMapping) -> Normalized<String> {
    let text = match raw {
        FieldValue::Null => return Normalized::empty(),
        FieldValue::Text(text) => text.trim().to_lowercase(),
        other => other.to_string().trim().to_lowercase(),
    };
    if text.is_empty() {
        return Normalized::empty();
    }

    let mut hits: Vec<&str> = Vec::new();
    for (canonical, keys) in mapping.synonyms.iter() {
        let matched = keys.0.iter().any(|key| {
            let key = key.trim().to_lowercase();
            !key.is_empty() && text.contains(&key)
        });
        if matched && !hits.contains(&canonical) {
            hits.push(canonical);
        }
    }

    match hits.as_slice() {
        [] => {
            debug!("No property type matched '{}'", text);
            Normalized::new(mapping.fallback.clone(), Confidence::Low)
        }
        [single] => Normalized::high(single.to_string()),
        [first, ..] => {
            let chosen = if hits.iter().any(|hit| *hit == mapping.mixed_use) {
                mapping.mixed_use.as_str()
            } else {
                *first
            };
            debug!("Property type '{}' matched {:?}, using {}", text, hits, chosen);
            Normalized::medium(chosen.to_string())
        }
    }
}
