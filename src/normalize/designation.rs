//! Property designation abbreviation
//!
//! Swedish cadastral designations repeat the municipality and tract for
//! every unit in a portfolio:
//!
//! ```text
//! Sigtuna Märsta 1:257, Sigtuna Märsta 1:259, Sigtuna Märsta 1:261
//! Sigtuna Märsta 1:257, 1:259, 1:261
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FieldValue, Normalized};

static SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,&]\s*|\s+(?:and|och)\s+").unwrap());

/// `<prefix ending in whitespace><block>:<unit>...`
static DESIGNATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?\s)(\d+:\d+.*)$").unwrap());

/// Compress repeated designation prefixes.
///
/// A single designation comes back unchanged at `high`. When the first part
/// does not look like `<name> <n>:<n>` the original text is kept at `medium`.
/// Parts whose prefix differs from the first part's are kept whole.
pub fn abbreviate_designation(raw: &FieldValue) -> Normalized<String> {
    match raw {
        FieldValue::Text(text) => abbreviate_designation_text(text),
        _ => Normalized::empty(),
    }
}

pub fn abbreviate_designation_text(text: &str) -> Normalized<String> {
    let text = text.trim();
    if text.is_empty() {
        return Normalized::empty();
    }

    let parts: Vec<&str> = SPLIT_REGEX
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let Some((first, rest)) = parts.split_first() else {
        return Normalized::high(text.to_string());
    };
    if rest.is_empty() {
        return Normalized::high(text.to_string());
    }

    let Some(prefix) = DESIGNATION_REGEX
        .captures(first)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Normalized::medium(text.to_string());
    };

    let mut abbreviated = vec![*first];
    abbreviated.extend(
        rest.iter()
            .map(|part| part.strip_prefix(prefix).unwrap_or(*part)),
    );

    Normalized::high(abbreviated.join(", "))
}
