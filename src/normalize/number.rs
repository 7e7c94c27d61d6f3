//! Number normalization
//!
//! Turns abbreviated, localized and currency-decorated numeric text into a
//! magnitude:
//!
//! - multipliers: `1.5M`, `500k`, `2.3 million`, `150 MSEK`, `1,2 miljarder`
//! - separators: `1 500 000`, `1.500.000`, `1,500,000`, `1.500.000,50`
//! - currency: `SEK 1,500,000`, `€500k`, `743 mkr`
//! - units and percentages: `47 696 kvm`, `4,5%`, `7,2 procent`
//!
//! Prices and areas come back as integers; yields keep their decimals.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{FieldValue, Normalized, Number};

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Multiplier tokens, lowercase. Currency-compound tokens (`msek`) only
/// survive currency stripping when written without the currency code, but
/// they are kept so a bare `150msek`-style token still resolves.
static MULTIPLIERS: &[(&str, f64)] = &[
    ("k", THOUSAND),
    ("thousand", THOUSAND),
    ("tusen", THOUSAND),
    ("tusind", THOUSAND),
    ("tuhatta", THOUSAND),
    ("m", MILLION),
    ("mn", MILLION),
    ("mil", MILLION),
    ("mill", MILLION),
    ("million", MILLION),
    ("millions", MILLION),
    ("milj", MILLION),
    ("miljoner", MILLION),
    ("millioner", MILLION),
    ("miljoonaa", MILLION),
    ("msek", MILLION),
    ("mdkk", MILLION),
    ("meur", MILLION),
    ("b", BILLION),
    ("bn", BILLION),
    ("billion", BILLION),
    ("mrd", BILLION),
    ("mdr", BILLION),
    ("miljarder", BILLION),
    ("milliarder", BILLION),
    ("miljardia", BILLION),
];

static CURRENCY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:SEK|DKK|EUR|USD|NOK|GBP|kr|€|\$|£)\s*").unwrap());

static UNIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:kvadratmeter|kvm|sqm|m2|m²|procent|percent)\.?$").unwrap()
});

static MULTIPLIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[\d\s.,\u{a0}]+?)(\s*)([a-z]+)$").unwrap());

static LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[\d.,]+$").unwrap());

fn lookup_multiplier(token: &str) -> Option<f64> {
    MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, mult)| *mult)
}

/// Normalize a number, expanding multipliers and separators.
///
/// With `as_integer`, non-integral results are rounded half-to-even unless the
/// input was a percentage. Returns `(None, low)` when nothing numeric can be
/// read.
pub fn parse_number(raw: &FieldValue, as_integer: bool) -> Normalized<Option<Number>> {
    match raw {
        FieldValue::Null | FieldValue::Bool(_) => Normalized::none(),
        FieldValue::Integer(i) => Normalized::high(Some(Number::Integer(*i))),
        FieldValue::Float(x) if as_integer => match Number::Float(*x).rounded() {
            Some(number) => Normalized::high(Some(number)),
            None => {
                debug!("Number {} does not fit an integer", x);
                Normalized::none()
            }
        },
        FieldValue::Float(x) => Normalized::high(Some(Number::Float(*x))),
        FieldValue::Text(text) => parse_number_text(text, as_integer),
    }
}

/// Text form of [`parse_number`]
pub fn parse_number_text(text: &str, as_integer: bool) -> Normalized<Option<Number>> {
    let text = text.trim();
    if text.is_empty() {
        return Normalized::none();
    }

    let stripped = CURRENCY_REGEX.replace_all(text, "");
    let mut text = stripped.trim().to_string();

    let mut is_percentage = false;
    if let Some(unit) = UNIT_REGEX.find(&text) {
        let unit_text = unit.as_str().to_lowercase();
        is_percentage = unit_text.contains("procent") || unit_text.contains("percent");
        text.truncate(unit.start());
    }

    if text.contains('%') {
        is_percentage = true;
        text = text.replace('%', "");
    }

    let parsed = match parse_with_multiplier(text.trim()) {
        Some(value) if value.is_finite() => value,
        _ => {
            debug!("Could not parse number from '{}'", text);
            return Normalized::none();
        }
    };

    let number = Number::from_f64(parsed);
    if !as_integer || is_percentage {
        return Normalized::high(Some(number));
    }
    match number.rounded() {
        Some(number) => Normalized::high(Some(number)),
        None => {
            debug!("Number '{}' does not fit an integer", text);
            Normalized::none()
        }
    }
}

/// Normalize a price to a whole number
pub fn normalize_price(raw: &FieldValue) -> Normalized<Option<Number>> {
    let (value, confidence) = parse_number(raw, true).into_parts();
    match value.and_then(Number::rounded) {
        Some(number) => Normalized::new(Some(number), confidence),
        None => Normalized::none(),
    }
}

/// Normalize an area (sqm) to a whole number
pub fn normalize_area(raw: &FieldValue) -> Normalized<Option<Number>> {
    normalize_price(raw)
}

/// Normalize a yield or percentage, keeping decimals. `4.5` means 4.5 %, not
/// 0.045.
pub fn normalize_yield(raw: &FieldValue) -> Normalized<Option<Number>> {
    parse_number(raw, false)
}

/// Split off a trailing multiplier token and scale the literal by it
fn parse_with_multiplier(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let Some(caps) = MULTIPLIER_REGEX.captures(&lowered) else {
        return parse_formatted_number(&lowered);
    };

    let literal = caps.get(1)?.as_str();
    let spaced = !caps.get(2)?.as_str().is_empty();
    let token = caps.get(3)?.as_str();

    // Word forms written apart from the number may be plural ("2 billions")
    let multiplier = lookup_multiplier(token).or_else(|| {
        let singular = token.strip_suffix('s')?;
        if spaced && singular.len() > 2 {
            lookup_multiplier(singular)
        } else {
            None
        }
    })?;

    parse_formatted_number(literal).map(|base| base * multiplier)
}

/// Parse a numeric literal whose `.`/`,` may be either thousands or decimal
/// separators.
///
/// - single separator followed by at most two digits: decimal
/// - single separator followed by three or more digits: thousands
/// - both kinds present: the later one is the decimal separator
/// - the same separator repeated: thousands
fn parse_formatted_number(text: &str) -> Option<f64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if compact.is_empty() || !LITERAL_REGEX.is_match(&compact) {
        return None;
    }

    let dots = compact.matches('.').count();
    let commas = compact.matches(',').count();

    let canonical = match (dots, commas) {
        (0, 0) => compact,
        (1, 0) => {
            let decimals = compact.split('.').nth(1).unwrap_or_default();
            if decimals.len() <= 2 {
                compact
            } else {
                compact.replace('.', "")
            }
        }
        (0, 1) => {
            let decimals = compact.split(',').nth(1).unwrap_or_default();
            if decimals.len() <= 2 {
                compact.replace(',', ".")
            } else {
                compact.replace(',', "")
            }
        }
        (d, c) if d > 0 && c > 0 => {
            let last_dot = compact.rfind('.').unwrap_or(0);
            let last_comma = compact.rfind(',').unwrap_or(0);
            if last_comma > last_dot {
                compact.replace('.', "").replace(',', ".")
            } else {
                compact.replace(',', "")
            }
        }
        (d, _) if d > 1 => compact.replace('.', ""),
        _ => compact.replace(',', ""),
    };

    canonical.parse::<f64>().ok()
}
