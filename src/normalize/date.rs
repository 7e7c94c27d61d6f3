//! Date normalization to `yyyy/mm/dd`
//!
//! Accepted shapes, tried in order:
//!
//! | Shape | Example |
//! |---|---|
//! | `yyyy/m/d` | `2024/1/15` |
//! | `yyyy-m-d` | `2024-01-15` |
//! | `d/m/yyyy` | `15/01/2024` |
//! | `d.m.yyyy` | `15.01.2024` |
//! | `d-m-yyyy` | `15-01-2024` |
//! | `<month> <day>[,] <year>` | `January 15, 2024` |
//! | `<day> <month> <year>` | `15 januari 2024`, `3 maaliskuu 2023` |
//!
//! Slash and dash day-first forms are always read day-first; US
//! month-first numerics are not supported.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{FieldValue, Normalized};

/// Month names in English, Swedish, Danish and Finnish, full and short forms
static MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("januari", 1),
    ("february", 2),
    ("februari", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("mars", 3),
    ("marts", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("maj", 5),
    ("june", 6),
    ("jun", 6),
    ("juni", 6),
    ("july", 7),
    ("jul", 7),
    ("juli", 7),
    ("august", 8),
    ("aug", 8),
    ("augusti", 8),
    ("september", 9),
    ("sep", 9),
    ("sept", 9),
    ("october", 10),
    ("oct", 10),
    ("oktober", 10),
    ("okt", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
    ("tammikuu", 1),
    ("tammi", 1),
    ("helmikuu", 2),
    ("helmi", 2),
    ("maaliskuu", 3),
    ("maalis", 3),
    ("huhtikuu", 4),
    ("huhti", 4),
    ("toukokuu", 5),
    ("touko", 5),
    ("kesäkuu", 6),
    ("kesä", 6),
    ("heinäkuu", 7),
    ("heinä", 7),
    ("elokuu", 8),
    ("elo", 8),
    ("syyskuu", 9),
    ("syys", 9),
    ("lokakuu", 10),
    ("loka", 10),
    ("marraskuu", 11),
    ("marras", 11),
    ("joulukuu", 12),
    ("joulu", 12),
];

#[derive(Clone, Copy)]
enum Order {
    YearFirst,
    DayFirst,
}

static NUMERIC_PATTERNS: Lazy<Vec<(Regex, Order)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap(), Order::YearFirst),
        (Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap(), Order::YearFirst),
        (Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap(), Order::DayFirst),
        (Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap(), Order::DayFirst),
        (Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap(), Order::DayFirst),
    ]
});

static MONTH_DAY_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zäöå]+)\s+(\d{1,2}),?\s+(\d{4})").unwrap());

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s+([a-zäöå]+)\s+(\d{4})").unwrap());

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

/// Coarse calendar check: year 1900-2100, 30-day months, February up to 29
/// without a leap-year test
fn is_valid_date(year: u32, month: u32, day: u32) -> bool {
    if !(1900..=2100).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day)
    {
        return false;
    }
    match month {
        4 | 6 | 9 | 11 => day <= 30,
        2 => day <= 29,
        _ => true,
    }
}

fn format_date(year: u32, month: u32, day: u32) -> Option<String> {
    is_valid_date(year, month, day).then(|| format!("{:04}/{:02}/{:02}", year, month, day))
}

/// Normalize a date value to `yyyy/mm/dd`.
///
/// Returns `("", low)` for blank or unrecognized input.
pub fn normalize_date(raw: &FieldValue) -> Normalized<String> {
    match raw {
        FieldValue::Null => Normalized::empty(),
        FieldValue::Text(text) => normalize_date_text(text),
        other => normalize_date_text(&other.to_string()),
    }
}

/// Text form of [`normalize_date`]
pub fn normalize_date_text(text: &str) -> Normalized<String> {
    let text = text.trim();
    if text.is_empty() {
        return Normalized::empty();
    }

    match parse_numeric(text).or_else(|| parse_textual(text)) {
        Some(date) => Normalized::high(date),
        None => {
            debug!("Could not parse date from '{}'", text);
            Normalized::empty()
        }
    }
}

fn parse_numeric(text: &str) -> Option<String> {
    NUMERIC_PATTERNS.iter().find_map(|(pattern, order)| {
        let caps = pattern.captures(text)?;
        let a: u32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let b: u32 = caps[3].parse().ok()?;
        match order {
            Order::YearFirst => format_date(a, m, b),
            Order::DayFirst => format_date(b, m, a),
        }
    })
}

fn parse_textual(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();

    let month_first = MONTH_DAY_YEAR.captures(&lowered).and_then(|caps| {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: u32 = caps[3].parse().ok()?;
        format_date(year, month, day)
    });
    if month_first.is_some() {
        return month_first;
    }

    DAY_MONTH_YEAR.captures(&lowered).and_then(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: u32 = caps[3].parse().ok()?;
        format_date(year, month, day)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    fn date(s: &str) -> String {
        normalize_date(&FieldValue::from(s)).value
    }

    #[test]
    fn test_numeric_formats() {
        assert_eq!(date("2024/01/15"), "2024/01/15");
        assert_eq!(date("2024/1/5"), "2024/01/05");
        assert_eq!(date("2024-01-15"), "2024/01/15");
        assert_eq!(date("15/01/2024"), "2024/01/15");
        assert_eq!(date("15.01.2024"), "2024/01/15");
        assert_eq!(date("15-01-2024"), "2024/01/15");
        assert_eq!(date("  5.3.2023 "), "2023/03/05");
    }

    #[test]
    fn test_textual_formats() {
        assert_eq!(date("January 15, 2024"), "2024/01/15");
        assert_eq!(date("jan 15 2024"), "2024/01/15");
        assert_eq!(date("15 January 2024"), "2024/01/15");
        assert_eq!(date("15 januari 2024"), "2024/01/15");
        assert_eq!(date("1 maj 2023"), "2023/05/01");
        assert_eq!(date("3 marts 2023"), "2023/03/03");
        assert_eq!(date("20 kesäkuu 2022"), "2022/06/20");
        assert_eq!(date("Okt 9, 2021"), "2021/10/09");
    }

    #[test]
    fn test_textual_only_anchored_at_start() {
        assert_eq!(date("15 januari 2024 (signed)"), "2024/01/15");
        assert_eq!(date("signed 15 januari 2024"), "");
    }

    #[test]
    fn test_invalid_dates() {
        for input in [
            "2024/13/01",
            "2024/04/31",
            "2024/02/30",
            "1899/01/01",
            "2101/01/01",
            "32/01/2024",
            "Q1 2024",
            "not a date",
            "15 foo 2024",
            "01/15/2024",
        ] {
            let result = normalize_date(&FieldValue::from(input));
            assert_eq!(result, Normalized::empty(), "input {:?}", input);
        }
    }

    #[test]
    fn test_february_without_leap_check() {
        assert_eq!(date("2023/02/29"), "2023/02/29");
    }

    #[test]
    fn test_blank_and_non_text() {
        assert_eq!(normalize_date(&FieldValue::Null), Normalized::empty());
        assert_eq!(normalize_date(&FieldValue::from("  ")).confidence, Confidence::Low);
        assert_eq!(normalize_date(&FieldValue::Integer(20240115)).value, "");
    }

    #[test]
    fn test_idempotent() {
        let once = date("15 januari 2024");
        assert_eq!(date(&once), once);
        assert_eq!(normalize_date(&FieldValue::from(once)).confidence, Confidence::High);
    }
}
