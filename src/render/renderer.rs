//! Row rendering: derived metrics, column projection and formatting
//!
//! The renderer works on a copy of the row, so rendering the same normalized
//! row twice gives the same output and the caller's row is never changed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FieldValue, OrderedMap, Row};
use crate::schema::{Schema, SchemaKind};

use super::format::format_value;

/// Country used when a transaction row has no country
pub const DEFAULT_COUNTRY: &str = "Sweden";

const COUNTRY_FIELD: &str = "Country";
const PRICE_FIELD: &str = "Price";
const AREA_FIELD: &str = "Area, m2";
const LEASABLE_AREA_FIELD: &str = "Leasable area, sqm";
const DATE_RECEIVED_FIELD: &str = "Date received";
const WEEK_FIELD: &str = "Week nr.";

/// Extraction field names copied to their sheet column when the column is
/// missing
const INBOUND_ALIASES: &[(&str, &str)] = &[
    ("NOI", "NOI, CCY"),
    ("Base rent", "Base rent incl. index, CCY/sqm"),
    ("WAULT", "WAULT, years"),
    ("Occupancy", "Economic occupancy rate, %"),
    ("Deal value", "Deal value, CCY"),
    ("Comments", "Comment"),
];

/// Inbound value columns and the per-area columns derived from them
const INBOUND_PER_AREA: &[(&str, &str)] = &[
    ("NOI, CCY", "NOI, CCY/sqm"),
    ("Deal value, CCY", "Deal value, CCY/sqm"),
    ("Price, CCY", "Price, CCY/sqm"),
];

/// Per-country layout of the transactions sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Canonical country name as produced by the country resolver
    pub country: String,
    /// Schema variant key (`columns_<variant>`)
    pub variant: String,
    /// Column receiving the price in millions
    pub price_column: String,
    /// Column receiving the price per square metre
    pub price_per_area_column: String,
}

impl CountryProfile {
    pub fn new(
        country: impl Into<String>,
        price_column: impl Into<String>,
        price_per_area_column: impl Into<String>,
    ) -> Self {
        let country = country.into();
        Self {
            variant: country.to_lowercase(),
            country,
            price_column: price_column.into(),
            price_per_area_column: price_per_area_column.into(),
        }
    }

    /// Sweden (MSEK), Denmark (MDKK) and Finland (MEUR)
    pub fn nordic() -> Vec<Self> {
        vec![
            Self::new("Sweden", "Price, MSEK", "Price, SEK/m2"),
            Self::new("Denmark", "Price, MDKK", "Price, DKK/m2"),
            Self::new("Finland", "Price, MEUR", "Price, EUR/m2"),
        ]
    }
}

/// A rendered row: column name to display string, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderedRow {
    cells: OrderedMap<String>,
}

impl RenderedRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tab-joined header line
    pub fn header_line(&self) -> String {
        self.columns().collect::<Vec<_>>().join("\t")
    }

    /// Tab-joined values, no trailing newline
    pub fn to_tsv_line(&self) -> String {
        self.values().collect::<Vec<_>>().join("\t")
    }

    /// Values for `columns`, absent ones empty
    pub fn project(&self, columns: &[String]) -> Vec<&str> {
        columns
            .iter()
            .map(|column| self.get(column).unwrap_or_default())
            .collect()
    }
}

/// Renders normalized rows into a schema's column layout
#[derive(Debug, Clone)]
pub struct RowRenderer<'a> {
    schema: &'a Schema,
    kind: SchemaKind,
    profiles: Vec<CountryProfile>,
    country: Option<String>,
}

impl<'a> RowRenderer<'a> {
    pub fn new(schema: &'a Schema, kind: SchemaKind) -> Self {
        Self {
            schema,
            kind,
            profiles: CountryProfile::nordic(),
            country: None,
        }
    }

    /// Replace the country profiles
    pub fn with_profiles(mut self, profiles: Vec<CountryProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Render every row with one country's layout, ignoring the rows' own
    /// `Country`
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Country that decides a transaction row's layout
    pub fn country_of(&self, row: &Row) -> String {
        if let Some(country) = &self.country {
            return country.clone();
        }
        match row.get(COUNTRY_FIELD) {
            Some(value) if !value.is_blank() => value.to_string().trim().to_string(),
            _ => DEFAULT_COUNTRY.to_string(),
        }
    }

    fn profile_for(&self, country: &str) -> Option<&CountryProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.country.eq_ignore_ascii_case(country))
    }

    fn default_variant(&self) -> String {
        self.profile_for(DEFAULT_COUNTRY)
            .map(|profile| profile.variant.clone())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_lowercase())
    }

    /// Output columns for a row, in sheet order
    pub fn columns_for(&self, row: &Row) -> Vec<String> {
        let columns = match self.kind {
            SchemaKind::Inbound => self.schema.columns.as_slice(),
            SchemaKind::Transactions => {
                let country = self.country_of(row);
                let variant = self
                    .profile_for(&country)
                    .map(|profile| profile.variant.clone())
                    .unwrap_or_else(|| country.to_lowercase());
                self.schema.columns_for(&variant, &self.default_variant())
            }
        };
        columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Render a normalized row
    pub fn render(&self, row: &Row) -> RenderedRow {
        let mut working = row.clone();
        match self.kind {
            SchemaKind::Inbound => derive_inbound(&mut working),
            SchemaKind::Transactions => {
                let country = self.country_of(row);
                match self.profile_for(&country) {
                    Some(profile) => derive_transaction(&mut working, profile),
                    None => debug!("No price routing for country '{}'", country),
                }
            }
        }

        let cells = self
            .columns_for(row)
            .into_iter()
            .map(|column| {
                let value = working.get(&column).map(format_value).unwrap_or_default();
                (column, value)
            })
            .collect();
        RenderedRow { cells }
    }

    pub fn render_all(&self, rows: &[Row]) -> Vec<RenderedRow> {
        rows.iter().map(|row| self.render(row)).collect()
    }
}

/// Positive numeric value of a field
fn positive(row: &Row, field: &str) -> Option<f64> {
    row.get(field)
        .and_then(FieldValue::as_f64)
        .filter(|x| *x > 0.0)
}

fn round_to_integer(x: f64) -> Option<FieldValue> {
    let rounded = x.round_ties_even();
    (rounded.is_finite() && rounded.abs() < i64::MAX as f64)
        .then(|| FieldValue::Integer(rounded as i64))
}

fn derive_transaction(row: &mut Row, profile: &CountryProfile) {
    let Some(price) = row.get(PRICE_FIELD).filter(|v| !v.is_blank()).cloned() else {
        return;
    };

    let per_area = price.as_f64().filter(|p| *p > 0.0).and_then(|price| {
        let area = positive(row, AREA_FIELD)?;
        round_to_integer(price * 1_000_000.0 / area)
    });

    row.insert(profile.price_column.clone(), price);
    if let Some(per_area) = per_area {
        row.insert(profile.price_per_area_column.clone(), per_area);
    }
}

fn derive_inbound(row: &mut Row) {
    for (alias, column) in INBOUND_ALIASES {
        if row.contains_key(column) {
            continue;
        }
        if let Some(value) = row.get(alias).cloned() {
            row.insert(*column, value);
        }
    }

    if let Some(area) = positive(row, LEASABLE_AREA_FIELD) {
        for (source, target) in INBOUND_PER_AREA {
            let derived = row
                .get(source)
                .and_then(FieldValue::as_f64)
                .filter(|value| *value != 0.0)
                .and_then(|value| round_to_integer(value / area));
            if let Some(derived) = derived {
                row.insert(*target, derived);
            }
        }
    }

    let week = row
        .get(DATE_RECEIVED_FIELD)
        .and_then(FieldValue::as_text)
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y/%m/%d").ok())
        .map(|date| date.iso_week().week());
    if let Some(week) = week {
        row.insert(WEEK_FIELD, FieldValue::Integer(i64::from(week)));
    }
}
