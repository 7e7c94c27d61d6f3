//! Row-level normalization
//!
//! Field roles decide which normalizer runs on which column. A field is only
//! touched when it is present and non-blank; its confidence is recorded even
//! when the normalizer could not produce a value, in which case the original
//! value is kept.

use serde::Serialize;
use tracing::debug;

use crate::mapping::MappingTables;
use crate::models::{ConfidenceMap, FieldValue, Normalized, Number, Row, confidence_key};
use crate::schema::SchemaKind;

use super::date::normalize_date;
use super::designation::abbreviate_designation;
use super::number::{normalize_price, normalize_yield};
use super::property_type::normalize_property_type;

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Column names per normalizer role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRoles {
    pub dates: Vec<String>,
    /// Whole-number amounts and areas
    pub numbers: Vec<String>,
    /// Decimal-preserving values (yields, percentages, amounts in millions)
    pub yields: Vec<String>,
    pub property_types: Vec<String>,
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub designations: Vec<String>,
}

impl FieldRoles {
    /// Roles for the inbound deal-flow sheet. `Type` holds the document type
    /// (IM, teaser) and is left alone.
    pub fn inbound() -> Self {
        Self {
            dates: names(&["Date received"]),
            numbers: names(&[
                "Leasable area, sqm",
                "Base rent incl. index, CCY/sqm",
                "NOI, CCY",
                "NOI, CCY/sqm",
                "WAULT, years",
                "Deal value, CCY",
                "Deal value, CCY/sqm",
                "Price, CCY",
                "Price, CCY/sqm",
            ]),
            yields: names(&["Yield", "Yield2", "Economic occupancy rate, %"]),
            property_types: names(&["Use"]),
            countries: names(&["Country"]),
            cities: names(&["Location"]),
            designations: names(&["Property designation"]),
        }
    }

    /// Roles for the transactions sheet. `Price` is quoted in millions and
    /// passes through as extracted.
    pub fn transactions() -> Self {
        Self {
            dates: names(&["Date"]),
            numbers: names(&[
                "Area, m2",
                "Price, SEK",
                "Price, DKK",
                "Price, EUR",
                "Price, CCY/m2",
            ]),
            yields: names(&["Yield", "Price, MSEK", "Price, MDKK", "Price, MEUR"]),
            property_types: names(&["Property type"]),
            countries: names(&["Country"]),
            cities: names(&["Location"]),
            designations: Vec::new(),
        }
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Inbound => Self::inbound(),
            SchemaKind::Transactions => Self::transactions(),
        }
    }
}

/// A normalized row and the confidence of every field that was processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub row: Row,
    pub confidence: ConfidenceMap,
}

/// Applies the field normalizers to whole rows
#[derive(Debug, Clone)]
pub struct RowNormalizer<'a> {
    roles: FieldRoles,
    tables: &'a MappingTables,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(roles: FieldRoles, tables: &'a MappingTables) -> Self {
        Self { roles, tables }
    }

    /// Normalizer with the preset roles of a sheet kind
    pub fn for_kind(kind: SchemaKind, tables: &'a MappingTables) -> Self {
        Self::new(FieldRoles::for_kind(kind), tables)
    }

    pub fn roles(&self) -> &FieldRoles {
        &self.roles
    }

    /// Normalize one row. The input is not modified; field order is kept.
    pub fn normalize(&self, raw: &Row) -> NormalizedRow {
        let mut row = raw.clone();
        let mut confidence = ConfidenceMap::new();
        let tables = self.tables;

        apply_text(&mut row, &mut confidence, &self.roles.dates, normalize_date);
        apply_text(&mut row, &mut confidence, &self.roles.property_types, |v| {
            normalize_property_type(v, &tables.property_types)
        });
        apply_number(&mut row, &mut confidence, &self.roles.numbers, normalize_price);
        apply_number(&mut row, &mut confidence, &self.roles.yields, normalize_yield);
        apply_text(&mut row, &mut confidence, &self.roles.countries, |v| {
            tables.countries.resolve(v)
        });
        apply_text(&mut row, &mut confidence, &self.roles.cities, |v| {
            tables.cities.resolve(v)
        });
        apply_text(
            &mut row,
            &mut confidence,
            &self.roles.designations,
            abbreviate_designation,
        );

        NormalizedRow { row, confidence }
    }

    pub fn normalize_all(&self, rows: &[Row]) -> Vec<NormalizedRow> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }
}

/// Present, non-blank fields of a role
fn role_fields<'r>(row: &Row, fields: &'r [String]) -> Vec<&'r str> {
    fields
        .iter()
        .map(String::as_str)
        .filter(|field| row.get(field).is_some_and(|value| !value.is_blank()))
        .collect()
}

fn apply_text<F>(row: &mut Row, confidence: &mut ConfidenceMap, fields: &[String], normalize: F)
where
    F: Fn(&FieldValue) -> Normalized<String>,
{
    for field in role_fields(row, fields) {
        let Some(value) = row.get_mut(field) else {
            continue;
        };
        let (canonical, conf) = normalize(&*value).into_parts();
        debug!("{}: {:?} -> {:?} ({})", field, value, canonical, conf);
        if !canonical.is_empty() {
            *value = FieldValue::Text(canonical);
        }
        confidence.insert(confidence_key(field), conf);
    }
}

fn apply_number<F>(row: &mut Row, confidence: &mut ConfidenceMap, fields: &[String], normalize: F)
where
    F: Fn(&FieldValue) -> Normalized<Option<Number>>,
{
    for field in role_fields(row, fields) {
        let Some(value) = row.get_mut(field) else {
            continue;
        };
        let (number, conf) = normalize(&*value).into_parts();
        debug!("{}: {:?} -> {:?} ({})", field, value, number, conf);
        if let Some(number) = number {
            *value = number.into();
        }
        confidence.insert(confidence_key(field), conf);
    }
}
