//! Mapping table types

use serde::{Deserialize, Serialize};

use crate::models::OrderedMap;
use crate::normalize::city::CityTable;
use crate::normalize::country::CountryTable;

use super::error::{MappingError, MappingResult};

/// Canonical type returned when several types match and one of them is the
/// mixed-use type
pub const DEFAULT_MIXED_USE: &str = "Mixed Use";

/// Canonical type returned when no synonym matches
pub const DEFAULT_FALLBACK: &str = "Other";

fn default_mixed_use() -> String {
    DEFAULT_MIXED_USE.to_string()
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

/// Substring keys of one canonical type. A YAML `null` list is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Vec<String>")]
pub struct SynonymKeys(pub Vec<String>);

impl From<Option<Vec<String>>> for SynonymKeys {
    fn from(keys: Option<Vec<String>>) -> Self {
        SynonymKeys(keys.unwrap_or_default())
    }
}

impl From<SynonymKeys> for Vec<String> {
    fn from(keys: SynonymKeys) -> Self {
        keys.0
    }
}

/// Property-type synonym table
///
/// ```yaml
/// synonyms:
///   Office: [office, kontor]
///   Logistics: [logistics, warehouse, lager]
///   Mixed Use: [mixed-use, mixed use, blandat]
/// ```
///
/// Canonical types keep their document order; it decides which type wins
/// when several match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymMapping {
    #[serde(default)]
    pub synonyms: OrderedMap<SynonymKeys>,
    /// Preferred canonical type when several distinct types match
    #[serde(default = "default_mixed_use")]
    pub mixed_use: String,
    /// Canonical type returned when nothing matches
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for SynonymMapping {
    fn default() -> Self {
        Self {
            synonyms: OrderedMap::new(),
            mixed_use: default_mixed_use(),
            fallback: default_fallback(),
        }
    }
}

impl SynonymMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mapping from YAML text
    pub fn from_yaml_str(content: &str) -> MappingResult<Self> {
        let mapping: SynonymMapping = serde_yaml::from_str(content)?;
        if mapping.synonyms.is_empty() {
            return Err(MappingError::InvalidTable(
                "property type mapping has no synonyms".to_string(),
            ));
        }
        Ok(mapping)
    }

    /// Add (or replace) a canonical type with its substring keys
    pub fn with_type<I, S>(mut self, canonical: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys.into_iter().map(Into::into).collect();
        self.synonyms.insert(canonical, SynonymKeys(keys));
        self
    }

    /// Set the mixed-use sentinel
    pub fn with_mixed_use(mut self, canonical: impl Into<String>) -> Self {
        self.mixed_use = canonical.into();
        self
    }

    /// Set the no-match fallback
    pub fn with_fallback(mut self, canonical: impl Into<String>) -> Self {
        self.fallback = canonical.into();
        self
    }

    /// Canonical types in document order
    pub fn canonical_types(&self) -> impl Iterator<Item = &str> {
        self.synonyms.keys()
    }
}

/// All lookup tables a row normalization needs, loaded once and shared by
/// reference
#[derive(Debug, Clone)]
pub struct MappingTables {
    pub property_types: SynonymMapping,
    pub countries: CountryTable,
    pub cities: CityTable,
}

impl MappingTables {
    /// Tables with the given property-type synonyms and the built-in Nordic
    /// country and city tables
    pub fn new(property_types: SynonymMapping) -> Self {
        Self {
            property_types,
            countries: CountryTable::nordic(),
            cities: CityTable::nordic(),
        }
    }

    pub fn with_countries(mut self, countries: CountryTable) -> Self {
        self.countries = countries;
        self
    }

    pub fn with_cities(mut self, cities: CityTable) -> Self {
        self.cities = cities;
        self
    }
}
