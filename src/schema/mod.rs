//! Deal sheet schemas
//!
//! A schema lists the sheet's columns in paste order. The transactions schema
//! carries one column list per country layout:
//!
//! ```json
//! {
//!   "name": "transactions",
//!   "columns": [{"name": "Date", "type": "date"}],
//!   "columns_sweden": [{"name": "Date", "type": "date"}],
//!   "columns_denmark": [{"name": "Date", "type": "date"}]
//! }
//! ```
//!
//! Every `columns_<variant>` key becomes a variant; `columns` is the default
//! layout. A schema with only variants uses the first variant as default.

mod error;

pub use error::{SchemaError, SchemaResult};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::models::OrderedMap;

/// The default date format for `date` columns
pub const DEFAULT_DATE_FORMAT: &str = "yyyy/mm/dd";

const VARIANT_PREFIX: &str = "columns_";

/// Column data types
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Date,
    Number,
    Integer,
    Boolean,
    Enum,
    /// Anything else; carried but never checked
    #[serde(other)]
    Unknown,
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            required: false,
            format: None,
            allowed_values: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Effective date format: the configured one or `yyyy/mm/dd`
    pub fn date_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

/// Which sheet a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Deal flow received from brokers (one layout)
    Inbound,
    /// Closed market transactions (per-country layouts)
    Transactions,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Transactions => "transactions",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Ok(Self::Inbound),
            "transactions" | "transaction" | "tx" => Ok(Self::Transactions),
            _ => Err(SchemaError::UnknownKind(s.to_string())),
        }
    }
}

/// A loaded schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub name: Option<String>,
    /// Default column layout
    pub columns: Vec<Column>,
    /// Named layouts from `columns_<variant>` keys, in document order
    pub variants: OrderedMap<Vec<Column>>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            name: None,
            columns,
            variants: OrderedMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a variant; the key is stored lowercase without the `columns_`
    /// prefix
    pub fn with_variant(mut self, variant: &str, columns: Vec<Column>) -> Self {
        let key = variant
            .strip_prefix(VARIANT_PREFIX)
            .unwrap_or(variant)
            .to_lowercase();
        self.variants.insert(key, columns);
        self
    }

    /// Parse a schema from JSON text
    pub fn from_json_str(content: &str) -> SchemaResult<Self> {
        let document: OrderedMap<JsonValue> = serde_json::from_str(content)?;

        let mut schema = Schema::default();
        for (key, value) in document {
            if key == "name" {
                schema.name = value.as_str().map(str::to_string);
            } else if key == "columns" {
                schema.columns = serde_json::from_value(value)?;
            } else if let Some(variant) = key.strip_prefix(VARIANT_PREFIX) {
                let columns: Vec<Column> = serde_json::from_value(value)?;
                schema.variants.insert(variant.to_lowercase(), columns);
            }
        }

        if schema.columns.is_empty() {
            match schema.variants.values().next() {
                Some(first) => schema.columns = first.clone(),
                None => return Err(SchemaError::NoColumns),
            }
        }
        Ok(schema)
    }

    /// Column layout for a variant, if the schema defines it
    pub fn variant(&self, variant: &str) -> Option<&[Column]> {
        self.variants
            .get(&variant.to_lowercase())
            .map(Vec::as_slice)
    }

    /// Column layout for a variant, falling back to `fallback` and then to the
    /// default layout
    pub fn columns_for(&self, variant: &str, fallback: &str) -> &[Column] {
        self.variant(variant)
            .or_else(|| self.variant(fallback))
            .unwrap_or(self.columns.as_slice())
    }

    /// Column names of the default layout
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Load a schema from a JSON file
pub fn load_schema(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = Schema::from_json_str(&content)?;
    info!(
        "Loaded schema {} with {} columns and {} variants",
        path.display(),
        schema.columns.len(),
        schema.variants.len()
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSACTIONS: &str = r#"{
        "name": "transactions",
        "columns": [
            {"name": "Date", "type": "date", "required": true},
            {"name": "Price", "type": "number"}
        ],
        "columns_sweden": [
            {"name": "Date", "type": "date"},
            {"name": "Price, MSEK", "type": "number"}
        ],
        "columns_Denmark": [
            {"name": "Date", "type": "date"},
            {"name": "Price, MDKK", "type": "number"}
        ]
    }"#;

    #[test]
    fn test_parse_with_variants() {
        let schema = Schema::from_json_str(TRANSACTIONS).unwrap();
        assert_eq!(schema.name.as_deref(), Some("transactions"));
        assert_eq!(schema.columns.len(), 2);
        assert!(schema.columns[0].required);
        assert_eq!(schema.columns[0].column_type, ColumnType::Date);

        let keys: Vec<&str> = schema.variants.keys().collect();
        assert_eq!(keys, vec!["sweden", "denmark"]);
        assert_eq!(schema.variant("DENMARK").unwrap()[1].name, "Price, MDKK");
    }

    #[test]
    fn test_columns_for_fallbacks() {
        let schema = Schema::from_json_str(TRANSACTIONS).unwrap();
        assert_eq!(schema.columns_for("denmark", "sweden")[1].name, "Price, MDKK");
        assert_eq!(schema.columns_for("norway", "sweden")[1].name, "Price, MSEK");
        assert_eq!(schema.columns_for("norway", "iceland")[1].name, "Price");
    }

    #[test]
    fn test_variants_only() {
        let schema = Schema::from_json_str(
            r#"{"columns_finland": [{"name": "Price, MEUR", "type": "number"}]}"#,
        )
        .unwrap();
        assert_eq!(schema.column_names(), vec!["Price, MEUR"]);
    }

    #[test]
    fn test_unknown_type_and_defaults() {
        let schema = Schema::from_json_str(
            r#"{"columns": [{"name": "Link", "type": "url"}, {"name": "Notes"}]}"#,
        )
        .unwrap();
        assert_eq!(schema.columns[0].column_type, ColumnType::Unknown);
        assert_eq!(schema.columns[1].column_type, ColumnType::String);
        assert!(!schema.columns[1].required);
        assert_eq!(schema.columns[1].date_format(), "yyyy/mm/dd");
    }

    #[test]
    fn test_no_columns() {
        assert!(matches!(
            Schema::from_json_str(r#"{"name": "empty"}"#),
            Err(SchemaError::NoColumns)
        ));
        assert!(matches!(
            Schema::from_json_str("{not json"),
            Err(SchemaError::ParseError(_))
        ));
    }

    #[test]
    fn test_schema_kind_parse() {
        assert_eq!("inbound".parse::<SchemaKind>().unwrap(), SchemaKind::Inbound);
        assert_eq!("TX".parse::<SchemaKind>().unwrap(), SchemaKind::Transactions);
        assert_eq!(
            "transaction".parse::<SchemaKind>().unwrap(),
            SchemaKind::Transactions
        );
        assert!("outbound".parse::<SchemaKind>().is_err());
        assert_eq!(SchemaKind::Transactions.to_string(), "transactions");
    }

    #[test]
    fn test_load_missing() {
        assert!(matches!(
            load_schema("config/schemas/missing.schema.json"),
            Err(SchemaError::NotFound(_))
        ));
    }
}
