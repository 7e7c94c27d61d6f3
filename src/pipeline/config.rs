//! Pipeline configuration
//!
//! Paths default to the layout shipped under `config/` and can be overridden
//! in a `dealsheet.toml`:
//!
//! ```toml
//! inbound_schema = "config/schemas/inbound_purple.schema.json"
//! transactions_schema = "config/schemas/transactions.schema.json"
//! property_type_map = "config/mappings/property_type_map.yml"
//! city_table = "config/mappings/cities.yml"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mapping::{MappingTables, load_city_table, load_country_table, load_synonym_mapping};
use crate::render::CountryProfile;
use crate::schema::{Schema, SchemaKind, load_schema};

use super::error::{PipelineError, PipelineResult};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "dealsheet.toml";

/// File pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Inbound deal-flow schema (JSON)
    pub inbound_schema: PathBuf,
    /// Transactions schema (JSON)
    pub transactions_schema: PathBuf,
    /// Property-type synonym mapping (YAML)
    pub property_type_map: PathBuf,
    /// Country table replacing the built-in Nordic one (YAML)
    pub country_table: Option<PathBuf>,
    /// City table replacing the built-in Nordic one (YAML)
    pub city_table: Option<PathBuf>,
    /// Country layouts replacing the built-in Nordic ones
    pub country_profiles: Option<Vec<CountryProfile>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inbound_schema: PathBuf::from("config/schemas/inbound_purple.schema.json"),
            transactions_schema: PathBuf::from("config/schemas/transactions.schema.json"),
            property_type_map: PathBuf::from("config/mappings/property_type_map.yml"),
            country_table: None,
            city_table: None,
            country_profiles: None,
        }
    }
}

impl PipelineConfig {
    /// Create a config with the default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(content)?;
        if config.country_profiles.as_ref().is_some_and(Vec::is_empty) {
            return Err(PipelineError::ConfigError(
                "country_profiles must list at least one country".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::io_with_path(path, "failed to read config", e))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else `dealsheet.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> PipelineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE_NAME).exists() => Self::load(CONFIG_FILE_NAME),
            None => Ok(Self::default()),
        }
    }

    /// Set the inbound schema path
    pub fn with_inbound_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.inbound_schema = path.into();
        self
    }

    /// Set the transactions schema path
    pub fn with_transactions_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.transactions_schema = path.into();
        self
    }

    /// Set the property-type mapping path
    pub fn with_property_type_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.property_type_map = path.into();
        self
    }

    /// Set the country table path
    pub fn with_country_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.country_table = Some(path.into());
        self
    }

    /// Set the city table path
    pub fn with_city_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.city_table = Some(path.into());
        self
    }

    /// Set the country layouts
    pub fn with_country_profiles(mut self, profiles: Vec<CountryProfile>) -> Self {
        self.country_profiles = Some(profiles);
        self
    }

    /// Schema path for a sheet kind
    pub fn schema_path(&self, kind: SchemaKind) -> &Path {
        match kind {
            SchemaKind::Inbound => &self.inbound_schema,
            SchemaKind::Transactions => &self.transactions_schema,
        }
    }

    /// Load the schema for a sheet kind
    pub fn load_schema(&self, kind: SchemaKind) -> PipelineResult<Schema> {
        Ok(load_schema(self.schema_path(kind))?)
    }

    /// Load every mapping table the normalizers need
    pub fn load_tables(&self) -> PipelineResult<MappingTables> {
        let mut tables = MappingTables::new(load_synonym_mapping(&self.property_type_map)?);
        if let Some(path) = &self.country_table {
            tables = tables.with_countries(load_country_table(path)?);
        }
        if let Some(path) = &self.city_table {
            tables = tables.with_cities(load_city_table(path)?);
        }
        Ok(tables)
    }

    /// Configured country layouts, or the Nordic defaults
    pub fn profiles(&self) -> Vec<CountryProfile> {
        self.country_profiles
            .clone()
            .unwrap_or_else(CountryProfile::nordic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.schema_path(SchemaKind::Inbound),
            Path::new("config/schemas/inbound_purple.schema.json")
        );
        assert_eq!(
            config.property_type_map,
            PathBuf::from("config/mappings/property_type_map.yml")
        );
        assert!(config.city_table.is_none());
        assert_eq!(config.profiles().len(), 3);
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = PipelineConfig::new()
            .with_transactions_schema("schemas/tx.json")
            .with_city_table("maps/cities.yml");
        assert_eq!(
            config.schema_path(SchemaKind::Transactions),
            Path::new("schemas/tx.json")
        );
        assert_eq!(config.city_table, Some(PathBuf::from("maps/cities.yml")));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = PipelineConfig::from_toml_str(
            r#"
property_type_map = "custom/map.yml"

[[country_profiles]]
country = "Norway"
variant = "norway"
price_column = "Price, MNOK"
price_per_area_column = "Price, NOK/m2"
"#,
        )
        .unwrap();
        assert_eq!(config.property_type_map, PathBuf::from("custom/map.yml"));
        assert_eq!(
            config.inbound_schema,
            PathBuf::from("config/schemas/inbound_purple.schema.json")
        );
        assert_eq!(config.profiles()[0].price_column, "Price, MNOK");
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            PipelineConfig::from_toml_str("property_type_map = 3"),
            Err(PipelineError::ConfigParseError(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("country_profiles = []"),
            Err(PipelineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_missing() {
        assert!(matches!(
            PipelineConfig::load("missing/dealsheet.toml"),
            Err(PipelineError::ConfigNotFound(_))
        ));
    }
}
