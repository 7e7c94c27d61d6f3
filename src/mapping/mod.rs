//! Mapping tables used by the normalizers
//!
//! Property-type synonyms always come from configuration (YAML). Country and
//! city tables have built-in Nordic defaults and can be replaced from YAML.
//! Every table is read-only once loaded and is passed to the normalizers
//! explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use dealsheet::mapping::{MappingTables, load_synonym_mapping};
//!
//! let property_types = load_synonym_mapping("config/mappings/property_type_map.yml")?;
//! let tables = MappingTables::new(property_types);
//! ```

mod error;
mod loader;
mod types;

pub use error::{MappingError, MappingResult};
pub use loader::{load_city_table, load_country_table, load_synonym_mapping};
pub use types::{DEFAULT_FALLBACK, DEFAULT_MIXED_USE, MappingTables, SynonymKeys, SynonymMapping};
