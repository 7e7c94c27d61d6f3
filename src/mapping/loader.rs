//! Loading mapping tables from YAML files
//!
//! A missing or unreadable mapping file is a configuration error and is
//! surfaced immediately; there is no built-in fallback for property types.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::normalize::city::CityTable;
use crate::normalize::country::CountryTable;

use super::error::{MappingError, MappingResult};
use super::types::SynonymMapping;

fn read_yaml_file(path: &Path) -> MappingResult<String> {
    if !path.exists() {
        return Err(MappingError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| MappingError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> MappingResult<T> {
    let content = read_yaml_file(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load the property-type synonym mapping
pub fn load_synonym_mapping(path: impl AsRef<Path>) -> MappingResult<SynonymMapping> {
    let path = path.as_ref();
    let content = read_yaml_file(path)?;
    let mapping = SynonymMapping::from_yaml_str(&content)?;
    info!(
        "Loaded {} property types from {}",
        mapping.synonyms.len(),
        path.display()
    );
    Ok(mapping)
}

/// Load a country table (`canonical` list plus `synonyms` map)
pub fn load_country_table(path: impl AsRef<Path>) -> MappingResult<CountryTable> {
    let path = path.as_ref();
    let table: CountryTable = load_yaml(path)?;
    if table.canonical.is_empty() {
        return Err(MappingError::InvalidTable(format!(
            "country table {} lists no canonical countries",
            path.display()
        )));
    }
    info!(
        "Loaded {} countries from {}",
        table.canonical.len(),
        path.display()
    );
    Ok(table)
}

/// Load a city table (a plain map of local name to canonical name)
pub fn load_city_table(path: impl AsRef<Path>) -> MappingResult<CityTable> {
    let path = path.as_ref();
    let table: CityTable = load_yaml(path)?;
    info!("Loaded {} city names from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let err = load_synonym_mapping("does/not/exist.yml").unwrap_err();
        assert!(matches!(err, MappingError::NotFound(_)));
    }

    #[test]
    fn test_load_country_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "canonical: [Norway]\nsynonyms:\n  norge: Norway\n  nor: Norway"
        )
        .unwrap();

        let table = load_country_table(file.path()).unwrap();
        assert_eq!(table.resolve_text("Norge").value, "Norway");
    }

    #[test]
    fn test_load_city_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tromsø: Tromso").unwrap();

        let table = load_city_table(file.path()).unwrap();
        assert_eq!(table.resolve_text("TROMSØ").value, "Tromso");
    }
}
