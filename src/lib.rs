//! Dealsheet - normalization and rendering of real-estate deal rows
//!
//! Extracted deal rows arrive as loosely formatted text in several Nordic
//! languages. This crate turns them into canonical values and paste-ready
//! spreadsheet rows:
//! - Field normalizers (numbers, dates, property types, countries, cities,
//!   property designations) with a confidence per field
//! - Row normalization and rendering per sheet kind and country layout
//! - Schema loading and row validation
//! - TSV reading/writing and file pipelines

pub mod cli;
pub mod mapping;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod tsv;
pub mod validation;

// Re-export commonly used types
pub use mapping::{MappingError, MappingTables, SynonymMapping};
pub use models::{Confidence, ConfidenceMap, FieldValue, Normalized, Number, OrderedMap, Row};
pub use normalize::{
    CityTable, CountryTable, FieldRoles, NormalizedRow, RowNormalizer, abbreviate_designation,
    normalize_date, normalize_price, normalize_property_type, normalize_yield, parse_number,
};
pub use pipeline::{PipelineConfig, PipelineError, PipelineReport, PipelineResult};
pub use render::{CountryProfile, RenderedRow, RowRenderer, format_value, rows_to_tsv};
pub use schema::{Column, ColumnType, Schema, SchemaError, SchemaKind};
pub use tsv::{TsvError, read_tsv, write_tsv};
pub use validation::{RowValidationReport, validate_row, validate_rows};
