//! Validation functionality
//!
//! Validates deal rows against schema column definitions:
//! - required fields present
//! - dates in `yyyy/mm/dd`
//! - numbers, integers and booleans parse
//! - enum values allowed

pub mod rows;

pub use rows::{RowValidationReport, validate_row, validate_rows};
