//! Field and row normalizers
//!
//! Each field normalizer returns a [`Normalized`](crate::models::Normalized)
//! value: the canonical form plus a confidence. An empty value at `low`
//! confidence means the input could not be normalized; nothing is guessed.

pub mod city;
pub mod country;
pub mod date;
pub mod designation;
pub mod number;
pub mod property_type;
pub mod row;

pub use city::CityTable;
pub use country::CountryTable;
pub use date::{normalize_date, normalize_date_text};
pub use designation::{abbreviate_designation, abbreviate_designation_text};
pub use number::{normalize_area, normalize_price, normalize_yield, parse_number, parse_number_text};
pub use property_type::normalize_property_type;
pub use row::{FieldRoles, NormalizedRow, RowNormalizer};
