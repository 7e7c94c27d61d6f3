//! Core data types shared by normalizers, renderer and I/O
//!
//! Rows are deliberately untyped: the set of fields differs between inbound
//! and transaction documents and between extraction versions, so a row is an
//! ordered name-to-[`FieldValue`] map and the schema says what each column
//! is supposed to hold.

pub mod confidence;
pub mod ordered;
pub mod value;

pub use confidence::{Confidence, ConfidenceMap, Normalized, confidence_key};
pub use ordered::OrderedMap;
pub use value::{FieldValue, Number, Row};
