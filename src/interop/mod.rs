//! Interoperability with other schema formats.
//!
//! This module translates JSON-Schema-style documents into native
//! [`FieldRules`](crate::FieldRules).

pub mod json_schema;

pub use json_schema::convert_schema;
