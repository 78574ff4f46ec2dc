//! The input under validation.
//!
//! A [`ValueBag`] is either a single (possibly absent) value or a mapping of
//! field names to values. Every rule predicate receives the whole bag so that
//! caller-supplied rules can look at sibling fields.

use serde_json::{Map, Value};

/// The whole input handed to a validation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueBag<'a> {
    /// Single-value mode.
    Single(Option<&'a Value>),
    /// Multi-field mode.
    Fields(&'a Map<String, Value>),
}

impl<'a> ValueBag<'a> {
    /// Resolves a field.
    ///
    /// In single-value mode every field name resolves to the single value.
    /// A missing key is `None`, not an error.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        match self {
            ValueBag::Single(value) => *value,
            ValueBag::Fields(map) => map.get(field),
        }
    }

    /// Returns true in single-value mode.
    pub fn is_single(&self) -> bool {
        matches!(self, ValueBag::Single(_))
    }
}

/// Returns true if the value is present and not `null`.
///
/// Existence is not truthiness: `0`, `""` and `false` all exist.
///
/// # Example
///
/// ```rust
/// use rulebook::exists;
/// use serde_json::json;
///
/// assert!(exists(Some(&json!(0))));
/// assert!(exists(Some(&json!(""))));
/// assert!(!exists(Some(&json!(null))));
/// assert!(!exists(None));
/// ```
pub fn exists(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}
