//! Rule failure types.
//!
//! [`ValidationError`] records one failed rule. [`FieldError`] attaches the
//! field it failed on, and [`ValidationErrors`] is the non-empty collection used
//! with `stillwater::Validation`.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::rule_name::RuleName;
use crate::standard::Standard;

/// A single failed rule.
///
/// - **value**: the value the rule was checked against (`None` when absent)
/// - **rule**: the rule that failed
/// - **standard**: the standard exactly as declared
///
/// # Example
///
/// ```rust
/// use rulebook::{RuleName, Standard, ValidationError};
/// use serde_json::json;
///
/// let error = ValidationError::new(Some(json!(5)), RuleName::Minimum, 10);
///
/// assert_eq!(error.rule, RuleName::Minimum);
/// assert_eq!(error.standard, Standard::from(10));
/// assert_eq!(error.to_json(), json!({"value": 5, "rule": "minimum", "standard": 10}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The checked value, or `None` if it did not exist.
    pub value: Option<Value>,
    /// The rule that failed.
    pub rule: RuleName,
    /// The declared standard for that rule.
    pub standard: Standard,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(value: Option<Value>, rule: RuleName, standard: impl Into<Standard>) -> Self {
        Self {
            value,
            rule,
            standard: standard.into(),
        }
    }

    /// Converts this error to `{value, rule, standard}`. An absent value is `null`.
    pub fn to_json(&self) -> Value {
        json!({
            "value": self.value.clone().unwrap_or(Value::Null),
            "rule": self.rule.as_str(),
            "standard": self.standard.to_value(),
        })
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule '{}' failed (standard: {})", self.rule, self.standard)?;
        match self.value {
            Some(ref value) => write!(f, " (got: {})", value),
            None => write!(f, " (got: nothing)"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A [`ValidationError`] tagged with the field it belongs to.
///
/// `field` is `None` for errors from single-value validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The field name, if validating multiple fields.
    pub field: Option<String>,
    /// The failed rule.
    pub error: ValidationError,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: Option<String>, error: ValidationError) -> Self {
        Self { field, error }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(ref field) => write!(f, "{}: {}", field, self.error),
            None => write!(f, "(value): {}", self.error),
        }
    }
}

impl std::error::Error for FieldError {}

/// A non-empty collection of field errors.
///
/// Wraps a `NonEmptyVec<FieldError>` so it can be the failure side of a
/// `Validation<T, ValidationErrors>`. Collections combine via `Semigroup`:
///
/// ```rust
/// use rulebook::{FieldError, RuleName, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let a = ValidationErrors::single(FieldError::new(
///     Some("name".to_string()),
///     ValidationError::new(None, RuleName::Required, true),
/// ));
/// let b = ValidationErrors::single(FieldError::new(
///     Some("age".to_string()),
///     ValidationError::new(None, RuleName::Required, true),
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<FieldError>);

impl ValidationErrors {
    /// Creates a collection holding one error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Returns all errors on the given field.
    pub fn on_field(&self, field: &str) -> Vec<&FieldError> {
        self.0
            .iter()
            .filter(|e| e.field.as_deref() == Some(field))
            .collect()
    }

    /// Returns all errors for the given rule.
    pub fn with_rule(&self, rule: &RuleName) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.error.rule == rule).collect()
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn required_missing(field: &str) -> FieldError {
        FieldError::new(
            Some(field.to_string()),
            ValidationError::new(None, RuleName::Required, true),
        )
    }

    #[test]
    fn test_error_to_json_absent_value() {
        let error = ValidationError::new(None, RuleName::Required, true);
        assert_eq!(
            error.to_json(),
            json!({"value": null, "rule": "required", "standard": true})
        );
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::new(Some(json!("Al")), RuleName::MinLength, 3);
        let display = error.to_string();
        assert!(display.contains("rule 'minlength' failed"));
        assert!(display.contains("standard: 3"));
        assert!(display.contains("got: \"Al\""));
    }

    #[test]
    fn test_field_error_display() {
        let display = required_missing("email").to_string();
        assert!(display.starts_with("email: rule 'required' failed"));
        assert!(display.contains("got: nothing"));

        let single = FieldError::new(None, ValidationError::new(None, RuleName::Required, true));
        assert!(single.to_string().starts_with("(value): "));
    }

    #[test]
    fn test_from_empty_vec() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_from_vec_keeps_order() {
        let errors =
            ValidationErrors::from_vec(vec![required_missing("a"), required_missing("b")]).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), &required_missing("a"));
        assert_eq!(errors.into_vec(), vec![required_missing("a"), required_missing("b")]);
    }

    #[test]
    fn test_combine_and_filter() {
        let errors = ValidationErrors::single(required_missing("a"))
            .combine(ValidationErrors::single(required_missing("b")))
            .combine(ValidationErrors::single(FieldError::new(
                Some("a".to_string()),
                ValidationError::new(Some(json!("x")), RuleName::MinLength, 2),
            )));

        assert_eq!(errors.len(), 3);
        assert!(!errors.is_empty());
        assert_eq!(errors.on_field("a").len(), 2);
        assert_eq!(errors.with_rule(&RuleName::Required).len(), 2);
        assert_eq!(errors.first(), &required_missing("a"));
    }

    #[test]
    fn test_display_lists_all() {
        let errors = ValidationErrors::single(required_missing("name"))
            .combine(ValidationErrors::single(required_missing("email")));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name:"));
        assert!(display.contains("2. email:"));
    }
}
