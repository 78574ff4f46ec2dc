//! Validation results.
//!
//! An [`ErrorReport`] is built fresh by every validation call. In single-value
//! mode it is a list of failed rules; in multi-field mode it is a
//! [`FieldReport`] holding a (possibly empty) list for every declared field.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{FieldError, ValidationError, ValidationErrors};
use crate::ValidationResult;

/// Failed rules per field, in declaration order.
///
/// Every declared field has an entry, even when nothing failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldReport {
    fields: IndexMap<String, Vec<ValidationError>>,
}

impl FieldReport {
    pub(crate) fn from_map(fields: IndexMap<String, Vec<ValidationError>>) -> Self {
        Self { fields }
    }

    /// Returns the errors of a field, or `None` if the field was not declared.
    pub fn get(&self, field: &str) -> Option<&[ValidationError]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Returns true if the field was declared.
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates fields and their errors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationError])> {
        self.fields
            .iter()
            .map(|(field, errors)| (field.as_str(), errors.as_slice()))
    }

    /// Iterates declared field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields were declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if no field has errors.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Returns the total number of errors over all fields.
    pub fn error_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Converts to `{field: [{value, rule, standard}, ...]}`.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(field, errors)| (field.clone(), errors_to_json(errors)))
                .collect(),
        )
    }
}

impl IntoIterator for FieldReport {
    type Item = (String, Vec<ValidationError>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<ValidationError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// The result of one validation call.
///
/// # Example
///
/// ```rust
/// use rulebook::{FieldRules, RuleSet, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new();
/// let values = json!({"name": "Al", "age": 5});
/// let rules = FieldRules::new()
///     .field("name", RuleSet::new().rule("minlength", 3))
///     .field("age", RuleSet::new().rule("minimum", 10));
///
/// let report = validator.validate_fields(values.as_object().unwrap(), &rules);
/// assert_eq!(report.to_json(), json!({
///     "name": [{"value": "Al", "rule": "minlength", "standard": 3}],
///     "age": [{"value": 5, "rule": "minimum", "standard": 10}],
/// }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorReport {
    /// Failed rules of a single value, in declaration order.
    Single(Vec<ValidationError>),
    /// Failed rules per field.
    Fields(FieldReport),
}

impl ErrorReport {
    /// Returns true if nothing failed.
    pub fn is_valid(&self) -> bool {
        match self {
            ErrorReport::Single(errors) => errors.is_empty(),
            ErrorReport::Fields(report) => report.is_valid(),
        }
    }

    /// Returns the total number of failed rules.
    pub fn error_count(&self) -> usize {
        match self {
            ErrorReport::Single(errors) => errors.len(),
            ErrorReport::Fields(report) => report.error_count(),
        }
    }

    /// Returns the single-value errors, or `None` in multi-field mode.
    pub fn as_single(&self) -> Option<&[ValidationError]> {
        match self {
            ErrorReport::Single(errors) => Some(errors),
            ErrorReport::Fields(_) => None,
        }
    }

    /// Returns the per-field report, or `None` in single-value mode.
    pub fn as_fields(&self) -> Option<&FieldReport> {
        match self {
            ErrorReport::Single(_) => None,
            ErrorReport::Fields(report) => Some(report),
        }
    }

    /// Converts to JSON: an array in single-value mode, an object otherwise.
    pub fn to_json(&self) -> Value {
        match self {
            ErrorReport::Single(errors) => errors_to_json(errors),
            ErrorReport::Fields(report) => report.to_json(),
        }
    }

    /// Flattens the report into every failure tagged with its field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ErrorReport::Single(errors) => errors
                .iter()
                .map(|e| FieldError::new(None, e.clone()))
                .collect(),
            ErrorReport::Fields(report) => report
                .iter()
                .flat_map(|(field, errors)| {
                    errors
                        .iter()
                        .map(move |e| FieldError::new(Some(field.to_string()), e.clone()))
                })
                .collect(),
        }
    }

    /// Converts the report into a `Validation`: success when nothing failed,
    /// otherwise all failures in report order.
    ///
    /// ```rust
    /// use rulebook::{RuleSet, Validator};
    /// use serde_json::json;
    ///
    /// let validator = Validator::new();
    /// let rules = RuleSet::new().rule("email", true);
    ///
    /// let ok = validator.validate_value(Some(&json!("bob@example.com")), &rules);
    /// assert!(ok.into_validation().is_success());
    ///
    /// let bad = validator.validate_value(Some(&json!("not-an-email")), &rules);
    /// assert!(bad.into_validation().is_failure());
    /// ```
    pub fn into_validation(self) -> ValidationResult<()> {
        match ValidationErrors::from_vec(self.field_errors()) {
            None => Validation::Success(()),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.field_errors();
        if errors.is_empty() {
            return write!(f, "Validation passed");
        }
        writeln!(f, "Validation failed with {} error(s):", errors.len())?;
        for (i, error) in errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

fn errors_to_json(errors: &[ValidationError]) -> Value {
    Value::Array(errors.iter().map(ValidationError::to_json).collect())
}
