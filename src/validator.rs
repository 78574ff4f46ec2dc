//! The evaluator.
//!
//! [`Validator`] runs declared rules against a value (or a mapping of field
//! values) and assembles an [`ErrorReport`]. Single-value and multi-field
//! requests share one code path: a single value is treated as one field under
//! an internal name, and unwrapped again at the end.
//!
//! Evaluation order is declaration order, for fields and for rules within a
//! field. A field whose value does not exist and whose rules declare
//! `required: false` is skipped entirely.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::declaration::{FieldRules, RuleSet};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{DeclarationError, ValidationError};
use crate::interop::json_schema;
use crate::report::{ErrorReport, FieldReport};
use crate::rule_name::RuleName;
use crate::rules::RuleRegistry;
use crate::standard::Standard;
use crate::value_bag::{exists, ValueBag};

/// Field name standing in for the value in single-value mode.
const SINGLE_FIELD: &str = "\u{0}value";

/// What to validate, and against which rules.
#[derive(Debug, Clone, Copy)]
pub enum Request<'a> {
    /// One value (possibly absent) against one rule set.
    Single {
        /// The value, `None` if it does not exist.
        value: Option<&'a Value>,
        /// Its rules.
        rules: &'a RuleSet,
    },
    /// Named values against per-field rule sets.
    Fields {
        /// The field values.
        values: &'a Map<String, Value>,
        /// Rules per field.
        rules: &'a FieldRules,
    },
}

/// Construction options for a [`Validator`].
///
/// # Example
///
/// ```rust
/// use rulebook::{RuleSet, Validator, ValidatorOptions};
/// use serde_json::{json, Value};
///
/// let validator = Validator::with_options(
///     ValidatorOptions::new()
///         .rule("even", |value, _, _| value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0)),
/// );
///
/// let report = validator.validate_value(Some(&json!(3)), &RuleSet::new().rule("even", true));
/// assert_eq!(report.error_count(), 1);
/// ```
#[derive(Default)]
pub struct ValidatorOptions {
    rules: RuleRegistry,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl ValidatorOptions {
    /// Creates options with no overrides and the default sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a rule.
    pub fn rule<F>(mut self, name: impl Into<RuleName>, rule: F) -> Self
    where
        F: Fn(Option<&Value>, &Standard, &ValueBag<'_>) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name, rule);
        self
    }

    /// Merges a whole registry of overrides. Later overrides win.
    pub fn rules(mut self, overrides: RuleRegistry) -> Self {
        self.rules = self.rules.merge(overrides);
        self
    }

    /// Sets where diagnostics go. Defaults to [`TracingSink`].
    pub fn sink<S>(self, sink: S) -> Self
    where
        S: DiagnosticSink + 'static,
    {
        self.shared_sink(Arc::new(sink))
    }

    /// Sets a sink the caller keeps a handle to.
    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("rules", &self.rules)
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}

/// Per-call options. Currently carries nothing; accepted so callers can pass
/// options without an API change later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidateOptions {}

/// Runs rule declarations against values.
///
/// Each validator owns an immutable registry, built once from the defaults
/// and any overrides.
///
/// # Example
///
/// ```rust
/// use rulebook::{RuleName, RuleSet, Standard, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new();
/// let rules = RuleSet::new().rule("email", true);
///
/// assert!(validator.validate_value(Some(&json!("bob@example.com")), &rules).is_valid());
///
/// let report = validator.validate_value(Some(&json!("not-an-email")), &rules);
/// let errors = report.as_single().unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].rule, RuleName::Email);
/// assert_eq!(errors[0].standard, Standard::Bool(true));
/// ```
#[derive(Clone)]
pub struct Validator {
    registry: RuleRegistry,
    sink: Arc<dyn DiagnosticSink>,
}

impl Validator {
    /// Creates a validator with the built-in rules, logging diagnostics via `tracing`.
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::default())
    }

    /// Creates a validator with the built-in rules merged with `options`.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            registry: RuleRegistry::defaults().merge(options.rules),
            sink: options.sink.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }

    /// Returns this validator's registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates a request.
    pub fn validate(&self, request: Request<'_>) -> ErrorReport {
        self.validate_with(request, &ValidateOptions::default())
    }

    /// Validates a request with per-call options.
    pub fn validate_with(&self, request: Request<'_>, _options: &ValidateOptions) -> ErrorReport {
        match request {
            Request::Single { value, rules } => {
                let mut fields =
                    self.evaluate(ValueBag::Single(value), [(SINGLE_FIELD, rules)].into_iter());
                ErrorReport::Single(fields.shift_remove(SINGLE_FIELD).unwrap_or_default())
            }
            Request::Fields { values, rules } => {
                let fields = self.evaluate(ValueBag::Fields(values), rules.iter());
                ErrorReport::Fields(FieldReport::from_map(fields))
            }
        }
    }

    /// Validates one value, `None` meaning it does not exist.
    pub fn validate_value(&self, value: Option<&Value>, rules: &RuleSet) -> ErrorReport {
        self.validate(Request::Single { value, rules })
    }

    /// Validates named values against per-field rules.
    pub fn validate_fields(&self, values: &Map<String, Value>, rules: &FieldRules) -> ErrorReport {
        self.validate(Request::Fields { values, rules })
    }

    /// Validates JSON input against a JSON rule declaration.
    ///
    /// An object `value` selects multi-field mode and `rules` must map field
    /// names to rule-set objects. Anything else is a single value, `null`
    /// meaning absent, and `rules` must be one rule-set object.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] if `rules` does not have the shape the
    /// mode requires.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulebook::Validator;
    /// use serde_json::json;
    ///
    /// let validator = Validator::new();
    /// let report = validator
    ///     .validate_json(&json!({"name": "Al"}), &json!({"name": {"minlength": 3}}))
    ///     .unwrap();
    ///
    /// assert_eq!(report.error_count(), 1);
    /// ```
    pub fn validate_json(
        &self,
        value: &Value,
        rules: &Value,
    ) -> Result<ErrorReport, DeclarationError> {
        match value {
            Value::Object(values) => {
                let rules = FieldRules::from_json(rules)?;
                Ok(self.validate_fields(values, &rules))
            }
            Value::Null => {
                let rules = RuleSet::from_json(rules)?;
                Ok(self.validate_value(None, &rules))
            }
            single => {
                let rules = RuleSet::from_json(rules)?;
                Ok(self.validate_value(Some(single), &rules))
            }
        }
    }

    /// Converts a JSON-Schema-like document into field rules.
    ///
    /// See [`json_schema::convert_schema`].
    pub fn convert_schema(schema: &Value) -> Option<FieldRules> {
        json_schema::convert_schema(schema)
    }

    fn evaluate<'r>(
        &self,
        bag: ValueBag<'_>,
        fields: impl Iterator<Item = (&'r str, &'r RuleSet)>,
    ) -> IndexMap<String, Vec<ValidationError>> {
        fields
            .map(|(field, rules)| {
                let errors = self.evaluate_field(&bag, field, rules);
                (field.to_string(), errors)
            })
            .collect()
    }

    fn evaluate_field(
        &self,
        bag: &ValueBag<'_>,
        field: &str,
        rules: &RuleSet,
    ) -> Vec<ValidationError> {
        let value = bag.get(field);

        // An absent field explicitly marked optional has nothing to check.
        if !exists(value) && rules.required() == Some(false) {
            return Vec::new();
        }

        let mut errors = Vec::new();
        for (name, standard) in rules {
            let Some(rule) = self.registry.get(name) else {
                self.sink.emit(&Diagnostic::UnknownRule {
                    field: (!bag.is_single()).then(|| field.to_string()),
                    rule: name.clone(),
                });
                continue;
            };

            if !rule.check(value, standard, bag) {
                errors.push(ValidationError::new(
                    value.cloned(),
                    name.clone(),
                    standard.clone(),
                ));
            }
        }
        errors
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
