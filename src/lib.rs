//! # Rulebook
//!
//! Declarative value validation: declare named rules per value (or per field),
//! run them, and get back every rule that failed.
//!
//! ## Overview
//!
//! A [`Validator`] owns a [`RuleRegistry`] of named predicates (`email`,
//! `regexp`, `enum`, type checks, length and bound checks, `required`) plus any
//! caller-supplied rules. Validation never stops at the first failure and never
//! returns `Err` for bad data: failures are collected into an [`ErrorReport`].
//!
//! A field that is absent and declared `required: false` is skipped entirely;
//! there is nothing meaningful to check on an absent optional value.
//!
//! ## Core Types
//!
//! - [`RuleSet`] / [`FieldRules`]: rule declarations, evaluated in declaration order
//! - [`Standard`]: the configuration value a rule is checked against
//! - [`ValidationError`]: one failed rule (`value`, `rule`, `standard`)
//! - [`ErrorReport`]: a list of errors, or a list per declared field
//! - [`convert_schema`]: turns a JSON-Schema-like document into [`FieldRules`]
//!
//! ## Example
//!
//! ```rust
//! use rulebook::{FieldRules, RuleSet, Validator};
//! use serde_json::json;
//!
//! let validator = Validator::new();
//!
//! let rules = FieldRules::new()
//!     .field("email", RuleSet::new().rule("required", true).rule("email", true))
//!     .field("nickname", RuleSet::new().rule("required", false).rule("minlength", 3));
//!
//! let values = json!({"email": "bob@example.com"});
//! let report = validator.validate_fields(values.as_object().unwrap(), &rules);
//! assert!(report.is_valid());
//!
//! // Schemas convert into the same declarations.
//! let from_schema = Validator::convert_schema(&json!({
//!     "properties": {"age": {"type": "integer", "minimum": 0}},
//!     "required": ["age"]
//! }))
//! .unwrap();
//!
//! let report = validator.validate_fields(json!({"age": -1}).as_object().unwrap(), &from_schema);
//! assert_eq!(report.error_count(), 1);
//! ```

pub mod declaration;
pub mod diagnostics;
pub mod error;
pub mod interop;
pub mod report;
pub mod rule_name;
pub mod rules;
pub mod standard;
pub mod validator;
pub mod value_bag;

pub use declaration::{FieldRules, RuleSet};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use error::{DeclarationError, FieldError, ValidationError, ValidationErrors};
pub use interop::convert_schema;
pub use report::{ErrorReport, FieldReport};
pub use rule_name::RuleName;
pub use rules::{Rule, RuleRegistry};
pub use standard::{Pattern, Standard};
pub use validator::{Request, ValidateOptions, Validator, ValidatorOptions};
pub use value_bag::{exists, ValueBag};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
