//! JSON Schema to rule conversion.
//!
//! Accepts the flat object subset of JSON Schema:
//!
//! ```json
//! {
//!   "properties": {
//!     "age": { "type": "integer", "minimum": 0 }
//!   },
//!   "required": ["age"]
//! }
//! ```
//!
//! | Schema keyword | Rule |
//! |---|---|
//! | `type: string / number / integer / boolean` | same name, standard `true` |
//! | `minimum` / `maximum` | `minimum` / `maximum` |
//! | `minLength` / `maxLength` | `minlength` / `maxlength` |
//! | `pattern` | `regexp` |
//! | `enum` | `enum` |
//!
//! Constraint values are carried over unchanged. Other keywords are dropped.
//! Every converted field gets an explicit `required` rule.

use serde_json::Value;

use crate::declaration::{FieldRules, RuleSet};
use crate::rule_name::RuleName;
use crate::standard::Standard;

/// Maps a JSON Schema `type` to the rule checking it.
pub fn type_to_rule(type_name: &str) -> Option<RuleName> {
    match type_name {
        "string" => Some(RuleName::String),
        "number" => Some(RuleName::Number),
        "integer" => Some(RuleName::Integer),
        "boolean" => Some(RuleName::Boolean),
        _ => None,
    }
}

/// Maps a JSON Schema constraint keyword to its rule.
pub fn keyword_to_rule(keyword: &str) -> Option<RuleName> {
    match keyword {
        "minimum" => Some(RuleName::Minimum),
        "maximum" => Some(RuleName::Maximum),
        "minLength" => Some(RuleName::MinLength),
        "maxLength" => Some(RuleName::MaxLength),
        "pattern" => Some(RuleName::Regexp),
        "enum" => Some(RuleName::Enum),
        _ => None,
    }
}

/// Converts a schema into field rules.
///
/// Returns `None` when `schema` is `null` or not an object. A schema without
/// `properties` converts to empty field rules.
///
/// # Example
///
/// ```rust
/// use rulebook::interop::convert_schema;
/// use serde_json::json;
///
/// let rules = convert_schema(&json!({
///     "properties": {"age": {"type": "integer", "minimum": 0}},
///     "required": ["age"]
/// }))
/// .unwrap();
///
/// assert_eq!(
///     rules.to_json(),
///     json!({"age": {"integer": true, "minimum": 0, "required": true}})
/// );
///
/// assert!(convert_schema(&json!(null)).is_none());
/// ```
pub fn convert_schema(schema: &Value) -> Option<FieldRules> {
    let schema = schema.as_object()?;

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Some(FieldRules::new());
    };

    Some(
        properties
            .iter()
            .map(|(field, property)| {
                let mut rules = convert_property(field, property);
                rules.insert(RuleName::Required, required.contains(&field.as_str()));
                (field.clone(), rules)
            })
            .collect(),
    )
}

fn convert_property(field: &str, property: &Value) -> RuleSet {
    let mut rules = RuleSet::new();
    let Some(constraints) = property.as_object() else {
        tracing::debug!(field, "Schema property is not an object, only `required` kept");
        return rules;
    };

    for (keyword, value) in constraints {
        if keyword == "type" {
            match value.as_str().and_then(type_to_rule) {
                Some(rule) => rules.insert(rule, true),
                None => {
                    tracing::debug!(field, schema_type = %value, "Unsupported schema type dropped");
                }
            }
            continue;
        }

        match keyword_to_rule(keyword) {
            Some(rule) => rules.insert(rule, Standard::from(value)),
            None => {
                tracing::debug!(field, keyword = keyword.as_str(), "Unmapped schema keyword dropped");
            }
        }
    }
    rules
}
