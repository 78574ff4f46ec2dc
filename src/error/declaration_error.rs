//! Errors raised while reading rule declarations from JSON.

/// A JSON rule declaration that could not be turned into rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeclarationError {
    /// A rule set was not a JSON object.
    #[error("rule set must be an object, got {0}")]
    NotARuleSet(&'static str),

    /// A field's rule set was not a JSON object.
    #[error("rules for field '{field}' must be an object, got {got}")]
    InvalidFieldRules {
        /// The offending field.
        field: String,
        /// JSON type name of what was found instead.
        got: &'static str,
    },
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
