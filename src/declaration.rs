//! Rule declarations.
//!
//! A [`RuleSet`] maps rule names to standards for one value; [`FieldRules`]
//! maps field names to rule sets. Both keep insertion order, which is the order
//! rules are evaluated and errors are reported in.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{value_type_name, DeclarationError};
use crate::rule_name::RuleName;
use crate::standard::Standard;

/// The rules declared for one value, in declaration order.
///
/// # Example
///
/// ```rust
/// use rulebook::{RuleName, RuleSet};
///
/// let rules = RuleSet::new()
///     .rule("required", true)
///     .rule("minlength", 3);
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules.required(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    rules: IndexMap<RuleName, Standard>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule and returns self for chaining.
    ///
    /// Declaring the same rule twice keeps its original position and replaces
    /// its standard.
    pub fn rule(mut self, name: impl Into<RuleName>, standard: impl Into<Standard>) -> Self {
        self.insert(name, standard);
        self
    }

    /// Adds or replaces a rule.
    pub fn insert(&mut self, name: impl Into<RuleName>, standard: impl Into<Standard>) {
        self.rules.insert(name.into(), standard.into());
    }

    /// Returns the standard declared for `name`.
    pub fn get(&self, name: &RuleName) -> Option<&Standard> {
        self.rules.get(name)
    }

    /// Returns the `required` flag if it is declared as a boolean.
    pub fn required(&self) -> Option<bool> {
        self.get(&RuleName::Required).and_then(Standard::as_bool)
    }

    /// Returns the number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleName, &Standard)> {
        self.rules.iter()
    }

    /// Reads a rule set from a JSON object such as `{"required": true, "minlength": 3}`.
    ///
    /// Standards are taken as-is; string standards for `regexp` are compiled
    /// when the rule runs.
    pub fn from_json(value: &Value) -> Result<Self, DeclarationError> {
        let map = value
            .as_object()
            .ok_or_else(|| DeclarationError::NotARuleSet(value_type_name(value)))?;

        Ok(map
            .iter()
            .map(|(name, standard)| (RuleName::from(name.as_str()), Standard::from(standard)))
            .collect())
    }

    /// Converts this rule set back to a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.rules
                .iter()
                .map(|(name, standard)| (name.as_str().to_string(), standard.to_value()))
                .collect(),
        )
    }
}

impl FromIterator<(RuleName, Standard)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (RuleName, Standard)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a RuleName, &'a Standard);
    type IntoIter = indexmap::map::Iter<'a, RuleName, Standard>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Rule sets per field, in declaration order.
///
/// # Example
///
/// ```rust
/// use rulebook::{FieldRules, RuleSet};
///
/// let rules = FieldRules::new()
///     .field("name", RuleSet::new().rule("minlength", 3))
///     .field("age", RuleSet::new().rule("minimum", 10));
///
/// let names: Vec<_> = rules.field_names().collect();
/// assert_eq!(names, vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldRules {
    fields: IndexMap<String, RuleSet>,
}

impl FieldRules {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field and returns self for chaining.
    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.insert(name, rules);
        self
    }

    /// Declares or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, rules: RuleSet) {
        self.fields.insert(name.into(), rules);
    }

    /// Returns the rule set of a field.
    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields.get(field)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates fields and their rule sets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Reads field rules from a JSON object of rule-set objects.
    pub fn from_json(value: &Value) -> Result<Self, DeclarationError> {
        let map = value
            .as_object()
            .ok_or_else(|| DeclarationError::NotARuleSet(value_type_name(value)))?;

        map.iter()
            .map(|(field, rules)| {
                if !rules.is_object() {
                    return Err(DeclarationError::InvalidFieldRules {
                        field: field.clone(),
                        got: value_type_name(rules),
                    });
                }
                Ok((field.clone(), RuleSet::from_json(rules)?))
            })
            .collect()
    }

    /// Converts these field rules back to JSON.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(field, rules)| (field.clone(), rules.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, RuleSet)> for FieldRules {
    fn from_iter<I: IntoIterator<Item = (String, RuleSet)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
