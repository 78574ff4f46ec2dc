//! The rule registry.
//!
//! A [`RuleRegistry`] maps [`RuleName`]s to predicates. Each validator owns its
//! registry; it is assembled once at construction (defaults merged with caller
//! overrides) and only read afterwards.
//!
//! # Example
//!
//! ```rust
//! use rulebook::{RuleName, RuleRegistry};
//! use serde_json::Value;
//!
//! let registry = RuleRegistry::defaults().with_rule(
//!     "even",
//!     |value, _, _| value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0),
//! );
//!
//! assert!(registry.contains(&RuleName::from("even")));
//! assert!(registry.contains(&RuleName::Email));
//! ```

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::rule_name::RuleName;
use crate::standard::Standard;
use crate::value_bag::ValueBag;

/// A named predicate.
///
/// `check` returns `false` to signal failure and `true` to pass. Implementations
/// must not panic on malformed input: a value or standard of the wrong shape is
/// a failure.
///
/// Any `Fn(Option<&Value>, &Standard, &ValueBag) -> bool` closure is a `Rule`.
pub trait Rule: Send + Sync {
    /// Checks `value` against `standard`. `bag` is the whole input.
    fn check(&self, value: Option<&Value>, standard: &Standard, bag: &ValueBag<'_>) -> bool;
}

impl<F> Rule for F
where
    F: Fn(Option<&Value>, &Standard, &ValueBag<'_>) -> bool + Send + Sync,
{
    fn check(&self, value: Option<&Value>, standard: &Standard, bag: &ValueBag<'_>) -> bool {
        self(value, standard, bag)
    }
}

/// A mapping from rule names to predicates.
///
/// Cloning is cheap; predicates are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<RuleName, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates a registry with no rules at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule.
    pub fn defaults() -> Self {
        let mut registry = Self::empty();
        for name in RuleName::BUILTIN.iter() {
            if let Some(rule) = builtin::rule_for(name) {
                registry.rules.insert(name.clone(), rule);
            }
        }
        registry
    }

    /// Adds or replaces a rule and returns self for chaining.
    pub fn with_rule<F>(mut self, name: impl Into<RuleName>, rule: F) -> Self
    where
        F: Fn(Option<&Value>, &Standard, &ValueBag<'_>) -> bool + Send + Sync + 'static,
    {
        self.insert(name, rule);
        self
    }

    /// Adds or replaces a rule.
    pub fn insert<F>(&mut self, name: impl Into<RuleName>, rule: F)
    where
        F: Fn(Option<&Value>, &Standard, &ValueBag<'_>) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    /// Adds or replaces a rule implemented as a type rather than a closure.
    pub fn insert_shared(&mut self, name: impl Into<RuleName>, rule: Arc<dyn Rule>) {
        self.rules.insert(name.into(), rule);
    }

    /// Merges `overrides` on top of this registry. Last write wins per name.
    pub fn merge(mut self, overrides: RuleRegistry) -> Self {
        for (name, rule) in overrides.rules {
            self.rules.insert(name, rule);
        }
        self
    }

    /// Returns the rule registered under `name`.
    pub fn get(&self, name: &RuleName) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    /// Returns true if a rule is registered under `name`.
    pub fn contains(&self, name: &RuleName) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterates registered rule names.
    pub fn names(&self) -> impl Iterator<Item = &RuleName> {
        self.rules.keys()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn always(result: bool) -> impl Fn(Option<&Value>, &Standard, &ValueBag<'_>) -> bool {
        move |_, _, _| result
    }

    #[test]
    fn test_defaults_cover_builtins() {
        let registry = RuleRegistry::defaults();
        assert_eq!(registry.len(), RuleName::BUILTIN.len());
        for name in RuleName::BUILTIN.iter() {
            assert!(registry.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = RuleRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get(&RuleName::Required).is_none());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let value = json!("x");
        let bag = ValueBag::Single(Some(&value));
        let standard = Standard::from(true);

        let registry = RuleRegistry::defaults()
            .merge(RuleRegistry::empty().with_rule("email", always(true)));

        let email = registry.get(&RuleName::Email).unwrap();
        assert!(email.check(Some(&value), &standard, &bag));
        assert_eq!(registry.len(), RuleName::BUILTIN.len());
    }

    #[test]
    fn test_merge_adds_new_rules() {
        let registry = RuleRegistry::defaults()
            .merge(RuleRegistry::empty().with_rule("never", always(false)));

        assert!(registry.contains(&RuleName::from("never")));
        assert_eq!(registry.len(), RuleName::BUILTIN.len() + 1);
    }

    #[test]
    fn test_names_in_registration_order() {
        let registry = RuleRegistry::defaults().with_rule("custom", always(true));
        let names: Vec<_> = registry.names().cloned().collect();

        assert_eq!(&names[..RuleName::BUILTIN.len()], &RuleName::BUILTIN[..]);
        assert_eq!(names.last(), Some(&RuleName::from("custom")));
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = RuleRegistry::empty().with_rule("custom", always(true));
        let debug = format!("{:?}", registry);
        assert!(debug.contains("custom"));
    }
}
