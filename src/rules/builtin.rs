//! Built-in rules.
//!
//! Every predicate here fails closed: a value or standard of the wrong shape
//! returns `false` instead of panicking.

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexBuilder};
use serde_json::{Number, Value};

use crate::rule_name::RuleName;
use crate::standard::{Pattern, Standard};
use crate::value_bag::{exists, ValueBag};

use super::Rule;

/// Pattern used by the `email` rule (matched case-insensitively).
pub const EMAIL_PATTERN: &str = r"^[a-z0-9._%-]+@[a-z0-9.-]*[a-z0-9]\.[a-z]{2,4}$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(EMAIL_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

/// Pattern used by the `russians` rule: Cyrillic letters and non-word characters.
pub const RUSSIANS_PATTERN: &str = r"^[А-Яа-яёЁ\W]+$";

static RUSSIANS_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(RUSSIANS_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

/// Returns the built-in predicate for `name`, or `None` for custom names.
pub fn rule_for(name: &RuleName) -> Option<Arc<dyn Rule>> {
    let rule: Arc<dyn Rule> = match name {
        RuleName::String => Arc::new(string),
        RuleName::Number => Arc::new(number),
        RuleName::Integer => Arc::new(integer),
        RuleName::Boolean => Arc::new(boolean),
        RuleName::Regexp => Arc::new(regexp),
        RuleName::Email => Arc::new(email),
        RuleName::Russians => Arc::new(russians),
        RuleName::Enum => Arc::new(one_of),
        RuleName::Minimum => Arc::new(minimum),
        RuleName::Maximum => Arc::new(maximum),
        RuleName::MinLength => Arc::new(min_length),
        RuleName::MaxLength => Arc::new(max_length),
        RuleName::Min => Arc::new(min),
        RuleName::Max => Arc::new(max),
        RuleName::Required => Arc::new(required),
        RuleName::Custom(_) => return None,
    };
    Some(rule)
}

/// Passes when "is a string" equals the boolean standard.
pub fn string(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    matches_shape(value.is_some_and(Value::is_string), standard)
}

/// Passes when "is a number" equals the boolean standard.
pub fn number(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    matches_shape(value.is_some_and(Value::is_number), standard)
}

/// Passes when "is a whole number" equals the boolean standard.
pub fn integer(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    matches_shape(value.is_some_and(is_whole_number), standard)
}

/// Passes when the value is a boolean and the standard is `true`.
pub fn boolean(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    standard.as_bool() == Some(true) && value.is_some_and(Value::is_boolean)
}

/// Passes when the value is a string matching the pattern.
///
/// A text standard is compiled on the spot; an invalid source fails.
pub fn regexp(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    let Some(text) = value.and_then(Value::as_str) else {
        return false;
    };
    match standard {
        Standard::Pattern(pattern) => pattern.is_match(text),
        Standard::Text(source) => Pattern::new(source).is_ok_and(|p| p.is_match(text)),
        _ => false,
    }
}

/// Passes when "looks like an email" equals the boolean standard.
pub fn email(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    let matched = value
        .and_then(Value::as_str)
        .is_some_and(|text| EMAIL_RE.is_match(text));
    matches_shape(matched, standard)
}

/// Passes when "is Cyrillic text" equals the boolean standard.
///
/// Non-strings fail regardless of the standard.
pub fn russians(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    let Some(text) = value.and_then(Value::as_str) else {
        return false;
    };
    matches_shape(RUSSIANS_RE.is_match(text), standard)
}

/// Passes when the value is a member of the list standard.
pub fn one_of(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    let (Some(value), Some(allowed)) = (value, standard.as_list()) else {
        return false;
    };
    allowed.iter().any(|candidate| same_value(candidate, value))
}

/// Passes when the integer-coerced value is at least the standard.
pub fn minimum(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(coerce_integer(value), standard, Ordering::is_ge)
}

/// Passes when the integer-coerced value is at most the standard.
pub fn maximum(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(coerce_integer(value), standard, Ordering::is_le)
}

/// Passes when the string has at least `standard` characters.
pub fn min_length(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(char_count(value), standard, Ordering::is_ge)
}

/// Passes when the string has at most `standard` characters.
pub fn max_length(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(char_count(value), standard, Ordering::is_le)
}

/// Passes when the string length, or the raw number, is at least the standard.
pub fn min(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(magnitude(value), standard, Ordering::is_ge)
}

/// Passes when the string length, or the raw number, is at most the standard.
pub fn max(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    holds(magnitude(value), standard, Ordering::is_le)
}

/// `true` requires the value to exist; `false` never constrains.
pub fn required(value: Option<&Value>, standard: &Standard, _: &ValueBag<'_>) -> bool {
    match standard.as_bool() {
        Some(true) => exists(value),
        Some(false) => true,
        None => false,
    }
}

fn matches_shape(actual: bool, standard: &Standard) -> bool {
    standard.as_bool() == Some(actual)
}

fn is_whole_number(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

/// A number that keeps integers exact past 2^53.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Quantity {
    Int(i128),
    Float(f64),
}

impl Quantity {
    fn of(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            return Some(Quantity::Int(i.into()));
        }
        if let Some(u) = n.as_u64() {
            return Some(Quantity::Int(u.into()));
        }
        n.as_f64().map(Quantity::Float)
    }

    fn as_f64(self) -> f64 {
        match self {
            Quantity::Int(i) => i as f64,
            Quantity::Float(f) => f,
        }
    }

    /// Integers compare exactly; a fractional side compares as `f64`.
    fn compare(self, other: Quantity) -> Option<Ordering> {
        match (self, other) {
            (Quantity::Int(a), Quantity::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// Compares `actual` against a numeric standard. Anything non-numeric fails.
fn holds(actual: Option<Quantity>, standard: &Standard, accept: fn(Ordering) -> bool) -> bool {
    let Standard::Number(bound) = standard else {
        return false;
    };
    actual
        .zip(Quantity::of(bound))
        .and_then(|(actual, bound)| actual.compare(bound))
        .is_some_and(accept)
}

/// Truncates a numeric value toward zero. Non-numbers have no coercion.
fn coerce_integer(value: Option<&Value>) -> Option<Quantity> {
    match value? {
        Value::Number(n) => match Quantity::of(n)? {
            Quantity::Float(f) => Some(Quantity::Float(f.trunc())),
            exact => Some(exact),
        },
        _ => None,
    }
}

fn char_count(value: Option<&Value>) -> Option<Quantity> {
    value
        .and_then(Value::as_str)
        .map(|s| Quantity::Int(s.chars().count() as i128))
}

fn magnitude(value: Option<&Value>) -> Option<Quantity> {
    match value? {
        Value::String(s) => Some(Quantity::Int(s.chars().count() as i128)),
        Value::Number(n) => Quantity::of(n),
        _ => None,
    }
}

/// JSON equality, except numbers compare by value (`1` equals `1.0`).
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
