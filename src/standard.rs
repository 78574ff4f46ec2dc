//! Rule standards.
//!
//! A [`Standard`] is the configuration value a rule is checked against: a flag,
//! a threshold, a pattern or a list of allowed values. Standards are stored
//! exactly as declared and reported back unchanged in every
//! [`ValidationError`](crate::ValidationError).

use std::fmt::{self, Display};

use regex::Regex;
use serde_json::{Number, Value};

/// A compiled regular expression that remembers its source.
///
/// Two patterns are equal when their sources are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern from its source.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// The expected or compliant configuration of a rule.
///
/// Which variant a rule accepts depends on the rule. A rule handed a variant it
/// does not understand fails rather than panicking.
///
/// # Example
///
/// ```rust
/// use rulebook::Standard;
/// use serde_json::json;
///
/// assert_eq!(Standard::from(json!(3)), Standard::from(3));
/// assert_eq!(Standard::from(true).to_value(), json!(true));
///
/// let pattern = Standard::pattern(r"^\d+$").unwrap();
/// assert_eq!(pattern.to_value(), json!(r"^\d+$"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Standard {
    /// A flag such as `required: true`.
    Bool(bool),
    /// A numeric threshold.
    Number(Number),
    /// Free text, e.g. an uncompiled pattern source.
    Text(String),
    /// A compiled pattern.
    Pattern(Pattern),
    /// A list of allowed values.
    List(Vec<Value>),
    /// Anything else (`null`, objects). Kept so it can be reported back as-is.
    Other(Value),
}

impl Standard {
    /// Compiles `source` into a [`Standard::Pattern`].
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        Pattern::new(source).map(Standard::Pattern)
    }

    /// Returns the flag if this is a [`Standard::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Standard::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the threshold as `f64` if this is a [`Standard::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Standard::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the list if this is a [`Standard::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Standard::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts this standard to its JSON form. Patterns become their source.
    pub fn to_value(&self) -> Value {
        match self {
            Standard::Bool(b) => Value::Bool(*b),
            Standard::Number(n) => Value::Number(n.clone()),
            Standard::Text(s) => Value::String(s.clone()),
            Standard::Pattern(p) => Value::String(p.as_str().to_string()),
            Standard::List(items) => Value::Array(items.clone()),
            Standard::Other(v) => v.clone(),
        }
    }
}

impl From<Value> for Standard {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Standard::Bool(b),
            Value::Number(n) => Standard::Number(n),
            Value::String(s) => Standard::Text(s),
            Value::Array(items) => Standard::List(items),
            other => Standard::Other(other),
        }
    }
}

impl From<&Value> for Standard {
    fn from(value: &Value) -> Self {
        Standard::from(value.clone())
    }
}

impl From<bool> for Standard {
    fn from(b: bool) -> Self {
        Standard::Bool(b)
    }
}

impl From<i64> for Standard {
    fn from(n: i64) -> Self {
        Standard::Number(n.into())
    }
}

impl From<u64> for Standard {
    fn from(n: u64) -> Self {
        Standard::Number(n.into())
    }
}

impl From<i32> for Standard {
    fn from(n: i32) -> Self {
        Standard::Number(n.into())
    }
}

impl From<usize> for Standard {
    fn from(n: usize) -> Self {
        Standard::Number((n as u64).into())
    }
}

impl From<f64> for Standard {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON number form.
        match Number::from_f64(n) {
            Some(n) => Standard::Number(n),
            None => Standard::Other(Value::Null),
        }
    }
}

impl From<&str> for Standard {
    fn from(s: &str) -> Self {
        Standard::Text(s.to_string())
    }
}

impl From<String> for Standard {
    fn from(s: String) -> Self {
        Standard::Text(s)
    }
}

impl From<Pattern> for Standard {
    fn from(p: Pattern) -> Self {
        Standard::Pattern(p)
    }
}

impl From<Regex> for Standard {
    fn from(regex: Regex) -> Self {
        Standard::Pattern(regex.into())
    }
}

impl From<Vec<Value>> for Standard {
    fn from(items: Vec<Value>) -> Self {
        Standard::List(items)
    }
}

impl Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standard::Pattern(p) => write!(f, "/{}/", p.as_str()),
            other => write!(f, "{}", other.to_value()),
        }
    }
}
