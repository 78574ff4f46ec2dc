//! Rule identifiers.
//!
//! A [`RuleName`] names one predicate in a [`RuleRegistry`](crate::RuleRegistry).
//! Built-in rules get their own variants; anything else (caller extensions or
//! plain typos) lands in [`RuleName::Custom`] and is resolved against the
//! registry at evaluation time.

use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The name of a validation rule.
///
/// Parsing never fails: unrecognized names become [`RuleName::Custom`].
///
/// # Example
///
/// ```rust
/// use rulebook::RuleName;
///
/// assert_eq!(RuleName::from("minlength"), RuleName::MinLength);
/// assert_eq!(RuleName::from("frobnicate").as_str(), "frobnicate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleName {
    /// Value is a string.
    String,
    /// Value is a number.
    Number,
    /// Value is a number with no fractional part.
    Integer,
    /// Value is a boolean.
    Boolean,
    /// Value matches a regular expression.
    Regexp,
    /// Value looks like an email address.
    Email,
    /// Value is written in Cyrillic letters and punctuation only.
    Russians,
    /// Value is one of a list of allowed values.
    Enum,
    /// Integer-coerced value is at least the standard.
    Minimum,
    /// Integer-coerced value is at most the standard.
    Maximum,
    /// String has at least the given number of characters.
    MinLength,
    /// String has at most the given number of characters.
    MaxLength,
    /// String length or raw number is at least the standard.
    Min,
    /// String length or raw number is at most the standard.
    Max,
    /// Value must exist.
    Required,
    /// Any other rule name.
    Custom(String),
}

impl RuleName {
    /// Every built-in rule name, in registry order.
    pub const BUILTIN: [RuleName; 15] = [
        RuleName::String,
        RuleName::Number,
        RuleName::Integer,
        RuleName::Boolean,
        RuleName::Regexp,
        RuleName::Email,
        RuleName::Russians,
        RuleName::Enum,
        RuleName::Minimum,
        RuleName::Maximum,
        RuleName::MinLength,
        RuleName::MaxLength,
        RuleName::Min,
        RuleName::Max,
        RuleName::Required,
    ];

    /// Returns the canonical spelling of this rule name.
    pub fn as_str(&self) -> &str {
        match self {
            RuleName::String => "string",
            RuleName::Number => "number",
            RuleName::Integer => "integer",
            RuleName::Boolean => "boolean",
            RuleName::Regexp => "regexp",
            RuleName::Email => "email",
            RuleName::Russians => "russians",
            RuleName::Enum => "enum",
            RuleName::Minimum => "minimum",
            RuleName::Maximum => "maximum",
            RuleName::MinLength => "minlength",
            RuleName::MaxLength => "maxlength",
            RuleName::Min => "min",
            RuleName::Max => "max",
            RuleName::Required => "required",
            RuleName::Custom(name) => name,
        }
    }

    /// Returns true for names not covered by a built-in variant.
    pub fn is_custom(&self) -> bool {
        matches!(self, RuleName::Custom(_))
    }
}

impl From<&str> for RuleName {
    fn from(name: &str) -> Self {
        match name {
            "string" => RuleName::String,
            "number" => RuleName::Number,
            "integer" => RuleName::Integer,
            "boolean" => RuleName::Boolean,
            "regexp" => RuleName::Regexp,
            "email" => RuleName::Email,
            "russians" => RuleName::Russians,
            "enum" => RuleName::Enum,
            "minimum" => RuleName::Minimum,
            "maximum" => RuleName::Maximum,
            "minlength" => RuleName::MinLength,
            "maxlength" => RuleName::MaxLength,
            "min" => RuleName::Min,
            "max" => RuleName::Max,
            "required" => RuleName::Required,
            other => RuleName::Custom(other.to_string()),
        }
    }
}

impl From<String> for RuleName {
    fn from(name: String) -> Self {
        match RuleName::from(name.as_str()) {
            RuleName::Custom(_) => RuleName::Custom(name),
            builtin => builtin,
        }
    }
}

impl FromStr for RuleName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RuleName::from(s))
    }
}

impl Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for name in RuleName::BUILTIN.iter() {
            assert_eq!(&RuleName::from(name.as_str()), name);
            assert!(!name.is_custom());
        }
    }

    #[test]
    fn test_unknown_name_is_custom() {
        let name: RuleName = "frobnicate".parse().unwrap();
        assert_eq!(name, RuleName::Custom("frobnicate".to_string()));
        assert!(name.is_custom());
        assert_eq!(name.to_string(), "frobnicate");
    }

    #[test]
    fn test_legacy_names_are_builtin() {
        assert_eq!(RuleName::from("russians"), RuleName::Russians);
        assert_eq!(RuleName::from("min"), RuleName::Min);
        assert!(RuleName::BUILTIN.contains(&RuleName::Russians));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(RuleName::from("minLength").is_custom());
        assert!(RuleName::from("Required").is_custom());
    }

    #[test]
    fn test_owned_string_conversion() {
        assert_eq!(RuleName::from("email".to_string()), RuleName::Email);
        assert_eq!(
            RuleName::from("phone".to_string()),
            RuleName::Custom("phone".to_string())
        );
    }
}
