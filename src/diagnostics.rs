//! Operator-facing diagnostics.
//!
//! Some declaration mistakes (a rule name missing from the registry) do not
//! change a validation result but should still be visible to whoever runs the
//! validator. They are emitted as [`Diagnostic`]s into a [`DiagnosticSink`].
//! The default sink, [`TracingSink`], logs through `tracing`.

use std::fmt::{self, Display};

use parking_lot::Mutex;

use crate::rule_name::RuleName;

/// Something worth telling the operator about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A declared rule is not in the registry and was skipped.
    UnknownRule {
        /// The field it was declared on, or `None` in single-value mode.
        field: Option<String>,
        /// The unknown rule.
        rule: RuleName,
    },
}

impl Diagnostic {
    /// Returns the diagnostic as a human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownRule {
                field: Some(field),
                rule,
            } => write!(f, "validation rule '{}' does not exist (field '{}')", rule, field),
            Diagnostic::UnknownRule { field: None, rule } => {
                write!(f, "validation rule '{}' does not exist", rule)
            }
        }
    }
}

/// A destination for [`Diagnostic`]s.
///
/// Any `Fn(&Diagnostic)` closure is a sink:
///
/// ```rust
/// use rulebook::{Validator, ValidatorOptions};
///
/// let validator = Validator::with_options(
///     ValidatorOptions::new().sink(|d: &rulebook::Diagnostic| eprintln!("{}", d)),
/// );
/// ```
pub trait DiagnosticSink: Send + Sync {
    /// Receives one diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn emit(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Logs diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownRule { field, rule } => {
                tracing::warn!(
                    rule = %rule,
                    field = field.as_deref().unwrap_or("(value)"),
                    "Validation rule does not exist, skipping",
                );
            }
        }
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _: &Diagnostic) {}
}

/// Records diagnostics in memory.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rulebook::{CollectingSink, RuleSet, Validator, ValidatorOptions};
/// use serde_json::json;
///
/// let sink = Arc::new(CollectingSink::new());
/// let validator = Validator::with_options(ValidatorOptions::new().shared_sink(sink.clone()));
///
/// validator.validate_value(Some(&json!("x")), &RuleSet::new().rule("frobnicate", true));
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Returns the number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().push(diagnostic.clone());
    }
}
