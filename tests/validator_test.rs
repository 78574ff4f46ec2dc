//! Tests for single-value and multi-field validation.

use std::sync::Arc;

use rulebook::{
    CollectingSink, Diagnostic, ErrorReport, FieldRules, Request, RuleName, RuleSet, Standard,
    ValidationError, Validator, ValidatorOptions,
};
use serde_json::{json, Value};

fn fields(value: &Value) -> &serde_json::Map<String, Value> {
    value.as_object().unwrap()
}

#[test]
fn test_valid_email() {
    let validator = Validator::new();
    let report = validator.validate_value(
        Some(&json!("bob@example.com")),
        &RuleSet::new().rule("email", true),
    );
    assert_eq!(report, ErrorReport::Single(vec![]));
}

#[test]
fn test_invalid_email() {
    let validator = Validator::new();
    let report = validator.validate_value(
        Some(&json!("not-an-email")),
        &RuleSet::new().rule("email", true),
    );

    assert_eq!(
        report,
        ErrorReport::Single(vec![ValidationError::new(
            Some(json!("not-an-email")),
            RuleName::Email,
            true,
        )])
    );
}

#[test]
fn test_multi_field_report() {
    let validator = Validator::new();
    let values = json!({"name": "Al", "age": 5});
    let rules = FieldRules::new()
        .field("name", RuleSet::new().rule("minlength", 3))
        .field("age", RuleSet::new().rule("minimum", 10));

    let report = validator.validate_fields(fields(&values), &rules);

    assert_eq!(
        report.to_json(),
        json!({
            "name": [{"value": "Al", "rule": "minlength", "standard": 3}],
            "age": [{"value": 5, "rule": "minimum", "standard": 10}]
        })
    );
}

#[test]
fn test_every_declared_field_has_an_entry() {
    let validator = Validator::new();
    let values = json!({"name": "Alice"});
    let rules = FieldRules::new()
        .field("name", RuleSet::new().rule("minlength", 3))
        .field("nickname", RuleSet::new().rule("required", false))
        .field("email", RuleSet::new().rule("required", true));

    let report = validator.validate_fields(fields(&values), &rules);
    let report = report.as_fields().unwrap();

    let names: Vec<_> = report.field_names().collect();
    assert_eq!(names, vec!["name", "nickname", "email"]);
    assert_eq!(report.get("name"), Some(&[][..]));
    assert_eq!(report.get("nickname"), Some(&[][..]));
    assert_eq!(report.get("email").unwrap().len(), 1);
}

#[test]
fn test_undeclared_values_are_ignored() {
    let validator = Validator::new();
    let values = json!({"name": "Alice", "extra": 1});
    let rules = FieldRules::new().field("name", RuleSet::new().rule("string", true));

    let report = validator.validate_fields(fields(&values), &rules);
    assert_eq!(report.as_fields().unwrap().len(), 1);
    assert!(report.is_valid());
}

#[test]
fn test_required_false_with_absent_value_is_empty() {
    let validator = Validator::new();
    for rules in [
        RuleSet::new().rule("required", false),
        RuleSet::new()
            .rule("required", false)
            .rule("number", true)
            .rule("minimum", 100),
        RuleSet::new().rule("minlength", 5).rule("required", false),
    ] {
        assert_eq!(
            validator.validate_value(None, &rules),
            ErrorReport::Single(vec![])
        );
    }
}

#[test]
fn test_required_true_with_absent_value() {
    let validator = Validator::new();
    let report = validator.validate_value(None, &RuleSet::new().rule("required", true));

    assert_eq!(
        report,
        ErrorReport::Single(vec![ValidationError::new(None, RuleName::Required, true)])
    );
}

#[test]
fn test_required_uses_existence_not_truthiness() {
    // The earliest rule compared truthiness, which rejected 0 and "".
    let validator = Validator::new();
    let rules = RuleSet::new().rule("required", true);

    for value in [json!(0), json!(""), json!(false)] {
        assert!(validator.validate_value(Some(&value), &rules).is_valid());
    }
    assert!(!validator.validate_value(Some(&json!(null)), &rules).is_valid());
}

#[test]
fn test_multiple_failures_in_declaration_order() {
    let validator = Validator::new();
    let rules = RuleSet::new()
        .rule("email", true)
        .rule("minlength", 10)
        .rule("regexp", "^x");

    let report = validator.validate_value(Some(&json!("abc")), &rules);
    let failed: Vec<_> = report
        .as_single()
        .unwrap()
        .iter()
        .map(|e| e.rule.as_str())
        .collect();
    assert_eq!(failed, vec!["email", "minlength", "regexp"]);
}

#[test]
fn test_standard_is_reported_as_declared() {
    let validator = Validator::new();
    let pattern = Standard::pattern(r"^\d{3}$").unwrap();
    let rules = RuleSet::new()
        .rule("regexp", pattern.clone())
        .rule("maximum", 2.5);

    let report = validator.validate_value(Some(&json!(7)), &rules);
    let errors = report.as_single().unwrap();

    assert_eq!(errors[0].standard, pattern);
    assert_eq!(errors[1].standard, Standard::from(2.5));
}

#[test]
fn test_unknown_rule_never_reported() {
    let sink = Arc::new(CollectingSink::new());
    let validator = Validator::with_options(ValidatorOptions::new().shared_sink(sink.clone()));
    let rules = RuleSet::new().rule("frobnicate", true).rule("number", true);

    let report = validator.validate_value(Some(&json!("x")), &rules);
    let failed: Vec<_> = report
        .as_single()
        .unwrap()
        .iter()
        .map(|e| e.rule.clone())
        .collect();

    assert_eq!(failed, vec![RuleName::Number]);
    assert_eq!(
        sink.diagnostics(),
        vec![Diagnostic::UnknownRule {
            field: None,
            rule: RuleName::from("frobnicate"),
        }]
    );
}

#[test]
fn test_malformed_standards_fail_closed() {
    let validator = Validator::new();
    let rules = RuleSet::new()
        .rule("enum", "not-a-list")
        .rule("regexp", 42)
        .rule("minimum", "ten");

    let report = validator.validate_value(Some(&json!("a")), &rules);
    assert_eq!(report.error_count(), 3);
}

#[test]
fn test_validate_is_idempotent() {
    let validator = Validator::new();
    let values = json!({"name": "Al", "age": "old"});
    let rules = FieldRules::new()
        .field("name", RuleSet::new().rule("minlength", 3))
        .field("age", RuleSet::new().rule("number", true).rule("minimum", 18));

    let first = validator.validate_fields(fields(&values), &rules);
    let second = validator.validate_fields(fields(&values), &rules);
    assert_eq!(first, second);
}

#[test]
fn test_request_union_matches_helpers() {
    let validator = Validator::new();
    let values = json!({"a": 1});
    let rules = FieldRules::new().field("a", RuleSet::new().rule("string", true));

    let via_request = validator.validate(Request::Fields {
        values: fields(&values),
        rules: &rules,
    });
    assert_eq!(via_request, validator.validate_fields(fields(&values), &rules));
}

#[test]
fn test_object_valued_scalar_in_single_mode() {
    // A mapping can still be validated as one value when requested explicitly.
    let validator = Validator::new();
    let value = json!({"nested": true});
    let rules = RuleSet::new().rule("required", true).rule("string", false);

    let report = validator.validate_value(Some(&value), &rules);
    assert!(report.is_valid());
    assert!(report.as_single().is_some());
}

#[test]
fn test_cross_field_rule() {
    let validator = Validator::with_options(ValidatorOptions::new().rule(
        "after",
        |value, standard, bag| {
            let (Some(value), Standard::Text(other)) = (value.and_then(Value::as_i64), standard)
            else {
                return false;
            };
            bag.get(other)
                .and_then(Value::as_i64)
                .is_some_and(|start| value > start)
        },
    ));
    let rules = FieldRules::new().field("end", RuleSet::new().rule("after", "start"));

    let ok = json!({"start": 1, "end": 5});
    assert!(validator.validate_fields(fields(&ok), &rules).is_valid());

    let bad = json!({"start": 9, "end": 5});
    let report = validator.validate_fields(fields(&bad), &rules);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_into_validation() {
    let validator = Validator::new();
    let values = json!({"name": "", "email": "nope"});
    let rules = FieldRules::new()
        .field("name", RuleSet::new().rule("minlength", 1))
        .field("email", RuleSet::new().rule("email", true));

    let errors = validator
        .validate_fields(fields(&values), &rules)
        .into_validation()
        .into_result()
        .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.on_field("email").len(), 1);
    assert_eq!(errors.with_rule(&RuleName::MinLength).len(), 1);
}

#[test]
fn test_minimum_is_exact_above_float_precision() {
    let validator = Validator::new();
    let rules = RuleSet::new().rule("minimum", 9_007_199_254_740_993_i64);

    let report = validator.validate_value(Some(&json!(9_007_199_254_740_992_i64)), &rules);
    assert_eq!(
        report,
        ErrorReport::Single(vec![ValidationError::new(
            Some(json!(9_007_199_254_740_992_i64)),
            RuleName::Minimum,
            9_007_199_254_740_993_i64,
        )])
    );

    let report = validator.validate_value(Some(&json!(9_007_199_254_740_993_i64)), &rules);
    assert!(report.is_valid());
}

#[test]
fn test_russians_rule_on_fields() {
    let validator = Validator::new();
    let values = json!({"city": "Москва", "country": "Russia", "zip": 101000});
    let rule = || RuleSet::new().rule("russians", true);
    let rules = FieldRules::new()
        .field("city", rule())
        .field("country", rule())
        .field("zip", rule());

    let report = validator.validate_fields(fields(&values), &rules);
    let report = report.as_fields().unwrap();

    assert_eq!(report.get("city"), Some(&[][..]));
    assert_eq!(report.get("country").unwrap()[0].rule, RuleName::Russians);
    assert_eq!(report.get("zip").unwrap().len(), 1);
}
