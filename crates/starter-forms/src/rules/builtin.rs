// File: starter-forms/src/rules/builtin.rs
// Purpose: Built-in validation rules (required, length, number, email, fieldCompare, pattern)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{Rule, Validation};
use crate::error::{RuleError, RuleResult};
use crate::field::{FieldModel, Fields};
use crate::value::string_value;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*)@((?:[A-Za-z0-9_-]+\.)*[A-Za-z0-9_][A-Za-z0-9_-]{0,66})\.([a-zA-Z]{2,6}(?:\.[a-zA-Z]{2,3})?)$",
    )
    .unwrap()
});

fn default_true() -> bool {
    true
}

fn message_or(custom: &Option<String>, fallback: impl FnOnce() -> String) -> String {
    custom.clone().unwrap_or_else(fallback)
}

/// Fails when the value is empty, optionally after trimming
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Required {
    #[serde(default = "default_true")]
    pub trim: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn required() -> Required {
    Required {
        trim: true,
        message: None,
    }
}

impl Required {
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Required {
    fn check(&self, value: &Value, field: &FieldModel, _fields: &Fields) -> Option<Validation> {
        let text = string_value(value);
        let text = if self.trim { text.trim() } else { text.as_str() };
        if text.is_empty() {
            let message = message_or(&self.message, || format!("{} is required", field.label));
            return Some(Validation::invalid(message));
        }
        None
    }
}

/// Fails when the text length is outside `[min, max]`.
///
/// A bound of zero is treated as absent. Length counts characters.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Length {
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn length() -> Length {
    Length::default()
}

impl Length {
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Length {
    fn check(&self, value: &Value, field: &FieldModel, _fields: &Fields) -> Option<Validation> {
        let len = string_value(value).chars().count();
        if let Some(min) = self.min.filter(|min| *min > 0) {
            if len < min {
                let message = message_or(&self.message, || {
                    format!("{} must be a minimum of {} characters", field.label, min)
                });
                return Some(Validation::invalid(message));
            }
        }
        if let Some(max) = self.max.filter(|max| *max > 0) {
            if len > max {
                let message = message_or(&self.message, || {
                    format!("{} must be a maximum of {} characters", field.label, max)
                });
                return Some(Validation::invalid(message));
            }
        }
        None
    }
}

/// Fails when the value is not numeric or outside `[min, max]`.
///
/// Blank text reads as zero. Absent bounds are unbounded.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Number {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn number() -> Number {
    Number::default()
}

impl Number {
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn parse(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            _ => {
                let text = string_value(value);
                let text = text.trim();
                if text.is_empty() {
                    Some(0.0)
                } else {
                    text.parse::<f64>().ok()
                }
            }
        };
        parsed.filter(|n| n.is_finite())
    }
}

impl Rule for Number {
    fn check(&self, value: &Value, field: &FieldModel, _fields: &Fields) -> Option<Validation> {
        let in_range = Self::parse(value).map_or(false, |n| {
            self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
        });
        if !in_range {
            let message = message_or(&self.message, || format!("{} is an invalid number", field.label));
            return Some(Validation::invalid(message));
        }
        None
    }
}

/// Fails when the value is not an email address
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Email {
    #[serde(default)]
    pub message: Option<String>,
}

pub fn email() -> Email {
    Email::default()
}

impl Email {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Email {
    fn check(&self, value: &Value, field: &FieldModel, _fields: &Fields) -> Option<Validation> {
        if !EMAIL_REGEX.is_match(&string_value(value)) {
            let message = message_or(&self.message, || format!("{} must be a valid email", field.label));
            return Some(Validation::invalid(message));
        }
        None
    }
}

/// Fails when the value differs from another field's current value.
///
/// On success the other field is scheduled for revalidation so both sides
/// of a pair (password / confirm) agree. No opinion while the other field
/// is not registered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldCompare {
    pub field: String,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn field_compare(field: impl Into<String>) -> FieldCompare {
    FieldCompare {
        field: field.into(),
        message: None,
    }
}

impl FieldCompare {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for FieldCompare {
    fn check(&self, value: &Value, field: &FieldModel, fields: &Fields) -> Option<Validation> {
        let other = fields.get(&self.field)?;
        if &other.value != value {
            let message = message_or(&self.message, || {
                format!("{} must be same as {}", field.label, other.label)
            });
            return Some(Validation::invalid(message));
        }
        Some(Validation::revalidate([self.field.clone()]))
    }
}

/// Options accepted by the `pattern` rule factory
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatternOptions {
    pub pattern: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fails when the value does not match a regular expression
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: Regex,
    message: Option<String>,
}

pub fn pattern(pattern: &str) -> RuleResult<Pattern> {
    Pattern::new(PatternOptions {
        pattern: pattern.to_string(),
        message: None,
    })
}

impl Pattern {
    pub fn new(options: PatternOptions) -> RuleResult<Self> {
        let pattern = Regex::new(&options.pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: options.pattern.clone(),
            source,
        })?;
        Ok(Self {
            pattern,
            message: options.message,
        })
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Pattern {
    fn check(&self, value: &Value, field: &FieldModel, _fields: &Fields) -> Option<Validation> {
        if !self.pattern.is_match(&string_value(value)) {
            let message = message_or(&self.message, || {
                format!("{} must match pattern: {}", field.label, self.pattern.as_str())
            });
            return Some(Validation::invalid(message));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn field(name: &str, value: Value) -> FieldModel {
        FieldModel::new(name).value(value)
    }

    fn check(rule: &dyn Rule, value: Value) -> Option<Validation> {
        let f = field("field", value.clone());
        rule.check(&value, &f, &Fields::new())
    }

    #[rstest]
    #[case(json!(""), true, false)]
    #[case(json!("   "), true, false)]
    #[case(json!("  x  "), true, true)]
    #[case(json!("   "), false, true)]
    #[case(Value::Null, true, false)]
    #[case(json!([]), true, false)]
    #[case(json!(["a"]), true, true)]
    #[case(json!(0), true, true)]
    fn test_required(#[case] value: Value, #[case] trim: bool, #[case] valid: bool) {
        let rule = required().trim(trim);
        assert_eq!(check(&rule, value).is_none(), valid);
    }

    #[test]
    fn test_required_messages() {
        let f = FieldModel::new("name").label("Name");
        assert_eq!(
            required().check(&json!(""), &f, &Fields::new()),
            Some(Validation::invalid("Name is required"))
        );
        assert_eq!(
            required().message("Tell us your name").check(&json!(""), &f, &Fields::new()),
            Some(Validation::invalid("Tell us your name"))
        );
    }

    #[rstest]
    #[case(json!("ab"), false)]
    #[case(json!("abc"), true)]
    #[case(json!("abcde"), true)]
    #[case(json!("abcdef"), false)]
    #[case(json!("äöü"), true)]
    fn test_length(#[case] value: Value, #[case] valid: bool) {
        let rule = length().min(3).max(5);
        assert_eq!(check(&rule, value).is_none(), valid);
    }

    #[test]
    fn test_length_zero_bounds_are_unchecked() {
        let rule = length().min(0).max(0);
        assert!(check(&rule, json!("anything goes")).is_none());
    }

    #[test]
    fn test_length_messages() {
        let f = FieldModel::new("bio").label("Bio");
        let rule = length().min(2).max(4);
        assert_eq!(
            rule.check(&json!("a"), &f, &Fields::new()),
            Some(Validation::invalid("Bio must be a minimum of 2 characters"))
        );
        assert_eq!(
            rule.check(&json!("abcde"), &f, &Fields::new()),
            Some(Validation::invalid("Bio must be a maximum of 4 characters"))
        );
    }

    #[rstest]
    #[case(json!("42"), true)]
    #[case(json!(" 7.5 "), true)]
    #[case(json!(-3), true)]
    #[case(json!(""), true)]
    #[case(json!("abc"), false)]
    #[case(json!("NaN"), false)]
    #[case(json!("inf"), false)]
    #[case(json!(true), false)]
    #[case(json!(false), false)]
    fn test_number_unbounded(#[case] value: Value, #[case] valid: bool) {
        assert_eq!(check(&number(), value).is_none(), valid);
    }

    #[rstest]
    #[case(json!("0"), false)]
    #[case(json!("1"), true)]
    #[case(json!(10), true)]
    #[case(json!("10.5"), false)]
    fn test_number_bounds(#[case] value: Value, #[case] valid: bool) {
        let rule = number().min(1.0).max(10.0);
        assert_eq!(check(&rule, value).is_none(), valid);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last@mail.example.co.uk", true)]
    #[case("user-name_1@sub.domain.org", true)]
    #[case("user@localhost", false)]
    #[case("@example.com", false)]
    #[case("user@@example.com", false)]
    #[case("user example@example.com", false)]
    #[case("", false)]
    fn test_email(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(check(&email(), json!(value)).is_none(), valid);
    }

    #[test]
    fn test_field_compare() {
        let mut fields = Fields::new();
        fields.insert("password".to_string(), field("password", json!("a")));
        let confirm = FieldModel::new("confirm").label("Confirm").value("b");
        let rule = field_compare("password");

        assert_eq!(
            rule.check(&confirm.value, &confirm, &fields),
            Some(Validation::invalid("Confirm must be same as password"))
        );

        let confirm = confirm.value("a");
        let result = rule.check(&confirm.value, &confirm, &fields).unwrap();
        assert!(result.is_valid());
        assert_eq!(result, Validation::revalidate(["password"]));
    }

    #[test]
    fn test_field_compare_without_counterpart() {
        let rule = field_compare("password");
        assert_eq!(check(&rule, json!("a")), None);
    }

    #[test]
    fn test_pattern() {
        let rule = pattern(r"^\d{3}-\d{4}$").unwrap();
        assert!(check(&rule, json!("555-1234")).is_none());

        let f = FieldModel::new("phone");
        assert_eq!(
            rule.check(&json!("5551234"), &f, &Fields::new()),
            Some(Validation::invalid(r"phone must match pattern: ^\d{3}-\d{4}$"))
        );
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = pattern("(unclosed").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }
}
