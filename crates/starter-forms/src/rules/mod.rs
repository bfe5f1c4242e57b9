// File: starter-forms/src/rules/mod.rs
// Purpose: Validation rule contract and per-field rule dispatch

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::field::{FieldModel, Fields};

pub mod builtin;
pub mod registry;

pub use builtin::{email, field_compare, length, number, pattern, required};
pub use builtin::{Email, FieldCompare, Length, Number, Pattern, PatternOptions, Required};
pub use registry::{RuleFactory, RuleRegistry};

/// Explicit outcome of a single rule
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Invalid { message: String },
    /// Valid, and the named fields must re-check themselves
    Valid { revalidate: Vec<String> },
}

impl Validation {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn valid() -> Self {
        Self::Valid {
            revalidate: Vec::new(),
        }
    }

    pub fn revalidate<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Valid {
            revalidate: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// A validation predicate over `(value, field, all_fields)`.
///
/// Returning `None` means the rule has no opinion. Rules must be pure apart
/// from reading other fields by name.
pub trait Rule: Send + Sync {
    fn check(&self, value: &Value, field: &FieldModel, fields: &Fields) -> Option<Validation>;

    fn boxed(self) -> BoxedRule
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<F> Rule for F
where
    F: Fn(&Value, &FieldModel, &Fields) -> Option<Validation> + Send + Sync,
{
    fn check(&self, value: &Value, field: &FieldModel, fields: &Fields) -> Option<Validation> {
        self(value, field, fields)
    }
}

pub type BoxedRule = Arc<dyn Rule>;

/// Ordered rules per field name. Order encodes priority.
pub type RuleTable = HashMap<String, Vec<BoxedRule>>;

/// Aggregated result of running a field's rules
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidity {
    pub valid: bool,
    pub message: String,
    pub revalidate: Vec<String>,
}

impl Default for FieldValidity {
    fn default() -> Self {
        Self {
            valid: true,
            message: String::new(),
            revalidate: Vec::new(),
        }
    }
}

/// Run the rules registered for `field` in order.
///
/// The first explicit `Invalid` wins and stops the run. A rule without an
/// opinion leaves the previous result in place. Without rules the field is
/// valid with an empty message.
pub fn validate_field(field: &FieldModel, rules: &RuleTable, fields: &Fields) -> FieldValidity {
    let mut result = FieldValidity::default();
    let Some(field_rules) = rules.get(&field.name) else {
        return result;
    };

    for rule in field_rules {
        match rule.check(&field.value, field, fields) {
            Some(Validation::Invalid { message }) => {
                return FieldValidity {
                    valid: false,
                    message,
                    revalidate: Vec::new(),
                };
            }
            Some(Validation::Valid { revalidate }) => {
                result = FieldValidity {
                    valid: true,
                    message: String::new(),
                    revalidate,
                };
            }
            None => {}
        }
    }
    result
}
