// File: starter-forms/src/rules/registry.rs
// Purpose: Open registry building rules by name from JSON options

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::builtin::{Email, FieldCompare, Length, Number, Pattern, PatternOptions, Required};
use super::{BoxedRule, Rule};
use crate::error::{RuleError, RuleResult};

/// Builds a rule from its options
pub type RuleFactory = Arc<dyn Fn(&Value) -> RuleResult<BoxedRule> + Send + Sync>;

/// Rule factories keyed by name.
///
/// The registry is open: applications add their own rule types next to the
/// built-in `required`, `length`, `number`, `email`, `fieldCompare` and
/// `pattern`.
///
/// ```rust
/// use starter_forms::rules::RuleRegistry;
/// use serde_json::json;
///
/// let registry = RuleRegistry::with_builtins();
/// let rule = registry.build("length", &json!({"min": 3, "message": "Too short"}));
/// assert!(rule.is_ok());
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    factories: HashMap<String, RuleFactory>,
}

fn options<T: DeserializeOwned>(rule: &str, options: &Value) -> RuleResult<T> {
    let options = if options.is_null() {
        Value::Object(Default::default())
    } else {
        options.clone()
    };
    serde_json::from_value(options).map_err(|source| RuleError::InvalidOptions {
        rule: rule.to_string(),
        source,
    })
}

fn typed<T>(rule: &'static str) -> RuleFactory
where
    T: DeserializeOwned + Rule + 'static,
{
    Arc::new(move |value: &Value| Ok(options::<T>(rule, value)?.boxed()))
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert("required", typed::<Required>("required"));
        registry.insert("length", typed::<Length>("length"));
        registry.insert("number", typed::<Number>("number"));
        registry.insert("email", typed::<Email>("email"));
        registry.insert("fieldCompare", typed::<FieldCompare>("fieldCompare"));
        registry.insert(
            "pattern",
            Arc::new(|value: &Value| {
                let opts: PatternOptions = options("pattern", value)?;
                Ok(Pattern::new(opts)?.boxed())
            }),
        );
        registry
    }

    fn insert(&mut self, name: &str, factory: RuleFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Register (or replace) a named rule type
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Value) -> RuleResult<BoxedRule> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(rule = %name, "registering validation rule");
        self.factories.insert(name, Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Bind the rule `name` to `options`
    pub fn build(&self, name: &str, options: &Value) -> RuleResult<BoxedRule> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))?;
        factory(options)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
