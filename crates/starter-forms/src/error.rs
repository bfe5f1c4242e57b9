// File: starter-forms/src/error.rs
// Purpose: Errors raised while building validation rules

use thiserror::Error;

/// Rule construction failures. Validation failures themselves are data
/// ([`crate::Validation::Invalid`]) and never surface here.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("invalid options for rule '{rule}': {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type RuleResult<T> = Result<T, RuleError>;
