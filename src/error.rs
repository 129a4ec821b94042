//! Error types for building controllers.
//!
//! Inference itself never fails on numeric grounds: an all-zero aggregated
//! output set defuzzifies to `0.0`. Every variant here is a configuration
//! problem caught while assembling domains, variables, or the rule table.

use thiserror::Error;

/// Result type alias for controller construction and inference.
pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Debug, Error)]
pub enum FuzzyError {
    /// Domain bounds or sample count that cannot form an increasing grid
    #[error("invalid domain [{min}, {max}] with {samples} samples: {reason}")]
    InvalidDomain {
        min: f64,
        max: f64,
        samples: usize,
        reason: &'static str,
    },

    #[error("variable `{0}` has no terms")]
    NoTerms(String),

    #[error("term `{term}` defined twice in variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    /// A rule references a term its variable does not define
    #[error("term `{term}` is not defined by variable `{variable}`")]
    UnknownTerm { variable: String, term: String },

    /// No consequent for an antecedent pair
    #[error("no rule for ({first}, {second})")]
    MissingRule { first: String, second: String },

    #[error("rule ({first}, {second}) defined more than once")]
    DuplicateRule { first: String, second: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
