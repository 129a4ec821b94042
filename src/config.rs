//! Controllers described in TOML.
//!
//! ```toml
//! [first]
//! name = "temperature difference"
//! min = 0.0
//! max = 30.0
//! samples = 500
//! terms = [
//!     { term = "small", shape = { triangular = { a = 0.0, b = 0.0, c = 14.2857 } } },
//! ]
//!
//! [[rules]]
//! first = "small"
//! second = "small"
//! output = "very_low"
//! ```
//!
//! Term names are whatever the term enums deserialize from.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;
use crate::inference::Mamdani;
use crate::rules::Rule;
use crate::terms::{Shape, Term};
use crate::variable::{Domain, LinguisticVariable};

fn default_samples() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig<A, B, O> {
    pub first: VariableConfig<A>,
    pub second: VariableConfig<B>,
    pub output: VariableConfig<O>,
    pub rules: Vec<RuleConfig<A, B, O>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableConfig<K> {
    pub name: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
    pub terms: Vec<TermConfig<K>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermConfig<K> {
    pub term: K,
    pub shape: Shape,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig<A, B, O> {
    pub first: A,
    pub second: B,
    pub output: O,
}

impl<A, B, O> ControllerConfig<A, B, O>
where
    Self: DeserializeOwned,
{
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl<A, B, O> ControllerConfig<A, B, O>
where
    A: Term + fmt::Debug,
    B: Term + fmt::Debug,
    O: Term + fmt::Debug,
{
    /// Validates the configuration and builds the controller
    pub fn build(self) -> Result<Mamdani<A, B, O>> {
        let rules = self
            .rules
            .into_iter()
            .map(|rule| Rule::new(rule.first, rule.second, rule.output));

        Mamdani::new(
            self.first.build()?,
            self.second.build()?,
            self.output.build()?,
            rules,
        )
    }
}

impl<K: Term + fmt::Debug> VariableConfig<K> {
    pub fn build(self) -> Result<LinguisticVariable<K>> {
        let domain = Domain::new(self.min..=self.max, self.samples)?;
        let terms = self.terms.into_iter().map(|t| (t.term, t.shape));

        LinguisticVariable::new(self.name, domain, terms)
    }
}
