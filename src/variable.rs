use std::fmt;
use std::ops::RangeInclusive;

use fixed_map::Map as FixedMap;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::terms::{Shape, Term, Terms};

/// The sampled universe of discourse of one variable: evenly spaced,
/// strictly increasing, bounds included.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    min_u: f64,
    max_u: f64,
    universe: Vec<f64>,
}

impl Domain {
    pub fn new(universe_range: RangeInclusive<f64>, samples: usize) -> Result<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();
        let invalid = |reason| FuzzyError::InvalidDomain {
            min: min_u,
            max: max_u,
            samples,
            reason,
        };

        if !min_u.is_finite() || !max_u.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if min_u >= max_u {
            return Err(invalid("lower bound must be below upper bound"));
        }
        if samples < 2 {
            return Err(invalid("at least two samples are required"));
        }

        let universe: Vec<f64> = Linspace::new(min_u, max_u, samples).collect();

        // Too many samples for the width of the range collapses neighbours
        if universe.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("samples are not strictly increasing"));
        }

        Ok(Self {
            min_u,
            max_u,
            universe,
        })
    }

    pub fn min(&self) -> f64 {
        self.min_u
    }

    pub fn max(&self) -> f64 {
        self.max_u
    }

    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.universe
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min_u..=self.max_u).contains(&x)
    }
}

/// A named set of terms over one domain.
pub struct LinguisticVariable<K: Term> {
    name: String,
    domain: Domain,
    terms: Terms<K>,
}

impl<K: Term + fmt::Debug> LinguisticVariable<K> {
    /// Builds a variable from an explicit list of terms. Every term must be
    /// listed once and at least one term is required.
    pub fn new(name: impl Into<String>, domain: Domain, terms: impl IntoIterator<Item = (K, Shape)>) -> Result<Self> {
        let name = name.into();
        let mut map = Terms::new();

        for (term, shape) in terms {
            if map.insert(term, shape).is_some() {
                return Err(FuzzyError::DuplicateTerm {
                    variable: name,
                    term: format!("{term:?}"),
                });
            }
        }

        if map.is_empty() {
            return Err(FuzzyError::NoTerms(name));
        }

        Ok(Self {
            name,
            domain,
            terms: map,
        })
    }
}

impl<K: Term> LinguisticVariable<K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn terms(&self) -> &Terms<K> {
        &self.terms
    }

    pub fn has_term(&self, term: K) -> bool {
        self.terms.contains(term)
    }

    /// Degree of membership of a crisp value under every term
    pub fn fuzzify(&self, x: f64) -> Degrees<K> {
        let mut degrees = FixedMap::new();

        for (term, shape) in self.terms.iter() {
            degrees.insert(term, shape.membership(x));
        }

        Degrees(degrees)
    }

    /// A term's membership curve sampled over the domain
    pub fn curve(&self, term: K) -> Option<Vec<f64>> {
        self.terms
            .get(term)
            .map(|shape| shape.sample(self.domain.samples()))
    }
}

impl<K: Term + fmt::Debug> fmt::Debug for LinguisticVariable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinguisticVariable")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("terms", &self.terms)
            .finish()
    }
}

/// Membership degrees of one crisp input, keyed by term.
pub struct Degrees<K: Term>(FixedMap<K, f64>);

impl<K: Term> Degrees<K> {
    pub fn get(&self, term: K) -> Option<f64> {
        self.0.get(term).copied()
    }

    /// Terms in declaration order of `K`
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.0.iter().map(|(term, degree)| (term, *degree))
    }

    /// True when the input belongs to none of the terms
    pub fn is_empty_set(&self) -> bool {
        self.0.values().all(|degree| *degree == 0.)
    }
}

impl<K: Term + fmt::Debug> fmt::Debug for Degrees<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
