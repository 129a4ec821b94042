use std::fmt;
use std::iter;

use fixed_map::Map as FixedMap;
use tracing::{debug, debug_span, trace, warn};

use crate::error::{FuzzyError, Result};
use crate::math::centroid;
use crate::ops::ProductionLink;
use crate::outputs::{FuzzifiedInput, RuleActivation, Trace};
use crate::rules::{Rule, RuleBase};
use crate::terms::Term;
use crate::variable::{Degrees, LinguisticVariable};

/// Two-input, one-output Mamdani controller.
///
/// Rule premises are combined with min, consequents are clipped with min and
/// aggregated with max, and the result is defuzzified by its centroid. The
/// controller is immutable once built, so [`Mamdani::infer`] can be called
/// from several threads through a shared reference.
pub struct Mamdani<A: Term, B: Term, O: Term> {
    first: LinguisticVariable<A>,
    second: LinguisticVariable<B>,
    output: LinguisticVariable<O>,
    rules: RuleBase<A, B, O>,
    // Output term curves over the output domain, sampled once
    consequents: FixedMap<O, Vec<f64>>,
}

impl<A, B, O> Mamdani<A, B, O>
where
    A: Term + fmt::Debug,
    B: Term + fmt::Debug,
    O: Term + fmt::Debug,
{
    pub fn new(
        first: LinguisticVariable<A>,
        second: LinguisticVariable<B>,
        output: LinguisticVariable<O>,
        rules: impl IntoIterator<Item = Rule<A, B, O>>,
    ) -> Result<Self> {
        let rules = RuleBase::new(rules, &first, &second, &output)?;
        let mut consequents = FixedMap::new();

        for (term, shape) in output.terms().iter() {
            consequents.insert(term, shape.sample(output.domain().samples()));
        }

        Ok(Self {
            first,
            second,
            output,
            rules,
            consequents,
        })
    }

    /// Runs one inference and returns the defuzzified output along with
    /// the intermediate results.
    ///
    /// Inputs that belong to no term at all are not an error: no rule fires,
    /// the aggregated set is all zeros and the returned value is `0.0`. The
    /// same happens when the firing rules' consequents are zero across the
    /// output domain.
    /// [`Trace::is_degenerate`] tells that case apart from a genuine centroid.
    pub fn infer(&self, first_input: f64, second_input: f64) -> Result<(f64, Trace<'_, A, B, O>)> {
        let _span = debug_span!("infer", first = first_input, second = second_input).entered();

        // Fuzzification
        let first = self.first.fuzzify(first_input);
        let second = self.second.fuzzify(second_input);

        debug!(first = ?first, second = ?second, "fuzzified inputs");

        let universe = self.output.domain().samples();
        let mut aggregated = vec![0.; universe.len()];
        let mut activations = Vec::with_capacity(self.rules.len());

        for rule in self.rules.iter() {
            // Rules that do not fire still go through clipping and
            // aggregation; they just contribute zeros.
            let strength = f64::min(
                degree(&first, &self.first, rule.first)?,
                degree(&second, &self.second, rule.second)?,
            );
            let curve = self
                .consequents
                .get(rule.consequent)
                .ok_or_else(|| FuzzyError::UnknownTerm {
                    variable: self.output.name().to_owned(),
                    term: format!("{:?}", rule.consequent),
                })?;
            let clipped: Vec<f64> = ProductionLink::Min
                .call(curve.iter().copied(), iter::repeat(strength))
                .into_iter()
                .collect();

            aggregated = ProductionLink::Max
                .call(aggregated, clipped.iter().copied())
                .into_iter()
                .collect();

            trace!(
                first = ?rule.first,
                second = ?rule.second,
                consequent = ?rule.consequent,
                strength,
                "rule activation"
            );

            activations.push(RuleActivation {
                rule: *rule,
                strength,
                clipped,
            });
        }

        let value = centroid(universe, &aggregated);
        let trace = Trace {
            first: FuzzifiedInput {
                name: self.first.name(),
                value: first_input,
                degrees: first,
            },
            second: FuzzifiedInput {
                name: self.second.name(),
                value: second_input,
                degrees: second,
            },
            output_name: self.output.name(),
            universe,
            activations,
            aggregated,
            value,
        };

        if trace.is_degenerate() {
            warn!(
                first = first_input,
                second = second_input,
                fired = trace.any_fired(),
                "aggregated output set is empty, defuzzified output falls back to 0"
            );
        }

        debug!(value, "defuzzified output");

        Ok((value, trace))
    }
}

impl<A: Term, B: Term, O: Term> Mamdani<A, B, O> {
    pub fn first(&self) -> &LinguisticVariable<A> {
        &self.first
    }

    pub fn second(&self) -> &LinguisticVariable<B> {
        &self.second
    }

    pub fn output(&self) -> &LinguisticVariable<O> {
        &self.output
    }

    pub fn rules(&self) -> &RuleBase<A, B, O> {
        &self.rules
    }
}

fn degree<K: Term + fmt::Debug>(degrees: &Degrees<K>, var: &LinguisticVariable<K>, term: K) -> Result<f64> {
    degrees.get(term).ok_or_else(|| FuzzyError::UnknownTerm {
        variable: var.name().to_owned(),
        term: format!("{term:?}"),
    })
}
