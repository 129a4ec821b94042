use std::fmt;

use crate::rules::Rule;
use crate::terms::Term;
use crate::variable::Degrees;

/// How strongly one rule fired and what it contributed to the output.
#[derive(Clone, Debug)]
pub struct RuleActivation<A, B, O> {
    pub rule: Rule<A, B, O>,
    /// min of the two antecedent degrees
    pub strength: f64,
    /// The consequent curve clipped at `strength`, over the output domain
    pub clipped: Vec<f64>,
}

/// One input of an inference run, with its fuzzified degrees.
pub struct FuzzifiedInput<'m, K: Term> {
    pub(crate) name: &'m str,
    pub(crate) value: f64,
    pub(crate) degrees: Degrees<K>,
}

impl<K: Term> FuzzifiedInput<'_, K> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn degrees(&self) -> &Degrees<K> {
        &self.degrees
    }
}

/// Everything computed during one call to
/// [`Mamdani::infer`](crate::inference::Mamdani::infer).
///
/// Displays as a human readable report.
pub struct Trace<'m, A: Term, B: Term, O: Term> {
    pub(crate) first: FuzzifiedInput<'m, A>,
    pub(crate) second: FuzzifiedInput<'m, B>,
    pub(crate) output_name: &'m str,
    pub(crate) universe: &'m [f64],
    pub(crate) activations: Vec<RuleActivation<A, B, O>>,
    pub(crate) aggregated: Vec<f64>,
    pub(crate) value: f64,
}

impl<A: Term, B: Term, O: Term> Trace<'_, A, B, O> {
    pub fn first(&self) -> &FuzzifiedInput<'_, A> {
        &self.first
    }

    pub fn second(&self) -> &FuzzifiedInput<'_, B> {
        &self.second
    }

    pub fn activations(&self) -> &[RuleActivation<A, B, O>] {
        &self.activations
    }

    /// Activation of the rule for `(first, second)`, if any
    pub fn activation(&self, first: A, second: B) -> Option<&RuleActivation<A, B, O>>
    where
        A: PartialEq,
        B: PartialEq,
    {
        self.activations
            .iter()
            .find(|act| act.rule.first == first && act.rule.second == second)
    }

    /// Output domain samples the aggregated set is defined over
    pub fn universe(&self) -> &[f64] {
        self.universe
    }

    /// Pointwise max of every rule's clipped consequent
    pub fn aggregated(&self) -> &[f64] {
        &self.aggregated
    }

    /// The centroid of the aggregated set
    pub fn value(&self) -> f64 {
        self.value
    }

    /// True when the aggregated set is zero everywhere, in which case the
    /// value is the zero fallback rather than a centroid.
    ///
    /// This also covers rules that fire into a consequent lying entirely
    /// outside the output domain. See [`Trace::any_fired`] for the rules alone.
    pub fn is_degenerate(&self) -> bool {
        self.aggregated.iter().all(|m| *m == 0.)
    }

    /// True when at least one rule has a non-zero activation
    pub fn any_fired(&self) -> bool {
        self.activations.iter().any(|act| act.strength > 0.)
    }
}

impl<A, B, O> fmt::Display for Trace<'_, A, B, O>
where
    A: Term + fmt::Display,
    B: Term + fmt::Display,
    O: Term + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_degrees(f, &self.first)?;
        writeln!(f)?;
        write_degrees(f, &self.second)?;
        writeln!(f)?;

        writeln!(f, "Rule activations:")?;
        for act in &self.activations {
            writeln!(
                f,
                "  {} is {} and {} is {} => {} is {}: {:.4}",
                self.first.name,
                act.rule.first,
                self.second.name,
                act.rule.second,
                self.output_name,
                act.rule.consequent,
                act.strength,
            )?;
        }
        writeln!(f)?;

        if !self.any_fired() {
            writeln!(f, "No rule fired, the aggregated output set is empty.")?;
        } else if self.is_degenerate() {
            writeln!(f, "Rules fired outside the output domain, the aggregated output set is empty.")?;
        }

        write!(f, "Defuzzified {} (centroid): {:.2}", self.output_name, self.value)
    }
}

fn write_degrees<K: Term + fmt::Display>(f: &mut fmt::Formatter<'_>, input: &FuzzifiedInput<'_, K>) -> fmt::Result {
    writeln!(f, "Membership degrees for {} = {}:", input.name, input.value)?;

    for (term, degree) in input.degrees.iter() {
        writeln!(f, "  {term}: {degree:.4}")?;
    }

    Ok(())
}
