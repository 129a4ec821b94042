use std::fmt;

use fixed_map::Map as FixedMap;

use crate::error::{FuzzyError, Result};
use crate::terms::Term;
use crate::variable::LinguisticVariable;

/// `first AND second => consequent`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule<A, B, O> {
    pub first: A,
    pub second: B,
    pub consequent: O,
}

impl<A, B, O> Rule<A, B, O> {
    pub fn new(first: A, second: B, consequent: O) -> Self {
        Self {
            first,
            second,
            consequent,
        }
    }
}

impl<A, B, O> From<(A, B, O)> for Rule<A, B, O> {
    fn from((first, second, consequent): (A, B, O)) -> Self {
        Self::new(first, second, consequent)
    }
}

/// A complete decision table over two input variables.
///
/// Every pair of terms of the two inputs maps to exactly one output term.
/// This is checked when the table is built.
pub struct RuleBase<A: Term, B: Term, O: Term> {
    rules: Vec<Rule<A, B, O>>,
    table: FixedMap<A, FixedMap<B, O>>,
}

impl<A, B, O> RuleBase<A, B, O>
where
    A: Term + fmt::Debug,
    B: Term + fmt::Debug,
    O: Term + fmt::Debug,
{
    pub fn new(
        rules: impl IntoIterator<Item = Rule<A, B, O>>,
        first: &LinguisticVariable<A>,
        second: &LinguisticVariable<B>,
        output: &LinguisticVariable<O>,
    ) -> Result<Self> {
        let mut table: FixedMap<A, FixedMap<B, O>> = FixedMap::new();
        let mut kept = Vec::new();

        for rule in rules {
            check_term(first, rule.first)?;
            check_term(second, rule.second)?;
            check_term(output, rule.consequent)?;

            if !table.contains_key(rule.first) {
                table.insert(rule.first, FixedMap::new());
            }

            if let Some(row) = table.get_mut(rule.first) {
                if row.insert(rule.second, rule.consequent).is_some() {
                    return Err(FuzzyError::DuplicateRule {
                        first: format!("{:?}", rule.first),
                        second: format!("{:?}", rule.second),
                    });
                }
            }

            kept.push(rule);
        }

        let this = Self { rules: kept, table };

        for a in first.terms().keys() {
            for b in second.terms().keys() {
                this.lookup(a, b)?;
            }
        }

        Ok(this)
    }

    /// Consequent of `first AND second`. Argument order matters.
    pub fn lookup(&self, first: A, second: B) -> Result<O> {
        self.table
            .get(first)
            .and_then(|row| row.get(second))
            .copied()
            .ok_or_else(|| FuzzyError::MissingRule {
                first: format!("{first:?}"),
                second: format!("{second:?}"),
            })
    }
}

impl<A: Term, B: Term, O: Term> RuleBase<A, B, O> {
    /// Rules in the order they were given
    pub fn iter(&self) -> impl Iterator<Item = &Rule<A, B, O>> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn check_term<K: Term + fmt::Debug>(var: &LinguisticVariable<K>, term: K) -> Result<()> {
    if var.has_term(term) {
        Ok(())
    } else {
        Err(FuzzyError::UnknownTerm {
            variable: var.name().to_owned(),
            term: format!("{term:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{Key, Shape};
    use crate::variable::Domain;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
    enum Level {
        Small,
        Medium,
        Large,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
    enum Speed {
        Slow,
        Fast,
    }

    fn level(name: &str) -> LinguisticVariable<Level> {
        LinguisticVariable::new(
            name,
            Domain::new(0. ..=10., 101).unwrap(),
            [
                (Level::Small, Shape::triangular(0., 0., 5.)),
                (Level::Medium, Shape::triangular(0., 5., 10.)),
                (Level::Large, Shape::triangular(5., 10., 10.)),
            ],
        )
        .unwrap()
    }

    fn speed() -> LinguisticVariable<Speed> {
        LinguisticVariable::new(
            "speed",
            Domain::new(0. ..=100., 101).unwrap(),
            [
                (Speed::Slow, Shape::triangular(0., 0., 100.)),
                (Speed::Fast, Shape::triangular(0., 100., 100.)),
            ],
        )
        .unwrap()
    }

    fn full_table() -> Vec<Rule<Level, Level, Speed>> {
        use Level::*;

        let mut rules = Vec::new();

        for a in [Small, Medium, Large] {
            for b in [Small, Medium, Large] {
                let out = if a == Large || b == Large { Speed::Fast } else { Speed::Slow };
                rules.push(Rule::new(a, b, out));
            }
        }

        rules
    }

    #[test]
    fn test_complete_table_builds() {
        let rules = RuleBase::new(full_table(), &level("x"), &level("y"), &speed()).unwrap();

        assert_eq!(rules.len(), 9);
        assert_eq!(rules.lookup(Level::Small, Level::Small).unwrap(), Speed::Slow);
        assert_eq!(rules.lookup(Level::Medium, Level::Large).unwrap(), Speed::Fast);
        assert_eq!(rules.iter().next(), Some(&Rule::new(Level::Small, Level::Small, Speed::Slow)));
    }

    #[test]
    fn test_every_pair_has_one_consequent() {
        let x = level("x");
        let y = level("y");
        let rules = RuleBase::new(full_table(), &x, &y, &speed()).unwrap();

        for a in x.terms().keys() {
            for b in y.terms().keys() {
                let matching = rules.iter().filter(|r| r.first == a && r.second == b).count();
                assert_eq!(matching, 1, "({a:?}, {b:?})");
            }
        }
    }

    #[test]
    fn test_missing_rule_is_rejected() {
        let mut table = full_table();
        table.retain(|r| !(r.first == Level::Medium && r.second == Level::Large));

        let err = RuleBase::new(table, &level("x"), &level("y"), &speed()).err();

        assert!(matches!(
            err,
            Some(FuzzyError::MissingRule { first, second }) if first == "Medium" && second == "Large"
        ));
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let mut table = full_table();
        table.push(Rule::new(Level::Small, Level::Small, Speed::Fast));

        let err = RuleBase::new(table, &level("x"), &level("y"), &speed()).err();

        assert!(matches!(err, Some(FuzzyError::DuplicateRule { .. })));
    }

    #[test]
    fn test_unknown_term_is_rejected() {
        let narrow = LinguisticVariable::new(
            "narrow",
            Domain::new(0. ..=10., 11).unwrap(),
            [
                (Level::Small, Shape::triangular(0., 0., 10.)),
                (Level::Large, Shape::triangular(0., 10., 10.)),
            ],
        )
        .unwrap();

        let err = RuleBase::new(full_table(), &narrow, &level("y"), &speed()).err();

        assert!(matches!(
            err,
            Some(FuzzyError::UnknownTerm { variable, term }) if variable == "narrow" && term == "Medium"
        ));
    }

    #[test]
    fn test_lookup_is_order_sensitive() {
        use Level::*;

        let mut table = full_table();

        for rule in &mut table {
            rule.consequent = if (rule.first, rule.second) == (Small, Large) {
                Speed::Slow
            } else {
                Speed::Fast
            };
        }

        let rules = RuleBase::new(table, &level("x"), &level("y"), &speed()).unwrap();

        assert_eq!(rules.lookup(Small, Large).unwrap(), Speed::Slow);
        assert_eq!(rules.lookup(Large, Small).unwrap(), Speed::Fast);
    }

    #[test]
    fn test_lookup_outside_table() {
        let x = LinguisticVariable::new(
            "x",
            Domain::new(0. ..=10., 11).unwrap(),
            [(Level::Small, Shape::triangular(0., 0., 10.))],
        )
        .unwrap();
        let rules = RuleBase::new(
            [Rule::new(Level::Small, Level::Small, Speed::Fast)],
            &x,
            &x,
            &speed(),
        )
        .unwrap();

        assert_eq!(rules.lookup(Level::Small, Level::Small).unwrap(), Speed::Fast);
        assert!(matches!(
            rules.lookup(Level::Small, Level::Large),
            Err(FuzzyError::MissingRule { .. })
        ));
    }
}
