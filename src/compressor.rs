//! Compressor speed controller.
//!
//! Picks a compressor frequency from the difference between the measured and
//! target temperature and from how fast the temperature is changing.

use std::fmt;

use serde::Deserialize;

use crate::config::ControllerConfig;
use crate::error::Result;
use crate::inference::Mamdani;
use crate::rules::Rule;
use crate::terms::{Key, Shape};
use crate::variable::{Domain, LinguisticVariable};

/// Temperature difference in K used by the reference run
pub const DELTA_T: f64 = 10.;
/// Rate of temperature change in K/min used by the reference run
pub const RATE: f64 = 0.2;

/// The same controller as [`controller`], as a TOML document
pub const CONFIG: &str = include_str!("../config/compressor.toml");

/// Terms shared by both inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Key, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Small,
    Medium,
    Large,
}

/// Compressor frequency terms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Key, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Small => "small",
            Level::Medium => "medium",
            Level::Large => "large",
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frequency::VeryLow => "very low",
            Frequency::Low => "low",
            Frequency::Medium => "medium",
            Frequency::High => "high",
            Frequency::VeryHigh => "very high",
        })
    }
}

pub type Controller = Mamdani<Level, Level, Frequency>;

pub fn temperature_difference() -> Result<LinguisticVariable<Level>> {
    LinguisticVariable::new(
        "temperature difference",
        Domain::new(0. ..=30., 500)?,
        [
            (Level::Small, Shape::triangular(0., 0., 14.2857)),
            (Level::Medium, Shape::triangular(10., 15., 20.)),
            (Level::Large, Shape::triangular(15., 30., 30.)),
        ],
    )
}

pub fn temperature_rate() -> Result<LinguisticVariable<Level>> {
    LinguisticVariable::new(
        "temperature rate",
        Domain::new(0. ..=0.3, 500)?,
        [
            (Level::Small, Shape::triangular(0., 0., 0.15)),
            (Level::Medium, Shape::triangular(0.05, 0.15, 0.25)),
            (Level::Large, Shape::triangular(0.15, 0.3, 0.3)),
        ],
    )
}

pub fn frequency() -> Result<LinguisticVariable<Frequency>> {
    LinguisticVariable::new(
        "compressor frequency",
        Domain::new(0. ..=115., 1000)?,
        [
            (Frequency::VeryLow, Shape::triangular(0., 10., 25.)),
            (Frequency::Low, Shape::triangular(22., 37., 54.)),
            (Frequency::Medium, Shape::triangular(45., 62., 79.)),
            (Frequency::High, Shape::triangular(70., 87., 104.)),
            (Frequency::VeryHigh, Shape::trapezoidal(97., 115., 115., 115.)),
        ],
    )
}

/// (temperature difference, temperature rate) => frequency
pub fn rules() -> [Rule<Level, Level, Frequency>; 9] {
    use Frequency::*;
    use Level::{Large, Small};

    [
        Rule::new(Small, Small, VeryLow),
        Rule::new(Level::Medium, Small, Low),
        Rule::new(Large, Small, Medium),
        Rule::new(Small, Level::Medium, Low),
        Rule::new(Level::Medium, Level::Medium, Medium),
        Rule::new(Large, Level::Medium, High),
        Rule::new(Small, Large, Medium),
        Rule::new(Level::Medium, Large, High),
        Rule::new(Large, Large, VeryHigh),
    ]
}

pub fn controller() -> Result<Controller> {
    Mamdani::new(temperature_difference()?, temperature_rate()?, frequency()?, rules())
}

/// Builds the controller from [`CONFIG`]
pub fn controller_from_config() -> Result<Controller> {
    ControllerConfig::from_toml_str(CONFIG)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(x: f64, a: f64, b: f64, c: f64) -> f64 {
        if x <= a || x >= c {
            0.
        } else if x <= b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    #[test]
    fn test_reference_degrees() {
        let controller = controller().unwrap();
        let (_, trace) = controller.infer(DELTA_T, RATE).unwrap();
        let dt = trace.first().degrees();
        let vt = trace.second().degrees();

        assert!((dt.get(Level::Small).unwrap() - 0.3).abs() < 1e-4);
        assert_eq!(dt.get(Level::Medium), Some(0.));
        assert_eq!(dt.get(Level::Large), Some(0.));
        assert_eq!(vt.get(Level::Small), Some(0.));
        assert!((vt.get(Level::Medium).unwrap() - 0.5).abs() < 1e-9);
        assert!((vt.get(Level::Large).unwrap() - 1. / 3.).abs() < 1e-9);
    }

    #[test]
    fn test_reference_activations() {
        let controller = controller().unwrap();
        let (_, trace) = controller.infer(DELTA_T, RATE).unwrap();

        let fired: Vec<_> = trace
            .activations()
            .iter()
            .filter(|act| act.strength > 0.)
            .map(|act| act.rule)
            .collect();

        assert_eq!(
            fired,
            vec![
                Rule::new(Level::Small, Level::Medium, Frequency::Low),
                Rule::new(Level::Small, Level::Large, Frequency::Medium),
            ]
        );
        assert_eq!(trace.activations().len(), 9);
    }

    #[test]
    fn test_reference_output_matches_recomputed_centroid() {
        let controller = controller().unwrap();
        let (value, _) = controller.infer(DELTA_T, RATE).unwrap();

        // Recompute from scratch: both fired rules share the small temperature
        // difference degree, which is the tighter of each pair.
        let alpha = 1. - DELTA_T / 14.2857;
        let n = 1000;
        let (mut num, mut den) = (0., 0.);

        for i in 0..n {
            let x = 115. * i as f64 / (n - 1) as f64;
            let low = triangle(x, 22., 37., 54.).min(alpha);
            let medium = triangle(x, 45., 62., 79.).min(alpha);
            let m = low.max(medium);

            num += x * m;
            den += m;
        }

        let expected = num / den;

        assert!(value > 0. && value < 115.);
        assert!((value - expected).abs() < 1e-6, "{value} vs {expected}");
    }

    #[test]
    fn test_rule_table_is_symmetric_but_order_checked() {
        let controller = controller().unwrap();
        let rules = controller.rules();

        assert_eq!(rules.lookup(Level::Large, Level::Small).unwrap(), Frequency::Medium);
        assert_eq!(rules.lookup(Level::Small, Level::Large).unwrap(), Frequency::Medium);
        assert_eq!(rules.lookup(Level::Medium, Level::Small).unwrap(), Frequency::Low);
        assert_eq!(rules.lookup(Level::Large, Level::Large).unwrap(), Frequency::VeryHigh);
    }

    #[test]
    fn test_inputs_outside_every_term() {
        let controller = controller().unwrap();
        let (value, trace) = controller.infer(-40., -1.).unwrap();

        assert_eq!(value, 0.);
        assert!(trace.is_degenerate());
    }

    #[test]
    fn test_bundled_config_matches_code() {
        let from_code = controller().unwrap();
        let from_config = controller_from_config().unwrap();

        assert_eq!(from_config.first().domain(), from_code.first().domain());
        assert_eq!(from_config.output().domain(), from_code.output().domain());

        for rule in from_code.rules().iter() {
            assert_eq!(
                from_config.rules().lookup(rule.first, rule.second).unwrap(),
                rule.consequent
            );
        }

        for (dt, vt) in [(DELTA_T, RATE), (0., 0.), (15., 0.15), (28., 0.29), (5., 0.05)] {
            let (a, _) = from_code.infer(dt, vt).unwrap();
            let (b, _) = from_config.infer(dt, vt).unwrap();

            assert_eq!(a, b, "({dt}, {vt})");
        }
    }

    #[test]
    fn test_report() {
        let controller = controller().unwrap();
        let (_, trace) = controller.infer(DELTA_T, RATE).unwrap();
        let report = trace.to_string();

        assert!(report.contains("Membership degrees for temperature difference = 10:"));
        assert!(report.contains("  small: 0.3000"));
        assert!(report.contains("  large: 0.3333"));
        assert!(report.contains(
            "temperature difference is small and temperature rate is large => compressor frequency is medium: 0.3000"
        ));
        assert!(report.contains("Defuzzified compressor frequency (centroid): "));
        assert!(!report.contains("No rule fired"));
    }
}
