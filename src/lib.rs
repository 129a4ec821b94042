//! Mamdani fuzzy inference over two inputs and one output.
//!
//! Crisp inputs are fuzzified against each input variable's terms, every
//! rule fires with the min of its two antecedent degrees, the consequent
//! curves are clipped at that strength and combined with max, and the
//! aggregated set is reduced to a crisp value by its centroid.
//!
//! ```no_run
//! use mamdani_rs::compressor;
//!
//! let controller = compressor::controller()?;
//! let (frequency, trace) = controller.infer(10., 0.2)?;
//!
//! println!("{trace}");
//! assert!(frequency > 0.);
//! # Ok::<(), mamdani_rs::FuzzyError>(())
//! ```

pub mod compressor;
pub mod config;
mod error;
mod inference;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{ControllerConfig, RuleConfig, TermConfig, VariableConfig};
pub use error::{FuzzyError, Result};
pub use inference::Mamdani;
pub use ops::ProductionLink;
pub use outputs::{FuzzifiedInput, RuleActivation, Trace};
pub use rules::{Rule, RuleBase};
pub use terms::{Key, Shape, Term, Terms};
pub use variable::{Degrees, Domain, LinguisticVariable};
