mod candidate;
pub use candidate::*;
mod neighborhood;
pub use neighborhood::*;
mod qubit;
pub use qubit::*;
mod repair;
pub use repair::*;
mod tabu;
pub use tabu::*;

pub mod ae_qts;
pub mod genetic;
pub mod qea;
pub mod qts;

use anyhow::Result;
use qkp_problem::Instance;
use serde::{Deserialize, Serialize};

/// Which heuristic drives a run, with its parameters. Settings documents
/// deserialize straight into this, e.g. `{"algorithm": "qts", "theta": 0.05}`;
/// omitted fields take the variant's defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Algorithm {
    Qts(qts::Config),
    AeQts(ae_qts::Config),
    Qea(qea::Config),
    Genetic(genetic::Config),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Qts(_) => "qts",
            Algorithm::AeQts(_) => "ae_qts",
            Algorithm::Qea(_) => "qea",
            Algorithm::Genetic(_) => "genetic",
        }
    }

    /// Runs the configured heuristic to completion. Identical seeds produce
    /// identical outcomes.
    pub fn run(&self, instance: &Instance, seed: u64) -> Result<SearchOutcome> {
        match self {
            Algorithm::Qts(config) => qts::run(instance, config, seed),
            Algorithm::AeQts(config) => ae_qts::run(instance, config, seed),
            Algorithm::Qea(config) => qea::run(instance, config, seed),
            Algorithm::Genetic(config) => genetic::run(instance, config, seed),
        }
    }
}
