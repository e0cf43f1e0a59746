use crate::{
    balanced_register, evaluate_and_repair, first_best, measure_register, sample_shared, steer,
    Candidate, Qubit, RepairPolicy, SearchOutcome, TabuLedger,
};
use anyhow::{anyhow, Result};
use qkp_problem::Instance;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ranked-halves quantum tabu search. Instead of a single best/worst pair,
/// each iteration sorts the neighborhood by value and steers along every
/// rank-k-best versus rank-k-worst pair, with the step shrinking as
/// `theta / (k + 1)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub iterations: u32,
    pub theta: f64,
    pub neighborhood_size: usize,
    pub tabu_tenure: u32,
    pub repair: RepairPolicy,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            iterations: 1000,
            theta: 0.01 * PI,
            neighborhood_size: 10,
            tabu_tenure: 3,
            repair: RepairPolicy::RandomDrop,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.neighborhood_size == 0 {
            return Err(anyhow!("Neighborhood size must be positive"));
        }
        if self.tabu_tenure == 0 {
            return Err(anyhow!("Tabu tenure must be positive"));
        }
        if !self.theta.is_finite() {
            return Err(anyhow!("Rotation angle must be finite"));
        }
        Ok(())
    }
}

pub fn run(instance: &Instance, config: &Config, seed: u64) -> Result<SearchOutcome> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut register = balanced_register(instance.num_items());
    let mut ledger = TabuLedger::new();

    let mut initial = measure_register(&register, &mut rng);
    let (value, weight) = evaluate_and_repair(instance, &mut initial, config.repair, &mut rng);
    let mut best = Candidate {
        bits: initial,
        value,
        weight,
    };
    let mut found_at = None;
    let mut history = Vec::with_capacity(config.iterations as usize + 1);
    history.push(best.value);

    for iteration in 1..=config.iterations {
        let mut neighborhood = sample_shared(
            instance,
            &register,
            config.neighborhood_size,
            config.repair,
            &mut rng,
        );
        let best_neighbor = first_best(&neighborhood);

        if best_neighbor.improves(&best) {
            best = best_neighbor.clone();
            found_at = Some(iteration);
        }
        history.push(best.value);
        ledger.decay();

        steer_ranked_pairs(
            &mut register,
            &mut ledger,
            config.tabu_tenure,
            &mut neighborhood,
            config.theta,
        );
    }

    Ok(SearchOutcome {
        best,
        found_at,
        history,
    })
}

// Pairs the k-th best draw with the k-th worst, widest pair first. Positions
// frozen by an earlier pair are skipped by the later ones.
fn steer_ranked_pairs(
    register: &mut [Qubit],
    ledger: &mut TabuLedger,
    tenure: u32,
    neighborhood: &mut [Candidate],
    theta: f64,
) {
    neighborhood.sort_by(|a, b| b.value.cmp(&a.value));
    for k in 0..neighborhood.len() / 2 {
        let better = &neighborhood[k];
        let worse = &neighborhood[neighborhood.len() - 1 - k];
        steer(
            register,
            ledger,
            tenure,
            &better.bits,
            &worse.bits,
            theta / (k + 1) as f64,
        );
    }
}
