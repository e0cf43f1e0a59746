use crate::{
    balanced_register, evaluate_and_repair, first_best, first_worst, measure_register,
    sample_shared, steer, Candidate, RepairPolicy, SearchOutcome, TabuLedger,
};
use anyhow::{anyhow, Result};
use qkp_problem::Instance;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Quantum tabu search over one shared register. Each iteration the register
/// is steered toward the best-known solution at the full angle, re-measured,
/// then steered away from the worst neighbor at a third of the angle;
/// steered positions stay frozen for `tabu_tenure` iterations.
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
            repair: RepairPolicy::GreedyRefill,
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

    let mut current = measure_register(&register, &mut rng);
    let (value, weight) = evaluate_and_repair(instance, &mut current, config.repair, &mut rng);
    let mut best = Candidate {
        bits: current.clone(),
        value,
        weight,
    };
    let mut found_at = None;
    let mut history = Vec::with_capacity(config.iterations as usize + 1);
    history.push(best.value);

    for iteration in 1..=config.iterations {
        let neighborhood = sample_shared(
            instance,
            &register,
            config.neighborhood_size,
            config.repair,
            &mut rng,
        );
        let best_neighbor = first_best(&neighborhood);
        let worst_neighbor = first_worst(&neighborhood);

        if best_neighbor.improves(&best) {
            best = best_neighbor.clone();
            found_at = Some(iteration);
        }
        history.push(best.value);
        ledger.decay();

        // Toward the best-known solution at the full angle.
        steer(
            &mut register,
            &mut ledger,
            config.tabu_tenure,
            &best.bits,
            &current,
            config.theta,
        );
        current = measure_register(&register, &mut rng);

        // Away from the worst neighbor at a third of the angle.
        steer(
            &mut register,
            &mut ledger,
            config.tabu_tenure,
            &current,
            &worst_neighbor.bits,
            config.theta / 3.0,
        );
        current = measure_register(&register, &mut rng);
    }

    Ok(SearchOutcome {
        best,
        found_at,
        history,
    })
}
