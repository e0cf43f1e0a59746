use crate::{
    balanced_register, sample_individuals, Candidate, Qubit, RepairPolicy, SearchOutcome,
};
use anyhow::{anyhow, Result};
use qkp_problem::Instance;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Quantum evolutionary algorithm: a population of independent registers,
/// each measured once per iteration and pulled toward a global attractor
/// (the head of an elite pool), with periodic migration collapsing the pool
/// onto the attractor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub iterations: u32,
    pub theta: f64,
    pub population_size: usize,
    /// Elite pool size as a percentage of the population, 1..=100.
    pub elite_pct: u32,
    pub migration_period: u32,
    pub repair: RepairPolicy,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            iterations: 1000,
            theta: 0.01 * PI,
            population_size: 10,
            elite_pct: 10,
            migration_period: 3,
            repair: RepairPolicy::RandomDrop,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(anyhow!("Population size must be positive"));
        }
        if self.elite_pct == 0 || self.elite_pct > 100 {
            return Err(anyhow!("Elite percentage must be within 1..=100"));
        }
        if self.migration_period == 0 {
            return Err(anyhow!("Migration period must be positive"));
        }
        if !self.theta.is_finite() {
            return Err(anyhow!("Rotation angle must be finite"));
        }
        Ok(())
    }

    fn elite_size(&self) -> usize {
        (self.population_size * self.elite_pct as usize / 100).max(1)
    }
}

pub fn run(instance: &Instance, config: &Config, seed: u64) -> Result<SearchOutcome> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut individuals: Vec<Vec<Qubit>> = (0..config.population_size)
        .map(|_| balanced_register(instance.num_items()))
        .collect();
    let elite_size = config.elite_size();

    let generation = sample_individuals(instance, &individuals, config.repair, &mut rng);
    let mut elite = refresh_elite(generation, Vec::new(), elite_size);
    let mut attractor = elite[0].clone();
    let mut found_at = None;
    let mut history = Vec::with_capacity(config.iterations as usize + 1);
    history.push(attractor.value);

    for iteration in 1..=config.iterations {
        let generation = sample_individuals(instance, &individuals, config.repair, &mut rng);

        // The pull is toward the attractor of the previous iteration.
        attract(&mut individuals, &generation, &attractor, config.theta);

        elite = refresh_elite(generation, elite, elite_size);
        if elite[0].value > attractor.value {
            found_at = Some(iteration);
        }
        attractor = elite[0].clone();
        history.push(attractor.value);

        if iteration % config.migration_period == 0 {
            migrate(&mut elite, &attractor);
        }
    }

    Ok(SearchOutcome {
        best: attractor,
        found_at,
        history,
    })
}

/// Keeps the `size` highest-value candidates out of this generation and the
/// previous elite; generation entries win ties.
fn refresh_elite(generation: Vec<Candidate>, elite: Vec<Candidate>, size: usize) -> Vec<Candidate> {
    let mut pool = generation;
    pool.extend(elite);
    pool.sort_by(|a, b| b.value.cmp(&a.value));
    pool.truncate(size);
    pool
}

/// Lookup-table rotation: an individual is pulled only while the attractor's
/// fitness strictly exceeds its own, and only where the bits disagree.
/// `(0, 1)` rotates by `+theta`, `(1, 0)` by `-theta`.
fn attract(
    individuals: &mut [Vec<Qubit>],
    generation: &[Candidate],
    attractor: &Candidate,
    theta: f64,
) {
    for (register, candidate) in individuals.iter_mut().zip(generation) {
        if candidate.value >= attractor.value {
            continue;
        }
        for (i, qubit) in register.iter_mut().enumerate() {
            match (candidate.bits[i], attractor.bits[i]) {
                (0, 1) => qubit.rotate(theta),
                (1, 0) => qubit.rotate(-theta),
                _ => {}
            }
        }
    }
}

fn migrate(elite: &mut [Candidate], attractor: &Candidate) {
    for entry in elite.iter_mut() {
        *entry = attractor.clone();
    }
}
