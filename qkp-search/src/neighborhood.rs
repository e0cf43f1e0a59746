use crate::{evaluate_and_repair, measure_register, Candidate, Qubit, RepairPolicy};
use qkp_problem::Instance;
use rand::rngs::SmallRng;

/// Measures a shared register `size` times; every draw is evaluated and
/// repaired before the next one is taken.
pub fn sample_shared(
    instance: &Instance,
    register: &[Qubit],
    size: usize,
    policy: RepairPolicy,
    rng: &mut SmallRng,
) -> Vec<Candidate> {
    (0..size)
        .map(|_| {
            let mut bits = measure_register(register, rng);
            let (value, weight) = evaluate_and_repair(instance, &mut bits, policy, rng);
            Candidate { bits, value, weight }
        })
        .collect()
}

/// Measures each individual's register exactly once.
pub fn sample_individuals(
    instance: &Instance,
    individuals: &[Vec<Qubit>],
    policy: RepairPolicy,
    rng: &mut SmallRng,
) -> Vec<Candidate> {
    individuals
        .iter()
        .map(|register| {
            let mut bits = measure_register(register, rng);
            let (value, weight) = evaluate_and_repair(instance, &mut bits, policy, rng);
            Candidate { bits, value, weight }
        })
        .collect()
}

/// First candidate carrying the highest value; ties keep the earliest draw.
pub fn first_best(candidates: &[Candidate]) -> &Candidate {
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.value > best.value {
            best = candidate;
        }
    }
    best
}

/// First candidate carrying the lowest value; ties keep the earliest draw.
pub fn first_worst(candidates: &[Candidate]) -> &Candidate {
    let mut worst = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.value < worst.value {
            worst = candidate;
        }
    }
    worst
}
