use crate::{evaluate, Candidate, SearchOutcome};
use anyhow::{anyhow, Result};
use qkp_problem::Instance;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Classical genetic baseline: no repair, overweight chromosomes simply
/// score zero. Its history records each generation's best fitness and may
/// regress; the returned best is the feasible best across all generations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub generations: u32,
    pub population_size: usize,
    pub mutation_rate: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            generations: 100,
            population_size: 100,
            mutation_rate: 0.1,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(anyhow!("Population size must be at least 2"));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(anyhow!("Mutation rate must be within [0, 1]"));
        }
        Ok(())
    }
}

pub fn run(instance: &Instance, config: &Config, seed: u64) -> Result<SearchOutcome> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut population: Vec<Vec<u8>> = (0..config.population_size)
        .map(|_| initial_chromosome(instance, &mut rng))
        .collect();
    let mut scores: Vec<u64> = population
        .iter()
        .map(|chromosome| fitness(instance, chromosome))
        .collect();

    // The empty selection is always feasible, so `best` never reports an
    // overweight chromosome: zero-fitness ones cannot replace it.
    let mut best = Candidate {
        bits: vec![0; instance.num_items()],
        value: 0,
        weight: 0,
    };
    let mut found_at = None;
    let mut history = Vec::with_capacity(config.generations as usize + 1);

    let top = top_index(&scores);
    if scores[top] > 0 {
        best = to_candidate(instance, &population[top]);
    }
    history.push(scores[top]);

    for generation in 1..=config.generations {
        let parents = select_parents(&population, &scores, &mut rng);
        let mut offspring = Vec::with_capacity(config.population_size + 1);
        while offspring.len() < config.population_size {
            let first = parents[rng.gen_range(0..parents.len())];
            let second = parents[rng.gen_range(0..parents.len())];
            let (a, b) = crossover(first, second, &mut rng);
            offspring.push(a);
            offspring.push(b);
        }
        offspring.truncate(config.population_size);
        for chromosome in offspring.iter_mut() {
            mutate(chromosome, config.mutation_rate, &mut rng);
        }
        population = offspring;
        scores = population
            .iter()
            .map(|chromosome| fitness(instance, chromosome))
            .collect();

        let top = top_index(&scores);
        if scores[top] > best.value {
            best = to_candidate(instance, &population[top]);
            found_at = Some(generation);
        }
        history.push(scores[top]);
    }

    Ok(SearchOutcome {
        best,
        found_at,
        history,
    })
}

/// Total value, or 0 when the selection is overweight.
fn fitness(instance: &Instance, bits: &[u8]) -> u64 {
    let (value, weight) = evaluate(instance, bits);
    if weight > instance.capacity {
        0
    } else {
        value
    }
}

fn to_candidate(instance: &Instance, bits: &[u8]) -> Candidate {
    let (value, weight) = evaluate(instance, bits);
    Candidate {
        bits: bits.to_vec(),
        value,
        weight,
    }
}

fn top_index(scores: &[u64]) -> usize {
    let mut top = 0;
    for i in 1..scores.len() {
        if scores[i] > scores[top] {
            top = i;
        }
    }
    top
}

// Uniform random bits; a chromosome scoring zero is replaced by a feasible
// random-greedy one.
fn initial_chromosome(instance: &Instance, rng: &mut SmallRng) -> Vec<u8> {
    let bits: Vec<u8> = (0..instance.num_items())
        .map(|_| rng.gen_range(0..=1u8))
        .collect();
    if fitness(instance, &bits) == 0 {
        greedy_random(instance, rng)
    } else {
        bits
    }
}

// Shuffled item order, take whatever still fits.
fn greedy_random(instance: &Instance, rng: &mut SmallRng) -> Vec<u8> {
    let mut order: Vec<usize> = (0..instance.num_items()).collect();
    order.shuffle(rng);
    let mut bits = vec![0u8; instance.num_items()];
    let mut weight = 0u64;
    for i in order {
        if weight + instance.weights[i] as u64 <= instance.capacity {
            bits[i] = 1;
            weight += instance.weights[i] as u64;
        }
    }
    bits
}

// Top half by fitness; a uniform random half when every chromosome scores
// zero.
fn select_parents<'a>(
    population: &'a [Vec<u8>],
    scores: &[u64],
    rng: &mut SmallRng,
) -> Vec<&'a Vec<u8>> {
    let half = population.len() / 2;
    let mut order: Vec<usize> = (0..population.len()).collect();
    if scores.iter().all(|&score| score == 0) {
        order.shuffle(rng);
    } else {
        order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    }
    order[..half].iter().map(|&i| &population[i]).collect()
}

fn crossover(first: &[u8], second: &[u8], rng: &mut SmallRng) -> (Vec<u8>, Vec<u8>) {
    if first.len() < 2 {
        return (first.to_vec(), second.to_vec());
    }
    let split = rng.gen_range(1..first.len());
    let mut a = first[..split].to_vec();
    a.extend_from_slice(&second[split..]);
    let mut b = second[..split].to_vec();
    b.extend_from_slice(&first[split..]);
    (a, b)
}

fn mutate(bits: &mut [u8], rate: f64, rng: &mut SmallRng) {
    for bit in bits.iter_mut() {
        if rng.gen::<f64>() < rate {
            *bit = 1 - *bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance {
            values: vec![10, 20, 15, 5],
            weights: vec![4, 6, 5, 1],
            capacity: 10,
            optimum: None,
        }
    }

    #[test]
    fn test_fitness_zero_when_overweight() {
        let instance = instance();
        assert_eq!(fitness(&instance, &[1, 1, 1, 1]), 0);
        assert_eq!(fitness(&instance, &[1, 1, 0, 0]), 30);
    }

    #[test]
    fn test_greedy_random_is_feasible() {
        let instance = instance();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let bits = greedy_random(&instance, &mut rng);
            let (_, weight) = evaluate(&instance, &bits);
            assert!(weight <= instance.capacity);
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let first = vec![0u8; 8];
        let second = vec![1u8; 8];
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (a, b) = crossover(&first, &second, &mut rng);
            assert_eq!(a.len(), 8);
            assert_eq!(b.len(), 8);
            // The split point lies strictly inside, so each child keeps its
            // leading parent's head and the other parent's tail.
            assert_eq!(a[0], 0);
            assert_eq!(a[7], 1);
            assert_eq!(b[0], 1);
            assert_eq!(b[7], 0);
        }
    }

    #[test]
    fn test_crossover_single_gene_clones() {
        let mut rng = SmallRng::seed_from_u64(0);
        let (a, b) = crossover(&[1], &[0], &mut rng);
        assert_eq!(a, vec![1]);
        assert_eq!(b, vec![0]);
    }

    #[test]
    fn test_mutate_extreme_rates() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut bits = vec![0, 1, 0, 1];
        mutate(&mut bits, 0.0, &mut rng);
        assert_eq!(bits, vec![0, 1, 0, 1]);
        mutate(&mut bits, 1.0, &mut rng);
        assert_eq!(bits, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_select_parents_takes_top_half() {
        let population = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
        let scores = vec![1, 9, 4, 7];
        let mut rng = SmallRng::seed_from_u64(0);
        let parents = select_parents(&population, &scores, &mut rng);
        assert_eq!(parents, vec![&population[1], &population[3]]);
    }
}
