use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single-capacity 0/1 knapsack instance. `values` and `weights` are
/// parallel arrays indexed by item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub values: Vec<u32>,
    pub weights: Vec<u32>,
    pub capacity: u64,
    /// Known optimum from the instance file (`z` header), informational only.
    pub optimum: Option<u64>,
}

impl Instance {
    pub fn num_items(&self) -> usize {
        self.values.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    /// Generates a synthetic instance with uniform coefficients in
    /// `1..=max_coefficient` and capacity at half the total weight.
    pub fn generate(seed: u64, num_items: usize, max_coefficient: u32) -> Result<Instance> {
        if num_items == 0 {
            return Err(anyhow!("Number of items must be positive"));
        }
        if max_coefficient == 0 {
            return Err(anyhow!("Max coefficient must be positive"));
        }
        let mut rng = SmallRng::seed_from_u64(seed);

        let values: Vec<u32> = (0..num_items)
            .map(|_| rng.gen_range(1..=max_coefficient))
            .collect();
        let weights: Vec<u32> = (0..num_items)
            .map(|_| rng.gen_range(1..=max_coefficient))
            .collect();
        let capacity = weights.iter().map(|&w| w as u64).sum::<u64>() / 2;

        Ok(Instance {
            values,
            weights,
            capacity,
            optimum: None,
        })
    }

    /// Checks a set of selected item indices and returns its `(value, weight)`.
    pub fn verify_items(&self, items: &[usize]) -> Result<(u64, u64)> {
        let selected: HashSet<usize> = items.iter().cloned().collect();
        if selected.len() != items.len() {
            return Err(anyhow!("Duplicate items selected."));
        }

        let mut total_value = 0u64;
        let mut total_weight = 0u64;
        for &item in items {
            if item >= self.num_items() {
                return Err(anyhow!("Item ({}) is out of bounds", item));
            }
            total_value += self.values[item] as u64;
            total_weight += self.weights[item] as u64;
        }

        if total_weight > self.capacity {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }
        Ok((total_value, total_weight))
    }
}
