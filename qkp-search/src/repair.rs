use qkp_problem::Instance;
use rand::{rngs::SmallRng, Rng};
use serde::{Deserialize, Serialize};

/// How an overweight measurement is made feasible.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepairPolicy {
    /// Deselect uniformly drawn items until the capacity holds.
    RandomDrop,
    /// Random drop, then re-add deselected items in index order while they
    /// still fit.
    GreedyRefill,
}

pub fn evaluate(instance: &Instance, bits: &[u8]) -> (u64, u64) {
    let mut value = 0u64;
    let mut weight = 0u64;
    for (i, &bit) in bits.iter().enumerate() {
        if bit == 1 {
            value += instance.values[i] as u64;
            weight += instance.weights[i] as u64;
        }
    }
    (value, weight)
}

/// Evaluates `bits`, repairing in place when the selection is overweight.
/// Returns the totals of the (possibly repaired) selection.
pub fn evaluate_and_repair(
    instance: &Instance,
    bits: &mut [u8],
    policy: RepairPolicy,
    rng: &mut SmallRng,
) -> (u64, u64) {
    let (mut value, mut weight) = evaluate(instance, bits);
    if weight <= instance.capacity {
        return (value, weight);
    }
    if instance.capacity == 0 {
        // Nothing can stay selected; the random walk below would spin.
        bits.fill(0);
        return (0, 0);
    }

    random_drop(instance, bits, &mut value, &mut weight, rng);
    if policy == RepairPolicy::GreedyRefill {
        greedy_refill(instance, bits, &mut value, &mut weight);
    }
    (value, weight)
}

fn random_drop(
    instance: &Instance,
    bits: &mut [u8],
    value: &mut u64,
    weight: &mut u64,
    rng: &mut SmallRng,
) {
    while *weight > instance.capacity {
        let index = rng.gen_range(0..bits.len());
        if bits[index] == 1 {
            bits[index] = 0;
            *value -= instance.values[index] as u64;
            *weight -= instance.weights[index] as u64;
        }
    }
}

fn greedy_refill(instance: &Instance, bits: &mut [u8], value: &mut u64, weight: &mut u64) {
    // Rescan from the start after every addition.
    let mut added = true;
    while added {
        added = false;
        for i in 0..bits.len() {
            if bits[i] == 0 && *weight + instance.weights[i] as u64 <= instance.capacity {
                bits[i] = 1;
                *value += instance.values[i] as u64;
                *weight += instance.weights[i] as u64;
                added = true;
                break;
            }
        }
    }
}
