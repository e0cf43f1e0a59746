use anyhow::{anyhow, Result};
use ndarray::{Array2, Axis};
use qkp_problem::Instance;
use qkp_search::{Algorithm, SearchOutcome};
use rayon::prelude::*;

/// Runs `runs` independent searches in parallel, seeding run `i` with
/// `base_seed + i`. Runs share nothing; outcomes come back in run order.
pub fn run_batch(
    algorithm: &Algorithm,
    instance: &Instance,
    runs: u64,
    base_seed: u64,
) -> Result<Vec<SearchOutcome>> {
    if runs == 0 {
        return Err(anyhow!("Number of runs must be positive"));
    }
    (0..runs)
        .into_par_iter()
        .map(|run| algorithm.run(instance, base_seed.wrapping_add(run)))
        .collect()
}

/// Element-wise mean of the run histories: the convergence curve averaged
/// over seeds.
pub fn mean_history(outcomes: &[SearchOutcome]) -> Result<Vec<f64>> {
    if outcomes.is_empty() {
        return Err(anyhow!("No outcomes to average"));
    }
    let columns = outcomes[0].history.len();
    let flat: Vec<f64> = outcomes
        .iter()
        .flat_map(|outcome| outcome.history.iter().map(|&v| v as f64))
        .collect();
    let stacked = Array2::from_shape_vec((outcomes.len(), columns), flat)
        .map_err(|e| anyhow!("Mismatched history lengths: {}", e))?;
    Ok(stacked.mean_axis(Axis(0)).unwrap().to_vec())
}

/// Index and outcome of the best run, by value then by lower weight. Callers
/// guarantee `outcomes` is non-empty.
pub fn best_outcome(outcomes: &[SearchOutcome]) -> (usize, &SearchOutcome) {
    let mut index = 0;
    for (i, outcome) in outcomes.iter().enumerate().skip(1) {
        if outcome.best.improves(&outcomes[index].best) {
            index = i;
        }
    }
    (index, &outcomes[index])
}
