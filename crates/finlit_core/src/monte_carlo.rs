//! Monte Carlo ensemble runner and cross-path aggregation.
//!
//! Trials are independent and embarrassingly parallel. With the default
//! `parallel` feature they fan out over rayon; per-trial seeds are derived
//! from the master seed in fixed batches, so the output is identical
//! whether or not the work is parallelized.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::error::{ConfigError, DomainError, SimError};
use crate::model::{
    EnsembleSummary, HorizonStats, MAX_ENSEMBLE_VALUES, PathEnsemble, ReferenceCount, TimeSeries,
};

const MAX_BATCH_SIZE: usize = 100;
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-trial seeds, drawn batch by batch from RNG streams derived from the
/// master seed. Batch streams are independent of scheduling order.
fn trial_seeds(master_seed: u64, n_trials: usize) -> Vec<u64> {
    let mut seeds = vec![0u64; n_trials];
    for (batch_index, batch) in seeds.chunks_mut(MAX_BATCH_SIZE).enumerate() {
        let mut seeder =
            SmallRng::seed_from_u64(master_seed ^ (batch_index as u64).wrapping_mul(SEED_STRIDE));
        for seed in batch {
            *seed = seeder.next_u64();
        }
    }
    seeds
}

/// Run `n_trials` independent simulations of `factory` and collect the
/// resulting paths.
///
/// Each trial receives its own seeded RNG; the function is pure given
/// `(n_trials, seed)` and the factory's structural inputs, which is what
/// makes memoization at the UI boundary valid. The first trial runs eagerly
/// so the `n_trials x n_steps` memory bound is enforced before fan-out.
pub fn run_ensemble<F>(n_trials: usize, seed: u64, factory: F) -> Result<PathEnsemble, SimError>
where
    F: Fn(&mut SmallRng) -> Result<TimeSeries, DomainError> + Sync,
{
    if n_trials == 0 {
        return Err(ConfigError::NoTrials.into());
    }
    let seeds = trial_seeds(seed, n_trials);

    let first = factory(&mut SmallRng::seed_from_u64(seeds[0]))?;
    let cells = n_trials.saturating_mul(first.len());
    if cells > MAX_ENSEMBLE_VALUES {
        return Err(ConfigError::EnsembleTooLarge {
            cells,
            max: MAX_ENSEMBLE_VALUES,
        }
        .into());
    }

    let run_one = |trial_seed: &u64| factory(&mut SmallRng::seed_from_u64(*trial_seed));

    #[cfg(feature = "parallel")]
    let rest: Result<Vec<TimeSeries>, DomainError> = seeds[1..].par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let rest: Result<Vec<TimeSeries>, DomainError> = seeds[1..].iter().map(run_one).collect();

    let mut paths = Vec::with_capacity(n_trials);
    paths.push(first);
    paths.extend(rest?);

    Ok(PathEnsemble::new(paths)?)
}

/// Value at percentile `p` (0-100) of an ascending-sorted slice, with
/// linear interpolation between ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        sorted[lower] * (1.0 - w) + sorted[upper] * w
    }
}

/// Aggregate an ensemble into its per-step median and 5th/95th percentile
/// band, plus scalar stats at `comparison_step`: minimum, maximum, and the
/// count of trials below each value in `references` (typically the initial
/// principal and a risk-free projection at the same step).
pub fn summarize(
    ensemble: &PathEnsemble,
    comparison_step: usize,
    references: &[f64],
) -> Result<EnsembleSummary, ConfigError> {
    let horizon = ensemble.horizon();
    if comparison_step >= horizon {
        return Err(ConfigError::StepOutOfRange {
            step: comparison_step,
            len: horizon,
        });
    }

    let unit = ensemble.unit();
    let mut median = vec![0.0; horizon];
    let mut lower = vec![0.0; horizon];
    let mut upper = vec![0.0; horizon];
    let mut at_step = HorizonStats {
        step: comparison_step,
        min: 0.0,
        max: 0.0,
        below: Vec::new(),
    };

    let mut column = vec![0.0; ensemble.num_trials()];
    for step in 0..horizon {
        for (slot, path) in column.iter_mut().zip(ensemble.paths()) {
            *slot = path.values()[step];
        }

        if step == comparison_step {
            at_step.below = references
                .iter()
                .map(|reference| ReferenceCount {
                    reference: *reference,
                    count: column.iter().filter(|v| **v < *reference).count(),
                })
                .collect();
        }

        column.sort_by(|a, b| a.total_cmp(b));

        if step == comparison_step {
            at_step.min = column[0];
            at_step.max = column[column.len() - 1];
        }

        lower[step] = percentile(&column, 5.0);
        median[step] = percentile(&column, 50.0);
        upper[step] = percentile(&column, 95.0);
    }

    Ok(EnsembleSummary {
        median: TimeSeries::new(unit, median),
        lower: TimeSeries::new(unit, lower),
        upper: TimeSeries::new(unit, upper),
        at_step,
    })
}
