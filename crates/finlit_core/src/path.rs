//! Stochastic return paths: a discretized geometric-Brownian-style walk.
//!
//! The walk uses simple per-step returns, `1 + (mean + volatility * z)`,
//! rather than log returns. Unlike true geometric Brownian motion the value
//! can therefore cross zero or go negative when a single draw falls below
//! -100%; that tail behavior is part of the model and is preserved, not
//! corrected.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::DomainError;
use crate::model::{StepUnit, TimeSeries};

/// A small RNG for simulation trials: reproducible when a seed is given,
/// OS-seeded otherwise. Randomness is always an explicit parameter of the
/// generators below; no global state is consulted.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn return_distribution(
    volatility: f64,
    mean_return_pct: f64,
) -> Result<Normal<f64>, DomainError> {
    Normal::new(mean_return_pct / 100.0, volatility)
        .map_err(|_| DomainError::InvalidVolatility { volatility })
}

/// Draw the raw per-step simple returns for a path of `n_steps` values.
///
/// Returns `n_steps - 1` deltas, each `mean/100 + volatility * N(0, 1)`
/// with `volatility` expressed as a fraction (0.02 for 2%). The delta
/// stream composes with cash-flow accumulation, decoupling the
/// multiplicative-path view from the contribution view.
pub fn generate_deltas<R: Rng + ?Sized>(
    rng: &mut R,
    n_steps: usize,
    volatility: f64,
    mean_return_pct: f64,
) -> Result<Vec<f64>, DomainError> {
    let dist = return_distribution(volatility, mean_return_pct)?;
    let count = n_steps.saturating_sub(1);
    let mut deltas = vec![0.0; count];
    for slot in &mut deltas {
        *slot = dist.sample(rng);
    }
    Ok(deltas)
}

/// Simulate one value path of length `n_steps` as a multiplicative walk:
/// `v[0] = start_value`, `v[i] = v[i-1] * (1 + delta[i-1])`.
pub fn generate_path<R: Rng + ?Sized>(
    rng: &mut R,
    n_steps: usize,
    volatility: f64,
    mean_return_pct: f64,
    start_value: f64,
    unit: StepUnit,
) -> Result<TimeSeries, DomainError> {
    let dist = return_distribution(volatility, mean_return_pct)?;
    let mut values = vec![0.0; n_steps];
    if let Some(first) = values.first_mut() {
        *first = start_value;
    }
    for i in 1..n_steps {
        values[i] = values[i - 1] * (1.0 + dist.sample(rng));
    }
    Ok(TimeSeries::new(unit, values))
}
