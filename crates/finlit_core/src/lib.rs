//! Simulation core for an educational personal-finance dashboard.
//!
//! This crate provides the numeric building blocks behind the dashboard's
//! interactive charts:
//! - Compounding-frequency rate conversion
//! - Closed-form compound-interest projection and breakeven queries
//! - Stochastic return paths (a simple-return multiplicative random walk)
//! - Contribution/withdrawal accumulation with a fee and wealth-tax model
//! - Monte Carlo ensembles with median and percentile-band aggregation
//!
//! Everything is a pure function over in-memory arrays: randomness enters
//! only through explicit RNG/seed parameters, so callers can memoize results
//! keyed by structural inputs. The UI layer (widgets, charts, routing) lives
//! outside this crate and consumes plain numeric series.
//!
//! ```ignore
//! use finlit_core::{StepUnit, generate_path, run_ensemble, summarize};
//!
//! let ensemble = run_ensemble(100, 42, |rng| {
//!     generate_path(rng, 12 * 30 + 1, 0.02, 0.57, 1000.0, StepUnit::Month)
//! })?;
//! let summary = summarize(&ensemble, 12, &[1000.0])?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod accumulate;
pub mod error;
pub mod monte_carlo;
pub mod path;
pub mod projection;
pub mod rates;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use accumulate::{FeeSchedule, PeriodReturns, WealthTaxTiming, accumulate};
pub use error::{ConfigError, DomainError, SimError};
pub use model::{
    AccumulationOutcome, EnsembleSummary, HorizonStats, MAX_ENSEMBLE_VALUES, PathEnsemble,
    ReferenceCount, StepUnit, TimeSeries,
};
pub use monte_carlo::{run_ensemble, summarize};
pub use path::{generate_deltas, generate_path, seeded_rng};
pub use projection::{Breakeven, breakeven, compound_value, project, project_horizon};
pub use rates::{RateSpec, SharpeLink, periodic_rate};
