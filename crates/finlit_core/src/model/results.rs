//! Output types from simulation runs.
//!
//! A [`PathEnsemble`] holds the materialized trials of one Monte Carlo run
//! and is dropped when the caller is done with it; nothing here persists.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::series::{StepUnit, TimeSeries};

/// Upper bound on trials x steps for a materialized ensemble.
///
/// Dashboard-scale inputs (a few hundred trials over at most a few thousand
/// periods) sit far below this; the bound exists so a misconfigured caller
/// fails cleanly instead of exhausting memory.
pub const MAX_ENSEMBLE_VALUES: usize = 16_000_000;

/// A set of equal-length paths from independent simulation trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEnsemble {
    paths: Vec<TimeSeries>,
}

impl PathEnsemble {
    /// Build an ensemble, validating that every path shares one horizon and
    /// that the total value count stays within [`MAX_ENSEMBLE_VALUES`].
    pub fn new(paths: Vec<TimeSeries>) -> Result<Self, ConfigError> {
        let Some(first) = paths.first() else {
            return Err(ConfigError::EmptyEnsemble);
        };
        let expected = first.len();
        for path in &paths {
            if path.len() != expected {
                return Err(ConfigError::UnevenPathLengths {
                    expected,
                    found: path.len(),
                });
            }
        }
        let cells = paths.len() * expected;
        if cells > MAX_ENSEMBLE_VALUES {
            return Err(ConfigError::EnsembleTooLarge {
                cells,
                max: MAX_ENSEMBLE_VALUES,
            });
        }
        Ok(Self { paths })
    }

    #[must_use]
    pub fn paths(&self) -> &[TimeSeries] {
        &self.paths
    }

    #[must_use]
    pub fn num_trials(&self) -> usize {
        self.paths.len()
    }

    /// Steps per path. Ensembles are never empty, so this is total.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.paths[0].len()
    }

    #[must_use]
    pub fn unit(&self) -> StepUnit {
        self.paths[0].unit()
    }

    /// Values of every trial at one step, in trial order.
    #[must_use]
    pub fn values_at(&self, step: usize) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|p| p.value_at(step))
            .collect()
    }
}

/// Count of trials that fell below one reference value at the comparison
/// step (e.g. the initial principal, or a risk-free projection).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCount {
    pub reference: f64,
    pub count: usize,
}

/// Scalar statistics of an ensemble at a single comparison step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonStats {
    pub step: usize,
    pub min: f64,
    pub max: f64,
    pub below: Vec<ReferenceCount>,
}

/// Cross-path aggregate over a full ensemble: the per-step median and the
/// 5th/95th percentile band, plus [`HorizonStats`] at one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub median: TimeSeries,
    pub lower: TimeSeries,
    pub upper: TimeSeries,
    pub at_step: HorizonStats,
}

/// Wealth trajectory from a cash-flow accumulation, with the depletion
/// boundary if the balance ever crossed below zero.
///
/// Depletion is an expected, reportable outcome of a decumulation scenario,
/// not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationOutcome {
    pub series: TimeSeries,
    /// First step index at which wealth went negative.
    pub depleted_at: Option<usize>,
}

impl AccumulationOutcome {
    /// Depletion boundary converted to years, per the series unit.
    #[must_use]
    pub fn depletion_years(&self) -> Option<f64> {
        self.depleted_at
            .map(|step| self.series.unit().steps_to_years(step))
    }

    #[must_use]
    pub fn ran_out_of_money(&self) -> bool {
        self.depleted_at.is_some()
    }
}
