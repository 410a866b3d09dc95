//! Shared data model: series, ensembles and summary types.

mod results;
mod series;

pub use results::{
    AccumulationOutcome, EnsembleSummary, HorizonStats, MAX_ENSEMBLE_VALUES, PathEnsemble,
    ReferenceCount,
};
pub use series::{StepUnit, TimeSeries};
