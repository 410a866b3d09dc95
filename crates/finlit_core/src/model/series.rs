//! Step-indexed value series shared by every simulation component.

use serde::{Deserialize, Serialize};

/// Unit of one simulation step.
///
/// The unit is an attribute of the whole series; step indices themselves are
/// always contiguous integers starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepUnit {
    #[default]
    Year,
    Month,
}

impl StepUnit {
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            StepUnit::Year => 1,
            StepUnit::Month => 12,
        }
    }

    /// Convert a step index into a (possibly fractional) year count.
    #[must_use]
    pub fn steps_to_years(self, step: usize) -> f64 {
        step as f64 / f64::from(self.periods_per_year())
    }
}

/// An ordered sequence of values indexed by contiguous steps from 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    unit: StepUnit,
    values: Vec<f64>,
}

impl TimeSeries {
    #[must_use]
    pub fn new(unit: StepUnit, values: Vec<f64>) -> Self {
        Self { unit, values }
    }

    #[must_use]
    pub fn unit(&self) -> StepUnit {
        self.unit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn value_at(&self, step: usize) -> Option<f64> {
        self.values.get(step).copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Iterate as (step index, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// First step index at which the value drops below `threshold`.
    #[must_use]
    pub fn first_step_below(&self, threshold: f64) -> Option<usize> {
        self.values.iter().position(|v| *v < threshold)
    }
}
