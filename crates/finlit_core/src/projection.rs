//! Closed-form compound-interest projection and the breakeven query.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{StepUnit, TimeSeries};

/// Time at which a growing principal reaches a target amount.
///
/// `Never` is a reported state, not an error: a flat rate cannot move the
/// principal toward a different target no matter how long it compounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Breakeven {
    After(f64),
    Never,
}

impl Breakeven {
    #[must_use]
    pub fn years(self) -> Option<f64> {
        match self {
            Breakeven::After(years) => Some(years),
            Breakeven::Never => None,
        }
    }
}

fn check_rate_floor(rate_pct: f64, allow_exact: bool) -> Result<(), DomainError> {
    let below = if allow_exact {
        rate_pct < -100.0
    } else {
        rate_pct <= -100.0
    };
    if below || !rate_pct.is_finite() {
        return Err(DomainError::RateBelowFloor { rate_pct });
    }
    Ok(())
}

/// `principal * (1 + rate/100)^t`.
///
/// A rate of exactly -100% is valid here and destroys the principal for any
/// `t > 0`. Negative principal models debt and propagates its sign.
pub fn compound_value(principal: f64, rate_pct: f64, t: f64) -> Result<f64, DomainError> {
    check_rate_floor(rate_pct, true)?;
    Ok(principal * (1.0 + rate_pct / 100.0).powf(t))
}

/// Vectorized projection over arbitrary (not necessarily contiguous) steps.
pub fn project(principal: f64, rate_pct: f64, steps: &[f64]) -> Result<Vec<f64>, DomainError> {
    check_rate_floor(rate_pct, true)?;
    let base = 1.0 + rate_pct / 100.0;
    Ok(steps.iter().map(|t| principal * base.powf(*t)).collect())
}

/// Projection over the contiguous steps `0..=n_steps`, as one [`TimeSeries`].
pub fn project_horizon(
    principal: f64,
    rate_pct: f64,
    n_steps: usize,
    unit: StepUnit,
) -> Result<TimeSeries, DomainError> {
    check_rate_floor(rate_pct, true)?;
    let base = 1.0 + rate_pct / 100.0;
    let mut values = vec![0.0; n_steps + 1];
    for (t, slot) in values.iter_mut().enumerate() {
        *slot = principal * base.powi(t as i32);
    }
    Ok(TimeSeries::new(unit, values))
}

/// Years for `principal` to reach `target` at `rate_pct`:
/// `ln(target/principal) / ln(1 + rate/100)`.
pub fn breakeven(target: f64, principal: f64, rate_pct: f64) -> Result<Breakeven, DomainError> {
    let ratio = target / principal;
    if !(ratio > 0.0) || !ratio.is_finite() {
        return Err(DomainError::NonPositiveRatio { target, principal });
    }
    check_rate_floor(rate_pct, false)?;
    if rate_pct == 0.0 {
        // ln(1) = 0: the principal never moves. Identical amounts break
        // even immediately; anything else never does.
        return Ok(if ratio == 1.0 {
            Breakeven::After(0.0)
        } else {
            Breakeven::Never
        });
    }
    Ok(Breakeven::After(
        ratio.ln() / (1.0 + rate_pct / 100.0).ln(),
    ))
}
