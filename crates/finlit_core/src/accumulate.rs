//! Sequential contribution/withdrawal accumulation with an optional
//! fee-and-tax model, plus depletion detection.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{AccumulationOutcome, StepUnit, TimeSeries};

/// Per-period returns driving an accumulation, in percent per period.
///
/// `Fixed` applies one rate every period; `Schedule` carries one rate per
/// period, e.g. a user-edited rate table or a stochastic delta stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PeriodReturns {
    Fixed(f64),
    Schedule(Vec<f64>),
}

impl PeriodReturns {
    /// Lift a fractional delta stream from
    /// [`generate_deltas`](crate::path::generate_deltas) into percent form.
    #[must_use]
    pub fn from_deltas(deltas: &[f64]) -> Self {
        PeriodReturns::Schedule(deltas.iter().map(|d| d * 100.0).collect())
    }

    fn rate_at(&self, period: usize) -> f64 {
        match self {
            PeriodReturns::Fixed(pct) => *pct,
            PeriodReturns::Schedule(rates) => rates[period],
        }
    }
}

/// When the wealth-tax threshold is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WealthTaxTiming {
    /// Once, against the starting balance. A schedule that starts from zero
    /// is then never taxed even after crossing the threshold. This matches
    /// the original dashboard and is kept as the default for compatibility;
    /// it is almost certainly an unintended approximation there.
    #[default]
    AtStart,
    /// Re-evaluated each period against the running balance.
    PerPeriod,
}

/// Fee and tax drag applied on top of the base period return.
///
/// All rates are percent. The effective period rate is
/// `base - yearly - performance * max(0, base - benchmark)/100 -
/// wealth_tax * taxable_flag`, and each contribution is scaled by
/// `1 - transaction/100 * sign(c)`: deposits shrink by the fee, withdrawals
/// grow in magnitude, so the saver pays in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub yearly_pct: f64,
    pub transaction_pct: f64,
    pub performance_pct: f64,
    pub benchmark_pct: f64,
    pub wealth_tax_pct: f64,
    pub wealth_tax_threshold: f64,
    pub wealth_tax_timing: WealthTaxTiming,
}

impl FeeSchedule {
    fn effective_rate_pct(&self, base_pct: f64, taxable: bool) -> f64 {
        let performance_drag = self.performance_pct * (base_pct - self.benchmark_pct).max(0.0) / 100.0;
        let wealth_drag = if taxable { self.wealth_tax_pct } else { 0.0 };
        base_pct - self.yearly_pct - performance_drag - wealth_drag
    }

    fn scaled_contribution(&self, contribution: f64) -> f64 {
        let sign = if contribution > 0.0 { 1.0 } else { -1.0 };
        contribution * (1.0 - self.transaction_pct / 100.0 * sign)
    }
}

/// Simulate sequential saving/spending: `w[0] = 0`,
/// `w[i] = (w[i-1] + c[i-1]) * (1 + r[i-1]/100)`.
///
/// The produced series has `contributions.len() + 1` values. The first step
/// at which wealth goes below zero is reported as the depletion boundary; a
/// depleted balance keeps compounding (debt grows), which is the expected
/// shape of a ran-out-of-money chart.
pub fn accumulate(
    contributions: &[f64],
    returns: &PeriodReturns,
    fees: Option<&FeeSchedule>,
    unit: StepUnit,
) -> Result<AccumulationOutcome, DomainError> {
    if contributions.is_empty() {
        return Err(DomainError::EmptySchedule);
    }
    if let PeriodReturns::Schedule(rates) = returns
        && rates.len() != contributions.len()
    {
        return Err(DomainError::LengthMismatch {
            contributions: contributions.len(),
            returns: rates.len(),
        });
    }

    let mut wealth = vec![0.0; contributions.len() + 1];

    // One-shot threshold evaluation, from the starting balance.
    let taxable_at_start = fees
        .map(|f| wealth[0] > f.wealth_tax_threshold)
        .unwrap_or(false);

    for i in 1..wealth.len() {
        let base_pct = returns.rate_at(i - 1);
        let (contribution, rate_pct) = match fees {
            Some(fees) => {
                let taxable = match fees.wealth_tax_timing {
                    WealthTaxTiming::AtStart => taxable_at_start,
                    WealthTaxTiming::PerPeriod => wealth[i - 1] > fees.wealth_tax_threshold,
                };
                (
                    fees.scaled_contribution(contributions[i - 1]),
                    fees.effective_rate_pct(base_pct, taxable),
                )
            }
            None => (contributions[i - 1], base_pct),
        };
        wealth[i] = (wealth[i - 1] + contribution) * (1.0 + rate_pct / 100.0);
    }

    let series = TimeSeries::new(unit, wealth);
    let depleted_at = series.first_step_below(0.0);
    Ok(AccumulationOutcome { series, depleted_at })
}
