//! Rate conversion between compounding frequencies, and the risk/return
//! link used by paired dashboard controls.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::StepUnit;

/// Equivalent per-period rate for a nominal annual rate compounded
/// `periods_per_year` times.
///
/// `effective = 100 * ((1 + nominal/100)^(1/periods) - 1)`, so compounding
/// the effective rate over a year reproduces the nominal one. Annual
/// compounding (`periods_per_year == 1`) is the identity.
pub fn periodic_rate(nominal_pct: f64, periods_per_year: u32) -> Result<f64, DomainError> {
    if periods_per_year == 0 {
        return Err(DomainError::ZeroPeriods);
    }
    if nominal_pct <= -100.0 {
        return Err(DomainError::RateBelowFloor {
            rate_pct: nominal_pct,
        });
    }
    let base = 1.0 + nominal_pct / 100.0;
    Ok(100.0 * (base.powf(1.0 / f64::from(periods_per_year)) - 1.0))
}

/// A rate in percent together with its compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    pub percent: f64,
    pub compounding: StepUnit,
}

impl RateSpec {
    #[must_use]
    pub fn annual(percent: f64) -> Self {
        Self {
            percent,
            compounding: StepUnit::Year,
        }
    }

    #[must_use]
    pub fn monthly(percent: f64) -> Self {
        Self {
            percent,
            compounding: StepUnit::Month,
        }
    }

    /// The equivalent rate under another compounding frequency.
    pub fn adjusted_to(self, unit: StepUnit) -> Result<RateSpec, DomainError> {
        if unit == self.compounding {
            return Ok(self);
        }
        let percent = match (self.compounding, unit) {
            (StepUnit::Year, StepUnit::Month) => periodic_rate(self.percent, 12)?,
            (StepUnit::Month, StepUnit::Year) => {
                if self.percent <= -100.0 {
                    return Err(DomainError::RateBelowFloor {
                        rate_pct: self.percent,
                    });
                }
                100.0 * ((1.0 + self.percent / 100.0).powi(12) - 1.0)
            }
            _ => self.percent,
        };
        Ok(RateSpec {
            percent,
            compounding: unit,
        })
    }
}

/// Pure bidirectional mapping between expected return and volatility at a
/// fixed Sharpe ratio: `return = risk_free + sharpe * volatility`.
///
/// The dashboard keeps two sliders consistent by calling one direction or
/// the other on change; no state lives here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharpeLink {
    sharpe_ratio: f64,
    risk_free_pct: f64,
}

impl SharpeLink {
    pub fn new(sharpe_ratio: f64, risk_free_pct: f64) -> Result<Self, DomainError> {
        if !(sharpe_ratio > 0.0) || !sharpe_ratio.is_finite() {
            return Err(DomainError::NonPositiveSharpe { sharpe_ratio });
        }
        Ok(Self {
            sharpe_ratio,
            risk_free_pct,
        })
    }

    #[must_use]
    pub fn expected_return_for(&self, volatility_pct: f64) -> f64 {
        self.risk_free_pct + self.sharpe_ratio * volatility_pct
    }

    #[must_use]
    pub fn volatility_for(&self, expected_return_pct: f64) -> f64 {
        (expected_return_pct - self.risk_free_pct) / self.sharpe_ratio
    }
}
