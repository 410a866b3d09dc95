use std::fmt;

/// Errors for mathematically invalid inputs.
///
/// These abort the single computation that received them; there is no
/// partial state to clean up since every operation is a pure function.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A growth rate at or below -100% makes the compounding base
    /// non-positive, so logs and fractional powers are undefined.
    RateBelowFloor { rate_pct: f64 },
    /// `target / principal` must be a positive finite number for the
    /// breakeven logarithm to exist.
    NonPositiveRatio { target: f64, principal: f64 },
    /// Volatility must be a non-negative finite fraction.
    InvalidVolatility { volatility: f64 },
    /// Compounding requires at least one period per year.
    ZeroPeriods,
    /// The Sharpe-ratio mapping divides by the ratio.
    NonPositiveSharpe { sharpe_ratio: f64 },
    /// A contribution schedule must cover at least one period.
    EmptySchedule,
    /// A per-period return schedule must line up with the contributions.
    LengthMismatch {
        contributions: usize,
        returns: usize,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::RateBelowFloor { rate_pct } => {
                write!(f, "rate {rate_pct}% is at or below -100%")
            }
            DomainError::NonPositiveRatio { target, principal } => {
                write!(
                    f,
                    "target/principal ratio is not positive (target={target}, principal={principal})"
                )
            }
            DomainError::InvalidVolatility { volatility } => {
                write!(f, "volatility {volatility} must be a non-negative finite fraction")
            }
            DomainError::ZeroPeriods => write!(f, "periods per year must be at least 1"),
            DomainError::NonPositiveSharpe { sharpe_ratio } => {
                write!(f, "sharpe ratio {sharpe_ratio} must be positive")
            }
            DomainError::EmptySchedule => write!(f, "contribution schedule is empty"),
            DomainError::LengthMismatch {
                contributions,
                returns,
            } => {
                write!(
                    f,
                    "return schedule length {returns} does not match {contributions} contributions"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors for structural misconfiguration, rejected before any simulation
/// work starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An ensemble needs at least one trial.
    NoTrials,
    /// The full ensemble is materialized before aggregation, so its total
    /// cell count is bounded.
    EnsembleTooLarge { cells: usize, max: usize },
    /// Summary statistics need at least one path.
    EmptyEnsemble,
    /// All paths in an ensemble must share one horizon.
    UnevenPathLengths { expected: usize, found: usize },
    /// The comparison step must fall inside the simulated horizon.
    StepOutOfRange { step: usize, len: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoTrials => write!(f, "number of trials must be at least 1"),
            ConfigError::EnsembleTooLarge { cells, max } => {
                write!(f, "ensemble holds {cells} values, exceeding the bound of {max}")
            }
            ConfigError::EmptyEnsemble => write!(f, "ensemble contains no paths"),
            ConfigError::UnevenPathLengths { expected, found } => {
                write!(
                    f,
                    "path of length {found} does not match ensemble horizon {expected}"
                )
            }
            ConfigError::StepOutOfRange { step, len } => {
                write!(f, "comparison step {step} is outside a horizon of {len} steps")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error for operations that can fail either way.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    Domain(DomainError),
    Config(ConfigError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Domain(e) => write!(f, "{e}"),
            SimError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Domain(e) => Some(e),
            SimError::Config(e) => Some(e),
        }
    }
}

impl From<DomainError> for SimError {
    fn from(e: DomainError) -> Self {
        SimError::Domain(e)
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Config(e)
    }
}
