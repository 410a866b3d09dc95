//! Tests for stochastic paths, Monte Carlo runs and ensemble summaries

use crate::accumulate::{PeriodReturns, accumulate};
use crate::error::{ConfigError, SimError};
use crate::model::{MAX_ENSEMBLE_VALUES, PathEnsemble, StepUnit, TimeSeries};
use crate::monte_carlo::{run_ensemble, summarize};
use crate::path::{generate_deltas, generate_path, seeded_rng};
use crate::projection::compound_value;
use crate::rates::periodic_rate;

#[test]
fn test_zero_volatility_path_is_deterministic_projection() {
    let monthly_pct = periodic_rate(7.0, 12).unwrap();
    let path = generate_path(
        &mut seeded_rng(None),
        12 * 10 + 1,
        0.0,
        monthly_pct,
        1000.0,
        StepUnit::Month,
    )
    .unwrap();

    for (step, value) in path.iter() {
        let expected = compound_value(1000.0, monthly_pct, step as f64).unwrap();
        assert!(
            (value - expected).abs() < 1e-9 * expected,
            "step {step}: {value} vs {expected}"
        );
    }
}

#[test]
fn test_run_ensemble_is_reproducible_per_seed() {
    let factory = |vol: f64| {
        move |rng: &mut rand::rngs::SmallRng| {
            generate_path(rng, 61, vol, 0.57, 1000.0, StepUnit::Month)
        }
    };

    let a = run_ensemble(50, 42, factory(0.02)).unwrap();
    let b = run_ensemble(50, 42, factory(0.02)).unwrap();
    let c = run_ensemble(50, 43, factory(0.02)).unwrap();

    assert_eq!(a.num_trials(), 50);
    assert_eq!(a.horizon(), 61);
    assert_eq!(a.paths(), b.paths());
    assert_ne!(a.paths(), c.paths());

    // Every trial starts from the same initial value but diverges after.
    assert!(a.paths().iter().all(|p| p.value_at(0) == Some(1000.0)));
    let finals = a.values_at(60);
    assert!(finals.iter().any(|v| (*v - finals[0]).abs() > 1e-9));
}

#[test]
fn test_run_ensemble_rejects_zero_trials() {
    let result = run_ensemble(0, 42, |rng| {
        generate_path(rng, 10, 0.02, 0.57, 1000.0, StepUnit::Month)
    });
    assert_eq!(result.unwrap_err(), SimError::Config(ConfigError::NoTrials));
}

#[test]
fn test_run_ensemble_propagates_domain_errors() {
    let result = run_ensemble(10, 42, |rng| {
        generate_path(rng, 10, -0.5, 0.57, 1000.0, StepUnit::Month)
    });
    assert!(matches!(result, Err(SimError::Domain(_))));
}

#[test]
fn test_run_ensemble_enforces_memory_bound() {
    let n_steps = MAX_ENSEMBLE_VALUES / 16;
    let result = run_ensemble(17, 42, |rng| {
        generate_path(rng, n_steps, 0.0, 0.0, 1.0, StepUnit::Month)
    });
    assert!(matches!(
        result,
        Err(SimError::Config(ConfigError::EnsembleTooLarge { .. }))
    ));
}

#[test]
fn test_ensemble_requires_equal_horizons() {
    let short = TimeSeries::new(StepUnit::Year, vec![1.0, 2.0]);
    let long = TimeSeries::new(StepUnit::Year, vec![1.0, 2.0, 3.0]);
    assert_eq!(
        PathEnsemble::new(vec![short, long]).unwrap_err(),
        ConfigError::UnevenPathLengths {
            expected: 2,
            found: 3
        }
    );
    assert_eq!(
        PathEnsemble::new(Vec::new()).unwrap_err(),
        ConfigError::EmptyEnsemble
    );
}

#[test]
fn test_summary_of_known_ensemble() {
    let paths = vec![
        TimeSeries::new(StepUnit::Year, vec![1.0; 4]),
        TimeSeries::new(StepUnit::Year, vec![2.0; 4]),
        TimeSeries::new(StepUnit::Year, vec![3.0; 4]),
    ];
    let ensemble = PathEnsemble::new(paths).unwrap();
    let summary = summarize(&ensemble, 2, &[2.5, 0.5]).unwrap();

    for step in 0..4 {
        assert_eq!(summary.median.value_at(step), Some(2.0));
        // Linear interpolation over three sorted values.
        assert!((summary.lower.value_at(step).unwrap() - 1.1).abs() < 1e-12);
        assert!((summary.upper.value_at(step).unwrap() - 2.9).abs() < 1e-12);
    }

    assert_eq!(summary.at_step.step, 2);
    assert_eq!(summary.at_step.min, 1.0);
    assert_eq!(summary.at_step.max, 3.0);
    assert_eq!(summary.at_step.below[0].count, 2);
    assert_eq!(summary.at_step.below[1].count, 0);
}

#[test]
fn test_summary_step_must_be_in_range() {
    let ensemble =
        PathEnsemble::new(vec![TimeSeries::new(StepUnit::Year, vec![1.0; 4])]).unwrap();
    assert_eq!(
        summarize(&ensemble, 4, &[]).unwrap_err(),
        ConfigError::StepOutOfRange { step: 4, len: 4 }
    );
}

#[test]
fn test_band_brackets_median_for_stochastic_ensemble() {
    let ensemble = run_ensemble(100, 7, |rng| {
        generate_path(rng, 121, 0.02, 0.57, 1000.0, StepUnit::Month)
    })
    .unwrap();
    let summary = summarize(&ensemble, 120, &[1000.0]).unwrap();

    for step in 0..121 {
        let lo = summary.lower.value_at(step).unwrap();
        let mid = summary.median.value_at(step).unwrap();
        let hi = summary.upper.value_at(step).unwrap();
        assert!(lo <= mid && mid <= hi, "step {step}: {lo} {mid} {hi}");
    }
    assert!(summary.at_step.min <= summary.lower.value_at(120).unwrap());
    assert!(summary.at_step.max >= summary.upper.value_at(120).unwrap());
}

/// The full retirement composition the dashboard renders: per-trial delta
/// streams feeding monthly contribution/withdrawal accumulation.
#[test]
fn test_accumulation_ensemble_end_to_end() {
    let years_work = 40;
    let years_retirement = 30;
    let n_months = 12 * (years_work + years_retirement);
    let monthly_pct = periodic_rate(7.0, 12).unwrap();

    let mut contributions = vec![1000.0 / 12.0; 12 * years_work];
    contributions.extend(vec![-5000.0 / 12.0; 12 * years_retirement]);

    let ensemble = run_ensemble(100, 11, |rng| {
        let deltas = generate_deltas(rng, n_months + 1, 0.02, monthly_pct)?;
        let outcome = accumulate(
            &contributions,
            &PeriodReturns::from_deltas(&deltas),
            None,
            StepUnit::Month,
        )?;
        Ok(outcome.series)
    })
    .unwrap();

    assert_eq!(ensemble.num_trials(), 100);
    assert_eq!(ensemble.horizon(), n_months + 1);

    let summary = summarize(&ensemble, n_months, &[0.0]).unwrap();
    assert!(summary.median.values().iter().all(|v| v.is_finite()));
    // Wealth starts flat at zero in every trial.
    assert_eq!(summary.median.value_at(0), Some(0.0));
    assert_eq!(summary.at_step.below[0].reference, 0.0);
}
