#![deny(warnings)]

//! Statistics helpers for revenue and market series.
//!
//! This module provides validated utilities for:
//! - Mean and population standard deviation of a series
//! - Ordinary least squares trend over an implicit time index (0..n-1),
//!   with a one-step-ahead forecast and the residual standard error
//!
//! All functions are pure; inputs must be finite.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Errors produced by statistics helpers.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// The series was empty.
    #[error("series must not be empty")]
    InvalidInput,
    /// Too few observations for the requested fit.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    /// An observation was NaN or infinite.
    #[error("non-finite observation at index {0}")]
    NonFinite(usize),
    /// An estimate does not fit in an f64.
    #[error("estimate exceeds the f64 range")]
    Overflow,
}

/// Location and spread of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

/// Least-squares line fitted over the series index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendEstimate {
    /// Change per time step.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
    /// Fitted value one step past the last observation (index n).
    pub forecast: f64,
    /// Population standard deviation of the residuals.
    pub std_error: f64,
}

impl TrendEstimate {
    /// Value of the fitted line at time index `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

fn check_finite(series: &[f64]) -> Result<(), StatsError> {
    match series.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(StatsError::NonFinite(i)),
        None => Ok(()),
    }
}

/// Largest magnitude in the series, or 1 for an all-zero series.
fn scale_of(series: &[f64]) -> f64 {
    let max = series.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn scaled(series: &[f64], scale: f64) -> impl Iterator<Item = f64> + '_ {
    series.iter().map(move |&x| x / scale)
}

/// Smallest positive subnormal.
const TINY: f64 = f64::MIN_POSITIVE * f64::EPSILON;

/// Mean and population standard deviation of a non-empty series.
///
/// Example:
/// let s = summarize(&[0.7, 0.6, 0.8]).unwrap();
/// assert!((s.mean - 0.7).abs() < 1e-12);
pub fn summarize(series: &[f64]) -> Result<Summary, StatsError> {
    if series.is_empty() {
        return Err(StatsError::InvalidInput);
    }
    check_finite(series)?;
    let n = series.len() as f64;
    // Spread is computed on values scaled into [-1, 1] and shifted by the
    // first element, so shifts and squares stay in range and a constant
    // series yields exactly zero.
    let scale = scale_of(series);
    let sum = series.iter().sum::<f64>();
    let mean = if sum.is_finite() {
        sum / n
    } else {
        scaled(series, scale).sum::<f64>() / n * scale
    };
    let first = series[0] / scale;
    let shifted_mean = scaled(series, scale).map(|y| y - first).sum::<f64>() / n;
    let variance = scaled(series, scale)
        .map(|y| {
            let d = y - first - shifted_mean;
            d * d
        })
        .sum::<f64>()
        / n;
    // A non-constant series keeps a positive spread even when it rounds
    // below the subnormal range.
    let std_dev = if variance > 0.0 {
        (variance.sqrt() * scale).max(TINY)
    } else {
        0.0
    };
    Ok(Summary { mean, std_dev })
}

/// Fit `y = slope * x + intercept` over x = 0..n-1 by least squares.
///
/// The forecast is the line evaluated at x = n, and `std_error` is the
/// population standard deviation of `y - fitted(y)`. Requires n >= 2.
/// Fails with `Overflow` when an estimate leaves the f64 range.
///
/// Example:
/// let t = fit_trend(&[10.0, 20.0, 30.0, 40.0]).unwrap();
/// assert_eq!(t.forecast, 50.0);
pub fn fit_trend(series: &[f64]) -> Result<TrendEstimate, StatsError> {
    if series.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: series.len(),
        });
    }
    check_finite(series)?;
    // Fit on values scaled into [-1, 1], then scale the estimates back.
    let scale = scale_of(series);
    let ys: Vec<f64> = scaled(series, scale).collect();
    let n = ys.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }
    // sxx > 0 whenever n >= 2
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let residuals: Vec<f64> = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| y - (slope * i as f64 + intercept))
        .collect();
    let std_error = summarize(&residuals)?.std_dev;
    let estimate = TrendEstimate {
        slope: slope * scale,
        intercept: intercept * scale,
        forecast: (slope * n + intercept) * scale,
        std_error: std_error * scale,
    };
    let fields = [
        estimate.slope,
        estimate.intercept,
        estimate.forecast,
        estimate.std_error,
    ];
    if !fields.iter().all(|v| v.is_finite()) {
        return Err(StatsError::Overflow);
    }
    trace!(points = series.len(), ?estimate, "trend fitted");
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn summarize_market_signals() {
        let s = summarize(&[0.7, 0.6, 0.8]).unwrap();
        assert!((s.mean - 0.7).abs() < 1e-12);
        assert!((s.std_dev - 0.081_649_658).abs() < 1e-8);
    }

    #[test]
    fn summarize_single_value() {
        let s = summarize(&[42.5]).unwrap();
        assert_eq!(s.mean, 42.5);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn summarize_rejects_empty_and_nan() {
        assert_eq!(summarize(&[]), Err(StatsError::InvalidInput));
        assert_eq!(
            summarize(&[1.0, f64::NAN]),
            Err(StatsError::NonFinite(1))
        );
    }

    #[test]
    fn constant_repeating_decimal_has_zero_spread() {
        let s = summarize(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn perfect_line_fits_exactly() {
        let t = fit_trend(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert!((t.slope - 10.0).abs() < 1e-12);
        assert!((t.intercept - 10.0).abs() < 1e-12);
        assert!((t.forecast - 50.0).abs() < 1e-12);
        assert_eq!(t.std_error, 0.0);
        assert!((t.value_at(2.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn compounding_growth_leaves_residual_error() {
        let t = fit_trend(&[100.0, 110.0, 121.0, 133.1]).unwrap();
        assert!((t.slope - 11.03).abs() < 1e-9);
        assert!((t.intercept - 99.48).abs() < 1e-9);
        // A straight line trails the compounded next value of 146.41.
        assert!((t.forecast - 143.6).abs() < 1e-9);
        assert!(t.forecast < 146.41);
        assert!(t.std_error > 0.0);
        assert!(t.std_error < 1.0);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let t = fit_trend(&[5.0; 6]).unwrap();
        assert_eq!(t.slope, 0.0);
        assert_eq!(t.forecast, 5.0);
        assert_eq!(t.std_error, 0.0);
    }

    #[test]
    fn trend_needs_two_points() {
        assert_eq!(
            fit_trend(&[]),
            Err(StatsError::InsufficientData {
                required: 2,
                actual: 0
            })
        );
        assert_eq!(
            fit_trend(&[100.0]),
            Err(StatsError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            fit_trend(&[1.0, f64::INFINITY]),
            Err(StatsError::NonFinite(1))
        );
    }

    #[test]
    fn extreme_magnitudes_keep_a_finite_spread() {
        let s = summarize(&[f64::MAX, -f64::MAX]).unwrap();
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.std_dev, f64::MAX);

        let s = summarize(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(s.mean, f64::MAX);
        assert_eq!(s.std_dev, 0.0);

        let s = summarize(&[0.0, 1e-200]).unwrap();
        assert!((s.std_dev - 5e-201).abs() < 1e-214);

        let s = summarize(&[0.0, TINY]).unwrap();
        assert!(s.std_dev > 0.0);
    }

    #[test]
    fn huge_alternating_series_fits() {
        let t = fit_trend(&[1e300, -1e300, 1e300]).unwrap();
        assert!(t.slope.abs() < 1e285);
        assert!((t.intercept - 1e300 / 3.0).abs() < 1e286);
        assert!(t.std_error.is_finite());
        assert!(t.std_error > 9e299);
    }

    #[test]
    fn out_of_range_forecast_is_an_error() {
        assert_eq!(
            fit_trend(&[-f64::MAX, f64::MAX]),
            Err(StatsError::Overflow)
        );
    }

    fn series() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-1_000_000i64..1_000_000, 1..64)
            .prop_map(|v| v.into_iter().map(|c| c as f64 / 100.0).collect())
    }

    fn extreme_series() -> impl Strategy<Value = Vec<f64>> {
        let value = prop_oneof![
            (-1000i64..1000, -300i32..300).prop_map(|(m, e)| m as f64 * 10f64.powi(e)),
            Just(f64::MAX),
            Just(-f64::MAX),
            Just(f64::MIN_POSITIVE),
            Just(TINY),
            Just(0.0),
        ];
        prop::collection::vec(value, 1..16)
    }

    proptest! {
        #[test]
        fn extreme_series_spread_is_well_defined(s in extreme_series()) {
            let summary = summarize(&s).unwrap();
            prop_assert!(summary.mean.is_finite());
            prop_assert!(summary.std_dev.is_finite());
            prop_assert!(summary.std_dev >= 0.0);
            let constant = s.iter().all(|&v| v == s[0]);
            prop_assert_eq!(summary.std_dev == 0.0, constant);
        }

        #[test]
        fn extreme_trend_is_finite_or_overflow(s in extreme_series()) {
            match fit_trend(&s) {
                Ok(t) => {
                    prop_assert!(t.slope.is_finite());
                    prop_assert!(t.forecast.is_finite());
                    prop_assert!(t.std_error.is_finite() && t.std_error >= 0.0);
                }
                Err(e) => prop_assert!(matches!(
                    e,
                    StatsError::Overflow | StatsError::InsufficientData { .. }
                ), "unexpected error: {:?}", e),
            }
        }

        #[test]
        fn mean_is_sum_over_len(s in series()) {
            let sum: f64 = s.iter().sum();
            prop_assert_eq!(summarize(&s).unwrap().mean, sum / s.len() as f64);
        }

        #[test]
        fn std_dev_zero_iff_constant(s in series()) {
            let std = summarize(&s).unwrap().std_dev;
            prop_assert!(std >= 0.0);
            let constant = s.iter().all(|&v| v == s[0]);
            prop_assert_eq!(std == 0.0, constant);
        }

        #[test]
        fn constant_series_has_zero_std(c in -1_000_000i64..1_000_000, len in 1usize..64) {
            let s = vec![c as f64 / 100.0; len];
            prop_assert_eq!(summarize(&s).unwrap().std_dev, 0.0);
        }

        #[test]
        fn linear_series_recovered(a in -1000i64..1000, b in -100i64..100, len in 2usize..50) {
            let s: Vec<f64> = (0..len).map(|i| (a + b * i as i64) as f64).collect();
            let t = fit_trend(&s).unwrap();
            prop_assert!((t.slope - b as f64).abs() < 1e-6);
            prop_assert!((t.intercept - a as f64).abs() < 1e-6);
            prop_assert!((t.forecast - (a + b * len as i64) as f64).abs() < 1e-6);
            prop_assert!(t.std_error < 1e-6);
        }
    }
}
