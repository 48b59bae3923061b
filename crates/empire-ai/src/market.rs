//! Market trend classification.
//!
//! Signals are scores in [0, 1] per sector; their mean decides the trend and
//! their spread is reported as volatility.

use crate::AiError;
use empire_stats::summarize;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Expand,
    Consolidate,
}

/// Result of [`analyze_market`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub trend: Trend,
    /// Distance of the mean signal from neutral (0.5), scaled to [0, 1].
    pub confidence: f64,
    /// Population standard deviation of the signals.
    pub volatility: f64,
    pub recommendation: Recommendation,
    pub mean_signal: f64,
}

/// Classify a set of market signals.
///
/// Bullish when the mean signal exceeds 0.5; expansion is recommended when it
/// exceeds 0.6. Fails with `InvalidInput` on an empty set.
pub fn analyze_market(signals: &[f64]) -> Result<MarketAnalysis, AiError> {
    let summary = summarize(signals)?;
    let mean = summary.mean;
    Ok(MarketAnalysis {
        trend: if mean > 0.5 {
            Trend::Bullish
        } else {
            Trend::Bearish
        },
        confidence: (mean - 0.5).abs() * 2.0,
        volatility: summary.std_dev,
        recommendation: if mean > 0.6 {
            Recommendation::Expand
        } else {
            Recommendation::Consolidate
        },
        mean_signal: mean,
    })
}
