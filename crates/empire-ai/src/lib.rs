#![deny(warnings)]

//! AI decision layer for the empire.
//!
//! - [`ceo`]: CEO profiles, strategic decisions and operational tuning
//! - [`market`]: trend classification over market signals
//! - [`planning`]: revenue forecasts and multi-year strategic plans
//!
//! Nothing here draws randomness on its own; callers pass the RNG in.

pub mod ceo;
pub mod market;
pub mod planning;

pub use ceo::{
    apply_decision, decide, optimize_operations, CeoProfile, OperationsPlan, StrategicOption,
};
pub use market::{analyze_market, MarketAnalysis, Recommendation, Trend};
pub use planning::{five_year_plan, forecast_revenue, strategic_plan, PlanYear};

use empire_core::ValidationError;
use empire_stats::StatsError;
use thiserror::Error;

/// Errors produced by the AI layer.
#[derive(Debug, Error, PartialEq)]
pub enum AiError {
    /// A decision was requested with an empty option list.
    #[error("no strategic options offered")]
    NoOptions,
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
