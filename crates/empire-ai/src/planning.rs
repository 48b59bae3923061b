//! Revenue forecasting and multi-year strategic plans.

use crate::AiError;
use empire_core::{apply_factor, arr, Company, ValidationError};
use empire_stats::{fit_trend, TrendEstimate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Yearly revenue growth targeted by a plan.
pub const REVENUE_GROWTH: f64 = 1.3;
/// Yearly headcount growth targeted by a plan.
pub const HEADCOUNT_GROWTH: f64 = 1.2;

/// Forecast next month's revenue from a monthly history.
///
/// Needs at least two months; shorter histories fail with
/// `InsufficientData` instead of producing a zero forecast.
pub fn forecast_revenue(history: &[Decimal]) -> Result<TrendEstimate, AiError> {
    let series = history
        .iter()
        .map(|v| v.to_f64().ok_or(ValidationError::NonFinite))
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(fit_trend(&series)?)
}

/// Targets for one plan year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanYear {
    /// 1-based year offset.
    pub year: u32,
    /// Annual revenue target in USD.
    pub revenue_target: Decimal,
    pub expansion_markets: u32,
    pub new_products: u32,
    pub headcount: u32,
}

/// Plan `years` ahead from the company's current ARR and headcount.
pub fn strategic_plan(company: &Company, years: u32) -> Result<Vec<PlanYear>, AiError> {
    let base = arr(company)?;
    (1..=years)
        .map(|year| -> Result<PlanYear, AiError> {
            let exp = i32::try_from(year).unwrap_or(i32::MAX);
            let revenue_target = apply_factor(base, REVENUE_GROWTH.powi(exp))?;
            let headcount = (f64::from(company.employees) * HEADCOUNT_GROWTH.powi(exp)).round();
            if !headcount.is_finite() {
                return Err(AiError::Validation(ValidationError::NonFinite));
            }
            Ok(PlanYear {
                year,
                revenue_target,
                expansion_markets: year.saturating_mul(2),
                new_products: year,
                headcount: headcount as u32,
            })
        })
        .collect()
}

pub fn five_year_plan(company: &Company) -> Result<Vec<PlanYear>, AiError> {
    strategic_plan(company, 5)
}
