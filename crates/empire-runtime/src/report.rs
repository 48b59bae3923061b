//! Serializable run snapshot and the end-of-run report.

use chrono::NaiveDate;
use empire_ai::{MarketAnalysis, PlanYear};
use empire_core::{CompanyId, CompanyStage, Industry};
use empire_stats::TrendEstimate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Headline figures for one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyKpi {
    pub id: CompanyId,
    pub name: String,
    pub industry: Industry,
    pub stage: CompanyStage,
    pub arr: Decimal,
    pub profit_margin: f64,
    /// Next month's revenue; absent until two months of history exist.
    pub revenue_forecast: Option<TrendEstimate>,
}

/// Empire-wide KPIs at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmpireSnapshot {
    /// Months simulated so far.
    pub months_run: u32,
    /// Date of the next month to simulate.
    pub date: NaiveDate,
    pub companies: usize,
    pub ceos: usize,
    pub companies_created: u32,
    /// Sum of company ARR.
    pub total_arr: Decimal,
    /// Company valuations plus trading book plus real estate.
    pub valuation: Decimal,
    /// Company profits plus rental income.
    pub monthly_profit: Decimal,
    pub deals_completed: usize,
    pub total_deal_value: Decimal,
    pub trades_executed: u64,
    pub trading_portfolio: Decimal,
    pub trading_profit: Decimal,
    pub properties: usize,
    pub real_estate_value: Decimal,
    pub monthly_rental_income: Decimal,
    /// Most recent market analysis, if one has run.
    pub market: Option<MarketAnalysis>,
    /// Up to five companies, highest ARR first.
    pub top_companies: Vec<CompanyKpi>,
    /// Five-year plan for the highest-ARR company.
    pub flagship_plan: Vec<PlanYear>,
}

/// Write the final report through `tracing`.
pub fn log_report(snap: &EmpireSnapshot) {
    info!("TITAN AUTONOMOUS BUSINESS EMPIRE - FINAL REPORT");
    info!(
        months = snap.months_run,
        companies = snap.companies,
        ceos = snap.ceos,
        created = snap.companies_created,
        arr = %snap.total_arr.round_dp(0),
        valuation = %snap.valuation.round_dp(0),
        monthly_profit = %snap.monthly_profit.round_dp(0),
        "empire"
    );
    info!(
        deals = snap.deals_completed,
        deal_value = %snap.total_deal_value.round_dp(0),
        "m&a"
    );
    info!(
        trades = snap.trades_executed,
        portfolio = %snap.trading_portfolio.round_dp(0),
        profit = %snap.trading_profit.round_dp(0),
        "trading"
    );
    info!(
        properties = snap.properties,
        value = %snap.real_estate_value.round_dp(0),
        rent = %snap.monthly_rental_income.round_dp(0),
        "real estate"
    );
    if let Some(m) = &snap.market {
        info!(
            trend = ?m.trend,
            confidence = m.confidence,
            volatility = m.volatility,
            recommendation = ?m.recommendation,
            "market"
        );
    }
    for (rank, c) in snap.top_companies.iter().enumerate() {
        info!(
            rank = rank + 1,
            company = %c.name,
            arr = %c.arr.round_dp(0),
            margin_pct = c.profit_margin * 100.0,
            forecast = ?c.revenue_forecast.map(|t| t.forecast.round()),
            "top company"
        );
    }
    if let Some(last) = snap.flagship_plan.last() {
        info!(
            year = last.year,
            revenue_target = %last.revenue_target.round_dp(0),
            headcount = last.headcount,
            "flagship plan horizon"
        );
    }
}
