#![deny(warnings)]

//! Core domain models and invariants for the Titan business empire.
//!
//! This crate defines the serializable records shared by the simulation
//! crates, the scenario/configuration types, and validation helpers that
//! guard basic invariants before anything is simulated. Derived figures
//! (profit, margin, ARR) are free functions over a borrowed record rather
//! than behaviour attached to the record itself.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Unique identifier for a company, e.g. "company-3".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an AI CEO, e.g. "ceo-0".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CeoId(pub String);

impl fmt::Display for CeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Industries a company can operate in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Software as a service
    Saas,
    /// Financial technology
    Fintech,
    /// Online retail
    Ecommerce,
    /// AI consulting and hosted models
    AiServices,
    /// Professional services
    Consulting,
    /// Property holding companies
    RealEstate,
}

impl Industry {
    /// Every industry, in declaration order.
    pub const ALL: [Industry; 6] = [
        Industry::Saas,
        Industry::Fintech,
        Industry::Ecommerce,
        Industry::AiServices,
        Industry::Consulting,
        Industry::RealEstate,
    ];

    /// Human-readable label used in generated company names.
    pub fn label(self) -> &'static str {
        match self {
            Industry::Saas => "SaaS",
            Industry::Fintech => "FinTech",
            Industry::Ecommerce => "E-commerce",
            Industry::AiServices => "AI Services",
            Industry::Consulting => "Consulting",
            Industry::RealEstate => "Real Estate",
        }
    }
}

/// Lifecycle stage of a company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStage {
    Seed,
    Growth,
    Scale,
    Enterprise,
}

impl CompanyStage {
    /// The following stage; `Enterprise` is terminal.
    pub fn next(self) -> Self {
        match self {
            CompanyStage::Seed => CompanyStage::Growth,
            CompanyStage::Growth => CompanyStage::Scale,
            CompanyStage::Scale | CompanyStage::Enterprise => CompanyStage::Enterprise,
        }
    }
}

/// A company owned by the empire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier, never reused within a run.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Operating industry.
    pub industry: Industry,
    /// Current lifecycle stage.
    pub stage: CompanyStage,
    /// Monthly revenue in USD (>= 0).
    pub monthly_revenue: Decimal,
    /// Monthly operating costs in USD (>= 0).
    pub monthly_costs: Decimal,
    /// Book valuation in USD (>= 0).
    pub valuation: Decimal,
    /// Headcount.
    pub employees: u32,
    /// Simulation date the company was founded or bootstrapped.
    pub founded: NaiveDate,
    /// AI CEO running the company, if any.
    pub ceo: Option<CeoId>,
    /// Companies merged into this one.
    pub subsidiaries: Vec<CompanyId>,
}

/// Monthly profit: revenue minus costs. May be negative.
///
/// Revenue and costs are never negative, so the difference cannot overflow.
pub fn monthly_profit(company: &Company) -> Decimal {
    company.monthly_revenue - company.monthly_costs
}

/// Profit margin as a fraction of revenue (0.25 = 25%).
///
/// Returns 0 when revenue is not positive.
pub fn profit_margin(company: &Company) -> f64 {
    if company.monthly_revenue <= Decimal::ZERO {
        return 0.0;
    }
    let profit = monthly_profit(company);
    match profit.checked_div(company.monthly_revenue) {
        Some(margin) => margin.to_f64().unwrap_or(0.0),
        // Losses far beyond a tiny revenue; the ratio still fits an f64.
        None => match (profit.to_f64(), company.monthly_revenue.to_f64()) {
            (Some(p), Some(r)) => p / r,
            _ => 0.0,
        },
    }
}

/// Annual recurring revenue: twelve months of the current run rate.
pub fn arr(company: &Company) -> Result<Decimal, ValidationError> {
    company
        .monthly_revenue
        .checked_mul(Decimal::from(12))
        .ok_or(ValidationError::Overflow)
}

/// Sum monetary amounts, failing instead of overflowing.
pub fn checked_sum<I>(amounts: I) -> Result<Decimal, ValidationError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or(ValidationError::Overflow)
}

/// Multiply a monetary amount by a floating-point factor, rounded to cents.
///
/// Example:
/// let v = apply_factor(Decimal::new(1000, 0), 1.2).unwrap();
/// assert_eq!(v, Decimal::new(1200, 0));
pub fn apply_factor(amount: Decimal, factor: f64) -> Result<Decimal, ValidationError> {
    if !factor.is_finite() {
        return Err(ValidationError::NonFinite);
    }
    let f = Decimal::from_f64(factor).ok_or(ValidationError::NonFinite)?;
    amount
        .checked_mul(f)
        .map(|v| v.round_dp(2))
        .ok_or(ValidationError::Overflow)
}

/// Advance a date by whole months, clamping the day to the target month's end.
pub fn add_months(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(start)
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmpireConfig {
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
    /// Date of the first simulated month.
    pub start_date: NaiveDate,
    /// Months to simulate when no override is given.
    pub months: u32,
    /// CEOs take strategic decisions every this many months.
    pub decision_interval_months: u32,
    /// Replication runs every this many months.
    pub replication_interval_months: u32,
    /// Scheduled M&A runs every this many months.
    pub ma_interval_months: u32,
    /// Market analysis runs every this many months.
    pub analysis_interval_months: u32,
    /// Real estate is acquired every this many months.
    pub property_interval_months: u32,
    /// Replication stops once the portfolio reaches this size.
    pub max_companies: usize,
    /// Minimum monthly profit for a company to serve as a replication template.
    pub replication_profit_threshold: Decimal,
    /// Trades executed by the trading desk each month.
    pub trades_per_month: u32,
    /// Starting capital of the trading desk in USD.
    pub trading_capital: Decimal,
    /// Fraction of the portfolio put at risk per trade, in (0, 1].
    pub position_fraction: f64,
    /// Probability that a trade wins, in [0, 1].
    pub win_rate: f64,
    /// Return on a winning trade is drawn from [win_return_min, win_return_max].
    pub win_return_min: f64,
    pub win_return_max: f64,
    /// Loss on a losing trade is drawn from [loss_return_min, loss_return_max].
    pub loss_return_min: f64,
    pub loss_return_max: f64,
    /// Purchase price of each periodically acquired property.
    pub property_price: Decimal,
    /// Monthly rent as a fraction of property value.
    pub rental_yield: f64,
    /// Annual property appreciation, applied monthly.
    pub annual_appreciation: f64,
    /// No new property is bought once the portfolio is worth this much.
    pub real_estate_cap: Decimal,
}

impl Default for EmpireConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            months: 24,
            decision_interval_months: 3,
            replication_interval_months: 6,
            ma_interval_months: 4,
            analysis_interval_months: 3,
            property_interval_months: 12,
            max_companies: 20,
            replication_profit_threshold: Decimal::new(50_000, 0),
            trades_per_month: 50,
            trading_capital: Decimal::new(10_000_000, 0),
            position_fraction: 0.02,
            win_rate: 0.65,
            win_return_min: 0.01,
            win_return_max: 0.05,
            loss_return_min: 0.005,
            loss_return_max: 0.02,
            property_price: Decimal::new(3_000_000, 0),
            rental_yield: 0.005,
            annual_appreciation: 0.05,
            real_estate_cap: Decimal::new(50_000_000, 0),
        }
    }
}

fn default_employees() -> u32 {
    50
}

fn default_stage() -> CompanyStage {
    CompanyStage::Growth
}

/// A company present when the empire is bootstrapped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanySeed {
    pub name: String,
    pub industry: Industry,
    pub monthly_revenue: Decimal,
    pub monthly_costs: Decimal,
    #[serde(default = "default_employees")]
    pub employees: u32,
    #[serde(default = "default_stage")]
    pub stage: CompanyStage,
    /// Explicit valuation; defaults to 20x monthly revenue.
    #[serde(default)]
    pub valuation: Option<Decimal>,
}

impl CompanySeed {
    /// Valuation used at bootstrap.
    pub fn initial_valuation(&self) -> Result<Decimal, ValidationError> {
        match self.valuation {
            Some(v) => Ok(v),
            None => self
                .monthly_revenue
                .checked_mul(Decimal::from(20))
                .ok_or(ValidationError::Overflow),
        }
    }
}

/// A property held when the empire is bootstrapped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySeed {
    pub location: String,
    pub value: Decimal,
    pub rental_yield: f64,
}

/// Everything needed to start a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: EmpireConfig,
    pub companies: Vec<CompanySeed>,
    pub properties: Vec<PropertySeed>,
}

impl Default for Scenario {
    fn default() -> Self {
        let seed = |name: &str, industry: Industry, revenue: i64, costs: i64| CompanySeed {
            name: name.to_string(),
            industry,
            monthly_revenue: Decimal::new(revenue, 0),
            monthly_costs: Decimal::new(costs, 0),
            employees: default_employees(),
            stage: default_stage(),
            valuation: None,
        };
        Self {
            config: EmpireConfig::default(),
            companies: vec![
                seed("Titan SaaS Alpha", Industry::Saas, 200_000, 100_000),
                seed("Titan FinTech", Industry::Fintech, 300_000, 150_000),
                seed("Titan AI Services", Industry::AiServices, 500_000, 250_000),
            ],
            properties: vec![PropertySeed {
                location: "Headquarters".to_string(),
                value: Decimal::new(5_000_000, 0),
                rental_yield: 0.006,
            }],
        }
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Names must contain non-whitespace characters.
    #[error("name must not be empty")]
    EmptyName,
    /// Price, cost, or valuation must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Decimal arithmetic exceeded the representable range.
    #[error("monetary value overflowed")]
    Overflow,
    /// Probability or fraction outside [0, 1].
    #[error("{0} must be within [0,1]")]
    RateOutOfRange(&'static str),
    /// Lower bound exceeds upper bound.
    #[error("invalid range for {0}")]
    InvalidRange(&'static str),
    /// Scheduling intervals must be at least one month.
    #[error("{0} must be at least one month")]
    ZeroInterval(&'static str),
    /// Two companies share an identifier.
    #[error("duplicate company id: {0}")]
    DuplicateId(String),
    /// Two seeds share a name.
    #[error("duplicate company name: {0}")]
    DuplicateName(String),
    /// A scenario must start with at least one company.
    #[error("scenario has no companies")]
    NoCompanies,
}

fn check_rate(name: &'static str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(ValidationError::NonFinite);
    }
    if !(0.0..=1.0).contains(&v) {
        return Err(ValidationError::RateOutOfRange(name));
    }
    Ok(())
}

fn check_range(name: &'static str, lo: f64, hi: f64) -> Result<(), ValidationError> {
    check_rate(name, lo)?;
    check_rate(name, hi)?;
    if lo > hi {
        return Err(ValidationError::InvalidRange(name));
    }
    Ok(())
}

/// Validate a company record.
pub fn validate_company(c: &Company) -> Result<(), ValidationError> {
    if c.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if c.monthly_revenue < Decimal::ZERO
        || c.monthly_costs < Decimal::ZERO
        || c.valuation < Decimal::ZERO
    {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate a set of companies, including identifier uniqueness.
pub fn validate_portfolio(companies: &[Company]) -> Result<(), ValidationError> {
    let mut ids: BTreeSet<&CompanyId> = BTreeSet::new();
    for c in companies {
        validate_company(c)?;
        if !ids.insert(&c.id) {
            return Err(ValidationError::DuplicateId(c.id.0.clone()));
        }
    }
    Ok(())
}

/// Validate configuration fields.
pub fn validate_config(cfg: &EmpireConfig) -> Result<(), ValidationError> {
    let intervals = [
        ("decision_interval_months", cfg.decision_interval_months),
        ("replication_interval_months", cfg.replication_interval_months),
        ("ma_interval_months", cfg.ma_interval_months),
        ("analysis_interval_months", cfg.analysis_interval_months),
        ("property_interval_months", cfg.property_interval_months),
    ];
    for (name, months) in intervals {
        if months == 0 {
            return Err(ValidationError::ZeroInterval(name));
        }
    }
    check_rate("position_fraction", cfg.position_fraction)?;
    if cfg.position_fraction == 0.0 {
        return Err(ValidationError::RateOutOfRange("position_fraction"));
    }
    check_rate("win_rate", cfg.win_rate)?;
    check_range("win_return", cfg.win_return_min, cfg.win_return_max)?;
    check_range("loss_return", cfg.loss_return_min, cfg.loss_return_max)?;
    check_rate("rental_yield", cfg.rental_yield)?;
    check_rate("annual_appreciation", cfg.annual_appreciation)?;
    if cfg.trading_capital < Decimal::ZERO
        || cfg.property_price < Decimal::ZERO
        || cfg.real_estate_cap < Decimal::ZERO
        || cfg.replication_profit_threshold < Decimal::ZERO
    {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate a scenario: configuration, seeds, and name uniqueness.
pub fn validate_scenario(s: &Scenario) -> Result<(), ValidationError> {
    validate_config(&s.config)?;
    if s.companies.is_empty() {
        return Err(ValidationError::NoCompanies);
    }
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for c in &s.companies {
        let name = c.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if c.monthly_revenue < Decimal::ZERO
            || c.monthly_costs < Decimal::ZERO
            || c.initial_valuation()? < Decimal::ZERO
        {
            return Err(ValidationError::NegativeMoney);
        }
        if !names.insert(name) {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }
    }
    for p in &s.properties {
        if p.location.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if p.value < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney);
        }
        check_rate("rental_yield", p.rental_yield)?;
    }
    debug!(
        companies = s.companies.len(),
        properties = s.properties.len(),
        "scenario validated"
    );
    Ok(())
}
