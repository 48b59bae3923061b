#![deny(warnings)]

//! Month-by-month runtime for the empire.
//!
//! [`Empire`] owns every company, CEO and holding, and advances them one
//! month at a time. All randomness comes from the RNG handed to
//! [`Empire::bootstrap_with_rng`]; [`Empire::bootstrap`] seeds a
//! `ChaCha8Rng` from the scenario so runs are reproducible.

pub mod ma;
pub mod real_estate;
pub mod replication;
pub mod report;
pub mod trading;

pub use ma::{Deal, MaEngine};
pub use real_estate::{Property, RealEstatePortfolio};
pub use replication::Replicator;
pub use report::{log_report, CompanyKpi, EmpireSnapshot};
pub use trading::{TradingDesk, TradingSummary};

use chrono::NaiveDate;
use empire_ai::{
    analyze_market, apply_decision, five_year_plan, forecast_revenue, optimize_operations,
    AiError, CeoProfile, MarketAnalysis, Recommendation, StrategicOption,
};
use empire_core::{
    add_months, arr, checked_sum, monthly_profit, profit_margin, validate_scenario, CeoId, Company,
    CompanyId, EmpireConfig, Industry, Scenario, ValidationError,
};
use empire_stats::StatsError;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while running the empire.
#[derive(Debug, Error)]
pub enum EmpireError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Number of companies listed in a snapshot.
pub const TOP_COMPANIES: usize = 5;

/// The whole empire and its simulation state.
pub struct Empire<R: Rng = ChaCha8Rng> {
    config: EmpireConfig,
    rng: R,
    months_run: u32,
    date: NaiveDate,
    next_company: u32,
    next_ceo: u32,
    companies: Vec<Company>,
    ceos: BTreeMap<CeoId, CeoProfile>,
    revenue_history: BTreeMap<CompanyId, Vec<Decimal>>,
    replicator: Replicator,
    ma: MaEngine,
    trading: TradingDesk,
    real_estate: RealEstatePortfolio,
    last_market: Option<MarketAnalysis>,
}

impl Empire<ChaCha8Rng> {
    /// Validate `scenario` and build the empire with an RNG seeded from it.
    pub fn bootstrap(scenario: &Scenario) -> Result<Self, EmpireError> {
        let rng = ChaCha8Rng::seed_from_u64(scenario.config.rng_seed);
        Self::bootstrap_with_rng(scenario, rng)
    }
}

impl<R: Rng> Empire<R> {
    /// Validate `scenario` and build the empire around the given RNG.
    pub fn bootstrap_with_rng(scenario: &Scenario, rng: R) -> Result<Self, EmpireError> {
        validate_scenario(scenario)?;
        let config = scenario.config.clone();
        let date = config.start_date;
        let mut empire = Self {
            trading: TradingDesk::from_config(&config),
            config,
            rng,
            months_run: 0,
            date,
            next_company: 0,
            next_ceo: 0,
            companies: Vec::with_capacity(scenario.companies.len()),
            ceos: BTreeMap::new(),
            revenue_history: BTreeMap::new(),
            replicator: Replicator::new(),
            ma: MaEngine::new(),
            real_estate: RealEstatePortfolio::new(),
            last_market: None,
        };
        for seed in &scenario.companies {
            let company = Company {
                id: empire.allocate_company_id(),
                name: seed.name.trim().to_string(),
                industry: seed.industry,
                stage: seed.stage,
                monthly_revenue: seed.monthly_revenue,
                monthly_costs: seed.monthly_costs,
                valuation: seed.initial_valuation()?,
                employees: seed.employees,
                founded: date,
                ceo: None,
                subsidiaries: vec![],
            };
            empire.admit(company);
        }
        for p in &scenario.properties {
            empire
                .real_estate
                .acquire(p.location.clone(), p.value, p.rental_yield, date)?;
        }
        info!(
            companies = empire.companies.len(),
            properties = empire.real_estate.properties().len(),
            seed = empire.config.rng_seed,
            "empire bootstrapped"
        );
        Ok(empire)
    }

    pub fn config(&self) -> &EmpireConfig {
        &self.config
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn ceos(&self) -> &BTreeMap<CeoId, CeoProfile> {
        &self.ceos
    }

    /// Monthly revenue recorded for a company, oldest first.
    pub fn revenue_history(&self, id: &CompanyId) -> &[Decimal] {
        self.revenue_history
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn months_run(&self) -> u32 {
        self.months_run
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn ma(&self) -> &MaEngine {
        &self.ma
    }

    pub fn trading(&self) -> &TradingDesk {
        &self.trading
    }

    pub fn real_estate(&self) -> &RealEstatePortfolio {
        &self.real_estate
    }

    pub fn last_market(&self) -> Option<&MarketAnalysis> {
        self.last_market.as_ref()
    }

    fn allocate_company_id(&mut self) -> CompanyId {
        let id = CompanyId(format!("company-{}", self.next_company));
        self.next_company += 1;
        id
    }

    /// Hire a CEO for `company` and add it to the portfolio.
    fn admit(&mut self, mut company: Company) {
        let n = self.next_ceo;
        self.next_ceo += 1;
        let ceo = CeoProfile::new(CeoId(format!("ceo-{n}")), format!("AI CEO {}", n + 1));
        debug!(company = %company.name, ceo = %ceo.name, "ceo assigned");
        company.ceo = Some(ceo.id.clone());
        self.ceos.insert(ceo.id.clone(), ceo);
        self.companies.push(company);
    }

    /// Simulate `months` months and return the resulting snapshot.
    pub fn run_months(&mut self, months: u32) -> Result<EmpireSnapshot, EmpireError> {
        for _ in 0..months {
            self.run_month()?;
        }
        self.snapshot()
    }

    /// Simulate one month.
    pub fn run_month(&mut self) -> Result<(), EmpireError> {
        let month = self.months_run;
        let every = |interval: u32| month % interval == 0;
        let decision_month = every(self.config.decision_interval_months);
        let replication_month = every(self.config.replication_interval_months);
        let ma_month = every(self.config.ma_interval_months);
        let analysis_month = every(self.config.analysis_interval_months);
        let property_month = every(self.config.property_interval_months);
        debug!(month = month + 1, date = %self.date, "month started");

        let acquirers = self.operate_companies(decision_month)?;
        if replication_month {
            self.replicate()?;
        }
        self.run_acquisitions(ma_month, acquirers)?;
        self.trading
            .execute_trades(&mut self.rng, self.config.trades_per_month)?;
        self.manage_real_estate(property_month)?;
        if analysis_month {
            self.scan_market()?;
        }
        for c in &self.companies {
            self.revenue_history
                .entry(c.id.clone())
                .or_default()
                .push(c.monthly_revenue);
        }

        self.months_run += 1;
        self.date = add_months(self.config.start_date, self.months_run);
        let (total_arr, valuation, profit) = self.totals()?;
        info!(
            month = self.months_run,
            companies = self.companies.len(),
            arr = %total_arr.round_dp(0),
            valuation = %valuation.round_dp(0),
            monthly_profit = %profit.round_dp(0),
            "month closed"
        );
        Ok(())
    }

    /// CEO optimisation and, on decision months, strategic decisions.
    /// Returns companies that decided to acquire.
    fn operate_companies(&mut self, decision_month: bool) -> Result<Vec<CompanyId>, EmpireError> {
        let mut acquirers = Vec::new();
        for company in self.companies.iter_mut() {
            let Some(ceo) = company.ceo.as_ref().and_then(|id| self.ceos.get_mut(id)) else {
                continue;
            };
            optimize_operations(ceo, company)?.apply(company)?;
            if decision_month {
                let decision = ceo.decide(company, &StrategicOption::ALL, &mut self.rng)?;
                apply_decision(decision, company)?;
                if decision == StrategicOption::Acquire {
                    acquirers.push(company.id.clone());
                }
            }
        }
        Ok(acquirers)
    }

    /// Clone the most profitable company, or spawn a new vertical when none
    /// qualifies and the market favours expansion.
    fn replicate(&mut self) -> Result<(), EmpireError> {
        if self.companies.len() >= self.config.max_companies {
            return Ok(());
        }
        let threshold = self.config.replication_profit_threshold;
        let template = self
            .companies
            .iter()
            .filter(|c| monthly_profit(c) > threshold)
            .max_by_key(|c| monthly_profit(c))
            .cloned();
        let company = match template {
            Some(t) => {
                let id = self.allocate_company_id();
                self.replicator
                    .replicate(&t, id, self.date, &mut self.rng)?
            }
            None => {
                let expanding = self
                    .last_market
                    .map_or(true, |m| m.recommendation == Recommendation::Expand);
                if !expanding {
                    debug!("no replication template and market says consolidate");
                    return Ok(());
                }
                let industry = Industry::ALL
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(Industry::Saas);
                let id = self.allocate_company_id();
                self.replicator
                    .spawn_vertical(industry, id, self.date, &mut self.rng)
            }
        };
        self.admit(company);
        Ok(())
    }

    /// Scheduled M&A (largest valuation acquires) plus CEO-initiated deals.
    fn run_acquisitions(
        &mut self,
        scheduled: bool,
        mut acquirers: Vec<CompanyId>,
    ) -> Result<(), EmpireError> {
        if scheduled && self.companies.len() >= 2 {
            if let Some(top) = self.companies.iter().max_by_key(|c| c.valuation) {
                if !acquirers.contains(&top.id) {
                    acquirers.insert(0, top.id.clone());
                }
            }
        }
        for acquirer in &acquirers {
            self.attempt_acquisition(acquirer)?;
        }
        Ok(())
    }

    fn attempt_acquisition(&mut self, acquirer: &CompanyId) -> Result<bool, EmpireError> {
        // The acquirer may itself have been absorbed earlier this month.
        let Some(idx) = self.companies.iter().position(|c| &c.id == acquirer) else {
            return Ok(false);
        };
        let Some(target) = self
            .ma
            .identify_target(&self.companies, acquirer, &mut self.rng)
            .cloned()
        else {
            return Ok(false);
        };
        let done = self
            .ma
            .execute_acquisition(&mut self.companies[idx], &target, self.date)?;
        if done {
            self.companies.retain(|c| c.id != target.id);
            self.revenue_history.remove(&target.id);
            if let Some(ceo) = &target.ceo {
                self.ceos.remove(ceo);
            }
        }
        Ok(done)
    }

    fn manage_real_estate(&mut self, property_month: bool) -> Result<(), EmpireError> {
        self.real_estate
            .appreciate(self.config.annual_appreciation / 12.0)?;
        if property_month && self.real_estate.total_value()? < self.config.real_estate_cap {
            let location = format!("Metro-{}", self.real_estate.properties().len() + 1);
            self.real_estate.acquire(
                location,
                self.config.property_price,
                self.config.rental_yield,
                self.date,
            )?;
        }
        Ok(())
    }

    /// One signal per industry, uniform in [0, 1).
    fn scan_market(&mut self) -> Result<(), EmpireError> {
        let signals: Vec<f64> = Industry::ALL.iter().map(|_| self.rng.gen()).collect();
        let analysis = analyze_market(&signals)?;
        info!(
            trend = ?analysis.trend,
            confidence = analysis.confidence,
            volatility = analysis.volatility,
            recommendation = ?analysis.recommendation,
            "market analysis"
        );
        self.last_market = Some(analysis);
        Ok(())
    }

    /// Total ARR, total valuation and total monthly profit.
    fn totals(&self) -> Result<(Decimal, Decimal, Decimal), ValidationError> {
        let arrs = self.companies.iter().map(arr).collect::<Result<Vec<_>, _>>()?;
        let total_arr = checked_sum(arrs)?;
        let valuation = checked_sum(self.companies.iter().map(|c| c.valuation).chain([
            self.trading.portfolio_value(),
            self.real_estate.total_value()?,
        ]))?;
        let profit = checked_sum(
            self.companies
                .iter()
                .map(monthly_profit)
                .chain([self.real_estate.monthly_rental_income()?]),
        )?;
        Ok((total_arr, valuation, profit))
    }

    fn kpi(&self, company: &Company) -> Result<CompanyKpi, EmpireError> {
        let revenue_forecast = match forecast_revenue(self.revenue_history(&company.id)) {
            Ok(t) => Some(t),
            Err(AiError::Stats(StatsError::InsufficientData { .. })) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(CompanyKpi {
            id: company.id.clone(),
            name: company.name.clone(),
            industry: company.industry,
            stage: company.stage,
            arr: arr(company)?,
            profit_margin: profit_margin(company),
            revenue_forecast,
        })
    }

    /// Current KPIs.
    pub fn snapshot(&self) -> Result<EmpireSnapshot, EmpireError> {
        let (total_arr, valuation, monthly_profit) = self.totals()?;
        // ARR is twelve times monthly revenue, so revenue gives the same order.
        let mut ranked: Vec<&Company> = self.companies.iter().collect();
        ranked.sort_by(|a, b| b.monthly_revenue.cmp(&a.monthly_revenue));
        let top_companies = ranked
            .iter()
            .take(TOP_COMPANIES)
            .map(|c| self.kpi(c))
            .collect::<Result<Vec<_>, _>>()?;
        let flagship_plan = match ranked.first() {
            Some(c) => five_year_plan(c)?,
            None => vec![],
        };
        Ok(EmpireSnapshot {
            months_run: self.months_run,
            date: self.date,
            companies: self.companies.len(),
            ceos: self.ceos.len(),
            companies_created: self.replicator.created(),
            total_arr,
            valuation,
            monthly_profit,
            deals_completed: self.ma.deals().len(),
            total_deal_value: self.ma.total_deal_value()?,
            trades_executed: self.trading.trades_executed(),
            trading_portfolio: self.trading.portfolio_value(),
            trading_profit: self.trading.total_profit(),
            properties: self.real_estate.properties().len(),
            real_estate_value: self.real_estate.total_value()?,
            monthly_rental_income: self.real_estate.monthly_rental_income()?,
            market: self.last_market,
            top_companies,
            flagship_plan,
        })
    }
}

/// Bootstrap `scenario` and run it for `months` months.
pub fn run_scenario(scenario: &Scenario, months: u32) -> Result<EmpireSnapshot, EmpireError> {
    let mut empire = Empire::bootstrap(scenario)?;
    empire.run_months(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use empire_core::{validate_portfolio, CompanySeed, CompanyStage};
    use proptest::prelude::*;

    fn scenario(seed: u64) -> Scenario {
        let mut s = Scenario::default();
        s.config.rng_seed = seed;
        s
    }

    fn seed(name: &str, stage: CompanyStage, revenue: i64, costs: i64) -> CompanySeed {
        CompanySeed {
            name: name.to_string(),
            industry: Industry::Consulting,
            monthly_revenue: Decimal::new(revenue, 0),
            monthly_costs: Decimal::new(costs, 0),
            employees: 20,
            stage,
            valuation: None,
        }
    }

    fn is_overflow(e: &EmpireError) -> bool {
        matches!(
            e,
            EmpireError::Validation(ValidationError::Overflow)
                | EmpireError::Ai(AiError::Validation(ValidationError::Overflow))
        )
    }

    #[test]
    fn bootstrap_matches_scenario() {
        let empire = Empire::bootstrap(&Scenario::default()).unwrap();
        assert_eq!(empire.companies().len(), 3);
        assert_eq!(empire.ceos().len(), 3);
        assert_eq!(empire.companies()[0].id.0, "company-0");
        assert_eq!(empire.companies()[2].valuation, Decimal::new(10_000_000, 0));
        assert!(empire.companies().iter().all(|c| c.ceo.is_some()));
        assert_eq!(empire.real_estate().properties().len(), 1);
        assert_eq!(
            empire.real_estate().monthly_rental_income(),
            Ok(Decimal::new(30_000, 0))
        );
        assert_eq!(
            empire.trading().portfolio_value(),
            Decimal::new(10_000_000, 0)
        );
    }

    #[test]
    fn bootstrap_rejects_invalid_scenario() {
        let mut s = Scenario::default();
        s.config.win_rate = -0.1;
        assert!(matches!(
            Empire::bootstrap(&s),
            Err(EmpireError::Validation(ValidationError::RateOutOfRange(
                "win_rate"
            )))
        ));
    }

    #[test]
    fn same_seed_same_run() {
        let a = run_scenario(&scenario(7), 24).unwrap();
        let b = run_scenario(&scenario(7), 24).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn injected_rng_drives_the_run() {
        let s = scenario(11);
        let mut seeded = Empire::bootstrap(&s).unwrap();
        let mut injected =
            Empire::bootstrap_with_rng(&s, ChaCha8Rng::seed_from_u64(11)).unwrap();
        let a = seeded.run_months(12).unwrap();
        let b = injected.run_months(12).unwrap();
        assert_eq!(a, b);

        let mut other = Empire::bootstrap_with_rng(&s, ChaCha8Rng::seed_from_u64(12)).unwrap();
        let c = other.run_months(12).unwrap();
        assert_ne!(a.trading_portfolio, c.trading_portfolio);
    }

    #[test]
    fn two_year_run_keeps_invariants() {
        let mut empire = Empire::bootstrap(&Scenario::default()).unwrap();
        let snap = empire.run_months(24).unwrap();
        assert_eq!(snap.months_run, 24);
        assert_eq!(snap.date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(snap.trades_executed, 24 * 50);
        // bootstrap property plus purchases in months 1 and 13
        assert_eq!(snap.properties, 3);
        assert!(snap.market.is_some());
        assert!(snap.companies <= empire.config().max_companies);
        assert_eq!(snap.companies, empire.companies().len());
        assert_eq!(snap.ceos, snap.companies);
        validate_portfolio(empire.companies()).unwrap();
        for c in empire.companies() {
            let ceo = c.ceo.as_ref().unwrap();
            assert!(empire.ceos().contains_key(ceo));
        }
        assert!(snap.top_companies.len() <= TOP_COMPANIES);
        assert!(snap
            .top_companies
            .windows(2)
            .all(|w| w[0].arr >= w[1].arr));
        assert_eq!(snap.flagship_plan.len(), 5);
    }

    #[test]
    fn acquired_companies_leave_the_portfolio() {
        let mut empire = Empire::bootstrap(&Scenario::default()).unwrap();
        empire.run_months(36).unwrap();
        let ids: Vec<&CompanyId> = empire.companies().iter().map(|c| &c.id).collect();
        for deal in empire.ma().deals() {
            assert!(!ids.contains(&&deal.target));
            assert!(empire.revenue_history(&deal.target).is_empty());
        }
        let snap = empire.snapshot().unwrap();
        assert_eq!(snap.deals_completed, empire.ma().deals().len());
        assert_eq!(
            snap.companies as u32 + snap.deals_completed as u32,
            3 + snap.companies_created
        );
    }

    #[test]
    fn company_cap_is_respected() {
        let mut s = Scenario::default();
        s.config.max_companies = 4;
        s.config.replication_interval_months = 1;
        let mut empire = Empire::bootstrap(&s).unwrap();
        for _ in 0..48 {
            empire.run_month().unwrap();
            assert!(empire.companies().len() <= 4);
        }
    }

    #[test]
    fn forecasts_need_two_months_of_history() {
        let mut empire = Empire::bootstrap(&Scenario::default()).unwrap();
        let snap = empire.snapshot().unwrap();
        assert!(snap
            .top_companies
            .iter()
            .all(|c| c.revenue_forecast.is_none()));

        let snap = empire.run_months(6).unwrap();
        let flagship = &snap.top_companies[0];
        assert!(empire.revenue_history(&flagship.id).len() >= 2);
        let forecast = flagship.revenue_forecast.unwrap();
        assert!(forecast.forecast.is_finite());
        assert!(forecast.std_error >= 0.0);
    }

    #[test]
    fn zero_month_run_is_bootstrap_state() {
        let snap = run_scenario(&Scenario::default(), 0).unwrap();
        assert_eq!(snap.months_run, 0);
        assert_eq!(snap.companies, 3);
        assert_eq!(snap.total_arr, Decimal::new(12_000_000, 0));
        // 4M + 6M + 10M companies, 10M trading, 5M property
        assert_eq!(snap.valuation, Decimal::new(35_000_000, 0));
        // 100k + 150k + 250k profit, 30k rent
        assert_eq!(snap.monthly_profit, Decimal::new(530_000, 0));
        assert!(snap.market.is_none());
        assert_eq!(snap.top_companies[0].name, "Titan AI Services");
        assert_eq!(snap.top_companies[0].stage, CompanyStage::Growth);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]
        #[test]
        fn any_seed_keeps_portfolio_consistent(seed in any::<u64>()) {
            let mut empire = Empire::bootstrap(&scenario(seed)).unwrap();
            let snap = empire.run_months(18).unwrap();
            prop_assert!(validate_portfolio(empire.companies()).is_ok());
            prop_assert_eq!(snap.ceos, snap.companies);
            prop_assert!(snap.companies <= empire.config().max_companies);
            prop_assert!(snap.trading_portfolio > Decimal::ZERO);
            prop_assert!(snap.real_estate_value >= Decimal::new(5_000_000, 0));
        }
    }

    #[test]
    fn runaway_growth_ends_in_an_overflow_error() {
        let mut empire = Empire::bootstrap(&Scenario::default()).unwrap();
        let mut failure = None;
        for _ in 0..600 {
            if let Err(e) = empire.run_month() {
                failure = Some(e);
                break;
            }
        }
        let e = failure.expect("compounding revenue must exhaust Decimal");
        assert!(is_overflow(&e), "unexpected error: {e:?}");
    }

    #[test]
    fn acquire_decision_triggers_an_off_schedule_deal() {
        // Only month 0 is a scheduled M&A month, and the target is still
        // unprofitable then; any later deal comes from an Acquire decision.
        let mut deals = Vec::new();
        for rng_seed in 0..64 {
            let mut target = seed("Target", CompanyStage::Seed, 100_000, 110_000);
            target.valuation = Some(Decimal::new(200_000, 0));
            let s = Scenario {
                config: EmpireConfig {
                    rng_seed,
                    decision_interval_months: 1,
                    ma_interval_months: 1_000,
                    max_companies: 2,
                    ..EmpireConfig::default()
                },
                companies: vec![seed("Buyer", CompanyStage::Growth, 100_000, 75_000), target],
                properties: vec![],
            };
            let mut empire = Empire::bootstrap(&s).unwrap();
            empire.run_months(4).unwrap();
            for deal in empire.ma().deals() {
                assert_eq!(empire.companies().len(), 1);
                assert_eq!(
                    empire.companies()[0].subsidiaries,
                    vec![CompanyId("company-1".to_string())]
                );
                assert_eq!(empire.ceos().len(), 1);
                deals.push(deal.clone());
            }
        }
        assert!(!deals.is_empty());
        let start = EmpireConfig::default().start_date;
        for deal in &deals {
            assert!(deal.date > start);
            assert_eq!(deal.acquirer.0, "company-0");
            assert_eq!(deal.target.0, "company-1");
        }
    }

    fn unprofitable_empire() -> Empire {
        let mut s = Scenario::default();
        s.config.replication_profit_threshold = Decimal::new(10_000_000, 0);
        Empire::bootstrap(&s).unwrap()
    }

    #[test]
    fn consolidating_market_blocks_new_verticals() {
        let mut empire = unprofitable_empire();
        empire.last_market = Some(analyze_market(&[0.1, 0.3, 0.2]).unwrap());
        assert_eq!(
            empire.last_market().unwrap().recommendation,
            Recommendation::Consolidate
        );
        empire.replicate().unwrap();
        assert_eq!(empire.companies().len(), 3);
        assert_eq!(empire.replicator.created(), 0);
    }

    #[test]
    fn expanding_market_spawns_a_vertical() {
        let mut empire = unprofitable_empire();
        empire.last_market = Some(analyze_market(&[0.7, 0.6, 0.8]).unwrap());
        empire.replicate().unwrap();
        assert_eq!(empire.companies().len(), 4);
        let spawned = &empire.companies()[3];
        assert_eq!(spawned.stage, CompanyStage::Seed);
        assert!(spawned.name.starts_with("Titan "));
        assert!(!spawned.name.contains("Clone"));
        assert!(spawned.ceo.is_some());

        // without any analysis yet, expansion is the default
        let mut empire = unprofitable_empire();
        empire.replicate().unwrap();
        assert_eq!(empire.companies().len(), 4);
    }

    #[test]
    fn profitable_template_is_cloned_even_when_consolidating() {
        let mut empire = Empire::bootstrap(&Scenario::default()).unwrap();
        empire.last_market = Some(analyze_market(&[0.1, 0.3, 0.2]).unwrap());
        empire.replicate().unwrap();
        assert_eq!(empire.companies().len(), 4);
        assert_eq!(empire.companies()[3].name, "Titan AI Services Clone 1");
    }
}
