//! AI CEO profiles and the rules they run companies by.

use crate::AiError;
use empire_core::{apply_factor, profit_margin, CeoId, Company, CompanyStage, ValidationError};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Below this margin a CEO cuts costs when allowed to.
pub const CUT_COSTS_BELOW_MARGIN: f64 = 0.2;
/// Above this margin a CEO expands when allowed to.
pub const EXPAND_ABOVE_MARGIN: f64 = 0.4;

/// Strategic moves a CEO can choose between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicOption {
    /// Grow revenue 30% at the price of 20% more costs.
    Expand,
    /// Keep optimizing; no extra effect.
    Optimize,
    /// Move to the next company stage.
    RaiseFunding,
    /// Attempt an acquisition this month.
    Acquire,
    /// Trim costs by 2%.
    CutCosts,
}

impl StrategicOption {
    pub const ALL: [StrategicOption; 5] = [
        StrategicOption::Expand,
        StrategicOption::Optimize,
        StrategicOption::RaiseFunding,
        StrategicOption::Acquire,
        StrategicOption::CutCosts,
    ];
}

/// An AI CEO and its fixed behavioural traits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CeoProfile {
    pub id: CeoId,
    pub name: String,
    /// Scales monthly cost reductions, in [0, 1].
    pub decision_quality: f64,
    /// Appetite for risk, in [0, 1]. Reported only.
    pub risk_tolerance: f64,
    /// Scales monthly revenue improvements, in [0, 1].
    pub strategic_vision: f64,
    /// Strategic decisions taken so far.
    pub decisions_made: u32,
}

impl CeoProfile {
    pub fn new(id: CeoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            decision_quality: 0.85,
            risk_tolerance: 0.6,
            strategic_vision: 0.9,
            decisions_made: 0,
        }
    }

    /// Take a strategic decision for `company` and count it.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        company: &Company,
        options: &[StrategicOption],
        rng: &mut R,
    ) -> Result<StrategicOption, AiError> {
        let decision = decide(company, options, rng)?;
        self.decisions_made += 1;
        info!(ceo = %self.name, company = %company.name, ?decision, "strategic decision");
        Ok(decision)
    }
}

/// Pick a strategic option for `company`.
///
/// Rules, first match wins:
/// 1. margin below 20% and `CutCosts` offered
/// 2. margin above 40% and `Expand` offered
/// 3. Seed stage and `RaiseFunding` offered
/// 4. otherwise a uniform draw from `options`
pub fn decide<R: Rng + ?Sized>(
    company: &Company,
    options: &[StrategicOption],
    rng: &mut R,
) -> Result<StrategicOption, AiError> {
    if options.is_empty() {
        return Err(AiError::NoOptions);
    }
    let margin = profit_margin(company);
    let offered = |o: StrategicOption| options.contains(&o);
    let decision = if margin < CUT_COSTS_BELOW_MARGIN && offered(StrategicOption::CutCosts) {
        StrategicOption::CutCosts
    } else if margin > EXPAND_ABOVE_MARGIN && offered(StrategicOption::Expand) {
        StrategicOption::Expand
    } else if company.stage == CompanyStage::Seed && offered(StrategicOption::RaiseFunding) {
        StrategicOption::RaiseFunding
    } else {
        *options.choose(rng).ok_or(AiError::NoOptions)?
    };
    Ok(decision)
}

/// Apply the immediate financial effect of a decision.
///
/// `Acquire` has no effect here; the runtime turns it into an M&A attempt.
pub fn apply_decision(decision: StrategicOption, company: &mut Company) -> Result<(), AiError> {
    match decision {
        StrategicOption::Expand => {
            company.monthly_costs = apply_factor(company.monthly_costs, 1.2)?;
            company.monthly_revenue = apply_factor(company.monthly_revenue, 1.3)?;
        }
        StrategicOption::CutCosts => {
            company.monthly_costs = apply_factor(company.monthly_costs, 0.98)?;
        }
        StrategicOption::RaiseFunding => {
            company.stage = company.stage.next();
        }
        StrategicOption::Optimize | StrategicOption::Acquire => {}
    }
    Ok(())
}

/// Monthly operational improvement computed from a CEO's traits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationsPlan {
    pub revenue_increase: Decimal,
    pub cost_reduction: Decimal,
}

impl OperationsPlan {
    /// Apply to a company. Costs never go below zero.
    pub fn apply(&self, company: &mut Company) -> Result<(), AiError> {
        let revenue = company
            .monthly_revenue
            .checked_add(self.revenue_increase)
            .ok_or(ValidationError::Overflow)?;
        company.monthly_costs = (company.monthly_costs - self.cost_reduction).max(Decimal::ZERO);
        company.monthly_revenue = revenue;
        Ok(())
    }
}

/// Costs fall by 5% scaled by decision quality; revenue rises by 3% scaled
/// by strategic vision.
pub fn optimize_operations(ceo: &CeoProfile, company: &Company) -> Result<OperationsPlan, AiError> {
    let cost_reduction = apply_factor(company.monthly_costs, 0.05 * ceo.decision_quality)?
        .min(company.monthly_costs);
    let revenue_increase = apply_factor(company.monthly_revenue, 0.03 * ceo.strategic_vision)?;
    debug!(
        ceo = %ceo.name,
        company = %company.name,
        %revenue_increase,
        %cost_reduction,
        "operations optimized"
    );
    Ok(OperationsPlan {
        revenue_increase,
        cost_reduction,
    })
}
