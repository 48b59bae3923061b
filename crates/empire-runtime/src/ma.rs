//! Mergers and acquisitions.

use chrono::NaiveDate;
use empire_core::{
    apply_factor, checked_sum, monthly_profit, Company, CompanyId, CompanyStage, ValidationError,
};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Premium paid over the target's valuation.
pub const DEAL_PREMIUM: f64 = 1.2;
/// Share of the target's costs that survive the merger.
pub const COST_SYNERGY: f64 = 0.8;
/// An acquirer must earn the deal value within this many months.
pub const PAYBACK_MONTHS: i64 = 24;

/// A completed acquisition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub acquirer: CompanyId,
    pub acquirer_name: String,
    pub target: CompanyId,
    pub target_name: String,
    pub value: Decimal,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Default)]
pub struct MaEngine {
    deals: Vec<Deal>,
}

impl MaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn total_deal_value(&self) -> Result<Decimal, ValidationError> {
        checked_sum(self.deals.iter().map(|d| d.value))
    }

    /// Pick a target uniformly among profitable Seed-stage companies other
    /// than the acquirer.
    pub fn identify_target<'a, R: Rng + ?Sized>(
        &self,
        portfolio: &'a [Company],
        acquirer: &CompanyId,
        rng: &mut R,
    ) -> Option<&'a Company> {
        let candidates: Vec<&Company> = portfolio
            .iter()
            .filter(|c| {
                &c.id != acquirer
                    && c.stage == CompanyStage::Seed
                    && monthly_profit(c) > Decimal::ZERO
            })
            .collect();
        candidates.choose(rng).copied()
    }

    /// Merge `target` into `acquirer` if the acquirer can afford it.
    ///
    /// Returns `Ok(false)` and leaves the acquirer untouched when 24 months of
    /// its profit do not cover the deal value.
    pub fn execute_acquisition(
        &mut self,
        acquirer: &mut Company,
        target: &Company,
        date: NaiveDate,
    ) -> Result<bool, ValidationError> {
        let value = apply_factor(target.valuation, DEAL_PREMIUM)?;
        let capacity = monthly_profit(acquirer)
            .checked_mul(Decimal::from(PAYBACK_MONTHS))
            .ok_or(ValidationError::Overflow)?;
        if capacity < value {
            debug!(
                acquirer = %acquirer.name,
                target = %target.name,
                %value,
                %capacity,
                "acquisition not affordable"
            );
            return Ok(false);
        }
        let merged = |a: Decimal, b: Decimal| a.checked_add(b).ok_or(ValidationError::Overflow);
        let revenue = merged(acquirer.monthly_revenue, target.monthly_revenue)?;
        let costs = merged(
            acquirer.monthly_costs,
            apply_factor(target.monthly_costs, COST_SYNERGY)?,
        )?;
        let valuation = merged(acquirer.valuation, target.valuation)?;
        acquirer.monthly_revenue = revenue;
        acquirer.monthly_costs = costs;
        acquirer.valuation = valuation;
        acquirer.employees = acquirer.employees.saturating_add(target.employees);
        acquirer.subsidiaries.push(target.id.clone());
        info!(acquirer = %acquirer.name, target = %target.name, %value, "acquisition complete");
        self.deals.push(Deal {
            acquirer: acquirer.id.clone(),
            acquirer_name: acquirer.name.clone(),
            target: target.id.clone(),
            target_name: target.name.clone(),
            value,
            date,
        });
        Ok(true)
    }
}
