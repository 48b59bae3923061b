//! Company replication: clones of successful companies and new verticals.

use chrono::NaiveDate;
use empire_core::{apply_factor, Company, CompanyId, CompanyStage, Industry, ValidationError};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

/// Base monthly revenue and costs for a freshly spawned vertical.
pub fn vertical_template(industry: Industry) -> (Decimal, Decimal) {
    match industry {
        Industry::Saas => (Decimal::new(50_000, 0), Decimal::new(30_000, 0)),
        Industry::Fintech => (Decimal::new(100_000, 0), Decimal::new(60_000, 0)),
        Industry::AiServices => (Decimal::new(150_000, 0), Decimal::new(80_000, 0)),
        _ => (Decimal::new(50_000, 0), Decimal::new(30_000, 0)),
    }
}

/// Creates new companies. Identifiers are allocated by the caller.
#[derive(Clone, Debug, Default)]
pub struct Replicator {
    created: u32,
}

impl Replicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Companies created so far.
    pub fn created(&self) -> u32 {
        self.created
    }

    /// Seed-stage clone of `template` at 30% revenue, 40% costs and 20%
    /// valuation, staffed with 10 to 50 employees.
    pub fn replicate<R: Rng + ?Sized>(
        &mut self,
        template: &Company,
        id: CompanyId,
        founded: NaiveDate,
        rng: &mut R,
    ) -> Result<Company, ValidationError> {
        self.created += 1;
        let company = Company {
            id,
            name: format!("{} Clone {}", template.name, self.created),
            industry: template.industry,
            stage: CompanyStage::Seed,
            monthly_revenue: apply_factor(template.monthly_revenue, 0.3)?,
            monthly_costs: apply_factor(template.monthly_costs, 0.4)?,
            valuation: apply_factor(template.valuation, 0.2)?,
            employees: rng.gen_range(10..=50),
            founded,
            ceo: None,
            subsidiaries: vec![],
        };
        info!(company = %company.name, industry = ?company.industry, "replicated company");
        Ok(company)
    }

    /// Brand-new Seed-stage company in `industry`, valued at 10x base revenue.
    pub fn spawn_vertical<R: Rng + ?Sized>(
        &mut self,
        industry: Industry,
        id: CompanyId,
        founded: NaiveDate,
        rng: &mut R,
    ) -> Company {
        self.created += 1;
        let (revenue, costs) = vertical_template(industry);
        let company = Company {
            id,
            name: format!("Titan {} {}", industry.label(), self.created),
            industry,
            stage: CompanyStage::Seed,
            monthly_revenue: revenue,
            monthly_costs: costs,
            valuation: revenue * Decimal::from(10),
            employees: rng.gen_range(10..=50),
            founded,
            ceo: None,
            subsidiaries: vec![],
        };
        info!(company = %company.name, "spawned new vertical");
        company
    }
}
