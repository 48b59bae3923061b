//! Real-estate holdings.

use chrono::NaiveDate;
use empire_core::{apply_factor, checked_sum, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub location: String,
    pub purchase_price: Decimal,
    /// Current market value.
    pub value: Decimal,
    /// Rent fixed at purchase.
    pub monthly_rent: Decimal,
    pub acquired: NaiveDate,
}

/// Properties owned by the empire. Totals are derived, never cached.
#[derive(Clone, Debug, Default)]
pub struct RealEstatePortfolio {
    properties: Vec<Property>,
}

impl RealEstatePortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn total_value(&self) -> Result<Decimal, ValidationError> {
        checked_sum(self.properties.iter().map(|p| p.value))
    }

    pub fn monthly_rental_income(&self) -> Result<Decimal, ValidationError> {
        checked_sum(self.properties.iter().map(|p| p.monthly_rent))
    }

    /// Buy a property; rent is `price * rental_yield` per month.
    pub fn acquire(
        &mut self,
        location: impl Into<String>,
        price: Decimal,
        rental_yield: f64,
        date: NaiveDate,
    ) -> Result<&Property, ValidationError> {
        if price < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney);
        }
        let monthly_rent = apply_factor(price, rental_yield)?;
        let location = location.into();
        info!(%location, %price, %monthly_rent, "property acquired");
        self.properties.push(Property {
            location,
            purchase_price: price,
            value: price,
            monthly_rent,
            acquired: date,
        });
        Ok(&self.properties[self.properties.len() - 1])
    }

    /// Grow every property's value by `rate` (e.g. 0.05 / 12 for one month).
    pub fn appreciate(&mut self, rate: f64) -> Result<(), ValidationError> {
        for p in &mut self.properties {
            p.value = apply_factor(p.value, 1.0 + rate)?;
        }
        Ok(())
    }
}
