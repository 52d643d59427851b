//! Housing service
//!
//! Rent-vs-finance configuration. Amounts are stored as entered.

use chrono::Utc;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::models::{CoupleId, HousingConfig, HousingType, Money};

/// Partial update; `None` fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct HousingUpdate {
    pub housing_type: Option<HousingType>,
    pub rent_amount: Option<Money>,
    pub property_value: Option<Money>,
    pub down_payment: Option<Money>,
    pub interest_rate: Option<f64>,
    pub loan_term_months: Option<u32>,
}

impl HousingUpdate {
    pub fn is_empty(&self) -> bool {
        self.housing_type.is_none()
            && self.rent_amount.is_none()
            && self.property_value.is_none()
            && self.down_payment.is_none()
            && self.interest_rate.is_none()
            && self.loan_term_months.is_none()
    }
}

/// Side-by-side monthly and total costs of both options
#[derive(Debug, Clone, PartialEq)]
pub struct HousingComparison {
    pub monthly_rent: Money,
    pub annual_rent: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_financed_cost: Money,
    /// Financed installment minus rent (positive when financing costs more per month)
    pub monthly_difference: Money,
}

pub struct HousingService<'a> {
    gateway: &'a dyn DataGateway,
}

impl<'a> HousingService<'a> {
    pub fn new(gateway: &'a dyn DataGateway) -> Self {
        Self { gateway }
    }

    /// The stored configuration, or defaults when none was saved yet
    pub fn get_or_default(&self, couple: CoupleId) -> PlannerResult<HousingConfig> {
        Ok(self.gateway.get_housing(couple)?.unwrap_or_default())
    }

    /// Apply a partial update, creating the configuration if needed
    pub fn update(&self, couple: CoupleId, update: HousingUpdate) -> PlannerResult<HousingConfig> {
        if let Some(rate) = update.interest_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(PlannerError::Validation(
                    "Interest rate must be zero or positive".into(),
                ));
            }
        }
        if update.loan_term_months == Some(0) {
            return Err(PlannerError::Validation(
                "Loan term must be at least one month".into(),
            ));
        }

        let mut config = self.get_or_default(couple)?;
        if let Some(housing_type) = update.housing_type {
            config.housing_type = housing_type;
        }
        if let Some(rent) = update.rent_amount {
            config.rent_amount = rent;
        }
        if let Some(value) = update.property_value {
            config.property_value = value;
        }
        if let Some(down) = update.down_payment {
            config.down_payment = down;
        }
        if let Some(rate) = update.interest_rate {
            config.interest_rate = rate;
        }
        if let Some(term) = update.loan_term_months {
            config.loan_term_months = term;
        }
        config.updated_at = Utc::now();

        self.gateway.upsert_housing(couple, &config)?;
        debug!(couple = %couple, housing_type = %config.housing_type, "updated housing");
        Ok(config)
    }

    pub fn compare(&self, couple: CoupleId) -> PlannerResult<HousingComparison> {
        let config = self.get_or_default(couple)?;
        Ok(compare(&config))
    }
}

/// Compare renting and financing under one configuration
pub fn compare(config: &HousingConfig) -> HousingComparison {
    let monthly_payment = config.monthly_payment();
    HousingComparison {
        monthly_rent: config.rent_amount,
        annual_rent: config.annual_rent(),
        loan_amount: config.loan_amount(),
        monthly_payment,
        total_financed_cost: config.total_financed_cost(),
        monthly_difference: monthly_payment - config.rent_amount,
    }
}
