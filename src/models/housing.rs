//! Housing configuration model
//!
//! Captures whether the couple rents or finances their home and derives the
//! monthly cost of each option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Default financing term (30 years)
pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 360;

/// Rent or finance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HousingType {
    #[default]
    Rent,
    Finance,
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rent => write!(f, "Rent"),
            Self::Finance => write!(f, "Finance"),
        }
    }
}

impl FromStr for HousingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rent" => Ok(Self::Rent),
            "finance" | "financing" | "mortgage" => Ok(Self::Finance),
            other => Err(format!("Unknown housing type '{}'. Use rent or finance.", other)),
        }
    }
}

/// A couple's housing plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingConfig {
    /// Which option is currently selected
    #[serde(default)]
    pub housing_type: HousingType,

    /// Monthly rent
    #[serde(default)]
    pub rent_amount: Money,

    /// Price of the property when financing
    #[serde(default)]
    pub property_value: Money,

    /// Down payment when financing
    #[serde(default)]
    pub down_payment: Money,

    /// Annual interest rate in percent (e.g. 9.5)
    #[serde(default)]
    pub interest_rate: f64,

    /// Loan term in months
    #[serde(default = "default_loan_term")]
    pub loan_term_months: u32,

    /// When the configuration was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_loan_term() -> u32 {
    DEFAULT_LOAN_TERM_MONTHS
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self {
            housing_type: HousingType::Rent,
            rent_amount: Money::zero(),
            property_value: Money::zero(),
            down_payment: Money::zero(),
            interest_rate: 0.0,
            loan_term_months: DEFAULT_LOAN_TERM_MONTHS,
            updated_at: Utc::now(),
        }
    }
}

impl HousingConfig {
    /// Amount borrowed
    pub fn loan_amount(&self) -> Money {
        self.property_value - self.down_payment
    }

    /// Monthly installment under the Price (French amortization) table
    ///
    /// Zero when the rate is not positive or the term is zero.
    pub fn monthly_payment(&self) -> Money {
        let monthly_rate = self.interest_rate / 100.0 / 12.0;
        let n = self.loan_term_months;
        if monthly_rate <= 0.0 || n == 0 {
            return Money::zero();
        }

        let growth = (1.0 + monthly_rate).powi(n as i32);
        let payment = self.loan_amount().to_f64() * monthly_rate * growth / (growth - 1.0);
        Money::from_f64(payment)
    }

    /// Sum of all installments over the term
    pub fn total_financed_cost(&self) -> Money {
        self.monthly_payment() * i64::from(self.loan_term_months)
    }

    /// Yearly rent
    pub fn annual_rent(&self) -> Money {
        self.rent_amount * 12
    }

    /// Monthly housing cost counted by the viability metric
    ///
    /// Only rent is counted; a financing plan contributes nothing here.
    pub fn monthly_housing_cost(&self) -> Money {
        match self.housing_type {
            HousingType::Rent => self.rent_amount,
            HousingType::Finance => Money::zero(),
        }
    }
}
