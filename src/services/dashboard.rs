//! Dashboard service: viability metric and wealth projection

use chrono::{Datelike, Months, NaiveDate};

use crate::error::PlannerResult;
use crate::gateway::DataGateway;
use crate::models::{CoupleId, HousingConfig, Money};

use super::couple::CoupleService;

/// Savings rate (percent) under which the budget is flagged as tight
pub const LOW_MARGIN_THRESHOLD: f64 = 20.0;

/// Wedding costs above this many months of income trigger the reserve suggestion
pub const WEDDING_INCOME_MONTHS: i64 = 12;

/// Share of the wedding cost suggested as an emergency reserve, in percent
pub const EMERGENCY_RESERVE_PERCENT: i64 = 10;

/// Number of months covered by the projection
pub const PROJECTION_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViabilityStatus {
    /// Monthly costs exceed income
    OverBudget,
    /// Positive balance, but saving less than 20% of income
    LowMargin,
    Healthy,
}

impl std::fmt::Display for ViabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverBudget => write!(f, "Over budget: reduce costs"),
            Self::LowMargin => write!(f, "Low margin"),
            Self::Healthy => write!(f, "Within budget"),
        }
    }
}

/// The couple's monthly picture
#[derive(Debug, Clone, PartialEq)]
pub struct Viability {
    pub combined_income: Money,
    /// Rent, when renting; financing is not counted
    pub monthly_housing: Money,
    pub total_recurring: Money,
    pub total_monthly: Money,
    pub monthly_balance: Money,
    /// Balance as a percentage of income (0 without income)
    pub savings_rate: f64,
    pub total_wedding_planned: Money,
    pub status: ViabilityStatus,
    /// Amount to set aside as an emergency reserve, when the wedding costs
    /// more than a year of income
    pub emergency_reserve_suggestion: Option<Money>,
}

impl Viability {
    pub fn compute(
        combined_income: Money,
        housing: &HousingConfig,
        total_recurring: Money,
        total_wedding_planned: Money,
    ) -> Self {
        let monthly_housing = housing.monthly_housing_cost();
        let total_monthly = monthly_housing + total_recurring;
        let monthly_balance = combined_income - total_monthly;
        let savings_rate = if combined_income.is_positive() {
            monthly_balance.percent_of(combined_income)
        } else {
            0.0
        };

        let status = if monthly_balance.is_negative() {
            ViabilityStatus::OverBudget
        } else if savings_rate < LOW_MARGIN_THRESHOLD {
            ViabilityStatus::LowMargin
        } else {
            ViabilityStatus::Healthy
        };

        let emergency_reserve_suggestion = (total_wedding_planned
            > combined_income * WEDDING_INCOME_MONTHS)
            .then(|| percent_rounded(total_wedding_planned, EMERGENCY_RESERVE_PERCENT));

        Self {
            combined_income,
            monthly_housing,
            total_recurring,
            total_monthly,
            monthly_balance,
            savings_rate,
            total_wedding_planned,
            status,
            emergency_reserve_suggestion,
        }
    }
}

/// `percent`% of `amount`, rounded half away from zero to the cent
fn percent_rounded(amount: Money, percent: i64) -> Money {
    let scaled = i128::from(amount.cents()) * i128::from(percent);
    let rounded = (scaled + scaled.signum() * 50) / 100;
    Money::from_cents(i64::try_from(rounded).unwrap_or(i64::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionPoint {
    /// First day of the month
    pub month: NaiveDate,
    /// Savings accumulated by the end of this month, never below zero
    pub accumulated: Money,
}

impl ProjectionPoint {
    /// Short label such as "Mar 2027"
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub monthly_balance: Money,
    pub points: Vec<ProjectionPoint>,
    pub annual_savings: Money,
}

impl Projection {
    /// Accumulate `monthly_balance` over twelve months starting at `start`'s month
    pub fn build(monthly_balance: Money, start: NaiveDate) -> Self {
        let first = start.with_day(1).unwrap_or(start);
        let points = (0..PROJECTION_MONTHS)
            .map(|i| ProjectionPoint {
                month: first.checked_add_months(Months::new(i)).unwrap_or(first),
                accumulated: (monthly_balance * i64::from(i + 1)).max_zero(),
            })
            .collect();

        Self {
            monthly_balance,
            points,
            annual_savings: (monthly_balance * i64::from(PROJECTION_MONTHS)).max_zero(),
        }
    }
}

pub struct DashboardService<'a> {
    gateway: &'a dyn DataGateway,
}

impl<'a> DashboardService<'a> {
    pub fn new(gateway: &'a dyn DataGateway) -> Self {
        Self { gateway }
    }

    pub fn viability(&self, couple: CoupleId) -> PlannerResult<Viability> {
        let profile = CoupleService::new(self.gateway).get(couple)?;
        let housing = self.gateway.get_housing(couple)?.unwrap_or_default();
        let total_recurring: Money = self
            .gateway
            .list_recurring_costs(couple)?
            .iter()
            .map(|c| c.amount)
            .sum();
        let total_wedding_planned: Money = self
            .gateway
            .list_wedding_costs(couple)?
            .iter()
            .map(|line| line.planned_amount)
            .sum();

        Ok(Viability::compute(
            profile.combined_income,
            &housing,
            total_recurring,
            total_wedding_planned,
        ))
    }

    pub fn projection(&self, couple: CoupleId, start: NaiveDate) -> PlannerResult<Projection> {
        let viability = self.viability(couple)?;
        Ok(Projection::build(viability.monthly_balance, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::JsonGateway;
    use crate::models::{CoupleProfile, HousingType, RecurringCost, WeddingCostLine};

    fn rent(amount: i64) -> HousingConfig {
        HousingConfig {
            rent_amount: Money::from_units(amount),
            ..HousingConfig::default()
        }
    }

    #[test]
    fn test_status_thresholds() {
        let income = Money::from_units(10_000);

        let over = Viability::compute(income, &rent(9000), Money::from_units(1500), Money::zero());
        assert_eq!(over.status, ViabilityStatus::OverBudget);
        assert_eq!(over.monthly_balance, Money::from_units(-500));

        let low = Viability::compute(income, &rent(7000), Money::from_units(1500), Money::zero());
        assert_eq!(low.status, ViabilityStatus::LowMargin);
        assert!((low.savings_rate - 15.0).abs() < 1e-9);

        let healthy = Viability::compute(income, &rent(5000), Money::from_units(3000), Money::zero());
        assert_eq!(healthy.status, ViabilityStatus::Healthy);
        assert!((healthy.savings_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_reserve_suggested_only_above_a_year_of_income() {
        let income = Money::from_units(10_000);

        let at_limit = Viability::compute(income, &rent(0), Money::zero(), Money::from_units(120_000));
        assert_eq!(at_limit.emergency_reserve_suggestion, None);

        let above = Viability::compute(income, &rent(0), Money::zero(), Money::from_cents(12_000_001));
        assert_eq!(above.emergency_reserve_suggestion, Some(Money::from_units(12_000)));

        let no_income = Viability::compute(Money::zero(), &rent(0), Money::zero(), Money::from_units(90_000));
        assert_eq!(no_income.emergency_reserve_suggestion, Some(Money::from_units(9_000)));
    }

    #[test]
    fn test_reserve_rounds_to_the_cent() {
        assert_eq!(percent_rounded(Money::from_cents(12_345), 10), Money::from_cents(1_235));
        assert_eq!(percent_rounded(Money::from_cents(i64::MAX), 10), Money::from_cents(i64::MAX / 10 + 1));
    }

    #[test]
    fn test_financing_is_not_counted_as_housing() {
        let mut housing = rent(3000);
        housing.housing_type = HousingType::Finance;

        let viability = Viability::compute(Money::from_units(5000), &housing, Money::zero(), Money::zero());
        assert!(viability.monthly_housing.is_zero());
        assert_eq!(viability.monthly_balance, Money::from_units(5000));
    }

    #[test]
    fn test_no_income_has_zero_rate() {
        let viability = Viability::compute(Money::zero(), &rent(0), Money::zero(), Money::zero());
        assert_eq!(viability.savings_rate, 0.0);
        assert_eq!(viability.status, ViabilityStatus::LowMargin);
    }

    #[test]
    fn test_projection_accumulates_from_start_month() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 19).unwrap();
        let projection = Projection::build(Money::from_units(1000), start);

        assert_eq!(projection.points.len(), 12);
        assert_eq!(projection.points[0].month, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert_eq!(projection.points[0].label(), "Nov 2026");
        assert_eq!(projection.points[2].label(), "Jan 2027");
        assert_eq!(projection.points[11].accumulated, Money::from_units(12_000));
        assert_eq!(projection.annual_savings, Money::from_units(12_000));
    }

    #[test]
    fn test_negative_balance_projects_to_zero() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let projection = Projection::build(Money::from_units(-200), start);
        assert!(projection.points.iter().all(|p| p.accumulated.is_zero()));
        assert!(projection.annual_savings.is_zero());
    }

    #[test]
    fn test_viability_from_gateway() {
        let gateway = JsonGateway::in_memory();
        let mut profile = CoupleProfile::new("Ana");
        profile.set_incomes(Money::from_units(7000), Money::from_units(5000));
        let couple = gateway.create_couple(profile).unwrap().id;

        gateway.upsert_housing(couple, &rent(3000)).unwrap();
        gateway
            .add_recurring_cost(couple, &RecurringCost::new("Market", Money::from_units(1800)))
            .unwrap();
        gateway
            .save_all_wedding_costs(
                couple,
                &[WeddingCostLine::new("party", Money::from_units(40_000), Money::zero())],
            )
            .unwrap();

        let service = DashboardService::new(&gateway);
        let viability = service.viability(couple).unwrap();
        assert_eq!(viability.total_monthly, Money::from_units(4800));
        assert_eq!(viability.monthly_balance, Money::from_units(7200));
        assert_eq!(viability.total_wedding_planned, Money::from_units(40_000));
        assert_eq!(viability.status, ViabilityStatus::Healthy);

        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let projection = service.projection(couple, start).unwrap();
        assert_eq!(projection.points[0].accumulated, Money::from_units(7200));
    }
}
