//! Couple profile service
//!
//! Creates the couple profile and keeps incomes, names, the wedding date and
//! the partner invitation up to date.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::models::{CoupleId, CoupleProfile, Money};

/// Service for the couple profile
pub struct CoupleService<'a> {
    gateway: &'a dyn DataGateway,
}

impl<'a> CoupleService<'a> {
    pub fn new(gateway: &'a dyn DataGateway) -> Self {
        Self { gateway }
    }

    /// Create a profile for `user_name`, optionally naming the partner
    pub fn create(&self, user_name: &str, partner_name: Option<&str>) -> PlannerResult<CoupleProfile> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(PlannerError::Validation("Your name cannot be empty".into()));
        }

        let mut profile = CoupleProfile::new(user_name);
        profile.partner_name = clean_optional(partner_name);

        let profile = self.gateway.create_couple(profile)?;
        info!(couple = %profile.id, "created couple profile");
        Ok(profile)
    }

    pub fn get(&self, id: CoupleId) -> PlannerResult<CoupleProfile> {
        self.gateway
            .get_couple(id)?
            .ok_or_else(|| PlannerError::couple_not_found(id.to_string()))
    }

    pub fn list(&self) -> PlannerResult<Vec<CoupleProfile>> {
        self.gateway.list_couples()
    }

    /// Set both incomes; the combined income becomes their sum
    pub fn update_incomes(
        &self,
        id: CoupleId,
        user_income: Money,
        partner_income: Money,
    ) -> PlannerResult<CoupleProfile> {
        self.modify(id, |profile| {
            profile.set_incomes(user_income, partner_income);
            Ok(())
        })
    }

    /// Override the combined income directly
    pub fn set_combined_income(&self, id: CoupleId, combined: Money) -> PlannerResult<CoupleProfile> {
        self.modify(id, |profile| {
            profile.combined_income = combined;
            Ok(())
        })
    }

    /// Set or clear the wedding date; dates before today are rejected
    pub fn set_wedding_date(&self, id: CoupleId, date: Option<NaiveDate>) -> PlannerResult<CoupleProfile> {
        let today = Utc::now().date_naive();
        self.modify(id, |profile| {
            if let Some(date) = date {
                if date < today {
                    return Err(PlannerError::Validation(format!(
                        "Wedding date {} is in the past",
                        date
                    )));
                }
            }
            profile.wedding_date = date;
            Ok(())
        })
    }

    /// Record a pending invitation for the partner's e-mail
    pub fn invite_partner(&self, id: CoupleId, email: &str) -> PlannerResult<CoupleProfile> {
        let email = email.trim().to_lowercase();
        if !looks_like_email(&email) {
            return Err(PlannerError::Validation(format!(
                "'{}' is not a valid e-mail address",
                email
            )));
        }

        self.modify(id, |profile| {
            if profile.partner_linked {
                return Err(PlannerError::Validation("Partner is already linked".into()));
            }
            profile.partner_email = Some(email.clone());
            Ok(())
        })
    }

    /// Change the names on the profile; `None` leaves a name unchanged
    pub fn rename(
        &self,
        id: CoupleId,
        user_name: Option<&str>,
        partner_name: Option<&str>,
    ) -> PlannerResult<CoupleProfile> {
        self.modify(id, |profile| {
            if let Some(name) = user_name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(PlannerError::Validation("Your name cannot be empty".into()));
                }
                profile.user_name = name.to_string();
            }
            if let Some(partner) = partner_name {
                profile.partner_name = clean_optional(Some(partner));
            }
            Ok(())
        })
    }

    fn modify<F>(&self, id: CoupleId, change: F) -> PlannerResult<CoupleProfile>
    where
        F: FnOnce(&mut CoupleProfile) -> PlannerResult<()>,
    {
        let mut profile = self.get(id)?;
        change(&mut profile)?;
        profile.updated_at = Utc::now();
        self.gateway.update_couple(&profile)?;
        debug!(couple = %id, "updated couple profile");
        Ok(profile)
    }
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Minimal shape check: one `@`, non-empty local part, a dot in the domain
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
