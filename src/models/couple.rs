//! Couple profile model
//!
//! The couple is the scoping unit every other record belongs to. It holds
//! the two partners' names, their incomes and the wedding date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CoupleId;
use super::money::Money;

/// Where the partner invitation stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationStatus {
    /// No partner e-mail recorded yet
    NotInvited,
    /// An invitation was sent to this e-mail but not accepted
    Pending(String),
    /// The partner account is linked
    Linked,
}

/// A couple's shared profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoupleProfile {
    /// Unique identifier
    pub id: CoupleId,

    /// Name of the profile owner
    pub user_name: String,

    /// Name of the partner
    #[serde(default)]
    pub partner_name: Option<String>,

    /// E-mail the partner was invited with
    #[serde(default)]
    pub partner_email: Option<String>,

    /// Whether the partner accepted the invitation (set by the auth provider)
    #[serde(default)]
    pub partner_linked: bool,

    /// Monthly income of the profile owner
    #[serde(default)]
    pub user_income: Money,

    /// Monthly income of the partner
    #[serde(default)]
    pub partner_income: Money,

    /// Combined monthly income used by the dashboard
    #[serde(default)]
    pub combined_income: Money,

    /// Planned wedding date
    #[serde(default)]
    pub wedding_date: Option<NaiveDate>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last modified
    pub updated_at: DateTime<Utc>,
}

impl CoupleProfile {
    /// Create a new profile for the given owner
    pub fn new(user_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CoupleId::new(),
            user_name: user_name.into(),
            partner_name: None,
            partner_email: None,
            partner_linked: false,
            user_income: Money::zero(),
            partner_income: Money::zero(),
            combined_income: Money::zero(),
            wedding_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set both incomes and recompute the combined income
    pub fn set_incomes(&mut self, user_income: Money, partner_income: Money) {
        self.user_income = user_income;
        self.partner_income = partner_income;
        self.combined_income = user_income + partner_income;
        self.updated_at = Utc::now();
    }

    /// Days from `today` until the wedding (negative once it has passed)
    pub fn days_until_wedding(&self, today: NaiveDate) -> Option<i64> {
        self.wedding_date
            .map(|date| date.signed_duration_since(today).num_days())
    }

    /// Current state of the partner invitation
    pub fn invitation_status(&self) -> InvitationStatus {
        if self.partner_linked {
            return InvitationStatus::Linked;
        }
        match &self.partner_email {
            Some(email) => InvitationStatus::Pending(email.clone()),
            None => InvitationStatus::NotInvited,
        }
    }

    /// "Alice & Bob" style display name
    pub fn display_name(&self) -> String {
        match &self.partner_name {
            Some(partner) if !partner.trim().is_empty() => {
                format!("{} & {}", self.user_name, partner)
            }
            _ => self.user_name.clone(),
        }
    }
}

impl fmt::Display for CoupleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
