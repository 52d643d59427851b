//! Couple profile CLI commands

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use super::{parse_amount, parse_optional_amount};
use crate::config::Settings;
use crate::display::format_profile;
use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::services::CoupleService;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the couple profile
    Show,

    /// Set monthly incomes
    Income {
        /// Your monthly income
        #[arg(long)]
        you: Option<String>,
        /// Your partner's monthly income
        #[arg(long)]
        partner: Option<String>,
        /// Set only the combined income
        #[arg(long, conflicts_with_all = ["you", "partner"])]
        combined: Option<String>,
    },

    /// Set the wedding date (YYYY-MM-DD)
    Date {
        /// Wedding date
        date: Option<String>,
        /// Clear the wedding date
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },

    /// Invite your partner by e-mail
    Invite {
        email: String,
    },

    /// Change the names on the profile
    Rename {
        /// Your name
        #[arg(long)]
        you: Option<String>,
        /// Your partner's name
        #[arg(long)]
        partner: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    gateway: &dyn DataGateway,
    settings: &Settings,
    cmd: ProfileCommands,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let service = CoupleService::new(gateway);
    let today = Utc::now().date_naive();

    let profile = match cmd {
        ProfileCommands::Show => service.get(couple)?,

        ProfileCommands::Income {
            you,
            partner,
            combined,
        } => {
            if let Some(combined) = combined {
                let amount = parse_amount(&combined, "combined income")?;
                service.set_combined_income(couple, amount)?
            } else {
                let current = service.get(couple)?;
                let you = parse_optional_amount(you.as_deref(), "income")?;
                let partner = parse_optional_amount(partner.as_deref(), "partner income")?;
                if you.is_none() && partner.is_none() {
                    println!("No changes specified. Use --you, --partner or --combined.");
                    return Ok(());
                }
                service.update_incomes(
                    couple,
                    you.unwrap_or(current.user_income),
                    partner.unwrap_or(current.partner_income),
                )?
            }
        }

        ProfileCommands::Date { date, clear } => {
            let date = if clear {
                None
            } else {
                let raw = date.ok_or_else(|| {
                    PlannerError::Validation("Give a date (YYYY-MM-DD) or --clear".into())
                })?;
                Some(parse_date(&raw)?)
            };
            service.set_wedding_date(couple, date)?
        }

        ProfileCommands::Invite { email } => {
            let profile = service.invite_partner(couple, &email)?;
            println!("Invitation recorded for {}", email.trim().to_lowercase());
            profile
        }

        ProfileCommands::Rename { you, partner } => {
            if you.is_none() && partner.is_none() {
                println!("No changes specified. Use --you and/or --partner.");
                return Ok(());
            }
            service.rename(couple, you.as_deref(), partner.as_deref())?
        }
    };

    print!(
        "{}",
        format_profile(&profile, today, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub(crate) fn parse_date(input: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PlannerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", input))
    })
}
