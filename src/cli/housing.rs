//! Housing CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_optional_amount};
use crate::config::Settings;
use crate::display::format_housing;
use crate::error::PlannerResult;
use crate::gateway::DataGateway;
use crate::models::HousingType;
use crate::services::{HousingService, HousingUpdate};

/// Housing subcommands
#[derive(Subcommand)]
pub enum HousingCommands {
    /// Show the housing plan and the rent vs. finance comparison
    Show,

    /// Set the monthly rent
    Rent {
        amount: String,
        /// Also select renting as the plan
        #[arg(long)]
        select: bool,
    },

    /// Set the financing parameters
    Finance {
        /// Property value
        #[arg(long)]
        value: Option<String>,
        /// Down payment
        #[arg(long)]
        down: Option<String>,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: Option<f64>,
        /// Loan term in months
        #[arg(long)]
        months: Option<u32>,
        /// Also select financing as the plan
        #[arg(long)]
        select: bool,
    },

    /// Choose between rent and finance
    Set {
        housing_type: HousingType,
    },
}

/// Handle a housing command
pub fn handle_housing_command(
    gateway: &dyn DataGateway,
    settings: &Settings,
    cmd: HousingCommands,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let service = HousingService::new(gateway);

    let config = match cmd {
        HousingCommands::Show => service.get_or_default(couple)?,

        HousingCommands::Rent { amount, select } => {
            let update = HousingUpdate {
                rent_amount: Some(parse_amount(&amount, "rent")?),
                housing_type: select.then_some(HousingType::Rent),
                ..HousingUpdate::default()
            };
            service.update(couple, update)?
        }

        HousingCommands::Finance {
            value,
            down,
            rate,
            months,
            select,
        } => {
            let update = HousingUpdate {
                property_value: parse_optional_amount(value.as_deref(), "property value")?,
                down_payment: parse_optional_amount(down.as_deref(), "down payment")?,
                interest_rate: rate,
                loan_term_months: months,
                housing_type: select.then_some(HousingType::Finance),
                ..HousingUpdate::default()
            };
            if update.is_empty() {
                println!("No changes specified. Use --value, --down, --rate, --months or --select.");
                return Ok(());
            }
            service.update(couple, update)?
        }

        HousingCommands::Set { housing_type } => {
            let update = HousingUpdate {
                housing_type: Some(housing_type),
                ..HousingUpdate::default()
            };
            let config = service.update(couple, update)?;
            println!("Housing plan set to {}", housing_type);
            println!();
            config
        }
    };

    print!("{}", format_housing(&config, &settings.currency_symbol));
    Ok(())
}
