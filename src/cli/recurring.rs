//! Recurring cost CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_optional_amount};
use crate::config::Settings;
use crate::display::format_recurring_list;
use crate::error::PlannerResult;
use crate::gateway::DataGateway;
use crate::services::RecurringCostService;

/// Recurring cost subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// List monthly recurring costs
    #[command(alias = "ls")]
    List,

    /// Add a monthly cost
    Add {
        /// Name (e.g. "Internet")
        name: String,
        /// Monthly amount
        amount: String,
        /// Category (defaults to "other")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit a recurring cost
    Edit {
        /// Name or ID
        cost: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a recurring cost
    #[command(alias = "rm")]
    Delete {
        /// Name or ID
        cost: String,
    },
}

/// Handle a recurring cost command
pub fn handle_recurring_command(
    gateway: &dyn DataGateway,
    settings: &Settings,
    cmd: RecurringCommands,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let service = RecurringCostService::new(gateway);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        RecurringCommands::List => {
            let costs = service.list(couple)?;
            print!("{}", format_recurring_list(&costs, symbol));
        }

        RecurringCommands::Add {
            name,
            amount,
            category,
        } => {
            let amount = parse_amount(&amount, "amount")?;
            let cost = service.add(couple, &name, amount, category.as_deref())?;
            println!(
                "Added recurring cost: {} ({} per month)",
                cost.name,
                cost.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", cost.id);
        }

        RecurringCommands::Edit {
            cost,
            name,
            amount,
            category,
        } => {
            if name.is_none() && amount.is_none() && category.is_none() {
                println!("No changes specified. Use --name, --amount or --category.");
                return Ok(());
            }
            let existing = service.find(couple, &cost)?;
            let amount = parse_optional_amount(amount.as_deref(), "amount")?;
            let updated = service.update(
                couple,
                existing.id,
                name.as_deref(),
                amount,
                category.as_deref(),
            )?;
            println!("Updated recurring cost: {}", updated.name);
        }

        RecurringCommands::Delete { cost } => {
            let existing = service.find(couple, &cost)?;
            let removed = service.delete(couple, existing.id)?;
            println!("Deleted recurring cost: {}", removed.name);
        }
    }

    Ok(())
}
