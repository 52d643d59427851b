//! Home checklist CLI commands

use clap::Subcommand;

use super::parse_optional_amount;
use crate::config::Settings;
use crate::display::{format_home_items, format_home_stats};
use crate::error::PlannerResult;
use crate::gateway::DataGateway;
use crate::models::{ItemStatus, ItemType, Priority, Room};
use crate::services::{HomeItemFilter, HomeItemService, HomeItemUpdate, NewHomeItem};

/// Home checklist subcommands
#[derive(Subcommand)]
pub enum HomeCommands {
    /// List checklist items
    #[command(alias = "ls")]
    List {
        /// Only items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        room: Option<Room>,
        #[arg(short = 't', long = "type")]
        item_type: Option<ItemType>,
        /// pending or purchased
        #[arg(long)]
        status: Option<ItemStatus>,
    },

    /// Add an item to the checklist
    Add {
        name: String,
        #[arg(short, long, default_value = "other")]
        room: Room,
        #[arg(short = 't', long = "type", default_value = "other")]
        item_type: ItemType,
        /// Estimated price
        #[arg(short, long)]
        estimated: Option<String>,
        /// Price actually paid
        #[arg(short, long)]
        actual: Option<String>,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// The item was a gift
        #[arg(long)]
        gift: bool,
    },

    /// Edit an item
    Edit {
        /// Name or ID
        item: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        room: Option<Room>,
        #[arg(short = 't', long = "type")]
        item_type: Option<ItemType>,
        #[arg(short, long)]
        estimated: Option<String>,
        #[arg(short, long)]
        actual: Option<String>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Mark or unmark as a gift
        #[arg(long)]
        gift: Option<bool>,
    },

    /// Toggle an item between pending and purchased
    Toggle {
        /// Name or ID
        item: String,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Name or ID
        item: String,
    },

    /// Progress and spending statistics
    Stats,
}

/// Handle a home checklist command
pub fn handle_home_command(
    gateway: &dyn DataGateway,
    settings: &Settings,
    cmd: HomeCommands,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let service = HomeItemService::new(gateway);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        HomeCommands::List {
            search,
            room,
            item_type,
            status,
        } => {
            let filter = HomeItemFilter {
                search,
                room,
                item_type,
                status,
            };
            let items = service.filter(couple, &filter)?;
            println!("{}", format_home_items(&items, symbol));
        }

        HomeCommands::Add {
            name,
            room,
            item_type,
            estimated,
            actual,
            priority,
            link,
            notes,
            gift,
        } => {
            let mut new_item = NewHomeItem::new(name, room, item_type);
            if let Some(price) = parse_optional_amount(estimated.as_deref(), "estimated price")? {
                new_item.estimated_price = price;
            }
            if let Some(price) = parse_optional_amount(actual.as_deref(), "actual price")? {
                new_item.actual_price = price;
            }
            new_item.priority = priority;
            new_item.store_link = link;
            new_item.notes = notes;
            new_item.is_gifted = gift;

            let item = service.add(couple, new_item)?;
            println!("Added item: {} ({}, {})", item.name, item.room, item.item_type);
            println!("  ID: {}", item.id);
        }

        HomeCommands::Edit {
            item,
            name,
            room,
            item_type,
            estimated,
            actual,
            priority,
            link,
            notes,
            gift,
        } => {
            let existing = service.find(couple, &item)?;
            let update = HomeItemUpdate {
                name,
                room,
                item_type,
                estimated_price: parse_optional_amount(estimated.as_deref(), "estimated price")?,
                actual_price: parse_optional_amount(actual.as_deref(), "actual price")?,
                priority,
                store_link: link,
                notes,
                is_gifted: gift,
            };
            let updated = service.update(couple, existing.id, update)?;
            println!("Updated item: {}", updated.name);
        }

        HomeCommands::Toggle { item } => {
            let existing = service.find(couple, &item)?;
            let toggled = service.toggle_status(couple, existing.id)?;
            println!("{} is now {}", toggled.name, toggled.status);
        }

        HomeCommands::Delete { item } => {
            let existing = service.find(couple, &item)?;
            let removed = service.delete(couple, existing.id)?;
            println!("Deleted item: {}", removed.name);
        }

        HomeCommands::Stats => {
            let stats = service.stats(couple)?;
            print!("{}", format_home_stats(&stats, symbol));
        }
    }

    Ok(())
}
