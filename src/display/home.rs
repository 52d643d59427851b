//! Home checklist display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{HomeItem, Money};
use crate::services::home_items::GroupTotals;
use crate::services::HomeStats;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = " ")]
    check: &'static str,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Type")]
    item_type: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Estimated")]
    estimated: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

/// Checklist table
pub fn format_home_items(items: &[HomeItem], symbol: &str) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }

    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow {
            id: item.id.to_string(),
            check: if item.is_purchased() { "[x]" } else { "[ ]" },
            name: if item.is_gifted {
                format!("{} (gift)", item.name)
            } else {
                item.name.clone()
            },
            room: item.room.to_string(),
            item_type: item.item_type.to_string(),
            priority: item.priority.to_string(),
            estimated: item.estimated_price.format_with_symbol(symbol),
            actual: item.actual_price.format_with_symbol(symbol),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(6..)).with(Alignment::right()))
        .to_string()
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Items")]
    count: usize,
    #[tabled(rename = "Estimated")]
    estimated: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

fn group_table<K: std::fmt::Display>(groups: &[GroupTotals<K>], symbol: &str) -> String {
    let rows: Vec<GroupRow> = groups
        .iter()
        .map(|g| GroupRow {
            group: g.group.to_string(),
            count: g.count,
            estimated: g.estimated.format_with_symbol(symbol),
            actual: g.actual.format_with_symbol(symbol),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Progress, spend and per-room/per-type breakdowns
pub fn format_home_stats(stats: &HomeStats, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Progress: {}/{} purchased ({}%), {} pending\n",
        stats.purchased_items, stats.total_items, stats.progress_percent, stats.pending_items
    ));
    output.push_str(&format!(
        "Estimated: {}\nSpent:     {}\n",
        stats.total_estimated.format_with_symbol(symbol),
        stats.total_actual.format_with_symbol(symbol)
    ));

    if stats.savings >= Money::zero() {
        output.push_str(&format!(
            "Saved:     {} ({}%)\n",
            stats.savings.format_with_symbol(symbol),
            stats.savings_percent
        ));
    } else {
        output.push_str(&format!(
            "Over:      {} ({}%)\n",
            (-stats.savings).format_with_symbol(symbol),
            -stats.savings_percent
        ));
    }

    if stats.gifted_items > 0 {
        output.push_str(&format!(
            "Gifts:     {} items worth {}\n",
            stats.gifted_items,
            stats.gifted_savings.format_with_symbol(symbol)
        ));
    }

    if !stats.by_room.is_empty() {
        output.push_str("\nBy room\n");
        output.push_str(&group_table(&stats.by_room, symbol));
        output.push('\n');
    }
    if !stats.by_type.is_empty() {
        output.push_str("\nBy type\n");
        output.push_str(&group_table(&stats.by_type, symbol));
        output.push('\n');
    }

    output
}
