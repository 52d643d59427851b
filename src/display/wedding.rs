//! Wedding budget display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{BuiltinCategory, CalculatorMode, Scenario};
use crate::services::WeddingBudgetEditor;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Staged categories with totals, mode and save state
pub fn format_wedding_budget(editor: &WeddingBudgetEditor<'_>, symbol: &str) -> String {
    let mut output = String::new();

    let scenario = editor
        .active_scenario()
        .map(|s| format!("  scenario: {}", s))
        .unwrap_or_default();
    output.push_str(&format!("Wedding budget ({} mode){}\n", editor.mode(), scenario));

    if editor.is_empty() {
        output.push_str("\nNo categories yet. Add one with 'couple wedding add <name>'.\n");
        return output;
    }

    let rows: Vec<CategoryRow> = editor
        .ordered_categories()
        .into_iter()
        .enumerate()
        .map(|(i, category)| {
            let marker = if editor.is_fixed(&category.key) { " *" } else { "" };
            CategoryRow {
                position: i + 1,
                label: format!("{}{}", category.label, marker),
                planned: category.planned_amount.format_with_symbol(symbol),
                actual: category.actual_amount.format_with_symbol(symbol),
                remaining: category.remaining().format_with_symbol(symbol),
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    output.push_str(&table);
    output.push('\n');

    output.push_str(&format!(
        "\nTotal planned:  {}\nTotal actual:   {}\nRemaining:      {}\n",
        editor.total_planned().format_with_symbol(symbol),
        editor.total_actual().format_with_symbol(symbol),
        editor.remaining().format_with_symbol(symbol),
    ));

    if editor.mode() == CalculatorMode::Presets {
        output.push_str("\n* built-in category (cannot be removed or renamed)\n");
    }
    if editor.is_dirty() {
        output.push_str("\nUnsaved changes.\n");
    }

    output
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Economical")]
    economical: String,
    #[tabled(rename = "Standard")]
    standard: String,
    #[tabled(rename = "Luxury")]
    luxury: String,
}

/// The three presets side by side
pub fn format_scenarios(symbol: &str) -> String {
    let amount = |scenario: Scenario, category: BuiltinCategory| {
        scenario.planned(category).format_with_symbol(symbol)
    };

    let mut rows: Vec<ScenarioRow> = BuiltinCategory::all()
        .iter()
        .map(|category| ScenarioRow {
            category: category.label().to_string(),
            economical: amount(Scenario::Economical, *category),
            standard: amount(Scenario::Standard, *category),
            luxury: amount(Scenario::Luxury, *category),
        })
        .collect();
    rows.push(ScenarioRow {
        category: "Total".to_string(),
        economical: Scenario::Economical.total().format_with_symbol(symbol),
        standard: Scenario::Standard.total().format_with_symbol(symbol),
        luxury: Scenario::Luxury.total().format_with_symbol(symbol),
    });

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
