//! Viability and projection formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::{Projection, Viability};

pub fn format_viability(viability: &Viability, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Status: {}\n\n", viability.status));
    output.push_str(&format!(
        "  Combined income:   {}\n",
        viability.combined_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Housing (rent):    {}\n",
        viability.monthly_housing.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Recurring costs:   {}\n",
        viability.total_recurring.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Monthly spending:  {}\n",
        viability.total_monthly.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Monthly balance:   {}\n",
        viability.monthly_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Savings rate:      {:.1}%\n",
        viability.savings_rate
    ));
    output.push_str(&format!(
        "\n  Wedding planned:   {}\n",
        viability.total_wedding_planned.format_with_symbol(symbol)
    ));

    if let Some(reserve) = viability.emergency_reserve_suggestion {
        output.push_str(&format!(
            "\nTip: the wedding costs more than 12 months of income. \
             Consider setting aside {} (10%) as an emergency reserve.\n",
            reserve.format_with_symbol(symbol)
        ));
    }

    output
}

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Accumulated")]
    accumulated: String,
}

pub fn format_projection(projection: &Projection, symbol: &str) -> String {
    let rows: Vec<ProjectionRow> = projection
        .points
        .iter()
        .map(|point| ProjectionRow {
            month: point.label(),
            accumulated: point.accumulated.format_with_symbol(symbol),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string();

    format!(
        "Monthly balance: {}\n\n{}\n\nSaved in 12 months: {}\n",
        projection.monthly_balance.format_with_symbol(symbol),
        table,
        projection.annual_savings.format_with_symbol(symbol)
    )
}
