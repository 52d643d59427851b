//! Couple profile, housing and recurring cost formatting

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{CoupleProfile, HousingConfig, HousingType, InvitationStatus, RecurringCost};
use crate::services::housing::compare;

/// Profile summary
pub fn format_profile(
    profile: &CoupleProfile,
    today: NaiveDate,
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Couple: {}\n", profile.display_name()));
    output.push_str(&format!("  ID:              {}\n", profile.id));
    output.push_str(&format!(
        "  Your income:     {}\n",
        profile.user_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Partner income:  {}\n",
        profile.partner_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Combined income: {}\n",
        profile.combined_income.format_with_symbol(symbol)
    ));

    match (profile.wedding_date, profile.days_until_wedding(today)) {
        (Some(date), Some(days)) if days >= 0 => output.push_str(&format!(
            "  Wedding date:    {} ({} days to go)\n",
            date.format(date_format),
            days
        )),
        (Some(date), _) => output.push_str(&format!(
            "  Wedding date:    {} (already happened)\n",
            date.format(date_format)
        )),
        _ => output.push_str("  Wedding date:    not set\n"),
    }

    let partner = match profile.invitation_status() {
        InvitationStatus::Linked => "linked".to_string(),
        InvitationStatus::Pending(email) => format!("invitation pending ({})", email),
        InvitationStatus::NotInvited => "not invited".to_string(),
    };
    output.push_str(&format!("  Partner account: {}\n", partner));

    output
}

/// Housing configuration with the rent-vs-finance comparison
pub fn format_housing(config: &HousingConfig, symbol: &str) -> String {
    let comparison = compare(config);
    let selected = |kind: HousingType| if config.housing_type == kind { " (selected)" } else { "" };

    let mut output = String::new();
    output.push_str(&format!("Rent{}\n", selected(HousingType::Rent)));
    output.push_str(&format!(
        "  Monthly rent:        {}\n",
        comparison.monthly_rent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Per year:            {}\n",
        comparison.annual_rent.format_with_symbol(symbol)
    ));

    output.push_str(&format!("\nFinance{}\n", selected(HousingType::Finance)));
    output.push_str(&format!(
        "  Property value:      {}\n",
        config.property_value.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Down payment:        {}\n",
        config.down_payment.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Loan amount:         {}\n",
        comparison.loan_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Interest rate:       {:.2}% per year\n",
        config.interest_rate
    ));
    output.push_str(&format!(
        "  Term:                {} months\n",
        config.loan_term_months
    ));
    output.push_str(&format!(
        "  Monthly installment: {}\n",
        comparison.monthly_payment.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Total paid:          {}\n",
        comparison.total_financed_cost.format_with_symbol(symbol)
    ));

    if comparison.monthly_payment.is_positive() && comparison.monthly_rent.is_positive() {
        let difference = comparison.monthly_difference;
        let verdict = if difference.is_positive() {
            format!("Financing costs {} more per month", difference.format_with_symbol(symbol))
        } else {
            format!("Financing costs {} less per month", (-difference).format_with_symbol(symbol))
        };
        output.push_str(&format!("\n{}\n", verdict));
    }

    output
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Recurring costs table with the monthly total
pub fn format_recurring_list(costs: &[RecurringCost], symbol: &str) -> String {
    if costs.is_empty() {
        return "No recurring costs yet. Add one with 'couple recurring add <name> <amount>'."
            .to_string();
    }

    let rows: Vec<RecurringRow> = costs
        .iter()
        .map(|cost| RecurringRow {
            id: cost.id.to_string(),
            name: cost.name.clone(),
            category: cost.category.clone(),
            amount: cost.amount.format_with_symbol(symbol),
        })
        .collect();

    let total: crate::models::Money = costs.iter().map(|c| c.amount).sum();
    let table = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()))
        .to_string();

    format!(
        "{}\n\nMonthly total: {}\n",
        table,
        total.format_with_symbol(symbol)
    )
}
