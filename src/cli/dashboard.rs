//! Summary and projection commands

use chrono::Utc;

use crate::config::Settings;
use crate::display::{format_profile, format_projection, format_viability};
use crate::error::PlannerResult;
use crate::gateway::DataGateway;
use crate::services::{CoupleService, DashboardService};

/// `couple summary`: profile plus the monthly viability check
pub fn handle_summary_command(gateway: &dyn DataGateway, settings: &Settings) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let today = Utc::now().date_naive();

    let profile = CoupleService::new(gateway).get(couple)?;
    let viability = DashboardService::new(gateway).viability(couple)?;

    print!(
        "{}",
        format_profile(&profile, today, &settings.currency_symbol, &settings.date_format)
    );
    println!();
    print!("{}", format_viability(&viability, &settings.currency_symbol));
    Ok(())
}

/// `couple projection`: twelve months of accumulated savings from this month
pub fn handle_projection_command(
    gateway: &dyn DataGateway,
    settings: &Settings,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let projection = DashboardService::new(gateway).projection(couple, Utc::now().date_naive())?;
    print!("{}", format_projection(&projection, &settings.currency_symbol));
    Ok(())
}
