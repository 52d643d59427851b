use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use couple_planner::cli::{
    handle_home_command, handle_housing_command, handle_profile_command,
    handle_projection_command, handle_recurring_command, handle_summary_command,
    handle_wedding_command, HomeCommands, HousingCommands, ProfileCommands, RecurringCommands,
    WeddingCommands,
};
use couple_planner::config::{PlannerPaths, Settings};
use couple_planner::gateway::JsonGateway;
use couple_planner::logging::init_tracing;
use couple_planner::services::CoupleService;

#[derive(Parser)]
#[command(
    name = "couple",
    version,
    about = "Wedding and household finance planner for couples",
    long_about = "Couple Planner helps two people plan their wedding budget, compare \
                  renting with financing a home, track recurring costs and furnish \
                  their new home, all from the terminal."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the couple profile
    Init {
        /// Your name
        #[arg(short, long)]
        name: String,
        /// Your partner's name
        #[arg(short, long)]
        partner: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Couple profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Wedding budget commands
    #[command(subcommand)]
    Wedding(WeddingCommands),

    /// Housing plan commands
    #[command(subcommand)]
    Housing(HousingCommands),

    /// Recurring monthly cost commands
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Home furnishing checklist commands
    #[command(subcommand)]
    Home(HomeCommands),

    /// Monthly viability summary
    Summary,

    /// Twelve-month savings projection
    Projection,

    /// Launch the interactive wedding budget editor
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PlannerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // The TUI owns the terminal; log lines on stderr would corrupt it
    if !matches!(cli.command, Some(Commands::Tui)) {
        init_tracing(settings.log_level.as_deref());
    }

    let gateway = JsonGateway::open(paths.clone()).context("Failed to open data directory")?;

    match cli.command {
        Some(Commands::Init { name, partner }) => {
            if let Some(id) = settings.active_couple {
                let profile = CoupleService::new(&gateway).get(id)?;
                println!("Already initialized for {}.", profile.display_name());
                println!("Run 'couple profile show' to see your profile.");
                return Ok(());
            }

            let profile = CoupleService::new(&gateway).create(&name, partner.as_deref())?;
            settings.active_couple = Some(profile.id);
            settings.setup_completed = true;
            settings.save(&paths)?;

            println!("Created profile for {}", profile.display_name());
            println!("  ID: {}", profile.id);
            println!("  Data directory: {}", paths.data_dir().display());
            println!();
            println!("Next steps:");
            println!("  couple profile income --you 5000 --partner 4000");
            println!("  couple wedding preset standard");
            println!("  couple tui");
        }
        Some(Commands::Config) => {
            println!("Couple Planner Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            match settings.active_couple {
                Some(id) => println!("  Active couple:   {}", id),
                None => println!("  Active couple:   (none, run 'couple init')"),
            }
            println!("  Calculator mode: {}", settings.calculator_mode);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Log level:       {}",
                settings.log_level.as_deref().unwrap_or("(default)")
            );
        }
        Some(Commands::Profile(cmd)) => handle_profile_command(&gateway, &settings, cmd)?,
        Some(Commands::Wedding(cmd)) => {
            handle_wedding_command(&gateway, &paths, &mut settings, cmd)?
        }
        Some(Commands::Housing(cmd)) => handle_housing_command(&gateway, &settings, cmd)?,
        Some(Commands::Recurring(cmd)) => handle_recurring_command(&gateway, &settings, cmd)?,
        Some(Commands::Home(cmd)) => handle_home_command(&gateway, &settings, cmd)?,
        Some(Commands::Summary) => handle_summary_command(&gateway, &settings)?,
        Some(Commands::Projection) => handle_projection_command(&gateway, &settings)?,
        Some(Commands::Tui) => couple_planner::tui::run_tui(&gateway, &paths, &mut settings)?,
        None => {
            println!("Couple Planner - wedding and household finance planning");
            println!();
            println!("Run 'couple --help' for usage information.");
            println!("Run 'couple init --name <you>' to get started.");
        }
    }

    Ok(())
}
