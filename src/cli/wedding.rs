//! Wedding budget CLI commands
//!
//! Each mutating command opens the editor, applies one staged operation,
//! prints the result and commits it with a single bulk save. `--dry-run`
//! prints the staged result without saving.

use clap::{Subcommand, ValueEnum};

use super::parse_optional_amount;
use crate::config::{PlannerPaths, Settings};
use crate::display::{format_scenarios, format_wedding_budget};
use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::models::{CalculatorMode, Scenario};
use crate::services::{AmountField, Direction, SaveOutcome, WeddingBudgetEditor};

/// Direction argument for `wedding move`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(value: MoveDirection) -> Self {
        match value {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

/// Wedding budget subcommands
#[derive(Subcommand)]
pub enum WeddingCommands {
    /// Show the wedding budget
    Show,

    /// Show the three scenario presets side by side
    Presets,

    /// Set the planned and/or actual amount of a category
    Set {
        /// Category name or key
        category: String,
        /// Planned amount
        #[arg(short, long)]
        planned: Option<String>,
        /// Amount actually spent
        #[arg(short, long)]
        actual: Option<String>,
        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Fill the built-in categories from a scenario (economical, standard, luxury)
    Preset {
        scenario: Scenario,
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// Planned amount
        #[arg(short, long)]
        planned: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename a custom category
    Rename {
        /// Category name or key
        category: String,
        /// New name
        new_name: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a custom category
    #[command(alias = "rm")]
    Remove {
        /// Category name or key
        category: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Move a category one position up or down
    Move {
        /// Category name or key
        category: String,
        #[arg(value_enum)]
        direction: MoveDirection,
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or switch the calculator mode (presets or custom)
    Mode {
        mode: Option<CalculatorMode>,
    },
}

/// Handle a wedding budget command
pub fn handle_wedding_command(
    gateway: &dyn DataGateway,
    paths: &PlannerPaths,
    settings: &mut Settings,
    cmd: WeddingCommands,
) -> PlannerResult<()> {
    let couple = settings.require_couple()?;
    let symbol = settings.currency_symbol.clone();
    let mut editor = WeddingBudgetEditor::open(gateway, couple, settings.calculator_mode)?;

    match cmd {
        WeddingCommands::Show => {
            print!("{}", format_wedding_budget(&editor, &symbol));
        }

        WeddingCommands::Presets => {
            println!("{}", format_scenarios(&symbol));
        }

        WeddingCommands::Set {
            category,
            planned,
            actual,
            dry_run,
        } => {
            let key = resolve(&editor, &category)?;
            let planned = parse_optional_amount(planned.as_deref(), "planned amount")?;
            let actual = parse_optional_amount(actual.as_deref(), "actual amount")?;

            if planned.is_none() && actual.is_none() {
                println!("No changes specified. Use --planned and/or --actual.");
                return Ok(());
            }
            if let Some(value) = planned {
                editor.set_amount(&key, AmountField::Planned, value);
            }
            if let Some(value) = actual {
                editor.set_amount(&key, AmountField::Actual, value);
            }

            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Preset { scenario, dry_run } => {
            editor.apply_scenario(scenario)?;
            println!("Applied the {} scenario.", scenario);
            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Add {
            name,
            planned,
            dry_run,
        } => {
            let planned = parse_optional_amount(planned.as_deref(), "planned amount")?;
            let key = editor.add_category(&name)?;
            if let Some(value) = planned {
                editor.set_amount(&key, AmountField::Planned, value);
            }
            println!("Added category: {}", name.trim());
            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Rename {
            category,
            new_name,
            dry_run,
        } => {
            let key = resolve(&editor, &category)?;
            editor.rename_category(&key, &new_name)?;
            println!("Renamed '{}' to '{}'", category, new_name.trim());
            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Remove { category, dry_run } => {
            let key = resolve(&editor, &category)?;
            if !editor.remove_category(&key) {
                return Err(PlannerError::Validation(format!(
                    "'{}' is a built-in category and cannot be removed in presets mode",
                    category
                )));
            }
            println!("Removed category: {}", category);
            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Move {
            category,
            direction,
            dry_run,
        } => {
            let key = resolve(&editor, &category)?;
            if !editor.move_category(&key, direction.into()) {
                println!("'{}' is already at the {}.", category, match direction {
                    MoveDirection::Up => "top",
                    MoveDirection::Down => "bottom",
                });
                return Ok(());
            }
            commit(&mut editor, dry_run, &symbol)?;
        }

        WeddingCommands::Mode { mode } => match mode {
            None => println!("Calculator mode: {}", editor.mode()),
            Some(mode) => {
                editor.set_mode(mode)?;
                settings.calculator_mode = mode;
                settings.save(paths)?;
                println!("Calculator mode set to {}", mode);
                println!();
                print!("{}", format_wedding_budget(&editor, &symbol));
            }
        },
    }

    Ok(())
}

fn resolve(editor: &WeddingBudgetEditor<'_>, input: &str) -> PlannerResult<String> {
    editor
        .resolve_key(input)
        .ok_or_else(|| PlannerError::category_not_found(input))
}

/// Print the staged budget, then save unless this is a dry run
fn commit(editor: &mut WeddingBudgetEditor<'_>, dry_run: bool, symbol: &str) -> PlannerResult<()> {
    if dry_run {
        println!();
        print!("{}", format_wedding_budget(editor, symbol));
        println!("\nDry run: nothing was saved.");
        return Ok(());
    }

    match editor.save()? {
        SaveOutcome::Saved => {
            println!();
            print!("{}", format_wedding_budget(editor, symbol));
            println!("\nSaved.");
        }
        SaveOutcome::NothingToSave => println!("Nothing changed."),
    }
    Ok(())
}
