//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::{PlannerPaths, Settings};
use crate::gateway::DataGateway;
use crate::services::WeddingBudgetEditor;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wedding budget editor until the user quits
pub fn run_tui(
    gateway: &dyn DataGateway,
    paths: &PlannerPaths,
    settings: &mut Settings,
) -> Result<()> {
    let couple = settings.require_couple()?;
    let editor = WeddingBudgetEditor::open(gateway, couple, settings.calculator_mode)?;

    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, App::new(editor, settings, paths));
    restore_terminal()?;
    result
}

fn run_loop(terminal: &mut Tui, mut app: App<'_>) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, &app))?;

        // The frame above shows "Saving..."; the save itself blocks this turn
        if app.save_requested {
            app.perform_save();
            continue;
        }

        handle_event(&mut app, events.next()?);
    }

    Ok(())
}
