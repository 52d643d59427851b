//! Application state for the TUI
//!
//! The App owns the wedding budget editor plus everything the screen needs
//! around it: selection, the open input prompt, toasts and the quit guard.

use std::time::Instant;

use tracing::warn;

use crate::config::{PlannerPaths, Settings};
use crate::error::PlannerError;
use crate::models::{CalculatorMode, Money, Scenario};
use crate::services::{AmountField, Direction, SaveOutcome, WeddingBudgetEditor};

use super::widgets::{Notification, NotificationQueue, TextInput};

/// What the open prompt will do with its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Amount { key: String, field: AmountField },
    AddCategory,
    Rename { key: String },
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Amount {
                field: AmountField::Planned,
                ..
            } => " Planned amount ",
            Self::Amount {
                field: AmountField::Actual,
                ..
            } => " Actual amount ",
            Self::AddCategory => " New category ",
            Self::Rename { .. } => " Rename category ",
        }
    }
}

/// An open input prompt
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: TextInput,
}

/// Main application state
pub struct App<'a> {
    pub editor: WeddingBudgetEditor<'a>,
    pub settings: &'a mut Settings,
    pub paths: &'a PlannerPaths,
    pub should_quit: bool,
    /// Index into the editor's ordered categories
    pub selected_index: usize,
    pub prompt: Option<Prompt>,
    pub notifications: NotificationQueue,
    /// Set by the save key; the run loop draws "Saving..." and then saves
    pub save_requested: bool,
    quit_warned: bool,
}

impl<'a> App<'a> {
    pub fn new(
        editor: WeddingBudgetEditor<'a>,
        settings: &'a mut Settings,
        paths: &'a PlannerPaths,
    ) -> Self {
        Self {
            editor,
            settings,
            paths,
            should_quit: false,
            selected_index: 0,
            prompt: None,
            notifications: NotificationQueue::new(),
            save_requested: false,
            quit_warned: false,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Key of the highlighted category
    pub fn selected_key(&self) -> Option<String> {
        self.editor.keys().get(self.selected_index).cloned()
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.editor.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn select_key(&mut self, key: &str) {
        if let Some(index) = self.editor.keys().iter().position(|k| k == key) {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.editor.len().saturating_sub(1));
    }

    /// First press warns when there are unsaved edits; the second quits
    pub fn request_quit(&mut self) {
        if self.editor.is_dirty() && !self.quit_warned {
            self.quit_warned = true;
            self.notify(Notification::warning(
                "Unsaved changes. Press s to save or q again to quit without saving.",
            ));
            return;
        }
        self.should_quit = true;
    }

    // === Staged edits ===

    pub fn move_selected(&mut self, direction: Direction) {
        let Some(key) = self.selected_key() else {
            return;
        };
        if self.editor.move_category(&key, direction) {
            self.select_key(&key);
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };
        if self.editor.is_fixed(&key) {
            self.notify(Notification::warning(
                "Built-in categories can't be removed in presets mode",
            ));
            return;
        }
        if self.editor.remove_category(&key) {
            self.clamp_selection();
        }
    }

    pub fn apply_scenario(&mut self, scenario: Scenario) {
        match self.editor.apply_scenario(scenario) {
            Ok(()) => self.notify(Notification::info(format!("{} scenario applied", scenario))),
            Err(e) => self.notify(Notification::warning(e.to_string())),
        }
    }

    /// Switch presets/custom and remember the choice in the settings file
    pub fn toggle_mode(&mut self) {
        let mode = self.editor.mode().toggled();
        if let Err(e) = self.editor.set_mode(mode) {
            self.notify(Notification::warning(e.to_string()));
            return;
        }
        self.clamp_selection();

        self.settings.calculator_mode = mode;
        match self.settings.save(self.paths) {
            Ok(()) => self.notify(Notification::info(format!("Switched to {} mode", mode))),
            Err(e) => {
                warn!(error = %e, "failed to persist calculator mode");
                self.notify(Notification::error(format!("Mode not remembered: {}", e)));
            }
        }
    }

    // === Prompts ===

    pub fn open_amount_prompt(&mut self, field: AmountField) {
        let Some(key) = self.selected_key() else {
            return;
        };
        let current = self
            .editor
            .category(&key)
            .map(|c| match field {
                AmountField::Planned => c.planned_amount,
                AmountField::Actual => c.actual_amount,
            })
            .unwrap_or_default();
        self.prompt = Some(Prompt {
            kind: PromptKind::Amount { key, field },
            input: TextInput::new().label("Amount").content(current.to_string()),
        });
    }

    pub fn open_add_prompt(&mut self) {
        self.prompt = Some(Prompt {
            kind: PromptKind::AddCategory,
            input: TextInput::new().label("Name"),
        });
    }

    pub fn open_rename_prompt(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };
        if self.editor.is_fixed(&key) {
            self.notify(Notification::warning(
                "Built-in categories can't be renamed in presets mode",
            ));
            return;
        }
        let label = self
            .editor
            .category(&key)
            .map(|c| c.label.clone())
            .unwrap_or_default();
        self.prompt = Some(Prompt {
            kind: PromptKind::Rename { key },
            input: TextInput::new().label("Name").content(label),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Apply the prompt; on invalid input it stays open with a warning
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let text = prompt.input.value().trim().to_string();

        let result: Result<(), PlannerError> = match &prompt.kind {
            PromptKind::Amount { key, field } => parse_amount(&text).map(|amount| {
                self.editor.set_amount(key, *field, amount);
            }),
            PromptKind::AddCategory => self.editor.add_category(&text).map(|key| {
                self.select_key(&key);
            }),
            PromptKind::Rename { key } => self.editor.rename_category(key, &text).map(|key| {
                self.select_key(&key);
            }),
        };

        if let Err(e) = result {
            self.notify(Notification::warning(e.to_string()));
            self.prompt = Some(prompt);
        }
    }

    // === Commit ===

    /// Ask the run loop to save on its next turn; ignored when there is nothing to save
    pub fn request_save(&mut self) {
        if !self.editor.is_dirty() {
            self.notify(Notification::info("Nothing to save"));
            return;
        }
        self.save_requested = true;
    }

    pub fn perform_save(&mut self) {
        self.save_requested = false;
        match self.editor.save() {
            Ok(SaveOutcome::Saved) => {
                self.quit_warned = false;
                self.clamp_selection();
                self.notify(Notification::success("Wedding budget saved"));
            }
            Ok(SaveOutcome::NothingToSave) => {}
            Err(e) => self.notify(Notification::error(format!("Save failed: {}", e))),
        }
    }

    /// Periodic housekeeping
    pub fn on_tick(&mut self) {
        self.notifications.remove_expired();
    }

    pub fn is_just_saved(&self) -> bool {
        self.editor.is_just_saved_at(Instant::now())
    }

    pub fn mode(&self) -> CalculatorMode {
        self.editor.mode()
    }
}

fn parse_amount(text: &str) -> Result<Money, PlannerError> {
    let amount = Money::parse(text)
        .map_err(|e| PlannerError::Validation(format!("Invalid amount: {}", e)))?;
    if amount.is_negative() {
        return Err(PlannerError::Validation("Amount cannot be negative".into()));
    }
    Ok(amount)
}
