//! Event handler for the TUI
//!
//! Routes key presses either to the open prompt or to the budget screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Scenario;
use crate::services::{AmountField, Direction};

use super::app::App;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.on_tick(),
        Event::Resize(_, _) => {}
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-C always leaves, unsaved edits or not
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.prompt.is_some() {
        handle_prompt_key(app, key);
    } else {
        handle_budget_key(app, key);
    }
}

fn handle_budget_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('J') => app.move_selected(Direction::Down),
        KeyCode::Char('K') => app.move_selected(Direction::Up),

        KeyCode::Char('p') | KeyCode::Enter => app.open_amount_prompt(AmountField::Planned),
        KeyCode::Char('a') => app.open_amount_prompt(AmountField::Actual),
        KeyCode::Char('n') => app.open_add_prompt(),
        KeyCode::Char('r') => app.open_rename_prompt(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),

        KeyCode::Char('1') => app.apply_scenario(Scenario::Economical),
        KeyCode::Char('2') => app.apply_scenario(Scenario::Standard),
        KeyCode::Char('3') => app.apply_scenario(Scenario::Luxury),

        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('s') => app.request_save(),

        _ => {}
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => app.submit_prompt(),
        code => {
            let Some(prompt) = app.prompt.as_mut() else {
                return;
            };
            let input = &mut prompt.input;
            match code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlannerPaths, Settings};
    use crate::gateway::{DataGateway, JsonGateway};
    use crate::models::{CalculatorMode, CoupleProfile, Money};
    use crate::services::WeddingBudgetEditor;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    struct Fixture {
        _temp: TempDir,
        paths: PlannerPaths,
        gateway: JsonGateway,
        settings: Settings,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp.path().to_path_buf());
        let gateway = JsonGateway::in_memory();
        let couple = gateway.create_couple(CoupleProfile::new("Ana")).unwrap();
        let settings = Settings {
            active_couple: Some(couple.id),
            ..Settings::default()
        };
        Fixture {
            _temp: temp,
            paths,
            gateway,
            settings,
        }
    }

    fn app<'a>(fx: &'a mut Fixture) -> App<'a> {
        let couple = fx.settings.active_couple.unwrap();
        let editor =
            WeddingBudgetEditor::open(&fx.gateway, couple, fx.settings.calculator_mode).unwrap();
        App::new(editor, &mut fx.settings, &fx.paths)
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_index, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected_index, 5);
        assert_eq!(app.selected_key().as_deref(), Some("photography"));
    }

    #[test]
    fn test_edit_planned_amount_through_prompt() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('p'));
        assert!(app.prompt.is_some());
        // Prefilled with "0.00"
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "1500");
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert!(app.editor.is_dirty());
        assert_eq!(
            app.editor.category("ceremony").unwrap().planned_amount,
            Money::from_units(1500)
        );
    }

    #[test]
    fn test_invalid_amount_keeps_prompt_open() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_some());
        assert!(!app.editor.is_dirty());
        assert!(!app.notifications.is_empty());
    }

    #[test]
    fn test_add_selects_new_category_and_save_commits() {
        let mut fx = fixture();
        {
            let mut app = app(&mut fx);
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, "Honeymoon");
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.selected_key().as_deref(), Some("Honeymoon"));
            press(&mut app, KeyCode::Char('s'));
            assert!(app.save_requested);
            app.perform_save();
            assert!(!app.editor.is_dirty());
            assert!(app.is_just_saved());
        }

        let couple = fx.settings.active_couple.unwrap();
        let rows = fx.gateway.list_wedding_costs(couple).unwrap();
        assert!(rows.iter().any(|r| r.category == "Honeymoon"));
    }

    #[test]
    fn test_save_key_ignored_when_clean() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('s'));
        assert!(!app.save_requested);
    }

    #[test]
    fn test_fixed_category_cannot_be_removed_or_renamed() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.editor.len(), 6);
        assert!(app.prompt.is_none());
        assert!(!app.editor.is_dirty());
    }

    #[test]
    fn test_scenario_and_reorder_keys() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.editor.active_scenario(), Some(Scenario::Luxury));

        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.editor.keys()[1], "ceremony");
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_quit_warns_once_when_dirty() {
        let mut fx = fixture();
        let mut app = app(&mut fx);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_mode_toggle_refused_while_dirty_then_persisted() {
        let mut fx = fixture();
        {
            let mut app = app(&mut fx);
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('m'));
            assert_eq!(app.mode(), CalculatorMode::Presets);

            app.perform_save();
            press(&mut app, KeyCode::Char('m'));
            assert_eq!(app.mode(), CalculatorMode::Custom);
        }

        assert_eq!(fx.settings.calculator_mode, CalculatorMode::Custom);
        let saved = Settings::load_or_create(&fx.paths).unwrap();
        assert_eq!(saved.calculator_mode, CalculatorMode::Custom);
    }
}
