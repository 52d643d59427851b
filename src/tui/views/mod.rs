//! TUI Views module

pub mod budget;
pub mod status_bar;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear},
    Frame,
};

use super::app::App;
use super::layout::{centered_rect_fixed, toast_rect, BudgetLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = BudgetLayout::new(frame.area());

    budget::render_header(frame, app, layout.header);
    budget::render_category_table(frame, app, layout.categories);
    budget::render_totals(frame, app, layout.totals);
    status_bar::render(frame, app, layout.status_bar);

    if app.prompt.is_some() {
        render_prompt(frame, app);
    }

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(44, 4, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

fn render_prompt(frame: &mut Frame, app: &App) {
    let Some(prompt) = &app.prompt else {
        return;
    };

    let area = centered_rect_fixed(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(prompt.kind.title())
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(" Enter: OK  Esc: Cancel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut input_area = inner;
    input_area.y += inner.height / 2;
    input_area.height = 1;
    frame.render_widget(&prompt.input, input_area);
}
