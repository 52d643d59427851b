//! Wedding budget view
//!
//! Header with mode and scenario, the ordered category table, and totals.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{CalculatorMode, Money};
use crate::tui::app::App;

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Wedding Budget ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let mode_color = match app.mode() {
        CalculatorMode::Presets => Color::Magenta,
        CalculatorMode::Custom => Color::Blue,
    };

    let mut spans = vec![
        Span::styled("Mode: ", Style::default().fg(Color::White)),
        Span::styled(
            app.mode().to_string(),
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        ),
    ];

    if app.mode() == CalculatorMode::Presets {
        let scenario = app
            .editor
            .active_scenario()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled("Scenario: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(scenario, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            "[1] Economical  [2] Standard  [3] Luxury",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render_category_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.editor.is_empty() {
        let text = Paragraph::new("No categories yet. Press n to add one.")
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    let symbol = app.symbol();
    let rows: Vec<Row> = app
        .editor
        .ordered_categories()
        .into_iter()
        .map(|category| {
            let fixed = app.editor.is_fixed(&category.key);
            let marker = if fixed { "◆ " } else { "  " };
            let remaining = category.remaining();

            Row::new(vec![
                Cell::from(format!("{}{}", marker, category.label)).style(if fixed {
                    Style::default().fg(Color::Magenta)
                } else {
                    Style::default().fg(Color::White)
                }),
                Cell::from(category.planned_amount.format_with_symbol(symbol)),
                Cell::from(category.actual_amount.format_with_symbol(symbol)),
                Cell::from(remaining.format_with_symbol(symbol)).style(remaining_style(remaining)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
    ];

    let header = Row::new(vec![
        Cell::from("Category"),
        Cell::from("Planned"),
        Cell::from("Actual"),
        Cell::from("Remaining"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .height(1);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = app.symbol();
    let remaining = app.editor.remaining();

    let line = Line::from(vec![
        Span::styled("Planned: ", Style::default().fg(Color::White)),
        Span::styled(
            app.editor.total_planned().format_with_symbol(symbol),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled("Spent: ", Style::default().fg(Color::White)),
        Span::styled(
            app.editor.total_actual().format_with_symbol(symbol),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled("Remaining: ", Style::default().fg(Color::White)),
        Span::styled(
            remaining.format_with_symbol(symbol),
            remaining_style(remaining).add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn remaining_style(remaining: Money) -> Style {
    if remaining.is_negative() {
        Style::default().fg(Color::Red)
    } else if remaining.is_zero() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    }
}
