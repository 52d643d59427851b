//! Status bar view
//!
//! Save state on the left, key hints on the right

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

const HINTS: &str =
    " j/k:Move  J/K:Reorder  p/a:Edit  n:Add  r:Rename  d:Remove  m:Mode  s:Save  q:Quit ";

/// Label and color for the current save state
pub fn save_state(app: &App) -> (&'static str, Color) {
    if app.save_requested {
        ("Saving...", Color::Cyan)
    } else if app.editor.is_dirty() {
        ("● Unsaved changes", Color::Yellow)
    } else if app.is_just_saved() {
        ("✓ Saved", Color::Green)
    } else {
        ("Up to date", Color::DarkGray)
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (label, color) = save_state(app);

    let spans = vec![
        Span::raw(" "),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(
            format!("{} categories", app.editor.len()),
            Style::default().fg(Color::White),
        ),
    ];

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(HINTS.len());

    let mut spans = spans;
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(HINTS, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
