//! Layout definitions for the TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the wedding budget screen
pub struct BudgetLayout {
    /// Title, mode and scenario
    pub header: Rect,
    /// Category table
    pub categories: Rect,
    /// Planned / actual / remaining totals
    pub totals: Rect,
    /// Save state and key hints
    pub status_bar: Rect,
}

impl BudgetLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Categories
                Constraint::Length(3), // Totals
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            categories: chunks[1],
            totals: chunks[2],
            status_bar: chunks[3],
        }
    }
}

/// Fixed-size rect centered in `r`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Toast area in the top-right corner
pub fn toast_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let x = r.x + r.width - width;
    Rect::new(x, r.y + 1, width, height.min(r.height.saturating_sub(1)))
}
