//! Terminal User Interface module
//!
//! An interactive editor for the wedding budget built on ratatui: the
//! ordered category table, totals, save state and toast notifications.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
