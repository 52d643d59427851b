//! Couple Planner - wedding and household finance planning for couples
//!
//! The heart of the crate is the wedding budget editor
//! ([`services::WeddingBudgetEditor`]): it stages a couple's wedding cost
//! categories, applies scenario presets, and commits the whole list in one
//! bulk save. Around it sit the couple profile, housing plan, recurring
//! costs, the home furnishing checklist and a monthly viability dashboard.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: custom error types
//! - `models`: core data models (money, couple, wedding, housing, ...)
//! - `gateway`: the `DataGateway` trait and its JSON file implementation
//! - `services`: business logic layer
//! - `display`: text formatting for CLI output
//! - `cli`: clap subcommands and their handlers
//! - `tui`: the interactive wedding budget editor
//!
//! # Example
//!
//! ```rust,ignore
//! use couple_planner::config::PlannerPaths;
//! use couple_planner::gateway::JsonGateway;
//! use couple_planner::models::CalculatorMode;
//! use couple_planner::services::WeddingBudgetEditor;
//!
//! let gateway = JsonGateway::open(PlannerPaths::new()?)?;
//! let mut editor = WeddingBudgetEditor::open(&gateway, couple_id, CalculatorMode::Presets)?;
//! editor.add_category("Honeymoon")?;
//! editor.save()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod services;
pub mod tui;

pub use error::{PlannerError, PlannerResult};
