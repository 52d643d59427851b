//! Custom error types for Couple Planner
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Couple Planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The wedding budget has staged edits that would be lost
    #[error("Unsaved changes: {0}")]
    UnsavedChanges(String),

    /// The data gateway rejected or failed a call
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl PlannerError {
    /// Create a "not found" error for couple profiles
    pub fn couple_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Couple",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for wedding budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring costs
    pub fn recurring_cost_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring cost",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for home items
    pub fn home_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Home item",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for wedding budget categories
    pub fn duplicate_category(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Couple Planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PlannerError::couple_not_found("cpl-1234abcd");
        assert_eq!(err.to_string(), "Couple not found: cpl-1234abcd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_category_error() {
        let err = PlannerError::duplicate_category("Honeymoon");
        assert_eq!(err.to_string(), "Category already exists: Honeymoon");
        assert!(err.is_duplicate());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let planner_err: PlannerError = io_err.into();
        assert!(matches!(planner_err, PlannerError::Io(_)));
    }
}
