//! Wedding budget models
//!
//! Persisted wedding-cost rows, the six built-in wedding categories and the
//! scenario presets that seed their planned amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// One persisted wedding budget line, unique per couple by `category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeddingCostLine {
    /// Category key (built-in key or the custom category's name)
    pub category: String,

    /// Amount the couple plans to spend
    #[serde(default)]
    pub planned_amount: Money,

    /// Amount already spent
    #[serde(default)]
    pub actual_amount: Money,

    /// Free-form notes kept by the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WeddingCostLine {
    /// Create a line without notes
    pub fn new(category: impl Into<String>, planned_amount: Money, actual_amount: Money) -> Self {
        Self {
            category: category.into(),
            planned_amount,
            actual_amount,
            notes: None,
        }
    }
}

/// The six predefined wedding expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCategory {
    Ceremony,
    Party,
    Attire,
    Catering,
    Decoration,
    Photography,
}

impl BuiltinCategory {
    /// All built-ins in canonical order
    pub fn all() -> &'static [Self] {
        &[
            Self::Ceremony,
            Self::Party,
            Self::Attire,
            Self::Catering,
            Self::Decoration,
            Self::Photography,
        ]
    }

    /// Stable key stored in the gateway
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ceremony => "ceremony",
            Self::Party => "party",
            Self::Attire => "attire",
            Self::Catering => "catering",
            Self::Decoration => "decoration",
            Self::Photography => "photography",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ceremony => "Ceremony",
            Self::Party => "Party",
            Self::Attire => "Attire",
            Self::Catering => "Catering",
            Self::Decoration => "Decoration",
            Self::Photography => "Photography",
        }
    }

    /// Look up a built-in by its exact key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }

    /// Whether `key` is one of the built-in keys
    pub fn is_builtin_key(key: &str) -> bool {
        Self::from_key(key).is_some()
    }
}

impl fmt::Display for BuiltinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Named planned-spend presets for the built-in categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Economical,
    Standard,
    Luxury,
}

impl Scenario {
    /// All scenarios, cheapest first
    pub fn all() -> &'static [Self] {
        &[Self::Economical, Self::Standard, Self::Luxury]
    }

    /// Planned amount this scenario assigns to a built-in category
    pub fn planned(&self, category: BuiltinCategory) -> Money {
        use BuiltinCategory::*;
        let units = match (self, category) {
            (Self::Economical, Ceremony) => 3_000,
            (Self::Economical, Party) => 15_000,
            (Self::Economical, Attire) => 2_000,
            (Self::Economical, Catering) => 8_000,
            (Self::Economical, Decoration) => 3_000,
            (Self::Economical, Photography) => 3_000,

            (Self::Standard, Ceremony) => 8_000,
            (Self::Standard, Party) => 40_000,
            (Self::Standard, Attire) => 8_000,
            (Self::Standard, Catering) => 20_000,
            (Self::Standard, Decoration) => 8_000,
            (Self::Standard, Photography) => 6_000,

            (Self::Luxury, Ceremony) => 25_000,
            (Self::Luxury, Party) => 120_000,
            (Self::Luxury, Attire) => 25_000,
            (Self::Luxury, Catering) => 60_000,
            (Self::Luxury, Decoration) => 25_000,
            (Self::Luxury, Photography) => 15_000,
        };
        Money::from_units(units)
    }

    /// Sum of the planned amounts over all built-ins
    pub fn total(&self) -> Money {
        BuiltinCategory::all().iter().map(|c| self.planned(*c)).sum()
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Economical => "Economical",
            Self::Standard => "Standard",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economical" | "economy" | "eco" => Ok(Self::Economical),
            "standard" | "std" => Ok(Self::Standard),
            "luxury" | "lux" => Ok(Self::Luxury),
            other => Err(format!(
                "Unknown scenario '{}'. Use economical, standard or luxury.",
                other
            )),
        }
    }
}

/// How the wedding calculator treats built-in categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    /// Built-ins are always present, fixed, and scenario presets apply
    #[default]
    Presets,
    /// Only categories the couple created; nothing is fixed
    Custom,
}

impl CalculatorMode {
    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            Self::Presets => Self::Custom,
            Self::Custom => Self::Presets,
        }
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presets => write!(f, "presets"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for CalculatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "presets" | "preset" => Ok(Self::Presets),
            "custom" => Ok(Self::Custom),
            other => Err(format!("Unknown mode '{}'. Use presets or custom.", other)),
        }
    }
}
