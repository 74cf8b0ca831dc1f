//! # Section Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / diagram - Calculation results (JSON-serializable)
//! - `calculate(input)` / `check_load(input)` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`interaction`] - P-M interaction diagram sweep for a rectangular RC section
//! - [`load_check`] - Applied actions against resistances

pub mod interaction;
pub mod load_check;

use serde::{Deserialize, Serialize};

pub use interaction::{
    calculate, generate, generate_with, neutral_axis_samples, DiagramSummary, InteractionDiagram,
    InteractionInput, InteractionPoint, ModeCount, SweepOptions,
};
pub use load_check::{check_load, LoadCheckInput, LoadCheckResult};

/// Enum wrapper for all calculation types stored in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Interaction diagram for one section
    Interaction(InteractionInput),
    /// Load check against known resistances
    LoadCheck(LoadCheckInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Interaction(i) => &i.label,
            CalculationItem::LoadCheck(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Interaction(_) => "Interaction",
            CalculationItem::LoadCheck(_) => "LoadCheck",
        }
    }
}
