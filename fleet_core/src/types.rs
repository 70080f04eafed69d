//! Core domain types for the fleet event log.
//!
//! This module defines the types shared across the system:
//! - Recorded events and the draft form that precedes them
//! - Filter selectors for the table view

use crate::report::ReportNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Event Types
// ============================================================================

/// One recorded incident tied to a unit/driver/indicator.
///
/// Events are created by [`crate::Session::add_event`], are immutable once
/// stored, and leave the store only through the confirmed delete flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Correlative identifier, e.g. "MGPS-0001"
    pub report_number: ReportNumber,
    pub date: NaiveDate,
    /// Category label from the indicator catalog
    pub indicator: String,
    pub unit: String,
    pub driver: String,
    /// Present and > 0 only for speeding events
    pub speed_kmh: Option<u32>,
    pub location: String,
    pub description: String,
}

/// Form fields for a new event, before a report number is assigned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventDraft {
    pub date: NaiveDate,
    pub indicator: String,
    pub unit: String,
    pub driver: String,
    pub speed_kmh: Option<u32>,
    pub location: String,
    pub description: String,
}

// ============================================================================
// Filter Types
// ============================================================================

/// Selector for one column of the table view: everything, or one exact value.
///
/// This is the typed form of the "all" sentinel the filter selectors use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    /// Match every event
    All,
    /// Match events whose field equals the given value
    Value(String),
}

impl FieldFilter {
    /// Parse a user-supplied selector. Empty input and the "all" sentinels
    /// (including the Spanish forms the original selectors used) mean All.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "all" | "todas" | "todos" => FieldFilter::All,
            _ => FieldFilter::Value(trimmed.to_string()),
        }
    }

    /// Whether the given field value passes this filter
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Value(wanted) => wanted == value,
        }
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        FieldFilter::All
    }
}
