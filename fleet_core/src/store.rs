//! In-memory event store.
//!
//! Events live in insertion order for the lifetime of a session. Mutation
//! goes through [`crate::Session`], which owns the numbering and delete
//! confirmation invariants; this module only exposes reads publicly.

use crate::types::{Event, FieldFilter};
use serde::{Deserialize, Serialize};

/// Ordered sequence of recorded events
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in insertion order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Append an event, returning a reference to the stored record
    pub(crate) fn push(&mut self, event: Event) -> &Event {
        self.events.push(event);
        self.events.last().expect("push cannot leave store empty")
    }

    /// Remove the event at `index`. Later events shift down one position.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Event> {
        if index < self.events.len() {
            Some(self.events.remove(index))
        } else {
            None
        }
    }

    /// Events matching both filters, in insertion order. Pure.
    pub fn filter(&self, unit: &FieldFilter, indicator: &FieldFilter) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| unit.matches(&e.unit) && indicator.matches(&e.indicator))
            .collect()
    }

    /// Number of stored events whose indicator equals `indicator`
    pub fn count_by_indicator(&self, indicator: &str) -> usize {
        self.events.iter().filter(|e| e.indicator == indicator).count()
    }

    /// Distinct units across stored events, in first-seen order. Feeds the
    /// unit filter selector.
    pub fn distinct_units(&self) -> Vec<&str> {
        let mut units: Vec<&str> = Vec::new();
        for event in &self.events {
            if !units.contains(&event.unit.as_str()) {
                units.push(&event.unit);
            }
        }
        units
    }
}
