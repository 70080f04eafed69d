//! Session state container and event operations.
//!
//! A [`Session`] is created when the operator opens the tool and discarded
//! when it ends; it exclusively owns the event store, the indicator catalog
//! and the delete confirmation state. Every mutation of the log goes
//! through it.

use crate::catalog::{build_default_catalog, IndicatorCatalog, SPEEDING_INDICATOR};
use crate::config::Config;
use crate::report::{ReportNumber, ReportNumberer};
use crate::store::EventStore;
use crate::types::{Event, EventDraft, FieldFilter};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Delete confirmation state: a request parks the row index here until the
/// operator confirms or cancels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    Pending(usize),
}

/// Single-user session owning the event log for its lifetime
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    store: EventStore,
    catalog: IndicatorCatalog,
    numberer: ReportNumberer,
    delete: DeleteState,
}

impl Session {
    /// Start a session: base catalog plus any configured extra indicators,
    /// report numbering with the configured prefix, empty store.
    pub fn new(config: &Config) -> Self {
        let mut catalog = build_default_catalog();
        for label in &config.indicators.extra {
            catalog.add(label.clone());
        }

        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            store: EventStore::new(),
            catalog,
            numberer: ReportNumberer::new(config.report.prefix.clone()),
            delete: DeleteState::Idle,
        };

        tracing::info!(
            session_id = %session.id,
            indicators = session.catalog.len(),
            "session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// The report number the next successful add will receive. Shown in the
    /// form before submission; assignment happens at add time.
    pub fn next_report_number(&self) -> ReportNumber {
        self.numberer.next(&self.store)
    }

    /// Record a new event from the submitted form fields.
    ///
    /// Validation happens before any mutation: the indicator must be a
    /// non-empty catalog entry, and a speeding event needs a speed above
    /// 0 km/h. For any other indicator a supplied speed is dropped, so the
    /// stored record carries a speed exactly when it is a speeding event.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<&Event> {
        if draft.indicator.is_empty() {
            return Err(Error::MissingIndicator);
        }
        if !self.catalog.contains(&draft.indicator) {
            return Err(Error::UnknownIndicator(draft.indicator));
        }

        let speed_kmh = if draft.indicator == SPEEDING_INDICATOR {
            match draft.speed_kmh {
                Some(speed) if speed > 0 => Some(speed),
                _ => return Err(Error::MissingSpeed(SPEEDING_INDICATOR.to_string())),
            }
        } else {
            None
        };

        let report_number = self.numberer.next(&self.store);
        tracing::debug!(report = %report_number, indicator = %draft.indicator, "event recorded");

        Ok(self.store.push(Event {
            report_number,
            date: draft.date,
            indicator: draft.indicator,
            unit: draft.unit,
            driver: draft.driver,
            speed_kmh,
            location: draft.location,
            description: draft.description,
        }))
    }

    /// First phase of deletion: mark the row at `index` as pending and
    /// return it so the caller can show a confirmation summary.
    ///
    /// A no-op returning None when the store is empty or the index is out
    /// of range; a repeated request replaces the pending index.
    pub fn request_delete(&mut self, index: usize) -> Option<&Event> {
        if self.store.get(index).is_none() {
            tracing::debug!(index, "delete request ignored, no such row");
            return None;
        }
        self.delete = DeleteState::Pending(index);
        self.store.get(index)
    }

    /// The row currently awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<(usize, &Event)> {
        match self.delete {
            DeleteState::Pending(index) => self.store.get(index).map(|e| (index, e)),
            DeleteState::Idle => None,
        }
    }

    /// Second phase: remove the pending row and return to idle. Later rows
    /// shift down one position. Returns the removed event, or None when no
    /// delete was pending.
    pub fn confirm_delete(&mut self) -> Option<Event> {
        match std::mem::replace(&mut self.delete, DeleteState::Idle) {
            DeleteState::Pending(index) => {
                let removed = self.store.remove(index);
                if let Some(ref event) = removed {
                    tracing::info!(report = %event.report_number, "event deleted");
                }
                removed
            }
            DeleteState::Idle => None,
        }
    }

    /// Abandon a pending delete without touching the store
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete
    }

    /// Events matching both filters, in insertion order
    pub fn filter(&self, unit: &FieldFilter, indicator: &FieldFilter) -> Vec<&Event> {
        self.store.filter(unit, indicator)
    }

    /// Count of stored events carrying the given indicator
    pub fn count_by_indicator(&self, indicator: &str) -> usize {
        self.store.count_by_indicator(indicator)
    }

    /// One (label, count) pair per catalog entry in catalog order, zero
    /// counts included
    pub fn indicator_counts(&self) -> Vec<(&str, usize)> {
        self.catalog
            .iter()
            .map(|label| (label, self.store.count_by_indicator(label)))
            .collect()
    }

    /// Grow the catalog at runtime. Returns true when the label was new.
    pub fn add_indicator(&mut self, label: impl Into<String>) -> bool {
        let added = self.catalog.add(label);
        if added {
            tracing::info!(indicators = self.catalog.len(), "catalog grew");
        }
        added
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
