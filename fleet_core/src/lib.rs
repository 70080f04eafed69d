#![forbid(unsafe_code)]

//! Core domain model and record-management logic for the MGPS fleet
//! incident event log.
//!
//! This crate provides:
//! - Domain types (events, drafts, filters)
//! - The indicator catalog
//! - Correlative report numbering
//! - The session state container with add/delete/filter/aggregate
//!   operations
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod report;
pub mod catalog;
pub mod store;
pub mod session;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use report::{ReportNumber, ReportNumberer, DEFAULT_PREFIX};
pub use catalog::{build_default_catalog, default_catalog, IndicatorCatalog, SPEEDING_INDICATOR};
pub use store::EventStore;
pub use session::{DeleteState, Session};
pub use config::Config;
