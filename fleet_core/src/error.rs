//! Error types for the fleet_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fleet_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No indicator was selected for a new event
    #[error("an indicator must be selected before recording an event")]
    MissingIndicator,

    /// The selected indicator is not in the catalog
    #[error("indicator '{0}' is not in the catalog")]
    UnknownIndicator(String),

    /// A speeding event was recorded without a positive speed
    #[error("a speed greater than 0 km/h is required for '{0}' events")]
    MissingSpeed(String),

    /// A report number string did not match the PREFIX-NNNN pattern
    #[error("invalid report number '{0}': expected PREFIX-NNNN")]
    InvalidReportNumber(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
